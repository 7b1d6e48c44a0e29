//! Lazily evaluated values and single-slot memoization.
//!
//! The building blocks are small and compose by plain function wrapping:
//!
//! * [`SingleSlotCache`] remembers the result of the last call together with
//!   the arguments that produced it.
//! * [`CachedFunction`] (and its thread safe twin [`SyncCachedFunction`])
//!   bundles a function with such a slot.
//! * [`LazyValue`] holds either a plain value or a [`Producer`] that is run
//!   on every read.
//! * [`Namespace`] and [`LayerGroup`] adapt groups of functions to the
//!   "factory" and "layer" calling conventions of model building code.

#[macro_use]
extern crate log;

mod cache;
mod cached;
mod error;
mod layer;
mod lazy;
mod namespace;
mod sync;

pub use cache::{Always, CacheStats, HitPolicy, NonEmpty, SingleSlotCache, Truthy};
pub use cached::CachedFunction;
pub use error::{Error, Result};
pub use layer::{Layer, LayerGroup, NameScope, SubModel};
pub use lazy::{lazy_fn, LazyOptions, LazyValue};
pub use namespace::{
    to_callable_factory, to_factory, CallableFactory, CallableFactoryNamespace, Factory,
    FactoryNamespace, Namespace,
};
pub use sync::SyncCachedFunction;

/// A computation that takes no arguments.
pub trait Producer {
    type Output;

    fn produce(&self) -> Self::Output;
}

impl<V, F: Fn() -> V> Producer for F {
    type Output = V;

    fn produce(&self) -> V {
        self()
    }
}
