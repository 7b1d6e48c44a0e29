use super::*;
use std::fmt;
use std::rc::Rc;

enum Inner<V> {
    Lazy(Box<dyn Producer<Output = V>>),
    Eager(V),
}

/// A value that is either stored or produced on demand.
///
/// A lazy value runs its producer on *every* read; wrap the producer in a
/// [`CachedFunction`] (or build it through [`LazyOptions`] with caching
/// enabled) to compute it once.
pub struct LazyValue<V>(Inner<V>);

impl<V> LazyValue<V> {
    pub fn lazy<P: Producer<Output = V> + 'static>(producer: P) -> Self {
        LazyValue(Inner::Lazy(Box::new(producer)))
    }

    pub fn eager(value: V) -> Self {
        LazyValue(Inner::Eager(value))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.0, Inner::Lazy(_))
    }

    pub fn into_value(self) -> V {
        match self.0 {
            Inner::Lazy(producer) => producer.produce(),
            Inner::Eager(value) => value,
        }
    }

    /// Run the producer one last time and keep its result.
    pub fn into_eager(self) -> Self {
        LazyValue::eager(self.into_value())
    }
}

impl<V: Clone> LazyValue<V> {
    pub fn value(&self) -> V {
        match &self.0 {
            Inner::Lazy(producer) => producer.produce(),
            Inner::Eager(value) => value.clone(),
        }
    }
}

impl<V> From<V> for LazyValue<V> {
    fn from(value: V) -> Self {
        LazyValue::eager(value)
    }
}

impl<V: fmt::Debug> fmt::Debug for LazyValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Lazy(_) => f.write_str("LazyValue(<lazy>)"),
            Inner::Eager(value) => f.debug_tuple("LazyValue").field(value).finish(),
        }
    }
}

/// How [`LazyOptions::build`] turns a computation into a [`LazyValue`].
///
/// Defaults to lazy and uncached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LazyOptions {
    lazy: bool,
    cached: bool,
}

impl Default for LazyOptions {
    fn default() -> Self {
        LazyOptions {
            lazy: true,
            cached: false,
        }
    }
}

impl LazyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Eager values are computed right here, exactly once, so `cached` has
    /// no effect on them.
    pub fn build<V, F>(&self, computation: F) -> LazyValue<V>
    where
        V: Clone + 'static,
        F: Fn() -> V + 'static,
    {
        match (self.lazy, self.cached) {
            (true, true) => LazyValue::lazy(CachedFunction::new(move |()| computation())),
            (true, false) => LazyValue::lazy(computation),
            (false, _) => LazyValue::eager(computation()),
        }
    }
}

/// Turn `function` into a function returning [`LazyValue`]s.
///
/// Every call binds its arguments into a fresh value built with `options`;
/// cached values don't share their slot with each other.
pub fn lazy_fn<A, V, F>(function: F, options: LazyOptions) -> impl Fn(A) -> LazyValue<V>
where
    A: Clone + 'static,
    V: Clone + 'static,
    F: Fn(A) -> V + 'static,
{
    let function = Rc::new(function);
    move |args: A| {
        let function = Rc::clone(&function);
        options.build(move || function(args.clone()))
    }
}
