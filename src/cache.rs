use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Values that can be "empty": zero, an empty collection, `None`.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

macro_rules! truthy_numbers {
    ($zero:expr => $($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != $zero
            }
        })*
    };
}

truthy_numbers!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
truthy_numbers!(0.0 => f32, f64);

macro_rules! truthy_collections {
    ($($t:ty),*) => {
        $(impl<T> Truthy for $t {
            fn is_truthy(&self) -> bool {
                !self.is_empty()
            }
        })*
    };
}

truthy_collections!(Vec<T>, [T], VecDeque<T>, BTreeSet<T>);

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

impl<K, V> Truthy for BTreeMap<K, V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Truthy for HashMap<K, V, S> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, S> Truthy for HashSet<T, S> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// Decides whether a stored result may be served when the arguments match.
pub trait HitPolicy<T: ?Sized> {
    fn is_hit(cached: &T) -> bool;
}

/// Any stored result is a hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Always;

impl<T: ?Sized> HitPolicy<T> for Always {
    fn is_hit(_cached: &T) -> bool {
        true
    }
}

/// Only a [`Truthy`] result is a hit: an empty result is recomputed on every
/// call even when the arguments did not change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NonEmpty;

impl<T: Truthy + ?Sized> HitPolicy<T> for NonEmpty {
    fn is_hit(cached: &T) -> bool {
        cached.is_truthy()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn calls(&self) -> u64 {
        self.hits + self.misses
    }
}

#[derive(Debug)]
struct Slot<A, T> {
    arguments: A,
    result: T,
}

/// Remembers one result together with the arguments that produced it.
///
/// A lookup with arguments equal (`PartialEq`) to the stored ones returns the
/// stored result; anything else recomputes and overwrites the slot. There is
/// no history: alternating between two argument sets recomputes every time.
pub struct SingleSlotCache<A, T, P = Always> {
    slot: Option<Slot<A, T>>,
    stats: CacheStats,
    policy: PhantomData<P>,
}

impl<A, T> SingleSlotCache<A, T> {
    pub fn new() -> Self {
        Self::with_policy()
    }
}

impl<A, T, P> Default for SingleSlotCache<A, T, P> {
    fn default() -> Self {
        Self::with_policy()
    }
}

impl<A, T, P> SingleSlotCache<A, T, P> {
    pub fn with_policy() -> Self {
        SingleSlotCache {
            slot: None,
            stats: CacheStats::default(),
            policy: PhantomData,
        }
    }

    pub fn last_arguments(&self) -> Option<&A> {
        self.slot.as_ref().map(|slot| &slot.arguments)
    }

    pub fn cached(&self) -> Option<&T> {
        self.slot.as_ref().map(|slot| &slot.result)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Forget the stored result. Statistics are kept.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl<A: PartialEq, T, P: HitPolicy<T>> SingleSlotCache<A, T, P> {
    fn matches(&self, args: &A) -> bool {
        matches!(&self.slot, Some(slot) if slot.arguments == *args && P::is_hit(&slot.result))
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.stats.hits += 1;
            trace!("single slot cache hit ({} hits)", self.stats.hits);
        } else {
            self.stats.misses += 1;
            trace!("single slot cache miss ({} misses)", self.stats.misses);
        }
    }

    /// Compare `args` with the slot and count the outcome. `None` is a miss:
    /// compute the result and hand it to [`store`](Self::store).
    pub fn lookup(&mut self, args: &A) -> Option<&T> {
        let hit = self.matches(args);
        self.record(hit);
        if hit {
            self.cached()
        } else {
            None
        }
    }

    pub fn store(&mut self, args: A, result: T) -> &T {
        &self
            .slot
            .insert(Slot {
                arguments: args,
                result,
            })
            .result
    }

    pub fn get_or_insert_with<F>(&mut self, args: A, f: F) -> &T
    where
        F: FnOnce(&A) -> T,
    {
        match self.get_or_try_insert_with(args, |args| Ok::<T, Infallible>(f(args))) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// On `Err` the slot is left empty, so the next call recomputes whatever
    /// its arguments are.
    pub fn get_or_try_insert_with<E, F>(&mut self, args: A, f: F) -> Result<&T, E>
    where
        F: FnOnce(&A) -> Result<T, E>,
    {
        let hit = self.matches(&args);
        self.record(hit);
        let slot = match self.slot.take() {
            Some(slot) if hit => slot,
            _ => Slot {
                result: f(&args)?,
                arguments: args,
            },
        };
        Ok(&self.slot.insert(slot).result)
    }
}

impl<A: fmt::Debug, T: fmt::Debug, P> fmt::Debug for SingleSlotCache<A, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleSlotCache")
            .field("last_arguments", &self.last_arguments())
            .field("cached", &self.cached())
            .field("stats", &self.stats)
            .finish()
    }
}
