use super::*;
use parking_lot::Mutex;
use std::fmt;

/// The thread safe counterpart of [`CachedFunction`].
///
/// Comparing and storing each take the lock; the function runs between them
/// without it. Concurrent callers that miss at the same time may all compute,
/// and the last one to finish owns the slot.
pub struct SyncCachedFunction<A, T, F, P = Always> {
    function: F,
    cache: Mutex<SingleSlotCache<A, T, P>>,
}

impl<A, T, F> SyncCachedFunction<A, T, F> {
    pub fn new(function: F) -> Self
    where
        F: Fn(A) -> T,
    {
        SyncCachedFunction {
            function,
            cache: Mutex::new(SingleSlotCache::new()),
        }
    }

    pub fn fallible<E>(function: F) -> Self
    where
        F: Fn(A) -> std::result::Result<T, E>,
    {
        SyncCachedFunction {
            function,
            cache: Mutex::new(SingleSlotCache::new()),
        }
    }
}

impl<A, T, F, P> SyncCachedFunction<A, T, F, P> {
    pub fn with_policy<Q: HitPolicy<T>>(self) -> SyncCachedFunction<A, T, F, Q> {
        SyncCachedFunction {
            function: self.function,
            cache: Mutex::new(SingleSlotCache::with_policy()),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    pub fn clear(&self) {
        self.cache.lock().clear()
    }

    pub fn last_arguments(&self) -> Option<A>
    where
        A: Clone,
    {
        self.cache.lock().last_arguments().cloned()
    }

    pub fn cached(&self) -> Option<T>
    where
        T: Clone,
    {
        self.cache.lock().cached().cloned()
    }
}

impl<A, T, F, P> SyncCachedFunction<A, T, F, P>
where
    A: PartialEq + Clone,
    T: Clone,
    P: HitPolicy<T>,
{
    /// The function runs without the lock held, so it may call this
    /// cached function again.
    pub fn call(&self, args: A) -> T
    where
        F: Fn(A) -> T,
    {
        let hit = self.cache.lock().lookup(&args).cloned();
        if let Some(result) = hit {
            return result;
        }
        let result = (self.function)(args.clone());
        self.cache.lock().store(args, result).clone()
    }

    /// The error of a failed call is returned as is and nothing is stored.
    pub fn try_call<E>(&self, args: A) -> std::result::Result<T, E>
    where
        F: Fn(A) -> std::result::Result<T, E>,
    {
        let hit = self.cache.lock().lookup(&args).cloned();
        if let Some(result) = hit {
            return Ok(result);
        }
        match (self.function)(args.clone()) {
            Ok(result) => Ok(self.cache.lock().store(args, result).clone()),
            Err(error) => {
                self.cache.lock().clear();
                Err(error)
            }
        }
    }
}

impl<T, F, P> Producer for SyncCachedFunction<(), T, F, P>
where
    T: Clone,
    F: Fn(()) -> T,
    P: HitPolicy<T>,
{
    type Output = T;

    fn produce(&self) -> T {
        self.call(())
    }
}

impl<A: fmt::Debug, T: fmt::Debug, F, P> fmt::Debug for SyncCachedFunction<A, T, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncCachedFunction")
            .field("cache", &*self.cache.lock())
            .finish_non_exhaustive()
    }
}
