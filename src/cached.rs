use super::*;
use std::cell::RefCell;
use std::fmt;

/// A function that remembers its last result.
///
/// Calling it again with equal arguments returns a clone of the stored result
/// instead of running the function; any other arguments replace the stored
/// result. See [`SingleSlotCache`].
///
/// The slot lives in a `RefCell`, so a `CachedFunction` is not `Sync`; use
/// [`SyncCachedFunction`] to share one between threads. The function itself
/// runs outside the borrow and may recurse through the same `CachedFunction`:
/// the outermost call stores last.
pub struct CachedFunction<A, T, F, P = Always> {
    function: F,
    cache: RefCell<SingleSlotCache<A, T, P>>,
}

impl<A, T, F> CachedFunction<A, T, F> {
    pub fn new(function: F) -> Self
    where
        F: Fn(A) -> T,
    {
        CachedFunction {
            function,
            cache: RefCell::new(SingleSlotCache::new()),
        }
    }

    /// Wrap a function that can fail. Only `Ok` results are remembered; use
    /// [`try_call`](Self::try_call) to invoke it.
    pub fn fallible<E>(function: F) -> Self
    where
        F: Fn(A) -> std::result::Result<T, E>,
    {
        CachedFunction {
            function,
            cache: RefCell::new(SingleSlotCache::new()),
        }
    }
}

impl<A, T, F, P> CachedFunction<A, T, F, P> {
    /// Switch to another hit policy. The stored result is dropped.
    pub fn with_policy<Q: HitPolicy<T>>(self) -> CachedFunction<A, T, F, Q> {
        CachedFunction {
            function: self.function,
            cache: RefCell::new(SingleSlotCache::with_policy()),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear()
    }

    pub fn last_arguments(&self) -> Option<A>
    where
        A: Clone,
    {
        self.cache.borrow().last_arguments().cloned()
    }

    pub fn cached(&self) -> Option<T>
    where
        T: Clone,
    {
        self.cache.borrow().cached().cloned()
    }
}

impl<A, T, F, P> CachedFunction<A, T, F, P>
where
    A: PartialEq + Clone,
    T: Clone,
    P: HitPolicy<T>,
{
    /// The function runs without the RefCell borrow held, so it may call this
    /// cached function again.
    pub fn call(&self, args: A) -> T
    where
        F: Fn(A) -> T,
    {
        let hit = self.cache.borrow_mut().lookup(&args).cloned();
        if let Some(result) = hit {
            return result;
        }
        let result = (self.function)(args.clone());
        self.cache.borrow_mut().store(args, result).clone()
    }

    /// The error of a failed call is returned as is and nothing is stored.
    pub fn try_call<E>(&self, args: A) -> std::result::Result<T, E>
    where
        F: Fn(A) -> std::result::Result<T, E>,
    {
        let hit = self.cache.borrow_mut().lookup(&args).cloned();
        if let Some(result) = hit {
            return Ok(result);
        }
        match (self.function)(args.clone()) {
            Ok(result) => Ok(self.cache.borrow_mut().store(args, result).clone()),
            Err(error) => {
                self.cache.borrow_mut().clear();
                Err(error)
            }
        }
    }
}

impl<T, F, P> Producer for CachedFunction<(), T, F, P>
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

impl<A: fmt::Debug, T: fmt::Debug, F, P> fmt::Debug for CachedFunction<A, T, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedFunction")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
