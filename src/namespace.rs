use super::*;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

type Method<A, T> = Rc<dyn Fn(A) -> T>;

/// Deferred call of a function with its arguments bound.
///
/// Every [`build`](Factory::build) calls the function again, so each build
/// yields a fresh instance.
pub struct Factory<A, T> {
    method: Method<A, T>,
    args: A,
}

impl<A: Clone, T> Factory<A, T> {
    pub fn build(&self) -> T {
        (self.method)(self.args.clone())
    }
}

impl<A: Clone, T> Producer for Factory<A, T> {
    type Output = T;

    fn produce(&self) -> T {
        self.build()
    }
}

impl<A: fmt::Debug, T> fmt::Debug for Factory<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory").field("args", &self.args).finish_non_exhaustive()
    }
}

/// A [`Factory`] of layers that can be applied directly: `forward(input)`
/// builds a fresh layer and feeds it `input`.
pub struct CallableFactory<A, L> {
    method: Method<A, L>,
    args: A,
}

impl<A: Clone, L> CallableFactory<A, L> {
    pub fn build(&self) -> L {
        (self.method)(self.args.clone())
    }
}

impl<A: Clone, I, L: Layer<I>> Layer<I> for CallableFactory<A, L> {
    type Output = L::Output;

    fn forward(&self, input: I) -> Self::Output {
        self.build().forward(input)
    }
}

impl<A: fmt::Debug, L> fmt::Debug for CallableFactory<A, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableFactory").field("args", &self.args).finish_non_exhaustive()
    }
}

pub fn to_factory<A, T, F>(function: F) -> impl Fn(A) -> Factory<A, T>
where
    F: Fn(A) -> T + 'static,
{
    let method: Method<A, T> = Rc::new(function);
    move |args| Factory {
        method: Rc::clone(&method),
        args,
    }
}

pub fn to_callable_factory<A, L, F>(function: F) -> impl Fn(A) -> CallableFactory<A, L>
where
    F: Fn(A) -> L + 'static,
{
    let method: Method<A, L> = Rc::new(function);
    move |args| CallableFactory {
        method: Rc::clone(&method),
        args,
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if name.starts_with("__") {
        return Err(Error::ReservedName(name.to_owned()));
    }
    Ok(())
}

struct Methods<A, T> {
    namespace: String,
    methods: BTreeMap<String, Method<A, T>>,
}

impl<A, T> Methods<A, T> {
    fn get(&self, name: &str) -> Result<&Method<A, T>> {
        self.methods.get(name).ok_or_else(|| Error::UnknownMethod {
            namespace: self.namespace.clone(),
            name: name.to_owned(),
        })
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl<A, T> fmt::Debug for Methods<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.namespace)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A named group of functions sharing one signature.
///
/// Methods are registered explicitly and listed in name order. Names starting
/// with `__` are reserved.
///
/// Every method takes `A` and returns `T`. Methods with different signatures
/// share a namespace through an enum argument or output type, one variant
/// per signature.
pub struct Namespace<A, T>(Methods<A, T>);

impl<A: 'static, T: 'static> Namespace<A, T> {
    pub fn new(name: impl Into<String>) -> Self {
        Namespace(Methods {
            namespace: name.into(),
            methods: BTreeMap::new(),
        })
    }

    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> Result<&mut Self>
    where
        F: Fn(A) -> T + 'static,
    {
        let name = name.into();
        check_name(&name)?;
        if self.0.methods.contains_key(&name) {
            return Err(Error::DuplicateMethod {
                namespace: self.0.namespace.clone(),
                name,
            });
        }
        debug!("registering `{}::{}`", self.0.namespace, name);
        self.0.methods.insert(name, Rc::new(function));
        Ok(self)
    }

    pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Result<Self>
    where
        F: Fn(A) -> T + 'static,
    {
        self.register(name, function)?;
        Ok(self)
    }
}

impl<A, T> Namespace<A, T> {
    pub fn name(&self) -> &str {
        &self.0.namespace
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.methods.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.names()
    }

    pub fn len(&self) -> usize {
        self.0.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.methods.is_empty()
    }

    pub fn call(&self, name: &str, args: A) -> Result<T> {
        let method = self.0.get(name)?;
        Ok(method(args))
    }

    /// Every method now returns a [`Factory`] instead of running.
    pub fn into_factory(self) -> FactoryNamespace<A, T> {
        debug!("converting namespace `{}` to factories", self.0.namespace);
        FactoryNamespace(self.0)
    }

    /// Every method now returns a [`CallableFactory`] instead of running.
    pub fn into_callable_factory(self) -> CallableFactoryNamespace<A, T> {
        debug!("converting namespace `{}` to callable factories", self.0.namespace);
        CallableFactoryNamespace(self.0)
    }
}

impl<A, T> fmt::Debug for Namespace<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

pub struct FactoryNamespace<A, T>(Methods<A, T>);

impl<A, T> FactoryNamespace<A, T> {
    pub fn name(&self) -> &str {
        &self.0.namespace
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.names()
    }

    pub fn call(&self, name: &str, args: A) -> Result<Factory<A, T>> {
        let method = self.0.get(name)?;
        Ok(Factory {
            method: Rc::clone(method),
            args,
        })
    }
}

impl<A, T> fmt::Debug for FactoryNamespace<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

pub struct CallableFactoryNamespace<A, L>(Methods<A, L>);

impl<A, L> CallableFactoryNamespace<A, L> {
    pub fn name(&self) -> &str {
        &self.0.namespace
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.names()
    }

    pub fn call(&self, name: &str, args: A) -> Result<CallableFactory<A, L>> {
        let method = self.0.get(name)?;
        Ok(CallableFactory {
            method: Rc::clone(method),
            args,
        })
    }
}

impl<A, L> fmt::Debug for CallableFactoryNamespace<A, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
