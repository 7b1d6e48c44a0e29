use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Something that maps one input to one output, like a model layer.
pub trait Layer<I> {
    type Output;

    fn forward(&self, input: I) -> Self::Output;
}

impl<I, O, F: Fn(I) -> O> Layer<I> for F {
    type Output = O;

    fn forward(&self, input: I) -> O {
        self(input)
    }
}

#[derive(Debug, Default)]
struct Names {
    counters: HashMap<String, usize>,
    issued: HashSet<String>,
}

/// Hands out unique names: `Block`, `Block_1`, `Block_2`, ...
///
/// A suffixed candidate that was already issued (say the label `Block_1`
/// after two `Block`s) is skipped, so no name is ever handed out twice.
#[derive(Debug, Default)]
pub struct NameScope {
    names: Mutex<Names>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static NameScope {
        static GLOBAL: OnceLock<NameScope> = OnceLock::new();
        GLOBAL.get_or_init(NameScope::new)
    }

    pub fn unique_name(&self, base: &str) -> String {
        let mut guard = self.names.lock();
        let names = &mut *guard;
        let count = names.counters.entry(base.to_owned()).or_insert(0);
        loop {
            let candidate = match *count {
                0 => base.to_owned(),
                n => format!("{}_{}", base, n),
            };
            *count += 1;
            if names.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn reset(&self) {
        let mut names = self.names.lock();
        names.counters.clear();
        names.issued.clear();
    }
}

/// Groups the computation `op` under one label so it shows up as a single
/// named block.
///
/// Each application instantiates a fresh [`SubModel`] with its own unique
/// name, taken from the group's [`NameScope`].
pub struct LayerGroup<'s, F> {
    name: String,
    op: F,
    scope: &'s NameScope,
}

impl<F> LayerGroup<'static, F> {
    pub fn new(name: impl Into<String>, op: F) -> Self {
        LayerGroup::in_scope(NameScope::global(), name, op)
    }
}

impl<'s, F> LayerGroup<'s, F> {
    pub fn in_scope(scope: &'s NameScope, name: impl Into<String>, op: F) -> Self {
        LayerGroup {
            name: name.into(),
            op,
            scope,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instantiate(&self) -> SubModel<'_, F> {
        let name = self.scope.unique_name(&self.name);
        trace!("instantiating sub-model `{}` of group `{}`", name, self.name);
        SubModel { name, op: &self.op }
    }
}

impl<'s, I, F: Layer<I>> Layer<I> for LayerGroup<'s, F> {
    type Output = F::Output;

    fn forward(&self, input: I) -> Self::Output {
        self.instantiate().forward(input)
    }
}

impl<'s, F> fmt::Debug for LayerGroup<'s, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerGroup")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One named instance of a [`LayerGroup`].
pub struct SubModel<'g, F> {
    name: String,
    op: &'g F,
}

impl<'g, F> SubModel<'g, F> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<'g, I, F: Layer<I>> Layer<I> for SubModel<'g, F> {
    type Output = F::Output;

    fn forward(&self, input: I) -> Self::Output {
        self.op.forward(input)
    }
}

impl<'g, F> fmt::Debug for SubModel<'g, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubModel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
