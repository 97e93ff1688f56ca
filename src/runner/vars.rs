//! Global variable store

/// A `name = value` definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// Variables in definition order
///
/// Redefining a name appends another entry; lookups return the earliest
/// definition, so later duplicates never shadow it.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    vars: Vec<Variable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.push(Variable {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Value of the first definition of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|var| var.name == name)
            .map(|var| var.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
