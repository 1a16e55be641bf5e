use std::collections::HashMap;

use crate::types::Type;
use crate::variable::Variable;

/// Typed key/value storage attached to one script object.
///
/// Entries are keyed by `(name, type)`: the same name stored as an int and
/// as a float holds two independent values.
#[derive(Debug, Default, Clone)]
pub struct LocalVariables {
    entries: HashMap<Type, HashMap<String, Variable>>,
}

impl LocalVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str, ty: Type) -> Variable {
        self.entries
            .get(&ty)
            .and_then(|by_name| by_name.get(name))
            .cloned()
            .unwrap_or_else(|| Variable::zero(ty))
    }

    /// Creates or overwrites the entry keyed by `name` and the value's type.
    pub fn set(&mut self, name: impl Into<String>, value: Variable) {
        let ty = value.var_type();
        if ty == Type::Void {
            return;
        }
        self.entries
            .entry(ty)
            .or_default()
            .insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str, ty: Type) -> Option<Variable> {
        let by_name = self.entries.get_mut(&ty)?;
        let removed = by_name.remove(name);
        if by_name.is_empty() {
            self.entries.remove(&ty);
        }
        removed
    }

    pub fn contains(&self, name: &str, ty: Type) -> bool {
        self.entries
            .get(&ty)
            .map(|by_name| by_name.contains_key(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
