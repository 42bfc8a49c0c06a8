//! Session variable storage
//!
//! Variables map a letters-only name to the decimal value it was assigned.
//! Values are always resolved literals; an assignment like `b = a` stores
//! the current value of `a`, not a reference to it. Entries are created or
//! overwritten by assignment and live as long as the session.

use crate::eval::Variables;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    values: BTreeMap<String, String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a variable
    pub fn assign(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl Variables for VariableTable {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}
