//! Partial assignments of values to variables.
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;

use crate::clause::{Clause, Lit};
use crate::value::Value;
use crate::var::Var;

/// A mapping from variables to values.
///
/// Entries are ordered by variable, so two assignments of the same values compare and hash equal
/// independent of the order in which they were built.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: BTreeMap<Var, Value>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Assignment {
        Assignment::default()
    }

    pub fn get(&self, var: Var) -> Option<Value> {
        self.values.get(&var).cloned()
    }

    pub fn contains(&self, var: Var) -> bool {
        self.values.contains_key(&var)
    }

    /// Assigns a value, returning the value it replaces.
    pub fn assign(&mut self, var: Var, value: Value) -> Option<Value> {
        self.values.insert(var, value)
    }

    /// Assigns the value required by a literal.
    pub fn assign_lit(&mut self, lit: Lit) -> Option<Value> {
        self.assign(lit.var(), lit.value())
    }

    /// A copy of this assignment extended by one more value.
    pub fn with(&self, var: Var, value: Value) -> Assignment {
        let mut extended = self.clone();
        extended.assign(var, value);
        extended
    }

    /// Assigns all values of `other`, replacing values of variables assigned in both.
    pub fn merge(&mut self, other: &Assignment) {
        self.values
            .extend(other.values.iter().map(|(&var, &value)| (var, value)));
    }

    /// Whether any literal of the clause holds.
    pub fn satisfies(&self, clause: &Clause) -> bool {
        clause.iter().any(|lit| self.get(lit.var()) == Some(lit.value()))
    }

    /// Whether every given variable is assigned.
    pub fn assigns_all(&self, vars: &[Var]) -> bool {
        vars.iter().all(|&var| self.contains(var))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Assigned variables and their values, ordered by variable.
    pub fn iter(&self) -> impl Iterator<Item = (Var, Value)> + '_ {
        self.values.iter().map(|(&var, &value)| (var, value))
    }
}

impl FromIterator<(Var, Value)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Var, Value)>>(iter: I) -> Assignment {
        Assignment {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Lit> for Assignment {
    fn from(lit: Lit) -> Assignment {
        let mut assignment = Assignment::new();
        assignment.assign_lit(lit);
        assignment
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{prelude::*, *};

    /// Partial assignments of 0 and 1 to the first `vars` variables.
    pub fn binary_assignment(vars: usize) -> impl Strategy<Value = Assignment> {
        collection::vec(option::of(bool::ANY), vars).prop_map(|levels| {
            levels
                .into_iter()
                .enumerate()
                .filter_map(|(index, level)| {
                    level.map(|level| (Var::from_index(index), Value::from(level)))
                })
                .collect()
        })
    }
}
