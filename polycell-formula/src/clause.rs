//! Literals and clauses.
use std::fmt;
use std::iter::FromIterator;

use crate::value::Value;
use crate::var::Var;

/// A variable together with a value required for it.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Lit {
    var: Var,
    value: Value,
}

impl Lit {
    #[inline]
    pub fn new(var: Var, value: Value) -> Lit {
        Lit { var, value }
    }

    #[inline]
    pub fn var(self) -> Var {
        self.var
    }

    #[inline]
    pub fn value(self) -> Value {
        self.value
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}={:?}", self.var, self.value)
    }
}

/// A disjunction of literals.
///
/// A clause is satisfied when any of its variables takes the value required for it. Every
/// variable occurs at most once, literals are kept in insertion order.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    /// Creates an empty clause.
    pub fn new() -> Clause {
        Clause::default()
    }

    /// Creates a clause from a slice of literals, see [`insert`](Clause::insert).
    pub fn from_lits(lits: &[Lit]) -> Clause {
        lits.iter().cloned().collect()
    }

    /// Adds a literal.
    ///
    /// If the variable is already present, its required value is replaced while keeping its
    /// position.
    pub fn insert(&mut self, var: Var, value: Value) {
        match self.lits.iter_mut().find(|lit| lit.var == var) {
            Some(lit) => lit.value = value,
            None => self.lits.push(Lit::new(var, value)),
        }
    }

    /// The value required for a variable, if the variable is present.
    pub fn get(&self, var: Var) -> Option<Value> {
        self.lits
            .iter()
            .find(|lit| lit.var == var)
            .map(|lit| lit.value)
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.lits.iter().cloned()
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// The only literal of a unit clause.
    pub fn unit(&self) -> Option<Lit> {
        match self.lits[..] {
            [lit] => Some(lit),
            _ => None,
        }
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Clause {
        let mut clause = Clause::new();
        for lit in iter {
            clause.insert(lit.var, lit.value);
        }
        clause
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("(")?;
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            fmt::Debug::fmt(lit, f)?;
        }
        f.write_str(")")
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::SizeRange, prelude::*, *};

    /// A literal over the first `vars` variables requiring 0 or 1.
    pub fn binary_lit(vars: usize) -> impl Strategy<Value = Lit> {
        (0..vars, bool::ANY)
            .prop_map(|(index, level)| Lit::new(Var::from_index(index), Value::from(level)))
    }

    /// Clauses over the first `vars` variables, all with the domain {0, 1}.
    ///
    /// Repeated variables within a clause are merged, so clauses may be shorter than requested.
    pub fn binary_clauses(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = (usize, Vec<Clause>)> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        vars.prop_ind_flat_map(move |vars| {
            let clause = collection::vec(binary_lit(vars), clause_len.clone())
                .prop_map(|lits| lits.into_iter().collect::<Clause>());
            (Just(vars), collection::vec(clause, clauses.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut clause = clause![0 => U, 3 => 1];
        clause.insert(var!(0), value!(G));
        clause.insert(var!(2), value!(0));

        assert_eq!(
            clause.lits(),
            &[
                Lit::new(var!(0), value!(G)),
                Lit::new(var!(3), value!(1)),
                Lit::new(var!(2), value!(0)),
            ]
        );
        assert_eq!(clause.get(var!(3)), Some(Value::ONE));
        assert_eq!(clause.get(var!(1)), None);
    }

    #[test]
    fn unit() {
        assert_eq!(clause![].unit(), None);
        assert_eq!(clause![4 => 1].unit(), Some(Lit::new(var!(4), Value::ONE)));
        assert_eq!(clause![4 => 1, 5 => 0].unit(), None);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", clause![0 => U, 1 => 0]), "(v0=U | v1=0)");
    }
}
