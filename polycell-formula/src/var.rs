//! Variables of a circuit model.
use std::{fmt, ops};

use crate::assignment::Assignment;
use crate::value::{Domain, DomainError, Value};

/// The backing type used to represent variables.
pub type VarIdx = u32;

/// Index of a variable within [`Variables`].
///
/// Variables are numbered from 0 in the order they were added.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var {
    index: VarIdx,
}

impl Var {
    /// Creates a variable from a 0-based index.
    #[inline]
    pub fn from_index(index: usize) -> Var {
        debug_assert!(index <= VarIdx::max_value() as usize);
        Var {
            index: index as VarIdx,
        }
    }

    /// The 0-based index representing this variable.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.index)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a variable stands for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VarKind {
    /// A wire of the circuit.
    Signal,
    /// Health of an AND gate.
    AndHealth,
    /// Health of an XOR gate.
    XorHealth,
}

impl VarKind {
    /// Whether this is the health variable of a gate.
    pub fn is_health(self) -> bool {
        self != VarKind::Signal
    }
}

/// A named variable with a finite domain and an optional current value.
#[derive(Clone, Debug)]
pub struct Variable {
    name: String,
    kind: VarKind,
    domain: Domain,
    success_probability: Option<f64>,
    value: Option<Value>,
}

impl Variable {
    /// Creates a signal variable over the given domain.
    pub fn new(
        name: impl Into<String>,
        domain: Domain,
        value: Option<Value>,
    ) -> Result<Variable, DomainError> {
        let mut variable = Variable {
            name: name.into(),
            kind: VarKind::Signal,
            domain,
            success_probability: None,
            value: None,
        };
        variable.set_value(value)?;
        Ok(variable)
    }

    /// Creates an unset signal with the domain {0, 1}.
    pub fn signal(name: impl Into<String>) -> Variable {
        Variable {
            name: name.into(),
            kind: VarKind::Signal,
            domain: Domain::binary(),
            success_probability: None,
            value: None,
        }
    }

    /// Creates the health variable of an AND gate.
    pub fn and_health(
        name: impl Into<String>,
        success_probability: f64,
    ) -> Result<Variable, DomainError> {
        Variable::health(name.into(), VarKind::AndHealth, success_probability)
    }

    /// Creates the health variable of an XOR gate.
    pub fn xor_health(
        name: impl Into<String>,
        success_probability: f64,
    ) -> Result<Variable, DomainError> {
        Variable::health(name.into(), VarKind::XorHealth, success_probability)
    }

    fn health(
        name: String,
        kind: VarKind,
        success_probability: f64,
    ) -> Result<Variable, DomainError> {
        debug_assert!(kind.is_health());
        // Also rejects NaN
        if !(success_probability > 0.0 && success_probability < 1.0) {
            return Err(DomainError::Probability {
                name,
                probability: success_probability,
            });
        }
        Ok(Variable {
            name,
            kind,
            domain: Domain::health(),
            success_probability: Some(success_probability),
            value: None,
        })
    }

    /// Sets an initial value, see [`set_value`](Variable::set_value).
    pub fn with_value(mut self, value: Value) -> Result<Variable, DomainError> {
        self.set_value(Some(value))?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Prior probability that the gate behaves correctly, present for health variables.
    pub fn success_probability(&self) -> Option<f64> {
        self.success_probability
    }

    pub fn value(&self) -> Option<Value> {
        self.value
    }

    /// Sets or clears the current value.
    ///
    /// Fails without changing the variable if the value is not in the domain.
    pub fn set_value(&mut self, value: Option<Value>) -> Result<(), DomainError> {
        if let Some(value) = value {
            if !self.domain.contains(value) {
                return Err(DomainError::Value {
                    name: self.name.clone(),
                    value,
                    domain: self.domain.clone(),
                });
            }
        }
        self.value = value;
        Ok(())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// All variables of a model.
#[derive(Clone, Default, Debug)]
pub struct Variables {
    variables: Vec<Variable>,
}

impl Variables {
    pub fn new() -> Variables {
        Variables::default()
    }

    /// Adds a variable, returning its index.
    pub fn add(&mut self, variable: Variable) -> Var {
        let var = Var::from_index(self.variables.len());
        self.variables.push(variable);
        var
    }

    pub fn get(&self, var: Var) -> Option<&Variable> {
        self.variables.get(var.index())
    }

    pub fn contains(&self, var: Var) -> bool {
        var.index() < self.variables.len()
    }

    /// Looks up the first variable with the given name.
    pub fn find(&self, name: &str) -> Option<Var> {
        self.variables
            .iter()
            .position(|variable| variable.name == name)
            .map(Var::from_index)
    }

    /// Sets or clears the value of a variable.
    ///
    /// Panics if `var` is not a variable of this set.
    pub fn set_value(&mut self, var: Var, value: Option<Value>) -> Result<(), DomainError> {
        self.variables[var.index()].set_value(value)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterator over all variables and their indices.
    pub fn iter(&self) -> impl Iterator<Item = (Var, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, variable)| (Var::from_index(index), variable))
    }

    /// The values of all variables that have one.
    ///
    /// These are the observed and otherwise fixed values a search does not change.
    pub fn fixed_assignment(&self) -> Assignment {
        self.iter()
            .filter_map(|(var, variable)| variable.value.map(|value| (var, value)))
            .collect()
    }
}

impl ops::Index<Var> for Variables {
    type Output = Variable;

    #[inline]
    fn index(&self, var: Var) -> &Variable {
        &self.variables[var.index()]
    }
}
