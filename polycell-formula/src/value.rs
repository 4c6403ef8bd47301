//! Values, domains and domain errors.
use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

/// Assumed health status of a gate.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Health {
    Good,
    Unreliable,
}

impl Health {
    /// The other health status.
    #[inline]
    pub fn flipped(self) -> Health {
        match self {
            Health::Good => Health::Unreliable,
            Health::Unreliable => Health::Good,
        }
    }
}

/// A value a variable can take.
///
/// Signals of a circuit take integer levels (normally 0 and 1), gate health variables take a
/// [`Health`] value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Int(i64),
    Health(Health),
}

impl Value {
    /// Logic level 0.
    pub const ZERO: Value = Value::Int(0);
    /// Logic level 1.
    pub const ONE: Value = Value::Int(1);
    /// A gate assumed to be good.
    pub const GOOD: Value = Value::Health(Health::Good);
    /// A gate assumed to be unreliable.
    pub const UNRELIABLE: Value = Value::Health(Health::Unreliable);

    /// The health status if this is a health value.
    #[inline]
    pub fn health(self) -> Option<Health> {
        match self {
            Value::Health(health) => Some(health),
            Value::Int(_) => None,
        }
    }
}

impl From<Health> for Value {
    #[inline]
    fn from(health: Health) -> Value {
        Value::Health(health)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(level: bool) -> Value {
        Value::Int(level as i64)
    }
}

/// Integers are printed as is, health values as `G` and `U`.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(level) => write!(f, "{}", level),
            Value::Health(Health::Good) => write!(f, "G"),
            Value::Health(Health::Unreliable) => write!(f, "U"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finite set of values admissible for a variable.
///
/// The order of values is kept. It is the order in which a search branches over the values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    values: SmallVec<[Value; 2]>,
}

impl Domain {
    /// Creates a domain from the given values, dropping repeated values.
    pub fn new(values: impl IntoIterator<Item = Value>) -> Domain {
        let mut domain = Domain {
            values: SmallVec::new(),
        };
        for value in values {
            if !domain.contains(value) {
                domain.values.push(value);
            }
        }
        domain
    }

    /// The domain {0, 1} of a logic signal.
    pub fn binary() -> Domain {
        Domain::new([Value::ZERO, Value::ONE].iter().cloned())
    }

    /// The domain {G, U} of a gate health variable.
    pub fn health() -> Domain {
        Domain::new([Value::GOOD, Value::UNRELIABLE].iter().cloned())
    }

    pub fn contains(&self, value: Value) -> bool {
        self.values.contains(&value)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.values.iter()).finish()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A value or parameter outside of what a variable admits.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DomainError {
    #[error(
        "Assigned value {} is not in domain {} of variable {}",
        value,
        domain,
        name
    )]
    Value {
        name: String,
        value: Value,
        domain: Domain,
    },
    #[error(
        "Success probability {} of variable {} is not in the open interval (0, 1)",
        probability,
        name
    )]
    Probability { name: String, probability: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_drops_repeats() {
        let domain = Domain::new(vec![Value::ONE, Value::ZERO, Value::ONE]);
        assert_eq!(domain.values(), &[Value::ONE, Value::ZERO]);
        assert_eq!(domain.len(), 2);
    }

    #[test]
    fn health_flip() {
        assert_eq!(Health::Good.flipped(), Health::Unreliable);
        assert_eq!(Health::Unreliable.flipped().flipped(), Health::Unreliable);
        assert_eq!(Value::UNRELIABLE.health(), Some(Health::Unreliable));
        assert_eq!(Value::ONE.health(), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Domain::binary()), "{0, 1}");
        assert_eq!(format!("{}", Domain::health()), "{G, U}");
        assert_eq!(Value::from(true), Value::ONE);
    }
}
