//! Propagation of an assignment together with all unit clauses it produces.
use log::trace;

use polycell_formula::{Assignment, Clause};

use super::propagate;

/// Outcome of [`supported_propagation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Support {
    /// No conflict was found.
    Consistent {
        /// Values forced by unit clauses, in addition to the propagated assignment.
        implied: Assignment,
        /// Clauses left without a unit clause among them.
        residual: Vec<Clause>,
    },
    /// Propagation falsified a clause.
    Inconsistent {
        /// The assignments propagated before the conflict, starting with the input assignment
        /// and followed by one single value assignment per forced unit clause.
        support: Vec<Assignment>,
    },
}

impl Support {
    pub fn is_consistent(&self) -> bool {
        match self {
            Support::Consistent { .. } => true,
            Support::Inconsistent { .. } => false,
        }
    }
}

/// Propagate `assignment` and then every unit clause that appears, until a conflict is found or
/// no unit clause is left.
///
/// The first unit clause in clause order is propagated first. Each propagated unit clause
/// removes its variable from the clause list, so this takes at most one step per variable.
pub fn supported_propagation(assignment: &Assignment, clauses: &[Clause]) -> Support {
    let mut support = vec![assignment.clone()];
    let mut implied = Assignment::new();

    let mut clauses = match propagate(assignment, clauses) {
        Ok(clauses) => clauses,
        Err(_) => return Support::Inconsistent { support },
    };

    while let Some(lit) = clauses.iter().find_map(Clause::unit) {
        trace!("unit {:?} supported by {:?}", lit, support.last());

        let step = Assignment::from(lit);
        implied.assign_lit(lit);
        clauses = match propagate(&step, &clauses) {
            Ok(clauses) => clauses,
            Err(_) => {
                support.push(step);
                return Support::Inconsistent { support };
            }
        };
        support.push(step);
    }

    Support::Consistent {
        implied,
        residual: clauses,
    }
}
