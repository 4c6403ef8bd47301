//! Satisfiability oracle.
//!
//! A DPLL search deciding whether a clause list admits a solution extending a partial
//! assignment. Every step propagates a small assignment against the clause list of its parent
//! step. If that leaves a unit clause, its literal is forced. Otherwise the first pure literal is
//! forced if there is one. Otherwise the search branches over the domain of the first variable of
//! the first clause.
//!
//! The search runs on an explicit stack, so deep searches don't grow the call stack. Simplified
//! clause lists are kept in an arena and sibling branches refer to the clause list of their
//! parent by index instead of copying it.
use log::trace;
use rustc_hash::FxHashMap;

use polycell_formula::{Assignment, Clause, Lit, Value, Variables};

use crate::prop::propagate;

/// Result of the satisfiability oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The clauses are satisfiable.
    ///
    /// The witness extends the decided assignment and satisfies every clause. Variables that no
    /// remaining clause depended on may be left unassigned.
    Satisfiable(Assignment),
    /// The clauses are unsatisfiable.
    ///
    /// Contains the accumulated assignment of every explored branch that ended in a conflict.
    Unsatisfiable(Vec<Assignment>),
}

impl Decision {
    pub fn is_satisfiable(&self) -> bool {
        match self {
            Decision::Satisfiable(_) => true,
            Decision::Unsatisfiable(_) => false,
        }
    }

    /// The satisfying assignment found, if any.
    pub fn witness(&self) -> Option<&Assignment> {
        match self {
            Decision::Satisfiable(witness) => Some(witness),
            Decision::Unsatisfiable(_) => None,
        }
    }
}

/// Index of a clause list in the arena of a search.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct ClauseSetRef(usize);

/// A pending step of the search.
struct Frame {
    /// Clause list to propagate against.
    clauses: ClauseSetRef,
    /// Values assigned by this step.
    step: Assignment,
    /// All values assigned on the way to this step, including `step`.
    trail: Assignment,
}

/// State of a single oracle invocation.
struct Dpll<'a> {
    variables: &'a Variables,
    arena: Vec<Vec<Clause>>,
    stack: Vec<Frame>,
    conflicts: Vec<Assignment>,
    steps: usize,
}

impl<'a> Dpll<'a> {
    fn new(variables: &'a Variables, clauses: &[Clause], assignment: &Assignment) -> Dpll<'a> {
        Dpll {
            variables,
            arena: vec![clauses.to_vec()],
            stack: vec![Frame {
                clauses: ClauseSetRef(0),
                step: assignment.clone(),
                trail: assignment.clone(),
            }],
            conflicts: vec![],
            steps: 0,
        }
    }

    fn run(mut self) -> Decision {
        while let Some(frame) = self.stack.pop() {
            self.steps += 1;

            let clauses = match propagate(&frame.step, &self.arena[frame.clauses.0]) {
                Ok(clauses) => clauses,
                Err(conflict) => {
                    trace!("dpll conflict in clause {} at {:?}", conflict.clause, frame.trail);
                    self.conflicts.push(frame.trail);
                    continue;
                }
            };

            if clauses.is_empty() {
                trace!("dpll satisfied after {} steps", self.steps);
                return Decision::Satisfiable(frame.trail);
            }

            let cref = ClauseSetRef(self.arena.len());
            self.arena.push(clauses);
            let clauses = &self.arena[cref.0];

            let forced = clauses
                .iter()
                .find_map(Clause::unit)
                .or_else(|| pure_literal(clauses));

            if let Some(lit) = forced {
                let mut trail = frame.trail;
                trail.assign_lit(lit);
                self.stack.push(Frame {
                    clauses: cref,
                    step: Assignment::from(lit),
                    trail,
                });
                continue;
            }

            // Propagated clauses are never empty
            let var = clauses[0].lits()[0].var();

            // Pushed in reverse, so the first value of the domain is explored first
            for &value in self.variables[var].domain().values().iter().rev() {
                let lit = Lit::new(var, value);
                let mut trail = frame.trail.clone();
                trail.assign_lit(lit);
                self.stack.push(Frame {
                    clauses: cref,
                    step: Assignment::from(lit),
                    trail,
                });
            }
        }

        trace!(
            "dpll unsatisfiable after {} steps with {} conflicts",
            self.steps,
            self.conflicts.len()
        );
        Decision::Unsatisfiable(self.conflicts)
    }
}

/// The first literal in clause order whose variable is required to take the same value in every
/// clause it occurs in.
fn pure_literal(clauses: &[Clause]) -> Option<Lit> {
    // None marks a variable occurring with different values
    let mut required: FxHashMap<_, Option<Value>> = FxHashMap::default();
    for lit in clauses.iter().flat_map(Clause::iter) {
        required
            .entry(lit.var())
            .and_modify(|value| {
                if *value != Some(lit.value()) {
                    *value = None
                }
            })
            .or_insert_with(|| Some(lit.value()));
    }

    clauses
        .iter()
        .flat_map(Clause::iter)
        .find(|lit| required.get(&lit.var()) == Some(&Some(lit.value())))
}

/// Decide whether `clauses` admit a solution extending `assignment`.
///
/// Variables the search branches on must be part of `variables`, their domain gives the values
/// tried. Each call owns its search state, nothing is shared between calls.
pub fn decide(variables: &Variables, clauses: &[Clause], assignment: &Assignment) -> Decision {
    Dpll::new(variables, clauses, assignment).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use polycell_formula::{
        assignment, clause, clause::strategy::binary_clauses, var, Domain, Variable,
    };

    fn binary_variables(count: usize) -> Variables {
        let mut variables = Variables::new();
        for i in 0..count {
            variables.add(Variable::signal(format!("s{}", i)));
        }
        variables
    }

    /// Exhaustive satisfiability check over all binary assignments.
    fn brute_force(vars: usize, clauses: &[Clause]) -> bool {
        (0..1usize << vars).any(|bits| {
            let assignment: Assignment = (0..vars)
                .map(|i| (var!(i), Value::from(bits & (1 << i) != 0)))
                .collect();
            clauses.iter().all(|clause| assignment.satisfies(clause))
        })
    }

    #[test]
    fn direct_contradiction() {
        let variables = binary_variables(2);
        let clauses = vec![clause![0 => 1], clause![1 => 0, 0 => 1], clause![0 => 0]];

        let decision = decide(&variables, &clauses, &Assignment::new());
        assert!(!decision.is_satisfiable());
        assert_eq!(decision.witness(), None);
    }

    #[test]
    fn known_solution() {
        let variables = binary_variables(4);
        let clauses = vec![
            clause![0 => 1, 1 => 1],
            clause![0 => 0, 2 => 1],
            clause![1 => 0, 2 => 0],
            clause![2 => 0, 3 => 1],
        ];

        match decide(&variables, &clauses, &Assignment::new()) {
            Decision::Satisfiable(witness) => {
                assert!(clauses.iter().all(|clause| witness.satisfies(clause)));
            }
            other => panic!("unexpected decision {:?}", other),
        }

        assert!(decide(&variables, &clauses, &assignment![2 => 1, 3 => 1]).is_satisfiable());
        assert!(!decide(&variables, &clauses, &assignment![2 => 1, 3 => 0]).is_satisfiable());
    }

    #[test]
    fn conflicts_are_reported() {
        let variables = binary_variables(3);
        // Unsatisfiable without any unit or pure literal, forcing a branch
        let clauses = vec![
            clause![0 => 1, 1 => 1],
            clause![0 => 1, 1 => 0],
            clause![0 => 0, 1 => 1],
            clause![0 => 0, 1 => 0],
        ];

        match decide(&variables, &clauses, &assignment![2 => 1]) {
            Decision::Unsatisfiable(conflicts) => {
                assert_eq!(conflicts.len(), 2);
                for conflict in conflicts {
                    assert_eq!(conflict.get(var!(2)), Some(Value::ONE));
                    assert!(conflict.contains(var!(0)));
                }
            }
            other => panic!("unexpected decision {:?}", other),
        }
    }

    #[test]
    fn branches_over_domain() {
        let mut variables = Variables::new();
        variables.add(
            Variable::new(
                "level",
                Domain::new(vec![Value::Int(0), Value::Int(1), Value::Int(2)]),
                None,
            )
            .unwrap(),
        );
        variables.add(Variable::signal("s"));

        // Only the third value of the first variable admits a solution
        let clauses = vec![
            clause![0 => 2, 1 => 1],
            clause![0 => 2, 1 => 0],
            clause![0 => 0, 1 => 1],
        ];

        let decision = decide(&variables, &clauses, &Assignment::new());
        let witness = decision.witness().unwrap();
        assert_eq!(witness.get(var!(0)), Some(Value::Int(2)));
        assert_eq!(witness.get(var!(1)), Some(Value::ONE));

        assert!(!decide(&variables, &clauses, &assignment![1 => 0]).is_satisfiable());
    }

    #[test]
    fn pure_literals_in_clause_order() {
        let clauses = vec![clause![0 => 1, 1 => 0], clause![0 => 0, 2 => 1, 1 => 0]];
        assert_eq!(
            pure_literal(&clauses),
            Some(Lit::new(var!(1), Value::ZERO))
        );
        assert_eq!(pure_literal(&[clause![0 => 1], clause![0 => 0]]), None);
    }

    proptest! {
        #[test]
        fn agrees_with_brute_force((vars, clauses) in binary_clauses(1..7usize, 0..25, 1..4)) {
            let variables = binary_variables(vars);
            let decision = decide(&variables, &clauses, &Assignment::new());

            prop_assert_eq!(decision.is_satisfiable(), brute_force(vars, &clauses));

            if let Some(witness) = decision.witness() {
                for clause in clauses.iter() {
                    prop_assert!(witness.satisfies(clause));
                }
            }
        }
    }
}
