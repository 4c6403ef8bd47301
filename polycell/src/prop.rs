//! Unit propagation.
//!
//! Propagating an assignment simplifies a clause list: clauses with a literal that holds are
//! satisfied and dropped, literals whose variable is assigned a different value can never hold
//! and are removed, literals of unassigned variables are kept. The input clause list is never
//! modified.
use polycell_formula::{Assignment, Clause};

pub mod supported;

pub use supported::{supported_propagation, Support};

/// Propagation that falsified every literal of a clause.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Conflict {
    /// Index of the falsified clause in the propagated clause list.
    pub clause: usize,
}

/// Simplify `clauses` under `assignment`.
///
/// Returns the clauses that are neither satisfied nor falsified with their falsified literals
/// removed. An empty result means every clause is satisfied, a [`Conflict`] means some clause is
/// falsified.
pub fn propagate(assignment: &Assignment, clauses: &[Clause]) -> Result<Vec<Clause>, Conflict> {
    let mut updated = Vec::with_capacity(clauses.len());

    'clauses: for (index, clause) in clauses.iter().enumerate() {
        let mut remaining = Clause::new();
        for lit in clause.iter() {
            match assignment.get(lit.var()) {
                Some(value) if value == lit.value() => continue 'clauses,
                Some(_) => (),
                None => remaining.insert(lit.var(), lit.value()),
            }
        }

        if remaining.is_empty() {
            return Err(Conflict { clause: index });
        }
        updated.push(remaining);
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use polycell_formula::{
        assignment, assignment::strategy::binary_assignment, clause,
        clause::strategy::binary_clauses, Assignment,
    };

    #[test]
    fn simplify() {
        let clauses = vec![
            clause![0 => 1, 1 => 0],
            clause![0 => 0, 2 => 1, 3 => 1],
            clause![2 => 1],
            clause![3 => U, 4 => 1],
        ];

        assert_eq!(propagate(&Assignment::new(), &clauses), Ok(clauses.clone()));

        assert_eq!(
            propagate(&assignment![0 => 1, 3 => G], &clauses),
            Ok(vec![clause![2 => 1], clause![2 => 1], clause![4 => 1]])
        );

        assert_eq!(
            propagate(&assignment![0 => 1, 2 => 1, 3 => U], &clauses),
            Ok(vec![])
        );

        assert_eq!(
            propagate(&assignment![0 => 0, 2 => 0, 3 => 0], &clauses),
            Err(Conflict { clause: 1 })
        );
    }

    #[test]
    fn empty_clause_is_conflict() {
        assert_eq!(
            propagate(&Assignment::new(), &[clause![]]),
            Err(Conflict { clause: 0 })
        );
        assert_eq!(propagate(&Assignment::new(), &[]), Ok(vec![]));
    }

    proptest! {
        #[test]
        fn idempotent(
            (_, clauses) in binary_clauses(1..8usize, 0..20, 1..5),
            assignment in binary_assignment(8),
        ) {
            if let Ok(once) = propagate(&assignment, &clauses) {
                prop_assert_eq!(propagate(&assignment, &once), Ok(once.clone()));
            }
        }

        #[test]
        fn sound(
            (_, clauses) in binary_clauses(1..8usize, 0..20, 1..5),
            assignment in binary_assignment(8),
        ) {
            let falsified = |clause: &Clause| {
                clause.iter().all(|lit| {
                    matches!(assignment.get(lit.var()), Some(value) if value != lit.value())
                })
            };

            match propagate(&assignment, &clauses) {
                Err(Conflict { clause }) => {
                    prop_assert!(falsified(&clauses[clause]));
                    prop_assert!(!clauses[..clause].iter().any(|clause| falsified(clause)));
                }
                Ok(updated) => {
                    prop_assert!(!clauses.iter().any(|clause| falsified(clause)));

                    let open: Vec<&Clause> = clauses
                        .iter()
                        .filter(|clause| !assignment.satisfies(clause))
                        .collect();
                    prop_assert_eq!(updated.len(), open.len());

                    for (reduced, original) in updated.iter().zip(open) {
                        let kept: Vec<_> = original
                            .iter()
                            .filter(|lit| !assignment.contains(lit.var()))
                            .collect();
                        prop_assert_eq!(reduced.lits(), &kept[..]);
                    }
                }
            }
        }
    }
}
