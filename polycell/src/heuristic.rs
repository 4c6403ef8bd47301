//! Probabilistic score of partial health assignments.
//!
//! The score of an assignment is the product over all decision variables of the probability of
//! the assigned health value, using the more likely of both values for unassigned variables. For
//! a complete assignment this is its prior probability, for a partial assignment it is an upper
//! bound of the score of every extension.
use polycell_formula::{Assignment, Health, Value, Var, Variables};

/// Scores assignments of a fixed list of decision variables.
#[derive(Clone, Debug)]
pub struct Heuristic {
    /// Decision variables with their success probabilities.
    terms: Vec<(Var, f64)>,
}

impl Heuristic {
    /// Create a heuristic for the given decision variables.
    ///
    /// Variables without success probability count as certain to succeed. Callers are expected
    /// to only pass health variables.
    pub fn new(variables: &Variables, decision_vars: &[Var]) -> Heuristic {
        Heuristic {
            terms: decision_vars
                .iter()
                .map(|&var| {
                    let probability = variables[var].success_probability().unwrap_or(1.0);
                    (var, probability)
                })
                .collect(),
        }
    }

    /// Score of an assignment, a number in (0, 1].
    pub fn score(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|&(var, probability)| match assignment.get(var) {
                Some(Value::Health(Health::Good)) => probability,
                Some(_) => 1.0 - probability,
                None => probability.max(1.0 - probability),
            })
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::{prelude::*, *};

    use polycell_formula::{assignment, Variable};

    fn health_variables(probabilities: &[f64]) -> (Variables, Vec<Var>) {
        let mut variables = Variables::new();
        let vars = probabilities
            .iter()
            .enumerate()
            .map(|(i, &probability)| {
                variables.add(Variable::and_health(format!("A{}", i), probability).unwrap())
            })
            .collect();
        (variables, vars)
    }

    #[test]
    fn scores() {
        let (variables, vars) = health_variables(&[0.9, 0.2, 0.5]);
        let heuristic = Heuristic::new(&variables, &vars);

        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;

        assert!(close(heuristic.score(&Assignment::new()), 0.9 * 0.8 * 0.5));
        assert!(close(heuristic.score(&assignment![0 => U]), 0.1 * 0.8 * 0.5));
        assert!(close(
            heuristic.score(&assignment![0 => G, 1 => G, 2 => U]),
            0.9 * 0.2 * 0.5
        ));
        // Variables that are not decision variables don't contribute
        assert!(close(heuristic.score(&assignment![7 => 1]), 0.9 * 0.8 * 0.5));
    }

    fn probabilities_and_assignment() -> impl Strategy<Value = (Vec<f64>, Vec<Option<bool>>)> {
        (1..8usize).prop_flat_map(|count| {
            (
                collection::vec(0.01..0.99f64, count),
                collection::vec(option::of(bool::ANY), count),
            )
        })
    }

    proptest! {
        #[test]
        fn extending_never_increases(
            (probabilities, values) in probabilities_and_assignment(),
            good in bool::ANY,
        ) {
            let (variables, vars) = health_variables(&probabilities);
            let heuristic = Heuristic::new(&variables, &vars);

            let assignment: Assignment = vars
                .iter()
                .zip(values.iter())
                .filter_map(|(&var, value)| {
                    value.map(|good| (var, if good { Value::GOOD } else { Value::UNRELIABLE }))
                })
                .collect();

            let score = heuristic.score(&assignment);
            prop_assert!(score > 0.0 && score <= 1.0);

            let health = if good { Value::GOOD } else { Value::UNRELIABLE };
            for &var in vars.iter().filter(|&&var| !assignment.contains(var)) {
                prop_assert!(heuristic.score(&assignment.with(var, health)) <= score);
            }
        }
    }
}
