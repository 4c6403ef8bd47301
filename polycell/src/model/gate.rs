//! Clause encodings of gates.
//!
//! Every clause contains the literal `health=U`, so a gate assumed unreliable constrains nothing.
//! A gate assumed good forbids exactly the input/output combinations its function rules out.
use polycell_formula::{Clause, Value, Var};

/// Clauses of an AND gate with any number of inputs.
///
/// One clause per input states that a zero on that input forces the output to zero, a final
/// clause states that ones on all inputs force the output to one.
pub fn and_clauses(health: Var, inputs: &[Var], output: Var) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(inputs.len() + 1);

    let mut all_ones = Clause::new();
    all_ones.insert(health, Value::UNRELIABLE);
    all_ones.insert(output, Value::ONE);

    for &input in inputs {
        let mut zero_input = Clause::new();
        zero_input.insert(health, Value::UNRELIABLE);
        zero_input.insert(output, Value::ZERO);
        zero_input.insert(input, Value::ONE);
        clauses.push(zero_input);

        all_ones.insert(input, Value::ZERO);
    }

    clauses.push(all_ones);
    clauses
}

/// Clauses of a two input XOR gate, one per row of the truth table.
pub fn xor_clauses(health: Var, inputs: [Var; 2], output: Var) -> Vec<Clause> {
    let [a, b] = inputs;
    let rows = [
        (Value::ONE, Value::ONE, Value::ZERO),
        (Value::ONE, Value::ZERO, Value::ONE),
        (Value::ZERO, Value::ONE, Value::ONE),
        (Value::ZERO, Value::ZERO, Value::ZERO),
    ];

    rows.iter()
        .map(|&(out, a_value, b_value)| {
            let mut clause = Clause::new();
            clause.insert(health, Value::UNRELIABLE);
            clause.insert(output, out);
            clause.insert(a, a_value);
            clause.insert(b, b_value);
            clause
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use polycell_formula::{clause, var, Assignment};

    #[test]
    fn and_encoding() {
        let clauses = and_clauses(var!(0), &[var!(1), var!(2)], var!(3));
        assert_eq!(
            clauses,
            vec![
                clause![0 => U, 3 => 0, 1 => 1],
                clause![0 => U, 3 => 0, 2 => 1],
                clause![0 => U, 3 => 1, 1 => 0, 2 => 0],
            ]
        );
    }

    #[test]
    fn xor_encoding() {
        let clauses = xor_clauses(var!(0), [var!(1), var!(2)], var!(3));
        assert_eq!(
            clauses,
            vec![
                clause![0 => U, 3 => 1, 1 => 1, 2 => 0],
                clause![0 => U, 3 => 1, 1 => 0, 2 => 1],
                clause![0 => U, 3 => 0, 1 => 1, 2 => 1],
                clause![0 => U, 3 => 0, 1 => 0, 2 => 0],
            ]
        );
    }

    /// A good gate admits exactly the rows of its truth table.
    #[test]
    fn good_gates_follow_truth_tables() {
        let and = and_clauses(var!(0), &[var!(1), var!(2)], var!(3));
        let xor = xor_clauses(var!(0), [var!(1), var!(2)], var!(3));

        for &a in [false, true].iter() {
            for &b in [false, true].iter() {
                for &out in [false, true].iter() {
                    let assignment: Assignment = vec![
                        (var!(0), Value::GOOD),
                        (var!(1), Value::from(a)),
                        (var!(2), Value::from(b)),
                        (var!(3), Value::from(out)),
                    ]
                    .into_iter()
                    .collect();

                    let holds = |clauses: &[Clause]| {
                        clauses.iter().all(|clause| assignment.satisfies(clause))
                    };

                    assert_eq!(holds(&and), out == (a && b));
                    assert_eq!(holds(&xor), out == (a != b));

                    let unreliable = assignment.with(var!(0), Value::UNRELIABLE);
                    assert!(and.iter().all(|clause| unreliable.satisfies(clause)));
                    assert!(xor.iter().all(|clause| unreliable.satisfies(clause)));
                }
            }
        }
    }
}
