//! Circuit models.
//!
//! A [`Model`] owns the variables of a circuit together with the clauses generated for its gates.
//! The clause list only grows while gates are added; propagation and search work on copies.
use log::trace;
use thiserror::Error;

use polycell_formula::{Assignment, Clause, DomainError, Value, Var, VarKind, Variable, Variables};

use crate::config::DiagnosisConfig;
use crate::dpll::{self, Decision};

pub mod gate;

/// Errors while building a model.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Gate {} needs {} inputs but got {}", gate, expected, found)]
    Arity {
        gate: String,
        expected: &'static str,
        found: usize,
    },
    #[error("Variable {} is a signal, not the health variable of a gate", name)]
    NotAGate { name: String },
    #[error("Variable {} is the health variable of a gate, not a signal", name)]
    NotASignal { name: String },
    #[error("Variable {} is not part of the model", var)]
    UnknownVariable { var: Var },
}

/// Variables and gate clauses of a circuit.
#[derive(Clone, Default, Debug)]
pub struct Model {
    variables: Variables,
    clauses: Vec<Clause>,
    config: DiagnosisConfig,
}

impl Model {
    /// Create an empty model using the default configuration.
    pub fn new() -> Model {
        Model::default()
    }

    /// Create an empty model using the given configuration.
    pub fn with_config(config: DiagnosisConfig) -> Model {
        Model {
            config,
            ..Model::default()
        }
    }

    pub fn config(&self) -> &DiagnosisConfig {
        &self.config
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// All clauses generated so far, in the order the gates were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn add_variable(&mut self, variable: Variable) -> Var {
        self.variables.add(variable)
    }

    /// Adds an unset signal with the domain {0, 1}.
    pub fn add_signal(&mut self, name: impl Into<String>) -> Var {
        self.add_variable(Variable::signal(name))
    }

    /// Adds a signal with the domain {0, 1} and an observed or fixed value.
    pub fn add_fixed_signal(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<Var, ModelError> {
        let variable = Variable::signal(name).with_value(value)?;
        Ok(self.add_variable(variable))
    }

    /// Adds the health variable of a gate.
    ///
    /// Without an explicit success probability, the configured default for the gate kind is
    /// used.
    pub fn add_health(
        &mut self,
        name: impl Into<String>,
        kind: VarKind,
        success_probability: Option<f64>,
    ) -> Result<Var, ModelError> {
        let variable = match kind {
            VarKind::Signal => return Err(ModelError::NotAGate { name: name.into() }),
            VarKind::AndHealth => Variable::and_health(
                name,
                success_probability.unwrap_or(self.config.and_success_probability),
            )?,
            VarKind::XorHealth => Variable::xor_health(
                name,
                success_probability.unwrap_or(self.config.xor_success_probability),
            )?,
        };
        Ok(self.add_variable(variable))
    }

    /// Sets or clears the fixed value of a variable.
    pub fn set_value(&mut self, var: Var, value: Option<Value>) -> Result<(), ModelError> {
        self.check_var(var)?;
        self.variables.set_value(var, value)?;
        Ok(())
    }

    /// Adds the clauses of a gate and returns them.
    ///
    /// The kind of the gate is the kind of its health variable. AND gates take any positive
    /// number of inputs, XOR gates exactly two.
    pub fn add_gate(
        &mut self,
        health: Var,
        inputs: &[Var],
        output: Var,
    ) -> Result<&[Clause], ModelError> {
        self.check_var(health)?;
        for &signal in inputs.iter().chain(Some(&output)) {
            self.check_var(signal)?;
            let variable = &self.variables[signal];
            if variable.kind().is_health() {
                return Err(ModelError::NotASignal {
                    name: variable.name().to_owned(),
                });
            }
        }

        let gate = &self.variables[health];
        let clauses = match gate.kind() {
            VarKind::Signal => {
                return Err(ModelError::NotAGate {
                    name: gate.name().to_owned(),
                })
            }
            VarKind::AndHealth => {
                if inputs.is_empty() {
                    return Err(ModelError::Arity {
                        gate: gate.name().to_owned(),
                        expected: "at least 1",
                        found: 0,
                    });
                }
                gate::and_clauses(health, inputs, output)
            }
            VarKind::XorHealth => match *inputs {
                [a, b] => gate::xor_clauses(health, [a, b], output),
                _ => {
                    return Err(ModelError::Arity {
                        gate: gate.name().to_owned(),
                        expected: "exactly 2",
                        found: inputs.len(),
                    })
                }
            },
        };

        trace!("gate {} adds {:?}", gate.name(), clauses);

        let begin = self.clauses.len();
        self.clauses.extend(clauses);
        Ok(&self.clauses[begin..])
    }

    /// Values of all variables that have a fixed value.
    pub fn fixed_assignment(&self) -> Assignment {
        self.variables.fixed_assignment()
    }

    /// Check whether the clauses admit a solution extending the given assignment.
    ///
    /// Fixed values of the model take precedence over the values in `assignment`.
    pub fn decide(&self, assignment: &Assignment) -> Decision {
        let mut full = assignment.clone();
        full.merge(&self.fixed_assignment());
        dpll::decide(&self.variables, &self.clauses, &full)
    }

    fn check_var(&self, var: Var) -> Result<(), ModelError> {
        if self.variables.contains(var) {
            Ok(())
        } else {
            Err(ModelError::UnknownVariable { var })
        }
    }
}
