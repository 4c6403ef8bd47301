//! Conflict-directed diagnosis search.
use log::{debug, info, trace};

use polycell_formula::{Assignment, Clause, Lit, Value};

use crate::dpll;
use crate::prop::{propagate, supported_propagation, Support};

use super::{DiagnosisSearch, SearchOutcome, SearchResult, SearchState};

impl<'a> DiagnosisSearch<'a> {
    /// Search for the most probable diagnosis, learning a nogood from every inconsistent
    /// complete assignment.
    ///
    /// Complete assignments are checked by supported propagation against the model clauses
    /// simplified by the fixed values. Partial assignments violating a recorded nogood are
    /// pruned, those leaving a nogood open are extended by the literals of the open nogoods.
    pub fn conflict_directed(&self) -> SearchResult {
        info!(
            "conflict-directed search over {} decision variables",
            self.decision_vars.len()
        );

        let mut state = SearchState::new(self);
        let mut nogoods: Vec<Clause> = vec![];

        let baseline = match propagate(&self.model.fixed_assignment(), self.model.clauses()) {
            Ok(clauses) => clauses,
            Err(conflict) => {
                debug!("fixed values falsify clause {}", conflict.clause);
                info!("conflict-directed search finished: {:?}", state.stats);
                return SearchResult {
                    outcome: SearchOutcome::NoDiagnosis,
                    stats: state.stats,
                    nogoods,
                };
            }
        };

        let outcome = loop {
            let assignment = match state.pop() {
                Ok(Some(assignment)) => assignment,
                Ok(None) => break SearchOutcome::NoDiagnosis,
                Err(outcome) => break outcome,
            };

            if self.is_complete(&assignment) {
                state.stats.consistency_checks += 1;
                if self.is_consistent(&assignment, &baseline) {
                    break SearchOutcome::Diagnosis(assignment);
                }
                let nogood = nogood(&assignment);
                debug!("nogood {:?}", nogood);
                nogoods.push(nogood);
                state.stats.nogoods += 1;
                continue;
            }

            match propagate(&assignment, &nogoods) {
                Err(_) => trace!("{:?} violates a nogood", assignment),
                Ok(open) if open.is_empty() => state.expand_ranked(&assignment),
                Ok(open) => {
                    for lit in open.iter().flat_map(Clause::iter) {
                        state.push(assignment.with(lit.var(), lit.value()));
                    }
                }
            }
        };

        info!("conflict-directed search finished: {:?}", state.stats);

        SearchResult {
            outcome,
            stats: state.stats,
            nogoods,
        }
    }

    /// Consistency of a complete assignment with the clauses left by the fixed values.
    fn is_consistent(&self, assignment: &Assignment, baseline: &[Clause]) -> bool {
        match supported_propagation(assignment, baseline) {
            Support::Inconsistent { support } => {
                trace!("{:?} inconsistent after {} steps", assignment, support.len());
                false
            }
            Support::Consistent { residual, .. } => {
                residual.is_empty()
                    || !self.model.config().check_residual
                    || dpll::decide(self.model.variables(), &residual, &Assignment::new())
                        .is_satisfiable()
            }
        }
    }
}

/// Clause excluding an assignment of health values, by requiring at least one flipped value.
fn nogood(assignment: &Assignment) -> Clause {
    assignment
        .iter()
        .filter_map(|(var, value)| {
            value
                .health()
                .map(|health| Lit::new(var, Value::from(health.flipped())))
        })
        .collect()
}
