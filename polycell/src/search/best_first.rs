//! Plain best-first diagnosis search.
use log::{debug, info};

use super::{DiagnosisSearch, SearchOutcome, SearchResult, SearchState};

impl<'a> DiagnosisSearch<'a> {
    /// Search for the most probable diagnosis, checking every complete assignment with the
    /// satisfiability oracle.
    pub fn best_first(&self) -> SearchResult {
        info!(
            "best-first search over {} decision variables",
            self.decision_vars.len()
        );

        let mut state = SearchState::new(self);

        let outcome = loop {
            let assignment = match state.pop() {
                Ok(Some(assignment)) => assignment,
                Ok(None) => break SearchOutcome::NoDiagnosis,
                Err(outcome) => break outcome,
            };

            if self.is_complete(&assignment) {
                state.stats.consistency_checks += 1;
                if self.model.decide(&assignment).is_satisfiable() {
                    break SearchOutcome::Diagnosis(assignment);
                }
                debug!("{:?} is inconsistent", assignment);
            } else {
                state.expand_ranked(&assignment);
            }
        };

        info!("best-first search finished: {:?}", state.stats);

        SearchResult {
            outcome,
            stats: state.stats,
            nogoods: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use polycell_formula::{Value, VarKind};

    use crate::config::DiagnosisConfig;
    use crate::model::Model;
    use crate::search::{DiagnosisSearch, SearchOutcome};

    /// An AND gate with both inputs at 1, observed output given.
    fn single_and(output: Value, config: DiagnosisConfig) -> Model {
        let mut model = Model::with_config(config);
        let a1 = model.add_health("A1", VarKind::AndHealth, Some(0.9)).unwrap();
        let a = model.add_fixed_signal("A", Value::ONE).unwrap();
        let b = model.add_fixed_signal("B", Value::ONE).unwrap();
        let out = model.add_fixed_signal("OUT", output).unwrap();
        model.add_gate(a1, &[a, b], out).unwrap();
        model
    }

    #[test]
    fn good_when_consistent() {
        let model = single_and(Value::ONE, DiagnosisConfig::default());
        let a1 = model.variables().find("A1").unwrap();
        let search = DiagnosisSearch::with_ranking_order(&model, &[a1]).unwrap();

        let result = search.best_first();
        assert_eq!(
            result.diagnosis().and_then(|diagnosis| diagnosis.get(a1)),
            Some(Value::GOOD)
        );
        assert_eq!(result.stats.consistency_checks, 1);
        assert!(result.nogoods.is_empty());
    }

    #[test]
    fn unreliable_when_output_wrong() {
        let model = single_and(Value::ZERO, DiagnosisConfig::default());
        let a1 = model.variables().find("A1").unwrap();
        let search = DiagnosisSearch::with_ranking_order(&model, &[a1]).unwrap();

        let result = search.best_first();
        assert_eq!(
            result.diagnosis().and_then(|diagnosis| diagnosis.get(a1)),
            Some(Value::UNRELIABLE)
        );
        assert_eq!(result.stats.consistency_checks, 2);
    }

    #[test]
    fn limit() {
        let mut config = DiagnosisConfig::default();
        config.max_expansions = Some(2);
        let model = single_and(Value::ZERO, config);
        let a1 = model.variables().find("A1").unwrap();
        let search = DiagnosisSearch::with_ranking_order(&model, &[a1]).unwrap();

        let result = search.best_first();
        assert_eq!(result.outcome, SearchOutcome::LimitReached);
        assert_eq!(result.stats.expansions, 2);
    }
}
