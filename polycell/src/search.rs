//! Search for the most probable diagnosis.
//!
//! A diagnosis assigns a health value to every decision variable so that the clauses of the
//! model admit a solution under the model's fixed values. Both strategies explore partial
//! assignments best-first, ordered by the [`Heuristic`] score. As the score of a partial
//! assignment bounds the score of all its extensions, the first consistent complete assignment
//! found is a most probable one.
//!
//! [`DiagnosisSearch::best_first`] checks each complete assignment with the satisfiability
//! oracle. [`DiagnosisSearch::conflict_directed`] additionally records a nogood for every
//! inconsistent complete assignment and steers the expansion of partial assignments towards
//! resolving recorded nogoods.
use log::trace;
use rustc_hash::FxHashSet;
use thiserror::Error;

use polycell_formula::{Assignment, Clause, Health, Value, Var};

use crate::heuristic::Heuristic;
use crate::model::Model;

mod best_first;
mod conflict_directed;
mod frontier;

use frontier::Frontier;

/// Invalid search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Variable {} is not part of the model", var)]
    UnknownVariable { var: Var },
    #[error("Variable {} is not the health variable of a gate", name)]
    NotADecisionVariable { name: String },
    #[error("Decision variable {} is listed more than once", name)]
    DuplicateDecisionVariable { name: String },
    #[error("The ranking must list every decision variable exactly once")]
    InvalidRanking,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete assignment of the decision variables consistent with the model.
    Diagnosis(Assignment),
    /// Every assignment was ruled out, no diagnosis is consistent with the observations.
    NoDiagnosis,
    /// The configured maximal number of expansions was reached.
    LimitReached,
}

/// Counters collected during a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken from the frontier and processed.
    pub expansions: u64,
    /// Nodes added to the frontier.
    pub pushed: u64,
    /// Complete assignments checked for consistency.
    pub consistency_checks: u64,
    /// Nogoods recorded.
    pub nogoods: u64,
}

/// Result of a search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    /// Nogoods recorded by a conflict-directed search, in the order they were found.
    pub nogoods: Vec<Clause>,
}

impl SearchResult {
    /// The diagnosis, if one was found.
    pub fn diagnosis(&self) -> Option<&Assignment> {
        match &self.outcome {
            SearchOutcome::Diagnosis(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Diagnosis search over the health variables of a model.
pub struct DiagnosisSearch<'a> {
    model: &'a Model,
    decision_vars: Vec<Var>,
    ranking: Vec<Var>,
    heuristic: Heuristic,
}

impl<'a> DiagnosisSearch<'a> {
    /// Create a search assigning `decision_vars`.
    ///
    /// Partial assignments are extended by the first variable of `ranking` they leave
    /// unassigned. The ranking has to contain every decision variable exactly once.
    pub fn new(
        model: &'a Model,
        decision_vars: &[Var],
        ranking: &[Var],
    ) -> Result<DiagnosisSearch<'a>, SearchError> {
        let variables = model.variables();

        let mut seen = FxHashSet::default();
        for &var in decision_vars {
            let variable = variables
                .get(var)
                .ok_or(SearchError::UnknownVariable { var })?;
            if !variable.kind().is_health() {
                return Err(SearchError::NotADecisionVariable {
                    name: variable.name().to_owned(),
                });
            }
            if !seen.insert(var) {
                return Err(SearchError::DuplicateDecisionVariable {
                    name: variable.name().to_owned(),
                });
            }
        }

        let mut ranked = FxHashSet::default();
        if ranking.len() != decision_vars.len()
            || !ranking
                .iter()
                .all(|var| seen.contains(var) && ranked.insert(*var))
        {
            return Err(SearchError::InvalidRanking);
        }

        Ok(DiagnosisSearch {
            model,
            decision_vars: decision_vars.to_vec(),
            ranking: ranking.to_vec(),
            heuristic: Heuristic::new(variables, decision_vars),
        })
    }

    /// Create a search that ranks decision variables in the given order.
    pub fn with_ranking_order(
        model: &'a Model,
        decision_vars: &[Var],
    ) -> Result<DiagnosisSearch<'a>, SearchError> {
        DiagnosisSearch::new(model, decision_vars, decision_vars)
    }

    pub fn decision_vars(&self) -> &[Var] {
        &self.decision_vars
    }

    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }

    fn is_complete(&self, assignment: &Assignment) -> bool {
        assignment.assigns_all(&self.decision_vars)
    }

    /// The first ranked variable not assigned yet.
    fn next_ranked(&self, assignment: &Assignment) -> Option<Var> {
        self.ranking
            .iter()
            .cloned()
            .find(|&var| !assignment.contains(var))
    }

    fn limit_reached(&self, stats: &SearchStats) -> bool {
        match self.model.config().max_expansions {
            Some(limit) => stats.expansions >= limit,
            None => false,
        }
    }
}

/// State shared by both search strategies.
struct SearchState<'s, 'a> {
    search: &'s DiagnosisSearch<'a>,
    frontier: Frontier,
    expanded: FxHashSet<Assignment>,
    stats: SearchStats,
}

impl<'s, 'a> SearchState<'s, 'a> {
    fn new(search: &'s DiagnosisSearch<'a>) -> SearchState<'s, 'a> {
        let mut state = SearchState {
            search,
            frontier: Frontier::default(),
            expanded: FxHashSet::default(),
            stats: SearchStats::default(),
        };
        state.push(Assignment::new());
        state
    }

    /// Take the next node that was not expanded before.
    ///
    /// Returns `Err` when the expansion limit is reached and `Ok(None)` when the frontier is
    /// empty.
    fn pop(&mut self) -> Result<Option<Assignment>, SearchOutcome> {
        while let Some((assignment, score)) = self.frontier.pop() {
            if self.expanded.contains(&assignment) {
                continue;
            }
            if self.search.limit_reached(&self.stats) {
                return Err(SearchOutcome::LimitReached);
            }
            trace!("expanding {:?} with score {}", assignment, score);
            self.expanded.insert(assignment.clone());
            self.stats.expansions += 1;
            return Ok(Some(assignment));
        }
        Ok(None)
    }

    /// Add a node unless it was expanded before.
    fn push(&mut self, assignment: Assignment) {
        if !self.expanded.contains(&assignment) {
            let score = self.search.heuristic.score(&assignment);
            trace!("pushing {:?} with score {}", assignment, score);
            self.frontier.push(assignment, score);
            self.stats.pushed += 1;
        }
    }

    /// Push both health values of the next ranked variable.
    fn expand_ranked(&mut self, assignment: &Assignment) {
        if let Some(var) = self.search.next_ranked(assignment) {
            for &health in [Health::Good, Health::Unreliable].iter() {
                self.push(assignment.with(var, Value::from(health)));
            }
        }
    }
}
