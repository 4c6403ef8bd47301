//! Polycell is a model-based diagnosis engine for boolean circuits. Given the gates of a circuit,
//! the values on some of its wires and the prior success probability of every gate, it finds the
//! most probable assignment of good and unreliable gates that is consistent with the
//! observations.
//!
//! Gates are encoded as clauses over the wire signals and a health variable per gate. Consistency
//! is decided by unit propagation and a DPLL based oracle, diagnoses are found by a best-first
//! search over health assignments that can optionally learn nogoods from inconsistent
//! candidates.

pub mod config;
pub mod dpll;
pub mod heuristic;
pub mod model;
pub mod prop;
pub mod search;

pub use polycell_formula::{
    assignment, clause, value, var, Assignment, Clause, Domain, DomainError, Health, Lit, Value,
    Var, VarKind, Variable, Variables,
};

pub use config::{DiagnosisConfig, DiagnosisConfigUpdate};
pub use dpll::Decision;
pub use model::{Model, ModelError};
pub use search::{DiagnosisSearch, SearchError, SearchOutcome, SearchResult, SearchStats};
