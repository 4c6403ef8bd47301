//! Model and search configuration.
use serde::{Deserialize, Serialize};

/// Configurable parameters used while building models and searching for diagnoses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisConfig {
    /// Success probability of AND gates added without an explicit probability. (Default: 0.98)
    pub and_success_probability: f64,

    /// Success probability of XOR gates added without an explicit probability. (Default: 0.97)
    pub xor_success_probability: f64,

    /// Number of frontier nodes a search may expand before giving up. (Default: unlimited)
    pub max_expansions: Option<u64>,

    /// Have the oracle confirm clauses left over after supported propagation before the
    /// conflict-directed search accepts a diagnosis. (Default: true)
    pub check_residual: bool,
}

impl Default for DiagnosisConfig {
    fn default() -> DiagnosisConfig {
        DiagnosisConfig {
            and_success_probability: 0.98,
            xor_success_probability: 0.97,
            max_expansions: None,
            check_residual: true,
        }
    }
}

/// Partial update of a [`DiagnosisConfig`].
///
/// Absent fields leave the corresponding parameter unchanged.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosisConfigUpdate {
    pub and_success_probability: Option<f64>,
    pub xor_success_probability: Option<f64>,
    pub max_expansions: Option<u64>,
    pub check_residual: Option<bool>,
}

impl DiagnosisConfigUpdate {
    /// Create an empty update.
    pub fn new() -> DiagnosisConfigUpdate {
        DiagnosisConfigUpdate::default()
    }

    /// Combine two updates, values present in `other` take precedence.
    pub fn merge(&mut self, other: DiagnosisConfigUpdate) {
        if other.and_success_probability.is_some() {
            self.and_success_probability = other.and_success_probability;
        }
        if other.xor_success_probability.is_some() {
            self.xor_success_probability = other.xor_success_probability;
        }
        if other.max_expansions.is_some() {
            self.max_expansions = other.max_expansions;
        }
        if other.check_residual.is_some() {
            self.check_residual = other.check_residual;
        }
    }

    /// Overwrite the parameters present in this update.
    pub fn apply(&self, config: &mut DiagnosisConfig) {
        if let Some(value) = self.and_success_probability {
            config.and_success_probability = value;
        }
        if let Some(value) = self.xor_success_probability {
            config.xor_success_probability = value;
        }
        if let Some(value) = self.max_expansions {
            config.max_expansions = Some(value);
        }
        if let Some(value) = self.check_residual {
            config.check_residual = value;
        }
    }
}
