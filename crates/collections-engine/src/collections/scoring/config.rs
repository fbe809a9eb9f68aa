use serde::{Deserialize, Serialize};

/// Rubric configuration for the parts of the scorer that desks tune per
/// portfolio. Tier points and level thresholds are fixed rubric constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points added when no resolved customer record backs the debt.
    pub unknown_customer_penalty: i16,
    /// Amount above which a Net 60 term is treated as critical exposure.
    pub critical_amount: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            unknown_customer_penalty: 15,
            critical_amount: 50_000.0,
        }
    }
}
