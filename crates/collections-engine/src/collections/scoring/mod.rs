mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::{
    RiskLevel, RECOMMEND_CRITICAL, RECOMMEND_HIGH, RECOMMEND_LOW, RECOMMEND_MEDIUM,
    RECOMMEND_UNKNOWN_CUSTOMER,
};

use super::domain::ScoreFactors;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the rubric configuration to normalized factors.
/// Same inputs always produce the same assessment; there is no I/O, clock, or
/// randomness anywhere in the path.
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, factors: &ScoreFactors) -> RiskAssessment {
        let (components, total_score, expected_delay) = rules::score_factors(factors, &self.config);

        let risk_score = total_score.clamp(0, 100) as u8;
        let (risk_level, recommendation) = policy::decide(factors, risk_score, &self.config);

        RiskAssessment {
            risk_score,
            risk_level,
            expected_delay: expected_delay.to_string(),
            recommendation,
            components,
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Discrete contribution to an assessment, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactorKind,
    pub points: i16,
    pub notes: String,
}

/// Factors permitted in the scoring rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    AmountTier,
    PaymentTerm,
    CustomerHistory,
}

/// Scoring output describing the composite score and decision trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub expected_delay: String,
    pub recommendation: String,
    pub components: Vec<ScoreComponent>,
}
