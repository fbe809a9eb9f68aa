use super::super::domain::{PaymentTerm, ScoreFactors};
use super::config::ScoringConfig;
use serde::{Deserialize, Serialize};

pub const RECOMMEND_LOW: &str = "Standard terms acceptable";
pub const RECOMMEND_MEDIUM: &str =
    "Request partial prepayment (30-50%) or shorten the payment terms";
pub const RECOMMEND_HIGH: &str = "Consider requiring full prepayment or declining the order";
pub const RECOMMEND_UNKNOWN_CUSTOMER: &str = "Select a customer for an accurate assessment";
pub const RECOMMEND_CRITICAL: &str =
    "Critical risk: require prepayment before extending these terms";

const HIGH_THRESHOLD: u8 = 35;
const MEDIUM_THRESHOLD: u8 = 20;

/// Categorical summary of expected collection difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Re-derives the level from a stored score, so persisted
    /// `DebtRecord.risk_score` values classify without re-running the scorer.
    pub const fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Assigns the level and recommendation for a clamped score.
///
/// Precedence: the unknown-customer text replaces the level text, and the
/// critical override (large amount on Net 60) is applied last and wins over
/// both, forcing the level to High regardless of the computed score.
pub(crate) fn decide(
    factors: &ScoreFactors,
    score: u8,
    config: &ScoringConfig,
) -> (RiskLevel, String) {
    let mut level = RiskLevel::from_score(score);
    let mut recommendation = match level {
        RiskLevel::High => RECOMMEND_HIGH,
        RiskLevel::Medium => RECOMMEND_MEDIUM,
        RiskLevel::Low => RECOMMEND_LOW,
    };

    if !factors.has_known_customer {
        recommendation = RECOMMEND_UNKNOWN_CUSTOMER;
    }

    if factors.amount > config.critical_amount && factors.payment_term == PaymentTerm::Net60 {
        level = RiskLevel::High;
        recommendation = RECOMMEND_CRITICAL;
    }

    (level, recommendation.to_string())
}
