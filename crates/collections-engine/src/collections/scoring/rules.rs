use super::super::domain::{PaymentTerm, ScoreFactors};
use super::config::ScoringConfig;
use super::{RiskFactorKind, ScoreComponent};

/// Amount tiers evaluated high to low with strict `>` comparisons. The lowest
/// tier below catches everything else.
const AMOUNT_TIERS: [(f64, i16, &str); 4] = [
    (100_000.0, 40, "30-60 days"),
    (50_000.0, 25, "15-30 days"),
    (25_000.0, 15, "7-14 days"),
    (10_000.0, 8, "5-7 days"),
];

const BASE_TIER_POINTS: i16 = 2;
const BASE_TIER_DELAY: &str = "1-3 days";

pub(crate) fn score_factors(
    factors: &ScoreFactors,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, i16, &'static str) {
    let mut components = Vec::new();
    let mut total_score: i16 = 0;

    let (tier_points, mut expected_delay) = AMOUNT_TIERS
        .iter()
        .find(|(threshold, _, _)| factors.amount > *threshold)
        .map(|(_, points, delay)| (*points, *delay))
        .unwrap_or((BASE_TIER_POINTS, BASE_TIER_DELAY));

    components.push(ScoreComponent {
        factor: RiskFactorKind::AmountTier,
        points: tier_points,
        notes: format!("amount {:.2} scored {tier_points} points", factors.amount),
    });
    total_score += tier_points;

    // Net 60 and Net 45 stretch the delay estimate further once the running
    // score (including the term adjustment itself) crosses 30.
    match factors.payment_term {
        PaymentTerm::Net60 => {
            total_score += 20;
            expected_delay = if total_score > 30 {
                "45-60 days"
            } else {
                "20-30 days"
            };
            components.push(term_component(20, "Net 60 extends exposure"));
        }
        PaymentTerm::Net45 => {
            total_score += 10;
            expected_delay = if total_score > 30 {
                "25-45 days"
            } else {
                "10-20 days"
            };
            components.push(term_component(10, "Net 45 extends exposure"));
        }
        PaymentTerm::Net30 => {}
        PaymentTerm::Net15 => {
            total_score -= 5;
            expected_delay = "1-5 days";
            components.push(term_component(-5, "Net 15 shortens exposure"));
        }
        PaymentTerm::DueOnReceipt => {
            total_score -= 10;
            expected_delay = "Immediate";
            components.push(term_component(-10, "due on receipt"));
        }
    }

    if !factors.has_known_customer {
        total_score += config.unknown_customer_penalty;
        components.push(ScoreComponent {
            factor: RiskFactorKind::CustomerHistory,
            points: config.unknown_customer_penalty,
            notes: "no resolved customer record backs this debt".to_string(),
        });
    }

    (components, total_score, expected_delay)
}

fn term_component(points: i16, note: &str) -> ScoreComponent {
    ScoreComponent {
        factor: RiskFactorKind::PaymentTerm,
        points,
        notes: note.to_string(),
    }
}
