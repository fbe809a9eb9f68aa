use serde::{Deserialize, Serialize};

use super::domain::{DebtId, DebtRecord};
use super::scoring::RiskLevel;

/// Collections operations the orchestrator knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionAction {
    Remind,
    GeneratePaymentPlan,
    Escalate,
}

impl CollectionAction {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionAction::Remind => "remind",
            CollectionAction::GeneratePaymentPlan => "generate_payment_plan",
            CollectionAction::Escalate => "escalate",
        }
    }
}

/// A single entry in the ordered action queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAction {
    pub debt_id: DebtId,
    pub action: CollectionAction,
}

/// Pure transform from a snapshot of debt records to an ordered action queue.
/// The input is never mutated; callers own the snapshot discipline.
pub struct DebtPrioritizer;

impl DebtPrioritizer {
    /// Ranks active debts by descending risk score, ties broken by earliest
    /// due date, and expands each into its action set: every active debt gets
    /// a reminder, and High-risk debts additionally get a payment plan and an
    /// escalation.
    pub fn plan(debts: &[DebtRecord]) -> Vec<PlannedAction> {
        let mut active: Vec<&DebtRecord> = debts
            .iter()
            .filter(|debt| debt.status.is_active())
            .collect();
        active.sort_by(|a, b| {
            b.risk_score
                .cmp(&a.risk_score)
                .then(a.due_date.cmp(&b.due_date))
        });

        let mut queue = Vec::with_capacity(active.len());
        for debt in active {
            queue.push(PlannedAction {
                debt_id: debt.id.clone(),
                action: CollectionAction::Remind,
            });
            if RiskLevel::from_score(debt.risk_score) == RiskLevel::High {
                queue.push(PlannedAction {
                    debt_id: debt.id.clone(),
                    action: CollectionAction::GeneratePaymentPlan,
                });
                queue.push(PlannedAction {
                    debt_id: debt.id.clone(),
                    action: CollectionAction::Escalate,
                });
            }
        }
        queue
    }
}
