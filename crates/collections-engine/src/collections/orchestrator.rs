use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{DebtId, DebtRecord, DebtStatus};
use super::prioritizer::{CollectionAction, DebtPrioritizer, PlannedAction};
use super::repository::{
    CollectionNotice, DebtRepository, NotificationChannel, NotificationError, NoticeTarget,
    RepositoryError,
};

const PLAN_INSTALLMENTS: u32 = 3;

/// Service sequencing reminders, escalations, and payment plans against the
/// injected persistence and notification collaborators.
///
/// Sends may be dispatched concurrently across debts, but are serialized per
/// debt through the in-flight guard so a single debt never has two reminders
/// in flight. No consistency guarantee spans multiple debts; batches surface
/// per-item results instead of all-or-nothing outcomes.
pub struct CollectionsOrchestrator<R, N> {
    repository: Arc<R>,
    channel: Arc<N>,
    in_flight: Mutex<HashSet<DebtId>>,
}

impl<R, N> CollectionsOrchestrator<R, N>
where
    R: DebtRepository + 'static,
    N: NotificationChannel + 'static,
{
    pub fn new(repository: Arc<R>, channel: Arc<N>) -> Self {
        Self {
            repository,
            channel,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Send a payment reminder. On delivery, a pending debt moves to
    /// `Reminded` while an overdue debt stays overdue with only the
    /// reminder-sent flag recorded. Delivery failure leaves status untouched.
    pub fn send_reminder(&self, debt: &DebtRecord) -> Result<DebtStatus, OrchestratorError> {
        self.with_in_flight(&debt.id, || {
            let notice = CollectionNotice {
                target: NoticeTarget::Customer(debt.company_ref.clone()),
                template: "payment_reminder".to_string(),
                debt_id: debt.id.clone(),
                details: debt_details(debt),
            };
            self.channel.send(notice)?;

            self.repository.mark_reminded(&debt.id)?;
            let status = match debt.status {
                DebtStatus::Pending => {
                    self.repository
                        .update_status(&debt.id, DebtStatus::Reminded)?;
                    DebtStatus::Reminded
                }
                other => other,
            };
            info!(debt_id = %debt.id, status = status.label(), "payment reminder delivered");
            Ok(status)
        })
    }

    /// Notify the senior collections desk. Pure notification; status is never
    /// altered by an escalation.
    pub fn escalate(&self, debt: &DebtRecord) -> Result<(), OrchestratorError> {
        self.with_in_flight(&debt.id, || {
            let notice = CollectionNotice {
                target: NoticeTarget::SeniorCollections,
                template: "collections_escalation".to_string(),
                debt_id: debt.id.clone(),
                details: debt_details(debt),
            };
            self.channel.send(notice)?;
            info!(debt_id = %debt.id, "debt escalated to senior collections");
            Ok(())
        })
    }

    /// Propose an installment plan to the customer and persist it on delivery.
    pub fn generate_payment_plan(&self, debt: &DebtRecord) -> Result<String, OrchestratorError> {
        self.with_in_flight(&debt.id, || {
            let plan = build_payment_plan(debt);
            let mut details = debt_details(debt);
            details.insert("plan".to_string(), plan.clone());
            let notice = CollectionNotice {
                target: NoticeTarget::Customer(debt.company_ref.clone()),
                template: "payment_plan".to_string(),
                debt_id: debt.id.clone(),
                details,
            };
            self.channel.send(notice)?;
            self.repository.set_payment_plan(&debt.id, &plan)?;
            info!(debt_id = %debt.id, "payment plan proposed");
            Ok(plan)
        })
    }

    /// Rank the currently active debts without dispatching anything.
    pub fn preview(&self) -> Result<Vec<PlannedAction>, OrchestratorError> {
        let debts = self.repository.list_active()?;
        Ok(DebtPrioritizer::plan(&debts))
    }

    /// Dispatch a planned queue, isolating failures per item. One failed send
    /// never blocks the remaining queue.
    pub fn execute(&self, debts: &[DebtRecord], queue: &[PlannedAction]) -> Vec<ActionOutcome> {
        let by_id: HashMap<&DebtId, &DebtRecord> =
            debts.iter().map(|debt| (&debt.id, debt)).collect();

        queue
            .iter()
            .map(|planned| {
                let disposition = match by_id.get(&planned.debt_id) {
                    Some(debt) => self.dispatch(debt, planned.action),
                    None => ActionDisposition::Failed {
                        reason: format!("debt {} not in snapshot", planned.debt_id),
                    },
                };
                ActionOutcome {
                    debt_id: planned.debt_id.clone(),
                    action: planned.action,
                    disposition,
                }
            })
            .collect()
    }

    /// Full collections pass: snapshot active debts, rank them, dispatch the
    /// queue. Persistence being unreachable aborts the run before any send.
    pub fn run(&self) -> Result<CollectionsRun, OrchestratorError> {
        let debts = self.repository.list_active()?;
        let queue = DebtPrioritizer::plan(&debts);
        let outcomes = self.execute(&debts, &queue);
        Ok(CollectionsRun {
            considered: debts.len(),
            outcomes,
        })
    }

    fn dispatch(&self, debt: &DebtRecord, action: CollectionAction) -> ActionDisposition {
        let result = match action {
            CollectionAction::Remind => self.send_reminder(debt).map(|_| ()),
            CollectionAction::GeneratePaymentPlan => self.generate_payment_plan(debt).map(|_| ()),
            CollectionAction::Escalate => self.escalate(debt),
        };
        match result {
            Ok(()) => ActionDisposition::Delivered,
            Err(error) => {
                warn!(debt_id = %debt.id, action = action.label(), %error, "collections action failed");
                ActionDisposition::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    fn with_in_flight<T>(
        &self,
        id: &DebtId,
        operation: impl FnOnce() -> Result<T, OrchestratorError>,
    ) -> Result<T, OrchestratorError> {
        {
            let mut guard = self.in_flight.lock().expect("in-flight mutex poisoned");
            if !guard.insert(id.clone()) {
                return Err(OrchestratorError::InFlight(id.clone()));
            }
        }
        let result = operation();
        self.in_flight
            .lock()
            .expect("in-flight mutex poisoned")
            .remove(id);
        result
    }
}

fn debt_details(debt: &DebtRecord) -> BTreeMap<String, String> {
    let mut details = BTreeMap::new();
    details.insert("invoice".to_string(), debt.invoice_number.clone());
    details.insert("amount".to_string(), format!("{:.2}", debt.amount));
    details.insert("due_date".to_string(), debt.due_date.to_string());
    details
}

fn build_payment_plan(debt: &DebtRecord) -> String {
    let installment = debt.amount / f64::from(PLAN_INSTALLMENTS);
    format!(
        "{PLAN_INSTALLMENTS} monthly installments of {installment:.2}, first due {}",
        debt.due_date
    )
}

/// Per-item result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionDisposition {
    Delivered,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub debt_id: DebtId,
    pub action: CollectionAction,
    pub disposition: ActionDisposition,
}

impl ActionOutcome {
    pub fn delivered(&self) -> bool {
        matches!(self.disposition, ActionDisposition::Delivered)
    }
}

/// Aggregate report for one collections pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsRun {
    pub considered: usize,
    pub outcomes: Vec<ActionOutcome>,
}

impl CollectionsRun {
    pub fn delivered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.delivered()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.delivered_count()
    }
}

/// Error raised by the collections orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error("an action for debt {0} is already in flight")]
    InFlight(DebtId),
}
