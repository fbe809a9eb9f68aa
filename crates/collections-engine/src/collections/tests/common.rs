use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::collections::domain::{DebtId, DebtRecord, DebtStatus, ScoreFactors};
use crate::collections::orchestrator::CollectionsOrchestrator;
use crate::collections::repository::{
    CollectionNotice, DebtRepository, NotificationChannel, NotificationError, RepositoryError,
};
use crate::collections::scoring::{RiskScorer, ScoringConfig};

pub(super) fn scorer() -> RiskScorer {
    RiskScorer::new(ScoringConfig::default())
}

pub(super) fn factors(amount: f64, term_days: u16, has_known_customer: bool) -> ScoreFactors {
    ScoreFactors::new(amount, term_days, has_known_customer).expect("valid factors")
}

pub(super) fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

pub(super) fn debt(id: &str, risk_score: u8, due: &str, status: DebtStatus) -> DebtRecord {
    DebtRecord {
        id: DebtId(id.to_string()),
        invoice_number: format!("INV-{id}"),
        amount: 12_500.0,
        due_date: date(due),
        status,
        risk_score,
        auto_reminder_enabled: true,
        company_ref: format!("company-{id}"),
        payment_plan: None,
        reminder_sent: false,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<DebtId, DebtRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seed(debts: impl IntoIterator<Item = DebtRecord>) -> Arc<Self> {
        let repository = Self::default();
        {
            let mut guard = repository.records.lock().expect("repository mutex poisoned");
            for debt in debts {
                guard.insert(debt.id.clone(), debt);
            }
        }
        Arc::new(repository)
    }

    pub(super) fn get(&self, id: &DebtId) -> Option<DebtRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl DebtRepository for MemoryRepository {
    fn list_active(&self) -> Result<Vec<DebtRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|debt| debt.status.is_active())
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &DebtId) -> Result<Option<DebtRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_status(&self, id: &DebtId, status: DebtStatus) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(())
    }

    fn mark_reminded(&self, id: &DebtId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.reminder_sent = true;
        Ok(())
    }

    fn set_payment_plan(&self, id: &DebtId, plan: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.payment_plan = Some(plan.to_string());
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl DebtRepository for UnavailableRepository {
    fn list_active(&self) -> Result<Vec<DebtRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DebtId) -> Result<Option<DebtRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_status(&self, _id: &DebtId, _status: DebtStatus) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_reminded(&self, _id: &DebtId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_payment_plan(&self, _id: &DebtId, _plan: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingChannel {
    notices: Arc<Mutex<Vec<CollectionNotice>>>,
}

impl RecordingChannel {
    pub(super) fn notices(&self) -> Vec<CollectionNotice> {
        self.notices.lock().expect("channel mutex poisoned").clone()
    }
}

impl NotificationChannel for RecordingChannel {
    fn send(&self, notice: CollectionNotice) -> Result<(), NotificationError> {
        self.notices
            .lock()
            .expect("channel mutex poisoned")
            .push(notice);
        Ok(())
    }
}

/// Channel that fails every send addressed to one debt and records the rest.
#[derive(Clone)]
pub(super) struct FlakyChannel {
    fail_for: DebtId,
    delivered: Arc<Mutex<Vec<CollectionNotice>>>,
}

impl FlakyChannel {
    pub(super) fn failing_for(id: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_for: DebtId(id.to_string()),
            delivered: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub(super) fn delivered(&self) -> Vec<CollectionNotice> {
        self.delivered
            .lock()
            .expect("channel mutex poisoned")
            .clone()
    }
}

impl NotificationChannel for FlakyChannel {
    fn send(&self, notice: CollectionNotice) -> Result<(), NotificationError> {
        if notice.debt_id == self.fail_for {
            return Err(NotificationError::Delivery(
                "provider rejected message".to_string(),
            ));
        }
        self.delivered
            .lock()
            .expect("channel mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) fn orchestrator(
    repository: Arc<MemoryRepository>,
) -> (
    CollectionsOrchestrator<MemoryRepository, RecordingChannel>,
    Arc<RecordingChannel>,
) {
    let channel = Arc::new(RecordingChannel::default());
    (
        CollectionsOrchestrator::new(repository, channel.clone()),
        channel,
    )
}
