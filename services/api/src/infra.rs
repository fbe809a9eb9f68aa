use chrono::NaiveDate;
use collections_engine::collections::{
    CollectionNotice, DebtId, DebtRecord, DebtRepository, DebtStatus, NotificationChannel,
    NotificationError, RepositoryError, ScoringConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDebtRepository {
    records: Arc<Mutex<HashMap<DebtId, DebtRecord>>>,
}

impl InMemoryDebtRepository {
    pub(crate) fn insert(&self, record: DebtRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Vec<DebtRecord> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<DebtRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        records
    }
}

impl DebtRepository for InMemoryDebtRepository {
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

/// Channel adapter that logs each notice instead of reaching a provider.
/// Swap for a real e-mail/SMS adapter in deployment; transport timeouts live
/// in that adapter, not in the engine.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationChannel {
    notices: Arc<Mutex<Vec<CollectionNotice>>>,
}

impl LoggingNotificationChannel {
    pub(crate) fn notices(&self) -> Vec<CollectionNotice> {
        self.notices.lock().expect("channel mutex poisoned").clone()
    }
}

impl NotificationChannel for LoggingNotificationChannel {
    fn send(&self, notice: CollectionNotice) -> Result<(), NotificationError> {
        info!(
            debt_id = %notice.debt_id,
            template = notice.template.as_str(),
            "dispatching collection notice"
        );
        self.notices
            .lock()
            .expect("channel mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
