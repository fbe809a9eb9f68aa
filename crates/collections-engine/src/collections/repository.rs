use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{DebtId, DebtRecord, DebtStatus};

/// Storage abstraction so the orchestrator can be exercised in isolation.
/// The engine never owns storage; this is the only persistence surface it
/// consumes.
pub trait DebtRepository: Send + Sync {
    fn list_active(&self) -> Result<Vec<DebtRecord>, RepositoryError>;
    fn fetch(&self, id: &DebtId) -> Result<Option<DebtRecord>, RepositoryError>;
    fn update_status(&self, id: &DebtId, status: DebtStatus) -> Result<(), RepositoryError>;
    fn mark_reminded(&self, id: &DebtId) -> Result<(), RepositoryError>;
    fn set_payment_plan(&self, id: &DebtId, plan: &str) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures. `Unavailable` covers the
/// persistence collaborator being unreachable and is propagated to callers.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("debt record already exists")]
    Conflict,
    #[error("debt record not found")]
    NotFound,
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (e-mail, SMS, or WhatsApp
/// adapters). The engine is channel-agnostic; adapters own transport concerns
/// including bounded send timeouts.
pub trait NotificationChannel: Send + Sync {
    fn send(&self, notice: CollectionNotice) -> Result<(), NotificationError>;
}

/// Delivery target for a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeTarget {
    /// The customer/company that owns the debt.
    Customer(String),
    /// The senior collections desk handling escalations.
    SeniorCollections,
}

/// Outbound payload so adapters and tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNotice {
    pub target: NoticeTarget,
    pub template: String,
    pub debt_id: DebtId,
    pub details: BTreeMap<String, String>,
}

/// A single external send failed. Non-fatal; collected per item and surfaced
/// to the caller without aborting the batch or touching debt status.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
    #[error("notification send timed out")]
    Timeout,
}
