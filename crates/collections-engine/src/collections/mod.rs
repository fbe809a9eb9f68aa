//! Payment-risk scoring, debt prioritization, and collections orchestration.
//!
//! The scorer is a pure function over normalized factors; the prioritizer is a
//! pure transform over a debt snapshot; only the orchestrator touches the
//! injected persistence and notification collaborators.

pub mod domain;
pub mod orchestrator;
pub mod prioritizer;
pub mod repository;
pub mod router;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use domain::{DebtId, DebtRecord, DebtStatus, PaymentTerm, ScoreError, ScoreFactors};
pub use orchestrator::{
    ActionDisposition, ActionOutcome, CollectionsOrchestrator, CollectionsRun, OrchestratorError,
};
pub use prioritizer::{CollectionAction, DebtPrioritizer, PlannedAction};
pub use repository::{
    CollectionNotice, DebtRepository, NotificationChannel, NotificationError, NoticeTarget,
    RepositoryError,
};
pub use router::collections_router;
pub use scoring::{
    RiskAssessment, RiskFactorKind, RiskLevel, RiskScorer, ScoreComponent, ScoringConfig,
};
