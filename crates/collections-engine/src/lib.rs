//! Risk and collections scoring engine.
//!
//! Maps invoice amount, payment terms, and customer history into a
//! deterministic risk assessment, ranks open debts into an action queue, and
//! drives reminders, escalations, and payment plans against injected
//! persistence and notification collaborators.

pub mod collections;
pub mod config;
pub mod error;
pub mod telemetry;
