use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tracked debts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebtId(pub String);

impl std::fmt::Display for DebtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payment terms accepted by the scoring rubric. Any other day count is
/// rejected at the boundary rather than carried as a raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerm {
    DueOnReceipt,
    Net15,
    Net30,
    Net45,
    Net60,
}

impl PaymentTerm {
    pub fn from_days(days: u16) -> Result<Self, ScoreError> {
        match days {
            0 => Ok(PaymentTerm::DueOnReceipt),
            15 => Ok(PaymentTerm::Net15),
            30 => Ok(PaymentTerm::Net30),
            45 => Ok(PaymentTerm::Net45),
            60 => Ok(PaymentTerm::Net60),
            other => Err(ScoreError::UnknownPaymentTerm(other)),
        }
    }

    pub const fn days(self) -> u16 {
        match self {
            PaymentTerm::DueOnReceipt => 0,
            PaymentTerm::Net15 => 15,
            PaymentTerm::Net30 => 30,
            PaymentTerm::Net45 => 45,
            PaymentTerm::Net60 => 60,
        }
    }
}

/// Normalized scoring inputs. Construct through [`ScoreFactors::new`] so the
/// amount and term invariants hold for every instance the scorer sees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactors {
    pub amount: f64,
    pub payment_term: PaymentTerm,
    pub has_known_customer: bool,
}

impl ScoreFactors {
    pub fn new(
        amount: f64,
        payment_term_days: u16,
        has_known_customer: bool,
    ) -> Result<Self, ScoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ScoreError::InvalidAmount(amount));
        }
        let payment_term = PaymentTerm::from_days(payment_term_days)?;
        Ok(Self {
            amount,
            payment_term,
            has_known_customer,
        })
    }
}

/// Rejection raised for malformed scoring inputs. Never recovered
/// automatically; the caller must correct the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("amount must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),
    #[error("payment term of {0} days is not an accepted net term")]
    UnknownPaymentTerm(u16),
}

/// Lifecycle status tracked for each debt.
///
/// The time-driven `Pending -> Overdue` transition belongs to an external
/// scheduler; this engine only moves `Pending -> Reminded` and records
/// reminder delivery for already-overdue debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Pending,
    Reminded,
    Overdue,
    Paid,
    WrittenOff,
}

impl DebtStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DebtStatus::Pending => "pending",
            DebtStatus::Reminded => "reminded",
            DebtStatus::Overdue => "overdue",
            DebtStatus::Paid => "paid",
            DebtStatus::WrittenOff => "written_off",
        }
    }

    /// Whether the debt still participates in collections activity.
    pub const fn is_active(self) -> bool {
        !matches!(self, DebtStatus::Paid | DebtStatus::WrittenOff)
    }
}

/// A unit of money owed by a customer, tracked through the status lifecycle.
/// One record belongs to exactly one company; the engine reads and updates
/// `status`, `reminder_sent`, and `payment_plan` but never deletes records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub id: DebtId,
    pub invoice_number: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: DebtStatus,
    pub risk_score: u8,
    pub auto_reminder_enabled: bool,
    pub company_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_plan: Option<String>,
    #[serde(default)]
    pub reminder_sent: bool,
}
