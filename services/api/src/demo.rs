use crate::infra::{default_scoring_config, InMemoryDebtRepository, LoggingNotificationChannel};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use collections_engine::collections::{
    CollectionsOrchestrator, DebtId, DebtRecord, DebtStatus, OrchestratorError, RiskAssessment,
    RiskScorer, ScoreFactors,
};
use collections_engine::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Invoice or debt amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Payment term in days (0, 15, 30, 45, or 60)
    #[arg(long, default_value_t = 30)]
    pub(crate) term_days: u16,
    /// Score without a resolved customer record
    #[arg(long)]
    pub(crate) unknown_customer: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Base due date for the seeded debts (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) due_date: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let factors = ScoreFactors::new(args.amount, args.term_days, !args.unknown_customer)?;
    let assessment = RiskScorer::new(default_scoring_config()).assess(&factors);

    render_assessment(&assessment);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let base_due = args.due_date.unwrap_or_else(|| Local::now().date_naive());
    let scorer = RiskScorer::new(default_scoring_config());

    println!("Collections scoring demo");
    println!("========================\n");

    let repository = Arc::new(InMemoryDebtRepository::default());
    let channel = Arc::new(LoggingNotificationChannel::default());

    let seeds = [
        ("D-1001", 120_000.0, 60, true, DebtStatus::Overdue, -20),
        ("D-1002", 30_000.0, 45, true, DebtStatus::Pending, 10),
        ("D-1003", 4_500.0, 15, true, DebtStatus::Pending, 25),
        ("D-1004", 18_000.0, 30, false, DebtStatus::Pending, 5),
    ];

    for (id, amount, term_days, known, status, due_offset) in seeds {
        let factors = ScoreFactors::new(amount, term_days, known)?;
        let assessment = scorer.assess(&factors);
        println!(
            "{id}: amount {amount:.2}, Net {term_days} -> score {} ({}), expect {}",
            assessment.risk_score,
            assessment.risk_level.label(),
            assessment.expected_delay
        );
        println!("      {}", assessment.recommendation);

        let record = DebtRecord {
            id: DebtId(id.to_string()),
            invoice_number: format!("INV-{id}"),
            amount,
            due_date: base_due + Duration::days(due_offset),
            status,
            risk_score: assessment.risk_score,
            auto_reminder_enabled: true,
            company_ref: format!("company-{id}"),
            payment_plan: None,
            reminder_sent: false,
        };
        repository.insert(record).map_err(OrchestratorError::from)?;
    }

    let orchestrator = CollectionsOrchestrator::new(repository.clone(), channel.clone());

    println!("\nPrioritized action queue");
    let queue = orchestrator.preview()?;
    for planned in &queue {
        println!("  {} -> {}", planned.debt_id, planned.action.label());
    }

    println!("\nDispatching collections pass");
    let report = orchestrator.run()?;
    println!(
        "  {} debts considered, {} actions delivered, {} failed",
        report.considered,
        report.delivered_count(),
        report.failed_count()
    );

    println!("\nNotices sent: {}", channel.notices().len());
    println!("\nDebt book after the pass");
    for record in repository.snapshot() {
        println!(
            "  {} [{}] score {}{}{}",
            record.id,
            record.status.label(),
            record.risk_score,
            if record.reminder_sent {
                ", reminder sent"
            } else {
                ""
            },
            record
                .payment_plan
                .as_deref()
                .map(|plan| format!(", plan: {plan}"))
                .unwrap_or_default()
        );
    }

    Ok(())
}

fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "risk score     {} ({})",
        assessment.risk_score,
        assessment.risk_level.label()
    );
    println!("expected delay {}", assessment.expected_delay);
    println!("recommendation {}", assessment.recommendation);
    println!("breakdown:");
    for component in &assessment.components {
        println!("  {:+} {}", component.points, component.notes);
    }
}
