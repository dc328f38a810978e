use crate::infra::resolve_goals;
use chrono::Local;
use clap::Args;
use commission_desk::config::AppConfig;
use commission_desk::error::AppError;
use commission_desk::telemetry;
use commission_desk::workflows::commission::report::export::export_to_path;
use commission_desk::workflows::commission::report::views::{
    currency_label, percent_label, CommissionReportSummary,
};
use commission_desk::workflows::commission::{CommissionEngine, CommissionReport, TeamClass};
use commission_desk::workflows::production::ProductionImporter;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Production report CSV (columns: nome, equipe, realizado, optional meta_personalizada)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Default goal for URA teams (overrides COMMISSION_GOAL_URA)
    #[arg(long)]
    pub(crate) goal_ura: Option<f64>,
    /// Default goal for DISCADOR teams (overrides COMMISSION_GOAL_DISCADOR)
    #[arg(long)]
    pub(crate) goal_discador: Option<f64>,
    /// Write the general ranking as CSV to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Include every operator's commission breakdown in the output
    #[arg(long)]
    pub(crate) list_operators: bool,
}

pub(crate) fn run_commission_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        input,
        goal_ura,
        goal_discador,
        export,
        list_operators,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let goals = resolve_goals(config.commission.goals, goal_ura, goal_discador)?;
    let records = ProductionImporter::from_path(&input)?;
    let report = CommissionEngine::new(goals).run(&records);

    render_commission_report(&report, list_operators);

    if let Some(path) = export {
        export_to_path(&report, &path)?;
        info!(path = %path.display(), "commission report exported");
        println!("\nReport exported to {}", path.display());
    }

    Ok(())
}

pub(crate) fn render_commission_report(report: &CommissionReport, list_operators: bool) {
    let summary = report.summary();

    println!("Commission report ({})", Local::now().date_naive());

    println!("\nProduction overview");
    println!("- Total completed: {}", summary.totals.total_completed);
    println!("- Total payout: {}", summary.totals.total_payout_label);
    println!("- Eligible operators: {}", summary.totals.eligible);

    render_reduced_goals(&summary);

    println!("\nTeam KPIs");
    for team in &summary.team_summaries {
        println!(
            "- {}: {} completed, {} mean achievement, {} paid, {} eligible",
            team.team_key,
            team.total_completed,
            team.mean_achievement_label,
            currency_label(team.total_payout),
            team.eligible
        );
    }

    for class in TeamClass::ordered() {
        let Some(ranking) = summary.ranking_for(class) else {
            continue;
        };

        if ranking.awards.is_empty() {
            println!("\nTop 3 {}: no eligible operators", ranking.class_label);
            continue;
        }

        println!("\nTop 3 {}", ranking.class_label);
        for award in &ranking.awards {
            let marker = if award.goal_reduced { " [reduced goal]" } else { "" };
            println!(
                "{}. {} | {} completed | {} | commission {} | bonus {}{}",
                award.position,
                award.name,
                award.completed,
                award.achievement_label,
                currency_label(award.final_commission),
                currency_label(award.bonus),
                marker
            );
        }
    }

    println!("\nGeneral ranking");
    for row in &summary.ranking {
        let marker = if row.goal_reduced { " [reduced goal]" } else { "" };
        println!(
            "{}. {} ({}) | {} completed | {} | commission {} | bonus {} | total {}{}",
            row.position,
            row.name,
            row.team,
            row.completed,
            row.achievement_label,
            currency_label(row.final_commission),
            currency_label(row.bonus),
            currency_label(row.total_payout),
            marker
        );
    }

    if list_operators {
        println!("\nOperator breakdown (input order)");
        for operator in &report.operators {
            println!(
                "- {} | {} | goal {} | {} | tier {} x {} = {} | accelerator {} | final {}",
                operator.name,
                operator.team_key,
                operator.applied_goal,
                percent_label(operator.achievement_ratio),
                operator.tier_rate,
                operator.completed,
                currency_label(operator.base_commission),
                operator.accelerator,
                currency_label(operator.final_commission)
            );
        }
    }
}

fn render_reduced_goals(summary: &CommissionReportSummary) {
    if summary.reduced_goals.is_empty() {
        println!("\nReduced goals: none");
        return;
    }

    println!("\nReduced goals ({})", summary.reduced_goals.len());
    for entry in &summary.reduced_goals {
        println!("- {}: goal {}", entry.name, entry.applied_goal_label);
    }
}
