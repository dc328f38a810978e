use super::summary::CommissionReport;
use super::views::OperatorRankingView;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write commission export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode commission export: {0}")]
    Csv(#[from] csv::Error),
    #[error("commission export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Exported row; the reduced-goal flag stays out of the file.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    position: usize,
    name: &'a str,
    team: &'a str,
    completed: f64,
    achievement_pct: f64,
    final_commission: f64,
    bonus: f64,
    total: f64,
}

impl<'a> From<&'a OperatorRankingView> for ExportRow<'a> {
    fn from(view: &'a OperatorRankingView) -> Self {
        Self {
            position: view.position,
            name: &view.name,
            team: &view.team,
            completed: view.completed,
            achievement_pct: view.achievement_pct,
            final_commission: view.final_commission,
            bonus: view.bonus,
            total: view.total_payout,
        }
    }
}

pub fn write_ranking<W: Write>(report: &CommissionReport, writer: W) -> Result<(), ExportError> {
    let summary = report.summary();
    let mut csv_writer = csv::Writer::from_writer(writer);

    for view in &summary.ranking {
        csv_writer.serialize(ExportRow::from(view))?;
    }

    if summary.ranking.is_empty() {
        csv_writer.write_record([
            "position",
            "name",
            "team",
            "completed",
            "achievement_pct",
            "final_commission",
            "bonus",
            "total",
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_to_path<P: AsRef<Path>>(report: &CommissionReport, path: P) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_ranking(report, file)
}

pub fn export_to_string(report: &CommissionReport) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_ranking(report, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
