pub mod export;
mod summary;
pub mod views;

pub use export::ExportError;
pub use summary::{CommissionReport, GrandTotals, TeamSummary};
