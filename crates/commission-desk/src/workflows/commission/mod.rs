//! Commission and ranking engine.
//!
//! A run is a pure function of the operator rows and the two default goals:
//! goals are resolved, achievement and commission are calculated, each team
//! classification is ranked for bonuses, and everything is rolled up into a
//! [`CommissionReport`].

pub mod achievement;
pub mod domain;
pub mod goals;
pub mod payout;
pub mod ranking;
pub mod report;

pub use domain::{GoalDefaults, GoalDefaultsError, OperatorRecord, TeamClass};
pub use payout::{AssessedOperator, OperatorPayout};
pub use ranking::{BonusAward, TeamRanking, BONUS_SCHEDULE};
pub use report::CommissionReport;

use tracing::{debug, info};

/// Stateless engine configured with the team default goals.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommissionEngine {
    defaults: GoalDefaults,
}

impl CommissionEngine {
    pub fn new(defaults: GoalDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &GoalDefaults {
        &self.defaults
    }

    pub fn assess(&self, records: &[OperatorRecord]) -> Vec<AssessedOperator> {
        records
            .iter()
            .enumerate()
            .map(|(row, record)| AssessedOperator::assess(row, record, &self.defaults))
            .collect()
    }

    pub fn run(&self, records: &[OperatorRecord]) -> CommissionReport {
        let assessed = self.assess(records);
        let rankings = ranking::rank_all(&assessed);

        for ranking in &rankings {
            debug!(
                class = ranking.class.label(),
                awarded = ranking.awards.len(),
                "ranked team classification"
            );
        }

        let report = CommissionReport::aggregate(&assessed, rankings);
        info!(
            operators = report.totals.operators,
            eligible = report.totals.eligible,
            total_payout = report.totals.total_payout,
            "commission run complete"
        );

        report
    }
}
