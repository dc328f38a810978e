use super::domain::TeamClass;
use super::payout::AssessedOperator;
use serde::Serialize;
use std::cmp::Ordering;

/// Bonus paid to positions 1, 2 and 3 of each classification.
pub const BONUS_SCHEDULE: [f64; 3] = [700.0, 500.0, 350.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonusAward {
    pub class: TeamClass,
    pub position: usize,
    pub row: usize,
    pub name: String,
    pub team_key: String,
    pub completed: f64,
    pub achievement_ratio: f64,
    pub final_commission: f64,
    pub goal_reduced: bool,
    pub bonus: f64,
}

/// Top-3 bonus list for one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRanking {
    pub class: TeamClass,
    pub awards: Vec<BonusAward>,
}

impl TeamRanking {
    pub fn is_empty(&self) -> bool {
        self.awards.is_empty()
    }

    /// Bonus for an exact `(name, team_key)` match; duplicates resolve to the largest award.
    pub fn bonus_for(&self, name: &str, team_key: &str) -> Option<f64> {
        self.awards
            .iter()
            .filter(|award| award.name == name && award.team_key == team_key)
            .map(|award| award.bonus)
            .reduce(f64::max)
    }
}

/// Descending by completed units, then by achievement ratio.
pub fn performance_order(a_completed: f64, a_ratio: f64, b_completed: f64, b_ratio: f64) -> Ordering {
    b_completed
        .total_cmp(&a_completed)
        .then_with(|| b_ratio.total_cmp(&a_ratio))
}

pub fn rank_class(operators: &[AssessedOperator], class: TeamClass) -> TeamRanking {
    let mut eligible: Vec<&AssessedOperator> = operators
        .iter()
        .filter(|operator| operator.belongs_to(class) && operator.is_eligible())
        .collect();

    // sort_by is stable: input order settles full ties.
    eligible.sort_by(|a, b| {
        performance_order(
            a.record.completed,
            a.achievement.achievement_ratio,
            b.record.completed,
            b.achievement.achievement_ratio,
        )
    });

    let awards = eligible
        .into_iter()
        .zip(BONUS_SCHEDULE)
        .enumerate()
        .map(|(index, (operator, bonus))| BonusAward {
            class,
            position: index + 1,
            row: operator.row,
            name: operator.record.name.clone(),
            team_key: operator.team_key.clone(),
            completed: operator.record.completed,
            achievement_ratio: operator.achievement.achievement_ratio,
            final_commission: operator.achievement.final_commission,
            goal_reduced: operator.goal.goal_reduced,
            bonus,
        })
        .collect();

    TeamRanking { class, awards }
}

pub fn rank_all(operators: &[AssessedOperator]) -> Vec<TeamRanking> {
    TeamClass::ordered()
        .into_iter()
        .map(|class| rank_class(operators, class))
        .collect()
}
