use super::achievement::Achievement;
use super::domain::{GoalDefaults, OperatorRecord, TeamClass};
use super::goals::{resolve_goal, GoalResolution};
use serde::Serialize;

/// Operator after goal resolution and commission calculation, before bonuses.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessedOperator {
    pub row: usize,
    pub record: OperatorRecord,
    pub team_key: String,
    pub goal: GoalResolution,
    pub achievement: Achievement,
}

impl AssessedOperator {
    pub fn assess(row: usize, record: &OperatorRecord, defaults: &GoalDefaults) -> Self {
        let goal = resolve_goal(record, defaults);
        let achievement = Achievement::calculate(record.completed, goal.applied_goal);

        Self {
            row,
            record: record.clone(),
            team_key: record.team_key(),
            goal,
            achievement,
        }
    }

    pub fn belongs_to(&self, class: TeamClass) -> bool {
        class.matches(&self.team_key)
    }

    pub fn is_eligible(&self) -> bool {
        self.achievement.is_eligible()
    }
}

/// Fully enriched operator row, one per input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorPayout {
    pub row: usize,
    pub name: String,
    pub team: String,
    pub team_key: String,
    pub completed: f64,
    pub custom_goal: Option<f64>,
    pub applied_goal: f64,
    pub goal_reduced: bool,
    pub achievement_ratio: f64,
    pub tier_rate: f64,
    pub base_commission: f64,
    pub accelerator: f64,
    pub final_commission: f64,
    pub bonus: f64,
    pub total_payout: f64,
}

impl OperatorPayout {
    pub(crate) fn settle(assessed: &AssessedOperator, bonus: f64) -> Self {
        let achievement = &assessed.achievement;

        Self {
            row: assessed.row,
            name: assessed.record.name.clone(),
            team: assessed.record.team.clone(),
            team_key: assessed.team_key.clone(),
            completed: assessed.record.completed,
            custom_goal: assessed.record.custom_goal,
            applied_goal: assessed.goal.applied_goal,
            goal_reduced: assessed.goal.goal_reduced,
            achievement_ratio: achievement.achievement_ratio,
            tier_rate: achievement.tier_rate,
            base_commission: achievement.base_commission,
            accelerator: achievement.accelerator,
            final_commission: achievement.final_commission,
            bonus,
            total_payout: round_cents(achievement.final_commission + bonus),
        }
    }

    pub fn is_eligible(&self) -> bool {
        super::achievement::is_eligible(self.achievement_ratio)
    }
}

/// Rounds a monetary amount to two decimal places, halves away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_combines_goal_and_achievement() {
        let defaults = GoalDefaults::new(100.0, 60.0).expect("valid defaults");
        let record = OperatorRecord::new("Ana", "URA", 95.0);
        let assessed = AssessedOperator::assess(3, &record, &defaults);

        assert_eq!(assessed.row, 3);
        assert_eq!(assessed.team_key, "URA");
        assert_eq!(assessed.goal.applied_goal, 100.0);
        assert_eq!(assessed.achievement.tier_rate, 7.0);
        assert!(assessed.is_eligible());
        assert!(assessed.belongs_to(TeamClass::Ura));
        assert!(!assessed.belongs_to(TeamClass::Discador));
    }

    #[test]
    fn settle_adds_bonus_and_rounds_total() {
        let defaults = GoalDefaults::new(100.0, 60.0).expect("valid defaults");
        let record = OperatorRecord::new("Bia", "URA", 111.0);
        let assessed = AssessedOperator::assess(0, &record, &defaults);
        let payout = OperatorPayout::settle(&assessed, 500.0);

        // 9 * 111 * 1.1 = 1098.9
        assert_eq!(payout.total_payout, 1598.9);
        assert_eq!(payout.bonus, 500.0);
        assert_eq!(payout.name, "Bia");
    }

    #[test]
    fn round_cents_keeps_two_decimals() {
        assert_eq!(round_cents(10.456), 10.46);
        assert_eq!(round_cents(10.454), 10.45);
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_cents(1350.0), 1350.0);
    }
}
