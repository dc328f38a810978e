use serde::Serialize;

/// Minimum achievement ratio for ranking and bonus eligibility.
pub const ELIGIBILITY_THRESHOLD: f64 = 0.8;

/// Per-unit rate brackets as (lower bound inclusive, rate), highest first.
const TIER_RATES: [(f64, f64); 3] = [(1.0, 9.0), (0.9, 7.0), (0.8, 5.0)];

/// Accelerator brackets as (lower bound inclusive, multiplier), highest first.
const ACCELERATORS: [(f64, f64); 2] = [(1.2, 1.2), (1.1, 1.1)];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Achievement {
    pub achievement_ratio: f64,
    pub tier_rate: f64,
    pub base_commission: f64,
    pub accelerator: f64,
    pub final_commission: f64,
}

impl Achievement {
    pub fn calculate(completed: f64, applied_goal: f64) -> Self {
        let achievement_ratio = achievement_ratio(completed, applied_goal);
        let tier_rate = tier_rate(achievement_ratio);
        let base_commission = tier_rate * completed;
        let accelerator = accelerator(achievement_ratio);

        Self {
            achievement_ratio,
            tier_rate,
            base_commission,
            accelerator,
            final_commission: base_commission * accelerator,
        }
    }

    pub fn is_eligible(&self) -> bool {
        is_eligible(self.achievement_ratio)
    }
}

/// `completed / applied_goal`, or zero when the goal is zero or not a number.
pub fn achievement_ratio(completed: f64, applied_goal: f64) -> f64 {
    if applied_goal == 0.0 || applied_goal.is_nan() {
        return 0.0;
    }
    completed / applied_goal
}

pub fn tier_rate(ratio: f64) -> f64 {
    TIER_RATES
        .iter()
        .find(|(floor, _)| ratio >= *floor)
        .map_or(0.0, |(_, rate)| *rate)
}

pub fn accelerator(ratio: f64) -> f64 {
    ACCELERATORS
        .iter()
        .find(|(floor, _)| ratio >= *floor)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

pub fn is_eligible(ratio: f64) -> bool {
    ratio >= ELIGIBILITY_THRESHOLD
}
