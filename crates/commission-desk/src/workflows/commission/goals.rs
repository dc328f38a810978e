use super::domain::{GoalDefaults, OperatorRecord};
use serde::Serialize;

/// Goal applied to a single operator and how it compares with the team default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalResolution {
    pub default_goal: f64,
    pub applied_goal: f64,
    pub goal_reduced: bool,
}

pub fn resolve_goal(record: &OperatorRecord, defaults: &GoalDefaults) -> GoalResolution {
    let default_goal = defaults.for_team_key(&record.team_key());
    let applied_goal = record.valid_custom_goal().unwrap_or(default_goal);

    GoalResolution {
        default_goal,
        applied_goal,
        goal_reduced: applied_goal < default_goal,
    }
}
