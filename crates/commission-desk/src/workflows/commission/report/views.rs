use super::super::domain::TeamClass;
use super::super::payout::{round_cents, OperatorPayout};
use super::super::ranking::{BonusAward, TeamRanking};
use super::summary::{GrandTotals, TeamSummary};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GrandTotalsView {
    pub operators: usize,
    pub total_completed: f64,
    pub total_payout: f64,
    pub total_payout_label: String,
    pub eligible: usize,
}

impl GrandTotalsView {
    pub(crate) fn from_totals(totals: &GrandTotals) -> Self {
        let total_payout = round_cents(totals.total_payout);
        Self {
            operators: totals.operators,
            total_completed: totals.total_completed,
            total_payout,
            total_payout_label: currency_label(total_payout),
            eligible: totals.eligible,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummaryEntry {
    pub team_key: String,
    pub operators: usize,
    pub total_completed: f64,
    pub mean_achievement_pct: f64,
    pub mean_achievement_label: String,
    pub total_payout: f64,
    pub eligible: usize,
}

impl TeamSummaryEntry {
    pub(crate) fn from_summary(summary: &TeamSummary) -> Self {
        Self {
            team_key: summary.team_key.clone(),
            operators: summary.operators,
            total_completed: summary.total_completed,
            mean_achievement_pct: percent(summary.mean_achievement_ratio),
            mean_achievement_label: percent_label(summary.mean_achievement_ratio),
            total_payout: summary.total_payout,
            eligible: summary.eligible,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusAwardView {
    pub position: usize,
    pub name: String,
    pub team_key: String,
    pub completed: f64,
    pub achievement_pct: f64,
    pub achievement_label: String,
    pub final_commission: f64,
    pub bonus: f64,
    pub goal_reduced: bool,
}

impl BonusAwardView {
    fn from_award(award: &BonusAward) -> Self {
        Self {
            position: award.position,
            name: award.name.clone(),
            team_key: award.team_key.clone(),
            completed: award.completed,
            achievement_pct: percent(award.achievement_ratio),
            achievement_label: percent_label(award.achievement_ratio),
            final_commission: round_cents(award.final_commission),
            bonus: award.bonus,
            goal_reduced: award.goal_reduced,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRankingView {
    pub class: TeamClass,
    pub class_label: &'static str,
    pub awards: Vec<BonusAwardView>,
}

impl TeamRankingView {
    pub(crate) fn from_ranking(ranking: &TeamRanking) -> Self {
        Self {
            class: ranking.class,
            class_label: ranking.class.label(),
            awards: ranking.awards.iter().map(BonusAwardView::from_award).collect(),
        }
    }
}

/// Row of the general ranking. `goal_reduced` is for highlighting only and is never exported.
#[derive(Debug, Clone, Serialize)]
pub struct OperatorRankingView {
    pub position: usize,
    pub name: String,
    pub team: String,
    pub completed: f64,
    pub achievement_pct: f64,
    pub achievement_label: String,
    pub final_commission: f64,
    pub bonus: f64,
    pub total_payout: f64,
    pub goal_reduced: bool,
}

impl OperatorRankingView {
    pub(crate) fn from_payout(position: usize, operator: &OperatorPayout) -> Self {
        Self {
            position,
            name: operator.name.clone(),
            team: operator.team.clone(),
            completed: operator.completed,
            achievement_pct: percent(operator.achievement_ratio),
            achievement_label: percent_label(operator.achievement_ratio),
            final_commission: round_cents(operator.final_commission),
            bonus: round_cents(operator.bonus),
            total_payout: operator.total_payout,
            goal_reduced: operator.goal_reduced,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReducedGoalView {
    pub name: String,
    pub applied_goal: f64,
    pub applied_goal_label: String,
}

impl ReducedGoalView {
    pub(crate) fn from_payout(operator: &OperatorPayout) -> Self {
        Self {
            name: operator.name.clone(),
            applied_goal: operator.applied_goal,
            applied_goal_label: goal_label(operator.applied_goal),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionReportSummary {
    pub totals: GrandTotalsView,
    pub team_summaries: Vec<TeamSummaryEntry>,
    pub rankings: Vec<TeamRankingView>,
    pub ranking: Vec<OperatorRankingView>,
    pub reduced_goals: Vec<ReducedGoalView>,
}

impl CommissionReportSummary {
    pub fn ranking_for(&self, class: TeamClass) -> Option<&TeamRankingView> {
        self.rankings.iter().find(|view| view.class == class)
    }
}

/// Ratio as a percentage rounded to two decimals.
pub fn percent(ratio: f64) -> f64 {
    round_cents(ratio * 100.0)
}

pub fn percent_label(ratio: f64) -> String {
    format!("{:.2}%", percent(ratio))
}

/// Brazilian-real label with thousands separators, e.g. `R$ 1,234.50`.
pub fn currency_label(amount: f64) -> String {
    let formatted = format!("{:.2}", round_cents(amount).abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && round_cents(amount) != 0.0 { "-" } else { "" };
    format!("R$ {sign}{grouped}.{cents}")
}

/// Goal without a fractional part when it is integral.
pub fn goal_label(goal: f64) -> String {
    if goal.fract() == 0.0 && goal.is_finite() {
        format!("{}", goal as i64)
    } else {
        format!("{goal}")
    }
}
