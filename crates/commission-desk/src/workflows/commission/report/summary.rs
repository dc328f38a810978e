use super::super::domain::TeamClass;
use super::super::payout::{round_cents, AssessedOperator, OperatorPayout};
use super::super::ranking::{performance_order, TeamRanking};
use super::views::{
    CommissionReportSummary, GrandTotalsView, OperatorRankingView, ReducedGoalView,
    TeamRankingView, TeamSummaryEntry,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team_key: String,
    pub operators: usize,
    pub total_completed: f64,
    pub mean_achievement_ratio: f64,
    pub total_payout: f64,
    pub eligible: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrandTotals {
    pub operators: usize,
    pub total_completed: f64,
    pub total_payout: f64,
    pub eligible: usize,
}

/// Output of one commission run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionReport {
    pub operators: Vec<OperatorPayout>,
    pub rankings: Vec<TeamRanking>,
    pub team_summaries: Vec<TeamSummary>,
    pub totals: GrandTotals,
}

impl CommissionReport {
    pub(crate) fn aggregate(assessed: &[AssessedOperator], rankings: Vec<TeamRanking>) -> Self {
        let operators: Vec<OperatorPayout> = assessed
            .iter()
            .map(|operator| {
                let bonus = rankings
                    .iter()
                    .filter_map(|ranking| ranking.bonus_for(&operator.record.name, &operator.team_key))
                    .fold(0.0, f64::max);
                OperatorPayout::settle(operator, bonus)
            })
            .collect();

        let team_summaries = summarize_teams(&operators);
        let totals = GrandTotals {
            operators: operators.len(),
            total_completed: operators.iter().map(|operator| operator.completed).sum(),
            total_payout: operators.iter().map(|operator| operator.total_payout).sum(),
            eligible: operators.iter().filter(|operator| operator.is_eligible()).count(),
        };

        Self {
            operators,
            rankings,
            team_summaries,
            totals,
        }
    }

    pub fn ranking(&self, class: TeamClass) -> Option<&TeamRanking> {
        self.rankings.iter().find(|ranking| ranking.class == class)
    }

    pub fn reduced_goal_operators(&self) -> impl Iterator<Item = &OperatorPayout> {
        self.operators.iter().filter(|operator| operator.goal_reduced)
    }

    /// Operators ordered by completed units then ratio; ties keep input order.
    pub fn general_ranking(&self) -> Vec<&OperatorPayout> {
        let mut ordered: Vec<&OperatorPayout> = self.operators.iter().collect();
        ordered.sort_by(|a, b| {
            performance_order(a.completed, a.achievement_ratio, b.completed, b.achievement_ratio)
        });
        ordered
    }

    pub fn summary(&self) -> CommissionReportSummary {
        let rankings = self.rankings.iter().map(TeamRankingView::from_ranking).collect();

        let ranking = self
            .general_ranking()
            .into_iter()
            .enumerate()
            .map(|(index, operator)| OperatorRankingView::from_payout(index + 1, operator))
            .collect();

        let reduced_goals = self
            .reduced_goal_operators()
            .map(ReducedGoalView::from_payout)
            .collect();

        let team_summaries = self
            .team_summaries
            .iter()
            .map(TeamSummaryEntry::from_summary)
            .collect();

        CommissionReportSummary {
            totals: GrandTotalsView::from_totals(&self.totals),
            team_summaries,
            rankings,
            ranking,
            reduced_goals,
        }
    }
}

fn summarize_teams(operators: &[OperatorPayout]) -> Vec<TeamSummary> {
    let mut grouped: BTreeMap<&str, (TeamSummary, f64)> = BTreeMap::new();

    for operator in operators {
        let (summary, ratio_sum) = grouped
            .entry(operator.team_key.as_str())
            .or_insert_with(|| {
                (
                    TeamSummary {
                        team_key: operator.team_key.clone(),
                        ..TeamSummary::default()
                    },
                    0.0,
                )
            });

        summary.operators += 1;
        summary.total_completed += operator.completed;
        summary.total_payout += operator.total_payout;
        if operator.is_eligible() {
            summary.eligible += 1;
        }
        *ratio_sum += operator.achievement_ratio;
    }

    grouped
        .into_values()
        .map(|(mut summary, ratio_sum)| {
            summary.mean_achievement_ratio = ratio_sum / summary.operators as f64;
            summary.total_payout = round_cents(summary.total_payout);
            summary
        })
        .collect()
}
