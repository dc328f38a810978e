use commission_desk::workflows::commission::{
    BONUS_SCHEDULE, CommissionEngine, GoalDefaults, OperatorRecord, TeamClass,
};

fn engine(ura: f64, discador: f64) -> CommissionEngine {
    CommissionEngine::new(GoalDefaults::new(ura, discador).expect("valid defaults"))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn operator_at_threshold_earns_first_tier() {
    let report = engine(100.0, 100.0).run(&[OperatorRecord::new("Ana", "URA", 80.0)]);
    let operator = &report.operators[0];

    assert_close(operator.achievement_ratio, 0.8);
    assert_eq!(operator.tier_rate, 5.0);
    assert_close(operator.base_commission, 400.0);
    assert_eq!(operator.accelerator, 1.0);
    assert_close(operator.final_commission, 400.0);
}

#[test]
fn over_achiever_is_accelerated() {
    let report = engine(100.0, 100.0).run(&[OperatorRecord::new("Bia", "URA", 125.0)]);
    let operator = &report.operators[0];

    assert_close(operator.achievement_ratio, 1.25);
    assert_eq!(operator.tier_rate, 9.0);
    assert_close(operator.base_commission, 1125.0);
    assert_eq!(operator.accelerator, 1.2);
    assert_close(operator.final_commission, 1350.0);
}

#[test]
fn valid_custom_goal_below_default_is_reduced() {
    let record = OperatorRecord::new("Caio", "URA", 10.0).with_custom_goal(50.0);
    let report = engine(80.0, 60.0).run(&[record]);
    let operator = &report.operators[0];

    assert_eq!(operator.applied_goal, 50.0);
    assert!(operator.goal_reduced);

    let summary = report.summary();
    assert_eq!(summary.reduced_goals.len(), 1);
    assert_eq!(summary.reduced_goals[0].applied_goal_label, "50");
}

#[test]
fn degenerate_goal_yields_nothing_and_is_not_ranked() {
    // Validated defaults never reach a zero goal, so this goes through the calculator.
    let achievement =
        commission_desk::workflows::commission::achievement::Achievement::calculate(90.0, 0.0);
    assert_eq!(achievement.achievement_ratio, 0.0);
    assert_eq!(achievement.tier_rate, 0.0);
    assert_eq!(achievement.final_commission, 0.0);
    assert!(!achievement.is_eligible());
}

#[test]
fn tied_completed_counts_rank_by_ratio() {
    let records = vec![
        OperatorRecord::new("Ratio95", "URA", 100.0).with_custom_goal(100.0 / 0.95),
        OperatorRecord::new("Ratio85", "URA", 100.0).with_custom_goal(100.0 / 0.85),
        OperatorRecord::new("Ratio105", "URA", 100.0).with_custom_goal(100.0 / 1.05),
    ];
    let report = engine(100.0, 100.0).run(&records);

    let bonus = |name: &str| {
        report
            .operators
            .iter()
            .find(|operator| operator.name == name)
            .map(|operator| operator.bonus)
            .expect("operator present")
    };
    assert_eq!(bonus("Ratio105"), 700.0);
    assert_eq!(bonus("Ratio95"), 500.0);
    assert_eq!(bonus("Ratio85"), 350.0);
}

#[test]
fn ranking_length_is_capped_by_eligible_count() {
    let records: Vec<OperatorRecord> = (0..5)
        .map(|index| OperatorRecord::new(format!("Op{index}"), "DISCADOR", 60.0 + index as f64))
        .chain([OperatorRecord::new("Late", "DISCADOR", 10.0)])
        .chain([OperatorRecord::new("Solo", "URA", 90.0)])
        .collect();
    let report = engine(100.0, 60.0).run(&records);

    let discador = report.ranking(TeamClass::Discador).expect("discador ranking");
    assert_eq!(discador.awards.len(), 3);
    let bonuses: Vec<f64> = discador.awards.iter().map(|award| award.bonus).collect();
    assert_eq!(bonuses, BONUS_SCHEDULE.to_vec());
    let names: Vec<&str> = discador.awards.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Op4", "Op3", "Op2"]);

    let ura = report.ranking(TeamClass::Ura).expect("ura ranking");
    assert_eq!(ura.awards.len(), 1);
    assert_eq!(ura.awards[0].bonus, 700.0);
}

#[test]
fn only_eligible_operators_receive_bonuses() {
    let records = vec![
        OperatorRecord::new("Low", "URA", 79.0),
        OperatorRecord::new("Other", "Backoffice", 500.0),
        OperatorRecord::new("Ok", "URA", 81.0),
    ];
    let report = engine(100.0, 100.0).run(&records);

    for operator in &report.operators {
        if operator.bonus > 0.0 {
            assert!(operator.achievement_ratio >= 0.8);
            assert!(!TeamClass::memberships(&operator.team_key).is_empty());
        }
    }
    assert_eq!(report.operators[1].bonus, 0.0);
    assert!(report.operators[1].final_commission > 0.0);
}

#[test]
fn ambiguous_team_takes_the_larger_bonus() {
    let records = vec![
        OperatorRecord::new("UraTop", "URA", 200.0),
        OperatorRecord::new("Hybrid", "DISC-URA", 150.0),
        OperatorRecord::new("DiscOnly", "DISCADOR", 100.0),
    ];
    let report = engine(100.0, 100.0).run(&records);

    let hybrid = &report.operators[1];
    // Second in URA (500) but first in DISCADOR (700).
    assert_eq!(hybrid.bonus, 700.0);
    assert_eq!(report.operators[2].bonus, 500.0);
}

#[test]
fn total_payout_is_rounded_sum_and_totals_add_up() {
    let records = vec![
        OperatorRecord::new("A", "URA", 113.0),
        OperatorRecord::new("B", "URA", 91.0).with_custom_goal(97.0),
        OperatorRecord::new("C", "DISCADOR", 57.0),
        OperatorRecord::new("D", "Backoffice", 3.0),
    ];
    let report = engine(100.0, 60.0).run(&records);

    for operator in &report.operators {
        let expected = ((operator.final_commission + operator.bonus) * 100.0).round() / 100.0;
        assert_eq!(operator.total_payout, expected);
    }

    let sum: f64 = report.operators.iter().map(|o| o.total_payout).sum();
    assert_eq!(report.totals.total_payout, sum);
    assert_eq!(report.totals.total_completed, 264.0);
}

#[test]
fn repeated_runs_are_identical() {
    let records = vec![
        OperatorRecord::new("A", "URA", 100.0),
        OperatorRecord::new("B", "URA", 100.0),
        OperatorRecord::new("C", "DISCADOR", 70.0).with_custom_goal(65.0),
        OperatorRecord::new("D", "DISCADOR", 70.0),
    ];
    let engine = engine(90.0, 60.0);

    let first = engine.run(&records);
    let second = engine.run(&records);
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first.summary()).expect("serialize");
    let second_json = serde_json::to_string(&second.summary()).expect("serialize");
    assert_eq!(first_json, second_json);
}

#[test]
fn zero_and_missing_completed_rows_are_kept() {
    let records = vec![
        OperatorRecord::new("Zero", "URA", 0.0),
        OperatorRecord::new("Neg", "DISCADOR", -5.0),
    ];
    let report = engine(80.0, 60.0).run(&records);

    assert_eq!(report.operators.len(), 2);
    assert!(report.operators.iter().all(|o| o.total_payout == 0.0));
    assert_eq!(report.totals.eligible, 0);
    assert_eq!(report.totals.total_completed, -5.0);
}
