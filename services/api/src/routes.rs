use crate::infra::{resolve_goals, AppState, CommissionDefaults};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use commission_desk::error::AppError;
use commission_desk::workflows::commission::report::views::{
    GrandTotalsView, OperatorRankingView, ReducedGoalView, TeamRankingView, TeamSummaryEntry,
};
use commission_desk::workflows::commission::{
    CommissionEngine, GoalDefaults, OperatorPayout, OperatorRecord,
};
use commission_desk::workflows::production::{parse_number, ProductionImporter};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommissionReportRequest {
    #[serde(default)]
    pub(crate) goal_ura: Option<f64>,
    #[serde(default)]
    pub(crate) goal_discador: Option<f64>,
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) operators: Vec<InlineOperator>,
    #[serde(default)]
    pub(crate) include_operators: bool,
}

/// Inline production row; numeric fields accept numbers, numeric text or null.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InlineOperator {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) team: String,
    #[serde(default)]
    pub(crate) completed: Value,
    #[serde(default)]
    pub(crate) custom_goal: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommissionReportResponse {
    pub(crate) generated_on: NaiveDate,
    pub(crate) data_source: ReportDataSource,
    pub(crate) goals: GoalDefaults,
    pub(crate) totals: GrandTotalsView,
    pub(crate) team_summaries: Vec<TeamSummaryEntry>,
    pub(crate) rankings: Vec<TeamRankingView>,
    pub(crate) ranking: Vec<OperatorRankingView>,
    pub(crate) reduced_goals: Vec<ReducedGoalView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) operators: Option<Vec<OperatorPayout>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReportDataSource {
    Csv,
    Inline,
}

pub(crate) fn commission_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/commission/report",
            axum::routing::post(commission_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn commission_report_endpoint(
    Extension(CommissionDefaults(defaults)): Extension<CommissionDefaults>,
    Json(payload): Json<CommissionReportRequest>,
) -> Result<Json<CommissionReportResponse>, AppError> {
    let CommissionReportRequest {
        goal_ura,
        goal_discador,
        csv,
        operators,
        include_operators,
    } = payload;

    let goals = resolve_goals(defaults, goal_ura, goal_discador)?;

    let (records, data_source) = if let Some(csv) = csv {
        let reader = Cursor::new(csv.into_bytes());
        (ProductionImporter::from_reader(reader)?, ReportDataSource::Csv)
    } else {
        let records = operators.into_iter().map(normalize_inline).collect();
        (records, ReportDataSource::Inline)
    };

    info!(operators = records.len(), ?data_source, "commission report requested");

    let engine = CommissionEngine::new(goals);
    let report = engine.run(&records);
    let summary = report.summary();
    let operators = if include_operators {
        Some(report.operators)
    } else {
        None
    };

    Ok(Json(CommissionReportResponse {
        generated_on: Local::now().date_naive(),
        data_source,
        goals: *engine.defaults(),
        totals: summary.totals,
        team_summaries: summary.team_summaries,
        rankings: summary.rankings,
        ranking: summary.ranking,
        reduced_goals: summary.reduced_goals,
        operators,
    }))
}

fn normalize_inline(row: InlineOperator) -> OperatorRecord {
    let completed = coerce_number(&row.completed).unwrap_or(0.0);
    let record = OperatorRecord::new(row.name, row.team, completed);

    match coerce_number(&row.custom_goal) {
        Some(goal) => record.with_custom_goal(goal),
        None => record,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|number| number.is_finite()),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::AppState;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn defaults() -> CommissionDefaults {
        CommissionDefaults(GoalDefaults::default())
    }

    fn test_app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        commission_routes()
            .layer(Extension(state))
            .layer(Extension(defaults()))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn inline(name: &str, team: &str, completed: Value, custom_goal: Value) -> InlineOperator {
        InlineOperator {
            name: name.to_string(),
            team: team.to_string(),
            completed,
            custom_goal,
        }
    }

    async fn post_report(body: Value) -> axum::response::Response {
        test_app(true)
            .oneshot(
                Request::post("/api/v1/commission/report")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds")
    }

    #[tokio::test]
    async fn inline_operators_produce_rankings() {
        let request = CommissionReportRequest {
            goal_ura: Some(100.0),
            operators: vec![
                inline(" Ana ", "URA", json!(90.0), Value::Null),
                inline("Bia", "URA", json!(120), Value::Null),
                inline("Caio", "DISCADOR", json!(40.0), json!(50.0)),
            ],
            include_operators: true,
            ..CommissionReportRequest::default()
        };

        let Json(response) = commission_report_endpoint(Extension(defaults()), Json(request))
            .await
            .expect("report builds");

        assert_eq!(response.data_source, ReportDataSource::Inline);
        assert_eq!(response.goals.ura, 100.0);
        assert_eq!(response.goals.discador, GoalDefaults::STANDARD_DISCADOR);
        assert_eq!(response.totals.operators, 3);
        assert_eq!(response.ranking[0].name, "Bia");
        assert_eq!(response.reduced_goals.len(), 1);
        assert_eq!(response.reduced_goals[0].name, "Caio");

        let operators = response.operators.expect("operators included");
        assert_eq!(operators[0].name, "Ana");
        assert_eq!(operators[2].custom_goal, Some(50.0));
    }

    #[tokio::test]
    async fn csv_payload_takes_precedence_over_inline_operators() {
        let request = CommissionReportRequest {
            csv: Some("nome;equipe;realizado\nAna;URA;96\n".to_string()),
            operators: vec![inline("Ignored", "URA", json!(500.0), Value::Null)],
            ..CommissionReportRequest::default()
        };

        let Json(response) = commission_report_endpoint(Extension(defaults()), Json(request))
            .await
            .expect("report builds");

        assert_eq!(response.data_source, ReportDataSource::Csv);
        assert_eq!(response.ranking.len(), 1);
        assert_eq!(response.ranking[0].name, "Ana");
        assert!(response.operators.is_none());
    }

    #[tokio::test]
    async fn invalid_goal_override_is_a_bad_request() {
        let app = test_app(true);
        let response = app
            .oneshot(
                Request::post("/api/v1/commission/report")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"goal_ura": 0}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn csv_missing_columns_is_a_bad_request() {
        let app = test_app(true);
        let body = json!({ "csv": "nome,realizado\nAna,10\n" }).to_string();
        let response = app
            .oneshot(
                Request::post("/api/v1/commission/report")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json(response).await;
        assert!(payload["error"].as_str().unwrap_or_default().contains("team"));
    }

    #[tokio::test]
    async fn report_route_returns_json_summary() {
        let app = test_app(true);
        let body = json!({
            "operators": [
                { "name": "Ana", "team": "URA", "completed": 80.0 },
                { "name": "Rui", "team": "DISCADOR", "completed": 60.0 }
            ]
        })
        .to_string();

        let response = app
            .oneshot(
                Request::post("/api/v1/commission/report")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["data_source"], "inline");
        assert_eq!(payload["totals"]["operators"], 2);
        assert!(payload.get("operators").is_none());
    }

    #[tokio::test]
    async fn null_completed_becomes_a_zero_row() {
        let response = post_report(json!({
            "include_operators": true,
            "operators": [
                { "name": "Ana", "team": "URA", "completed": null },
                { "name": "Bia", "team": "URA", "completed": 90 }
            ]
        }))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["totals"]["operators"], 2);
        assert_eq!(payload["operators"][0]["name"], "Ana");
        assert_eq!(payload["operators"][0]["completed"], 0.0);
        assert_eq!(payload["operators"][0]["final_commission"], 0.0);
        assert_eq!(payload["operators"][1]["completed"], 90.0);
        assert_eq!(payload["ranking"][0]["name"], "Bia");
    }

    #[tokio::test]
    async fn unusable_custom_goal_text_is_ignored() {
        let response = post_report(json!({
            "include_operators": true,
            "operators": [
                { "name": "Ana", "team": "URA", "completed": 40, "custom_goal": "abc" },
                { "name": "Bia", "team": "URA", "completed": "90,5", "custom_goal": "50" },
                { "name": "Caio", "team": "URA", "completed": 70, "custom_goal": null }
            ]
        }))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let operators = payload["operators"].as_array().expect("operators listed");
        assert_eq!(operators.len(), 3);
        assert!(operators[0]["custom_goal"].is_null());
        assert_eq!(operators[0]["applied_goal"], 80.0);
        assert_eq!(operators[1]["completed"], 90.5);
        assert_eq!(operators[1]["applied_goal"], 50.0);
        assert!(operators[2]["custom_goal"].is_null());
        assert_eq!(payload["reduced_goals"][0]["name"], "Bia");
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = test_app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = test_app(true)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
