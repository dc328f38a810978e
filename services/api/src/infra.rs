use commission_desk::workflows::commission::{GoalDefaults, GoalDefaultsError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Default goals configured for the running service.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CommissionDefaults(pub(crate) GoalDefaults);

/// Applies per-request or per-invocation goal overrides on top of the configured defaults.
pub(crate) fn resolve_goals(
    defaults: GoalDefaults,
    goal_ura: Option<f64>,
    goal_discador: Option<f64>,
) -> Result<GoalDefaults, GoalDefaultsError> {
    GoalDefaults::new(
        goal_ura.unwrap_or(defaults.ura),
        goal_discador.unwrap_or(defaults.discador),
    )
}
