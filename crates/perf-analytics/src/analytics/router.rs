use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::aggregation::BehavioralScope;
use super::engine::AnalyticsEngine;
use super::filter::FilterSpec;
use super::report::views::{BehavioralView, DashboardView};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub evaluations: Vec<Value>,
    #[serde(default)]
    pub filter: FilterSpec,
    /// Overrides the configured reference line for this request only.
    #[serde(default)]
    pub target_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BehavioralRequest {
    pub employees: Vec<Value>,
    #[serde(default)]
    pub evaluations: Vec<Value>,
    #[serde(default)]
    pub scope: BehavioralScope,
}

/// Router exposing the dashboard and behavioral derivations over HTTP.
pub fn analytics_router(engine: Arc<AnalyticsEngine>) -> Router {
    Router::new()
        .route("/api/v1/analytics/dashboard", post(dashboard_handler))
        .route("/api/v1/analytics/behavioral", post(behavioral_handler))
        .with_state(engine)
}

pub(crate) async fn dashboard_handler(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let engine = match request.target_score {
        Some(target) if !target.is_finite() || target < 0.0 => {
            return Err(AppError::InvalidRequest(format!(
                "target_score must be a finite, non-negative number, got {target}"
            )));
        }
        Some(target) => (*engine).with_target_score(target),
        None => *engine,
    };

    let view = engine.dashboard(&request.evaluations, &request.filter);
    info!(
        evaluations = request.evaluations.len(),
        retained = view.general.total_evaluations,
        "dashboard computed"
    );
    Ok(Json(view))
}

pub(crate) async fn behavioral_handler(
    State(engine): State<Arc<AnalyticsEngine>>,
    Json(request): Json<BehavioralRequest>,
) -> Result<Json<BehavioralView>, AppError> {
    let view = engine.behavioral(&request.employees, &request.evaluations, &request.scope);
    info!(
        employees = request.employees.len(),
        in_scope = view.employee_count,
        "behavioral summary computed"
    );
    Ok(Json(view))
}
