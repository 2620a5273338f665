//! Operator Action Routes
//!
//! - POST /api/robots/refresh - Reload the robot directory
//! - POST /api/robots/:id/select - Select a robot
//! - POST /api/commands - Send a command to the selected robot
//! - POST /api/views/:view - Switch the visible panel
//! - POST /api/viewport - Report the browser viewport
//! - POST /api/alert/dismiss - Dismiss the pending alert

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::console::error::{ConsoleError, ConsoleResult};
use crate::console::state::ConsoleState;
use crate::dashboard::{CommandOutcome, Layout, Selection, View, Viewport};

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub robots: usize,
}

#[derive(Debug, Deserialize)]
pub struct CommandBody {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub view: View,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub viewport: Viewport,
    pub charts: BTreeMap<&'static str, Layout>,
}

/// POST /api/robots/refresh
pub async fn refresh_robots(
    State(state): State<Arc<ConsoleState>>,
) -> ConsoleResult<Json<RefreshResponse>> {
    let robots = state.dashboard.load_robots().await?;
    Ok(Json(RefreshResponse { robots }))
}

/// POST /api/robots/:id/select
pub async fn select_robot(
    State(state): State<Arc<ConsoleState>>,
    Path(id): Path<String>,
) -> ConsoleResult<Json<Selection>> {
    let selection = state.dashboard.select_robot(&id).await?;
    Ok(Json(selection))
}

/// POST /api/commands
pub async fn send_command(
    State(state): State<Arc<ConsoleState>>,
    Json(body): Json<CommandBody>,
) -> ConsoleResult<Json<CommandOutcome>> {
    let outcome = state.dashboard.send_command(&body.command).await?;
    Ok(Json(outcome))
}

/// POST /api/views/:view
pub async fn navigate(
    State(state): State<Arc<ConsoleState>>,
    Path(view): Path<String>,
) -> ConsoleResult<Json<NavigateResponse>> {
    let view: View = view.parse().map_err(ConsoleError::NotFound)?;
    let title = state.dashboard.navigate(view).await;
    Ok(Json(NavigateResponse { view, title }))
}

/// POST /api/viewport
pub async fn resize(
    State(state): State<Arc<ConsoleState>>,
    Json(viewport): Json<Viewport>,
) -> ConsoleResult<Json<LayoutResponse>> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(ConsoleError::Validation(
            "viewport dimensions must be positive".to_string(),
        ));
    }

    state.dashboard.resize(viewport).await;

    let dashboard = state.dashboard.read().await;
    let charts = dashboard
        .charts
        .iter()
        .map(|chart| (chart.kind.name(), chart.layout))
        .collect();

    Ok(Json(LayoutResponse { viewport, charts }))
}

/// POST /api/alert/dismiss
pub async fn dismiss_alert(State(state): State<Arc<ConsoleState>>) -> StatusCode {
    state.dashboard.dismiss_alert().await;
    StatusCode::NO_CONTENT
}
