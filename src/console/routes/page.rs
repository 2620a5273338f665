//! Page Routes
//!
//! - GET /?w=&h= - Operator page, charts sized for the caller's viewport
//! - GET /api/state - JSON snapshot of everything the page shows

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::console::error::ConsoleResult;
use crate::console::render;
use crate::console::state::ConsoleState;
use crate::dashboard::Viewport;

/// Viewport the page reports in its own URL
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub w: Option<u32>,
    pub h: Option<u32>,
}

impl PageQuery {
    /// Requested viewport, falling back to the last reported one
    fn viewport(&self, fallback: Viewport) -> Viewport {
        match (self.w, self.h) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Viewport { width, height },
            _ => fallback,
        }
    }
}

/// GET /
///
/// Layout is computed per request, so tabs of different sizes do not
/// overwrite each other.
pub async fn index(
    State(state): State<Arc<ConsoleState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let dashboard = state.dashboard.read().await;
    let viewport = query.viewport(dashboard.viewport);
    Html(render::page(&dashboard, &state.settings, viewport))
}

/// GET /api/state
pub async fn snapshot(State(state): State<Arc<ConsoleState>>) -> ConsoleResult<Json<Value>> {
    let dashboard = state.dashboard.read().await;
    let mut value = serde_json::to_value(&*dashboard)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "page_title".to_string(),
            Value::from(dashboard.router.page_title()),
        );
    }
    Ok(Json(value))
}
