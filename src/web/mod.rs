//! HTTP surface: the dashboard page, its layout, and the callback endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::bindings::{dispatch, CallbackError, CallbackInputs};
use crate::chart::Figure;
use crate::data::model::LaunchTable;
use crate::layout::DashboardLayout;

const INDEX_HTML: &str = include_str!("page.html");

#[derive(Clone)]
struct WebState {
    table: Arc<LaunchTable>,
    layout: Arc<DashboardLayout>,
    debug: bool,
}

/// Body of `POST /_dash-update-component`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub output: String,
    #[serde(default)]
    pub inputs: CallbackInputs,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub output: String,
    pub figure: Figure,
}

/// Build the dashboard router over a loaded table.
pub fn router(table: Arc<LaunchTable>, debug: bool) -> Router {
    let layout = Arc::new(DashboardLayout::build(&table));
    Router::new()
        .route("/", get(index))
        .route("/_dash-layout", get(layout_json))
        .route("/_dash-update-component", post(update_component))
        .with_state(WebState {
            table,
            layout,
            debug,
        })
}

/// Serve the dashboard until the process is stopped.
pub async fn serve(table: Arc<LaunchTable>, addr: SocketAddr, debug: bool) -> Result<()> {
    let app = router(table, debug);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Dashboard running on http://{addr}/");
    axum::serve(listener, app)
        .await
        .context("dashboard server failed")?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn layout_json(State(state): State<WebState>) -> Json<DashboardLayout> {
    Json(DashboardLayout::clone(&state.layout))
}

async fn update_component(
    State(state): State<WebState>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!("malformed callback request: {}", rejection.body_text());
        ApiError {
            failure: Failure::Body(rejection),
            debug: state.debug,
        }
    })?;
    debug!("callback for '{}' with {:?}", request.output, request.inputs);
    match dispatch(&state.table, &request.output, &request.inputs) {
        Ok(figure) => Ok(Json(UpdateResponse {
            output: request.output,
            figure,
        })),
        Err(error) => {
            warn!("callback for '{}' rejected: {error:#}", request.output);
            Err(ApiError {
                failure: Failure::Callback(error),
                debug: state.debug,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

enum Failure {
    /// The body was not a valid `UpdateRequest`.
    Body(JsonRejection),
    Callback(CallbackError),
}

struct ApiError {
    failure: Failure,
    debug: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.failure {
            Failure::Body(_) => StatusCode::BAD_REQUEST,
            Failure::Callback(CallbackError::UnknownOutput(_)) => StatusCode::NOT_FOUND,
            Failure::Callback(CallbackError::MissingInput(_))
            | Failure::Callback(CallbackError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
        };
        // Parser detail and source chains are only exposed in debug mode.
        let error = match (self.failure, self.debug) {
            (Failure::Body(rejection), true) => {
                format!("malformed callback request: {}", rejection.body_text())
            }
            (Failure::Body(_), false) => "malformed callback request".to_string(),
            (Failure::Callback(error), true) => format!("{:#}", anyhow::Error::from(error)),
            (Failure::Callback(error), false) => error.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
