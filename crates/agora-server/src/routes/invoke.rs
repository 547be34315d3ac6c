use crate::routes::new_session;
use crate::state::AppState;
use agora::catalog::Catalog;
use agora::session::SessionState;
use agora::task::Task;
use agora::uploader::LocalAsset;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub input: String,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

/// An attached image, bytes base64-encoded by the client.
#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub name: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    pub state: SessionState,
    pub result: Option<String>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/agents/:id/run", post(run_agent))
        .route("/analyze", post(analyze))
        .with_state(state)
}

async fn run_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let agent = match state.catalog.require(&id) {
        Ok(agent) => agent.clone(),
        Err(_) => return Err(not_found()),
    };

    execute(&state, Task::RunAgent(agent), request).await
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, ApiError> {
    execute(&state, Task::AnalyzeDocuments, request).await
}

async fn execute(
    state: &AppState,
    task: Task,
    request: InvokeRequest,
) -> Result<Json<InvokeResponse>, ApiError> {
    let mut session = new_session(state, task).map_err(internal)?;

    for image in request.images {
        let bytes = BASE64
            .decode(image.data.as_bytes())
            .map_err(|_| bad_request(format!("image {} is not valid base64", image.name)))?;
        session.attach(LocalAsset::new(image.name, bytes));
    }

    match session.trigger(&request.input).await {
        Ok(()) => Ok(Json(InvokeResponse {
            state: session.state(),
            result: session.result().map(str::to_string),
        })),
        // the validation family: rejected before any collaborator ran
        Err(err) => Err(bad_request(err.to_string())),
    }
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Agent not found" })),
    )
}

fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal(err: anyhow::Error) -> ApiError {
    tracing::error!("failed to build session: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal error" })),
    )
}
