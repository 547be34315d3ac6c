use crate::state::AppState;
use agora::catalog::{AgentProfile, Catalog};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/agents/:id", get(get_agent))
        .with_state(state)
}

async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentProfile>> {
    Json(state.catalog.agents().to_vec())
}

async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentProfile>, (StatusCode, Json<Value>)> {
    match state.catalog.find(&id) {
        Some(agent) => Ok(Json(agent.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Agent not found" })),
        )),
    }
}
