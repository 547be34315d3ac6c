use crate::routes::new_session;
use crate::state::AppState;
use agora::catalog::Catalog;
use agora::render::{render_blocks, DisplayBlock};
use agora::session::SessionState;
use agora::task::Task;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub state: SessionState,
    pub reply: Option<String>,
    /// The reply decomposed into plain and link segments, ready to render.
    pub blocks: Vec<DisplayBlock>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/recommend", post(recommend))
        .with_state(state)
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<Value>)> {
    let task = Task::RecommendAgents {
        agents: state.catalog.agents().to_vec(),
    };

    let mut session = new_session(&state, task).map_err(|err| {
        tracing::error!("failed to build session: {err:#}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal error" })),
        )
    })?;

    match session.trigger(&request.message).await {
        Ok(()) => {
            let reply = session.last_reply().map(str::to_string);
            let blocks = reply.as_deref().map(render_blocks).unwrap_or_default();
            Ok(Json(RecommendResponse {
                state: session.state(),
                reply,
                blocks,
            }))
        }
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )),
    }
}
