// Export route modules
pub mod agents;
pub mod invoke;
pub mod recommend;

use crate::state::AppState;
use agora::invoker::CompletionInvoker;
use agora::notify::{Notifier, TracingNotifier};
use agora::providers::openai::OpenAiProvider;
use agora::session::InvocationSession;
use agora::storage::HttpObjectStore;
use agora::task::Task;
use agora::uploader::AssetUploader;
use axum::Router;
use std::sync::Arc;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(agents::routes(state.clone()))
        .merge(invoke::routes(state.clone()))
        .merge(recommend::routes(state))
}

/// Build a fresh session for one request. The service is stateless: every
/// invocation gets its own session instance, collaborators wired from the
/// shared configuration.
pub(crate) fn new_session(state: &AppState, task: Task) -> anyhow::Result<InvocationSession> {
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let store = Arc::new(HttpObjectStore::new(state.storage_config.clone())?);
    let uploader = AssetUploader::new(store, notifier.clone());
    let provider = OpenAiProvider::new(state.provider_config.clone())?;
    let invoker = CompletionInvoker::new(Box::new(provider));
    Ok(InvocationSession::new(task, uploader, invoker, notifier))
}
