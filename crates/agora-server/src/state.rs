use std::sync::Arc;

use agora::catalog::StaticCatalog;
use agora::providers::openai::OpenAiProviderConfig;
use agora::storage::StorageConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider_config: OpenAiProviderConfig,
    pub storage_config: StorageConfig,
    pub catalog: Arc<StaticCatalog>,
}
