use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::task::InvocationRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for generation-service backends.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate text for the assembled request, returned verbatim.
    async fn complete(&self, request: &InvocationRequest) -> Result<(String, Usage)>;
}
