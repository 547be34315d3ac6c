use crate::providers::base::Provider;
use crate::task::InvocationRequest;

/// Outcome of one generation call, consumed once by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Success { text: String },
    Failure { reason: String },
}

/// Sends assembled requests to the generation service.
///
/// Exactly one attempt per call, no retries and no concurrency guard (the
/// session enforces non-overlap). Any transport, service or parse error is
/// logged once here and classified into an opaque [`InvocationResult::Failure`];
/// the underlying error structure never reaches callers.
pub struct CompletionInvoker {
    provider: Box<dyn Provider>,
}

impl CompletionInvoker {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self { provider }
    }

    pub async fn invoke(&self, request: &InvocationRequest) -> InvocationResult {
        match self.provider.complete(request).await {
            Ok((text, usage)) => {
                tracing::debug!(
                    input_tokens = ?usage.input_tokens,
                    output_tokens = ?usage.output_tokens,
                    "generation completed"
                );
                InvocationResult::Success { text }
            }
            Err(err) => {
                tracing::error!("generation request failed: {err:#}");
                InvocationResult::Failure {
                    reason: "generation request failed".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Message;
    use crate::providers::mock::MockProvider;
    use crate::task::COMPLETION_MODEL;

    fn request() -> InvocationRequest {
        InvocationRequest {
            messages: vec![
                Message::system().with_text("system"),
                Message::user().with_text("hi"),
            ],
            model: COMPLETION_MODEL.to_string(),
            max_output_tokens: 500,
        }
    }

    #[tokio::test]
    async fn success_passes_text_through_verbatim() {
        let invoker = CompletionInvoker::new(Box::new(MockProvider::replying("Great resume!\n")));
        let result = invoker.invoke(&request()).await;
        assert_eq!(
            result,
            InvocationResult::Success {
                text: "Great resume!\n".to_string()
            }
        );
    }

    #[tokio::test]
    async fn provider_errors_are_classified_opaquely() {
        let invoker = CompletionInvoker::new(Box::new(MockProvider::failing()));
        let result = invoker.invoke(&request()).await;

        match result {
            InvocationResult::Failure { reason } => {
                // classified, not the provider's own message
                assert_eq!(reason, "generation request failed");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
