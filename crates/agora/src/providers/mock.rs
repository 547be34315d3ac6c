use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use super::base::{Provider, Usage};
use crate::task::InvocationRequest;

/// A mock provider that yields pre-configured outcomes, in order, for
/// testing. `Ok` entries complete with the given text; `Err` entries fail
/// with the given reason.
pub struct MockProvider {
    outcomes: Arc<Mutex<Vec<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<InvocationRequest>>>,
}

impl MockProvider {
    pub fn new(outcomes: Vec<Result<String, String>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying<S: Into<String>>(text: S) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn failing() -> Self {
        Self::new(vec![Err("mock provider failure".to_string())])
    }

    /// Requests observed so far, for asserting what was (not) sent.
    pub fn requests(&self) -> Arc<Mutex<Vec<InvocationRequest>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: &InvocationRequest) -> Result<(String, Usage)> {
        self.requests.lock().unwrap().push(request.clone());

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Return empty text if no more pre-configured outcomes
            Ok((String::new(), Usage::default()))
        } else {
            match outcomes.remove(0) {
                Ok(text) => Ok((text, Usage::default())),
                Err(reason) => Err(anyhow!(reason)),
            }
        }
    }
}
