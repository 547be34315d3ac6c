use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::InvokeError;
use crate::invoker::{CompletionInvoker, InvocationResult};
use crate::models::role::Role;
use crate::notify::Notifier;
use crate::task::{assemble, Task};
use crate::uploader::{AssetUploader, LocalAsset};

/// Lifecycle of one invocation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Uploading,
    Generating,
    Succeeded,
    Failed,
}

impl SessionState {
    /// An invocation is outstanding; new triggers are rejected.
    pub fn is_busy(self) -> bool {
        matches!(self, SessionState::Uploading | SessionState::Generating)
    }
}

/// One turn of a conversational session. Append-only; cleared only by
/// dropping the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created: i64,
}

impl TranscriptEntry {
    fn new<S: Into<String>>(role: Role, text: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            created: Utc::now().timestamp(),
        }
    }
}

/// Opening assistant turn seeded into recommendation transcripts.
pub const RECOMMEND_GREETING: &str = "Hi! I'm your AI assistant. I can help you find the perfect agent for your needs. What are you looking to accomplish?";

/// Per-interaction state machine coordinating upload, prompt assembly,
/// generation and result handling for one call site.
///
/// The session owns all mutable interaction state (current result or
/// transcript, attached assets); the presentation layer reads snapshots
/// through the accessors and drives it only via [`trigger`](Self::trigger).
pub struct InvocationSession {
    task: Task,
    state: SessionState,
    transcript: Vec<TranscriptEntry>,
    result: Option<String>,
    attachments: Vec<LocalAsset>,
    uploader: AssetUploader,
    invoker: CompletionInvoker,
    notifier: Arc<dyn Notifier>,
}

impl InvocationSession {
    pub fn new(
        task: Task,
        uploader: AssetUploader,
        invoker: CompletionInvoker,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let mut transcript = Vec::new();
        if task.is_conversational() {
            transcript.push(TranscriptEntry::new(Role::Assistant, RECOMMEND_GREETING));
        }

        Self {
            task,
            state: SessionState::Idle,
            transcript,
            result: None,
            attachments: Vec::new(),
            uploader,
            invoker,
            notifier,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current result of the single-shot variants. Overwritten by each
    /// completed trigger; holds the fallback message after a failure.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Most recent assistant turn, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|entry| entry.role == Role::Assistant)
            .map(|entry| entry.text.as_str())
    }

    pub fn attachments(&self) -> &[LocalAsset] {
        &self.attachments
    }

    /// Attach a locally selected asset for the next trigger.
    pub fn attach(&mut self, asset: LocalAsset) {
        self.attachments.push(asset);
    }

    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.attachments.len() {
            self.attachments.remove(index);
        }
    }

    pub fn clear_attachments(&mut self) {
        self.attachments.clear();
    }

    /// Run one invocation to completion.
    ///
    /// Rejected without side effects when `input` is blank or an
    /// invocation is already outstanding. Attachments are uploaded first
    /// (failures skipped per item), then the assembled request is sent;
    /// the terminal state stores the result or the call site's fallback.
    /// Attachments and prior input survive a failure so the user can
    /// retry.
    pub async fn trigger(&mut self, input: &str) -> Result<(), InvokeError> {
        if input.trim().is_empty() {
            return Err(InvokeError::EmptyInput);
        }
        if self.state.is_busy() {
            return Err(InvokeError::Busy);
        }

        if self.task.is_conversational() {
            self.transcript.push(TranscriptEntry::new(Role::User, input));
        }

        let mut images = Vec::new();
        if let Some(prefix) = self.task.upload_prefix() {
            if !self.attachments.is_empty() {
                self.state = SessionState::Uploading;
                images = self.uploader.upload_all(&self.attachments, prefix).await;
            }
        }

        self.state = SessionState::Generating;
        let outcome = match assemble(&self.task, input, &images) {
            Ok(request) => self.invoker.invoke(&request).await,
            Err(err) => {
                tracing::error!("failed to assemble request: {err:#}");
                InvocationResult::Failure {
                    reason: "failed to assemble request".to_string(),
                }
            }
        };

        match outcome {
            InvocationResult::Success { text } => {
                if self.task.is_conversational() {
                    self.transcript
                        .push(TranscriptEntry::new(Role::Assistant, text));
                } else {
                    self.result = Some(text);
                }
                self.state = SessionState::Succeeded;
                if let Some(note) = self.task.success_note() {
                    self.notifier.success(note);
                }
            }
            InvocationResult::Failure { .. } => {
                let fallback = self.task.fallback_text();
                if self.task.is_conversational() {
                    self.transcript
                        .push(TranscriptEntry::new(Role::Assistant, fallback));
                } else {
                    self.result = Some(fallback.to_string());
                }
                self.state = SessionState::Failed;
                self.notifier.error(self.task.failure_note());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin, Catalog};
    use crate::notify::recording::RecordingNotifier;
    use crate::providers::mock::MockProvider;
    use crate::storage::ObjectStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticStore {
        uploads: Mutex<Vec<String>>,
    }

    impl StaticStore {
        fn new() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for StaticStore {
        async fn upload(&self, _blob: &[u8], path: &str, _overwrite: bool) -> Result<String> {
            self.uploads.lock().unwrap().push(path.to_string());
            Ok(format!("https://cdn.example/{path}"))
        }
    }

    struct Harness {
        session: InvocationSession,
        notifier: Arc<RecordingNotifier>,
        store: Arc<StaticStore>,
        requests: Arc<Mutex<Vec<crate::task::InvocationRequest>>>,
    }

    fn harness(task: Task, provider: MockProvider) -> Harness {
        let notifier = Arc::new(RecordingNotifier::default());
        let store = Arc::new(StaticStore::new());
        let requests = provider.requests();
        let uploader = AssetUploader::new(store.clone(), notifier.clone());
        let invoker = CompletionInvoker::new(Box::new(provider));
        let session = InvocationSession::new(task, uploader, invoker, notifier.clone());
        Harness {
            session,
            notifier,
            store,
            requests,
        }
    }

    fn run_task() -> Task {
        let catalog = builtin();
        Task::RunAgent(catalog.find("1").unwrap().clone())
    }

    fn recommend_task() -> Task {
        let catalog = builtin();
        Task::RecommendAgents {
            agents: catalog.agents().to_vec(),
        }
    }

    #[tokio::test]
    async fn blank_input_is_rejected_with_no_side_effects() {
        let mut h = harness(run_task(), MockProvider::replying("unused"));

        let result = h.session.trigger("   ").await;

        assert_eq!(result, Err(InvokeError::EmptyInput));
        assert_eq!(h.session.state(), SessionState::Idle);
        assert!(h.notifier.events().is_empty());
        assert!(h.requests.lock().unwrap().is_empty());
        assert!(h.store.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn busy_session_rejects_new_triggers() {
        let mut h = harness(recommend_task(), MockProvider::replying("unused"));
        h.session.state = SessionState::Generating;
        let before = h.session.transcript().to_vec();

        let result = h.session.trigger("find me an agent").await;

        assert_eq!(result, Err(InvokeError::Busy));
        assert_eq!(h.session.state(), SessionState::Generating);
        assert_eq!(h.session.transcript(), before.as_slice());
        assert!(h.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_run_stores_the_result() {
        let mut h = harness(run_task(), MockProvider::replying("Great resume!"));

        h.session.trigger("Review this").await.unwrap();

        assert_eq!(h.session.state(), SessionState::Succeeded);
        assert_eq!(h.session.result(), Some("Great resume!"));

        let requests = h.requests.lock().unwrap();
        let system = requests[0].messages[0].text();
        assert!(system.contains("You are ResumeAI"));
        // first clause of the long description, lower-cased
        assert!(system.contains("Your goal is to resumeai uses advanced natural language processing"));

        assert_eq!(
            h.notifier.events(),
            vec![("success", "Agent executed successfully!".to_string())]
        );
    }

    #[tokio::test]
    async fn failed_generation_stores_fallback_and_notifies_once() {
        let mut h = harness(run_task(), MockProvider::failing());

        h.session.trigger("Review this").await.unwrap();

        assert_eq!(h.session.state(), SessionState::Failed);
        assert_eq!(
            h.session.result(),
            Some("Sorry, there was an error processing your request. Please try again later.")
        );
        assert_eq!(
            h.notifier.errors(),
            vec!["Failed to run agent. Please try again."]
        );
    }

    #[tokio::test]
    async fn attachments_upload_before_generation_and_survive_failure() {
        let mut h = harness(run_task(), MockProvider::failing());
        h.session
            .attach(LocalAsset::new("resume.png", vec![1, 2, 3]));

        h.session.trigger("Review this").await.unwrap();

        assert_eq!(h.session.state(), SessionState::Failed);
        // the attachment is still there for a retry
        assert_eq!(h.session.attachments().len(), 1);

        // the uploaded URL made it into the request, text part first
        let requests = h.requests.lock().unwrap();
        let user = &requests[0].messages[1];
        assert_eq!(user.content.len(), 2);
        assert_eq!(user.content[0].as_text(), Some("Review this"));
        assert!(user.content[1].as_image().unwrap().contains("resume.png"));
    }

    #[tokio::test]
    async fn conversational_session_appends_turns() {
        let mut h = harness(
            recommend_task(),
            MockProvider::replying("Try [View ResumeAI →](/agent/1)"),
        );

        assert_eq!(h.session.transcript().len(), 1);
        assert_eq!(h.session.transcript()[0].text, RECOMMEND_GREETING);

        h.session.trigger("I need help with my resume").await.unwrap();

        let transcript = h.session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].text, "I need help with my resume");
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(
            h.session.last_reply(),
            Some("Try [View ResumeAI →](/agent/1)")
        );
        assert_eq!(h.session.state(), SessionState::Succeeded);
    }

    #[tokio::test]
    async fn conversational_failure_appends_fallback_turn() {
        let mut h = harness(recommend_task(), MockProvider::failing());

        h.session.trigger("anything good?").await.unwrap();

        let transcript = h.session.transcript();
        assert_eq!(transcript.len(), 3);
        assert!(transcript[2].text.starts_with("I'm sorry, I'm having trouble"));
        assert_eq!(h.session.state(), SessionState::Failed);
        assert_eq!(
            h.notifier.errors(),
            vec!["Failed to get AI recommendation. Please try again."]
        );
    }

    #[tokio::test]
    async fn recommendation_ignores_attachments() {
        let mut h = harness(recommend_task(), MockProvider::replying("sure"));
        h.session.attach(LocalAsset::new("photo.png", vec![9]));

        h.session.trigger("got anything visual?").await.unwrap();

        // nothing was uploaded and the request stayed text-only
        assert!(h.store.uploads.lock().unwrap().is_empty());
        let requests = h.requests.lock().unwrap();
        assert_eq!(requests[0].messages[1].content.len(), 1);
    }

    #[tokio::test]
    async fn second_trigger_overwrites_previous_result() {
        let mut h = harness(
            run_task(),
            MockProvider::new(vec![
                Ok("first answer".to_string()),
                Ok("second answer".to_string()),
            ]),
        );

        h.session.trigger("one").await.unwrap();
        assert_eq!(h.session.result(), Some("first answer"));

        h.session.trigger("two").await.unwrap();
        assert_eq!(h.session.result(), Some("second answer"));
        assert_eq!(h.session.state(), SessionState::Succeeded);
    }

    #[tokio::test]
    async fn upload_failures_still_generate_text_only() {
        struct RejectingStore;

        #[async_trait]
        impl ObjectStore for RejectingStore {
            async fn upload(&self, _: &[u8], path: &str, _: bool) -> Result<String> {
                Err(anyhow::anyhow!("no room for {path}"))
            }
        }

        let notifier = Arc::new(RecordingNotifier::default());
        let provider = MockProvider::replying("done anyway");
        let requests = provider.requests();
        let uploader = AssetUploader::new(Arc::new(RejectingStore), notifier.clone());
        let invoker = CompletionInvoker::new(Box::new(provider));
        let mut session =
            InvocationSession::new(run_task(), uploader, invoker, notifier.clone());
        session.attach(LocalAsset::new("huge.png", vec![0; 16]));

        session.trigger("analyze").await.unwrap();

        // generation proceeded with an empty image list
        assert_eq!(session.state(), SessionState::Succeeded);
        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].messages[1].content.len(), 1);
        assert_eq!(notifier.errors(), vec!["Failed to upload huge.png"]);
    }
}
