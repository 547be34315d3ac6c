use anyhow::Result;
use indoc::indoc;
use serde::Serialize;

use crate::catalog::AgentProfile;
use crate::models::message::Message;
use crate::prompt_template::render_prompt;
use crate::uploader::RemoteAsset;

/// Model used for every call site; text and vision capable.
pub const COMPLETION_MODEL: &str = "gpt-4o-mini";

const ANALYSIS_MAX_TOKENS: i32 = 1500;
const RECOMMEND_MAX_TOKENS: i32 = 500;

const ANALYZE_SYSTEM_PROMPT: &str = "You are an expert HR assistant that analyzes resumes and job descriptions. Provide detailed analysis including skill matching, experience relevance, and hiring recommendations. If images are provided, analyze any text content visible in the images such as resumes, job postings, or documents.";

const RECOMMEND_TEMPLATE: &str = indoc! {r#"
    You are an AI assistant that helps users find the perfect AI agent for their needs. You have access to the following agents in the marketplace:

    {% for agent in agents -%}
    - {{ agent.name }}: {{ agent.description }} (Tags: {{ agent.tags | join(sep=", ") }}) - {{ agent.price }} {{ agent.currency }}
    {% endfor %}
    Your job is to:
    1. Understand what the user needs
    2. Recommend the most suitable agent(s) from the list above
    3. Explain why you recommend them
    4. Provide a direct link using this format: [View AgentName →](/agent/ID)
    5. Be helpful, friendly, and concise

    Always recommend actual agents from the list above, not made-up ones."#};

#[derive(Serialize)]
struct RecommendContext<'a> {
    agents: &'a [AgentProfile],
}

/// The role-instruction strategy for one invocation call site.
///
/// Everything that differs between the call sites (system prompt, token
/// bound, storage prefix, fallback copy) hangs off this variant.
#[derive(Debug, Clone)]
pub enum Task {
    /// Execute one cataloged agent against the user's instruction.
    RunAgent(AgentProfile),
    /// Resume / job-description analysis by the marketplace's HR analyst.
    AnalyzeDocuments,
    /// Conversational agent recommendation over the given catalog.
    RecommendAgents { agents: Vec<AgentProfile> },
}

impl Task {
    /// System-role instruction for this call site. Pure; derived only
    /// from the task's own data.
    pub fn system_prompt(&self) -> Result<String> {
        match self {
            Task::RunAgent(agent) => {
                let goal = agent
                    .long_description
                    .split('.')
                    .next()
                    .unwrap_or("")
                    .to_lowercase();
                Ok(format!(
                    "You are {}, {}. Your goal is to {}.",
                    agent.name, agent.description, goal
                ))
            }
            Task::AnalyzeDocuments => Ok(ANALYZE_SYSTEM_PROMPT.to_string()),
            Task::RecommendAgents { agents } => {
                Ok(render_prompt(RECOMMEND_TEMPLATE, &RecommendContext { agents })?)
            }
        }
    }

    pub fn max_output_tokens(&self) -> i32 {
        match self {
            Task::RunAgent(_) | Task::AnalyzeDocuments => ANALYSIS_MAX_TOKENS,
            Task::RecommendAgents { .. } => RECOMMEND_MAX_TOKENS,
        }
    }

    /// Storage prefix for attached images. `None` marks a text-only call
    /// site whose attachments are ignored.
    pub fn upload_prefix(&self) -> Option<&'static str> {
        match self {
            Task::RunAgent(_) => Some("agent-uploads"),
            Task::AnalyzeDocuments => Some("chat-uploads"),
            Task::RecommendAgents { .. } => None,
        }
    }

    /// Whether results accumulate in a transcript instead of replacing a
    /// single current result.
    pub fn is_conversational(&self) -> bool {
        matches!(self, Task::RecommendAgents { .. })
    }

    /// Shown in place of a result when generation fails.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Task::RunAgent(_) => {
                "Sorry, there was an error processing your request. Please try again later."
            }
            Task::AnalyzeDocuments => {
                "Sorry, there was an error processing your request. Please try again later. Make sure you have configured your AI settings properly."
            }
            Task::RecommendAgents { .. } => {
                "I'm sorry, I'm having trouble processing your request right now. Please try asking about specific types of agents like 'resume analysis', 'code review', or 'content creation'."
            }
        }
    }

    pub fn success_note(&self) -> Option<&'static str> {
        match self {
            Task::RunAgent(_) => Some("Agent executed successfully!"),
            Task::AnalyzeDocuments => Some("Analysis completed!"),
            Task::RecommendAgents { .. } => None,
        }
    }

    pub fn failure_note(&self) -> &'static str {
        match self {
            Task::RunAgent(_) => "Failed to run agent. Please try again.",
            Task::AnalyzeDocuments => "Failed to process request. Please try again.",
            Task::RecommendAgents { .. } => "Failed to get AI recommendation. Please try again.",
        }
    }
}

/// A fully assembled request for the generation service. Constructed
/// fresh per invocation, never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub max_output_tokens: i32,
}

/// Build the request for one invocation: the system message first, then
/// one user message carrying the instruction text ahead of any uploaded
/// image references, in upload-completion order.
pub fn assemble(task: &Task, instruction: &str, images: &[RemoteAsset]) -> Result<InvocationRequest> {
    let system = Message::system().with_text(task.system_prompt()?);

    let mut user = Message::user().with_text(instruction);
    for image in images {
        user = user.with_image(image.url.clone());
    }

    Ok(InvocationRequest {
        messages: vec![system, user],
        model: COMPLETION_MODEL.to_string(),
        max_output_tokens: task.max_output_tokens(),
    })
}
