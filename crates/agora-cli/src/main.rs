mod notifier;
mod output;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cliclack::{input, spinner};
use console::style;

use agora::catalog::{self, Catalog};
use agora::errors::InvokeError;
use agora::invoker::CompletionInvoker;
use agora::notify::Notifier;
use agora::providers::openai::{OpenAiProvider, OpenAiProviderConfig};
use agora::render::render_blocks;
use agora::session::InvocationSession;
use agora::storage::{HttpObjectStore, StorageConfig};
use agora::task::Task;
use agora::uploader::{AssetUploader, LocalAsset};

use crate::notifier::ConsoleNotifier;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OpenAI API key (can also be set via OPENAI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the agents available in the marketplace
    Agents,
    /// Run a cataloged agent against your input
    Run {
        /// Catalog id of the agent to run
        id: String,
        /// Input text; prompted for interactively when omitted
        input: Option<String>,
        /// Attach an image file (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Analyze resumes and job descriptions
    Analyze {
        /// Input text; prompted for interactively when omitted
        input: Option<String>,
        /// Attach an image file (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Chat with the agent recommendation assistant
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Agents => {
            list_agents();
            Ok(())
        }
        Command::Run { id, input, images } => {
            let catalog = catalog::builtin();
            let agent = match catalog.require(&id) {
                Ok(agent) => agent.clone(),
                Err(err) => {
                    println!("{}", style(err.to_string()).red().bold());
                    println!("Use {} to browse the catalog.", style("agora agents").bold());
                    return Ok(());
                }
            };

            println!(
                "Running {} {}",
                style(&agent.name).bold(),
                style(format!("({} {} per execution)", agent.price, agent.currency)).dim()
            );

            let placeholder = format!("Enter your input for {}...", agent.name);
            let mut session = build_session(cli.api_key, Task::RunAgent(agent))?;
            attach_images(&mut session, &images)?;

            let text = match input {
                Some(text) => text,
                None => prompt_for_input(&placeholder)?,
            };
            run_single_shot(&mut session, &text, "Running agent").await
        }
        Command::Analyze { input, images } => {
            let mut session = build_session(cli.api_key, Task::AnalyzeDocuments)?;
            attach_images(&mut session, &images)?;

            let text = match input {
                Some(text) => text,
                None => prompt_for_input("Paste a resume or job description...")?,
            };
            run_single_shot(&mut session, &text, "Analyzing").await
        }
        Command::Chat => {
            let catalog = catalog::builtin();
            let task = Task::RecommendAgents {
                agents: catalog.agents().to_vec(),
            };
            let session = build_session(cli.api_key, task)?;
            chat(session).await
        }
    }
}

fn list_agents() {
    let catalog = catalog::builtin();
    for agent in catalog.agents() {
        let badge = if agent.is_verified {
            style("verified").green()
        } else {
            style("unverified").dim()
        };
        println!(
            "{}  {} {}",
            style(format!("[{}]", agent.id)).dim(),
            style(&agent.name).bold(),
            badge
        );
        println!("     {}", agent.description);
        println!(
            "     {} {} · {} ★ · {} uses · {} · by {}",
            agent.price, agent.currency, agent.rating, agent.total_uses, agent.category, agent.author
        );
        println!();
    }
}

async fn run_single_shot(
    session: &mut InvocationSession,
    text: &str,
    activity: &str,
) -> Result<()> {
    let spin = spinner();
    spin.start(activity);
    let outcome = session.trigger(text).await;
    spin.stop("");

    match outcome {
        Ok(()) => {
            if let Some(result) = session.result() {
                output::render_markdown(result);
            }
            Ok(())
        }
        Err(InvokeError::EmptyInput) => {
            println!("{}", style("Please provide input for the agent").yellow());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn chat(mut session: InvocationSession) -> Result<()> {
    println!(
        "{} {}",
        style("AI Agent Recommendation Assistant").bold(),
        style("- type \"exit\" to end the session").dim()
    );
    println!();

    if let Some(greeting) = session.last_reply() {
        output::print_blocks(&render_blocks(greeting));
        println!();
    }

    loop {
        let message: String = input("Message:")
            .placeholder("Try: 'I need help with resume analysis' or 'Show me code review tools'")
            .interact()?;

        if message.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let spin = spinner();
        spin.start("Thinking...");
        let outcome = session.trigger(&message).await;
        spin.stop("");

        match outcome {
            Ok(()) => {
                if let Some(reply) = session.last_reply() {
                    output::print_blocks(&render_blocks(reply));
                }
            }
            Err(InvokeError::EmptyInput) => continue,
            Err(err) => return Err(err.into()),
        }

        println!();
    }
    Ok(())
}

fn build_session(api_key: Option<String>, task: Task) -> Result<InvocationSession> {
    let api_key = api_key
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .context("API key must be provided via --api-key or OPENAI_API_KEY environment variable")?;

    let provider = OpenAiProvider::new(OpenAiProviderConfig {
        host: env::var("OPENAI_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string()),
        api_key,
    })?;

    let store = HttpObjectStore::new(StorageConfig {
        host: env::var("AGORA_STORAGE_HOST")
            .unwrap_or_else(|_| "http://localhost:54321".to_string()),
        api_key: env::var("AGORA_STORAGE_API_KEY").unwrap_or_default(),
        bucket: env::var("AGORA_STORAGE_BUCKET").unwrap_or_else(|_| "uploads".to_string()),
    })?;

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let uploader = AssetUploader::new(Arc::new(store), notifier.clone());
    let invoker = CompletionInvoker::new(Box::new(provider));

    Ok(InvocationSession::new(task, uploader, invoker, notifier))
}

fn attach_images(session: &mut InvocationSession, images: &[PathBuf]) -> Result<()> {
    for path in images {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        session.attach(LocalAsset::new(name, bytes));
    }
    Ok(())
}

fn prompt_for_input(placeholder: &str) -> Result<String> {
    let text: String = input("Input:")
        .placeholder(placeholder)
        .multiline()
        .interact()?;
    Ok(text)
}
