use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careerpath::chat::{ChatOutcome, ChatSession};
use careerpath::config::{default_cache_path, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use careerpath::panel::{
    CareerGuidanceTool, CareerSuggestor, Panel, PanelError, ResourceFinder, RoadmapMaker,
    Submission, Tool,
};
use careerpath::prompt_cache::{FileStore, PromptCache};
use careerpath::render::chat::format_reply;
use careerpath::transport::{HttpTransport, Transport, TransportError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Panel(#[from] PanelError),
    #[error("could not set up HTTP client: {0}")]
    Transport(#[from] TransportError),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "careerpath", about = "Career suggestions, guidance, resources, roadmaps and counselling chat")]
struct Cli {
    #[arg(long, env = "CAREERPATH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Give up on a tool call after this many seconds.
    #[arg(long, env = "CAREERPATH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Where previous roadmap prompts are kept.
    #[arg(long, env = "CAREERPATH_CACHE_PATH")]
    cache_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            cache_path: self.cache_path.clone().unwrap_or_else(default_cache_path),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest careers from your interests and current knowledge.
    Suggest { text: Vec<String> },
    /// Exams, scholarships, prerequisites and programs for a career.
    Guidance { text: Vec<String> },
    /// Study groups and materials for an exam or technology.
    Resources { text: Vec<String> },
    /// Step-by-step roadmap, answered from the local cache when repeated.
    Roadmap { text: Vec<String> },
    /// List cached roadmap prompts, newest first.
    History,
    /// Interactive counselling chat. `/reset` clears the last error, `/quit` exits.
    Chat,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("careerpath=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.client_config();
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.base_url.as_str())?);
    let cache = || PromptCache::new(Arc::new(FileStore::new(config.cache_path.clone())));

    match cli.command {
        Command::Suggest { text } => {
            run_tool(Panel::<CareerSuggestor>::new(transport, config.request_timeout), &text).await
        }
        Command::Guidance { text } => {
            run_tool(Panel::<CareerGuidanceTool>::new(transport, config.request_timeout), &text)
                .await
        }
        Command::Resources { text } => {
            run_tool(Panel::<ResourceFinder>::new(transport, config.request_timeout), &text).await
        }
        Command::Roadmap { text } => {
            let panel =
                Panel::<RoadmapMaker>::new(transport, config.request_timeout).with_cache(cache());
            run_tool(panel, &text).await
        }
        Command::History => {
            let history = cache().history();
            if history.is_empty() {
                println!("No previous roadmap prompts.");
            }
            for (i, record) in history.iter().enumerate() {
                println!("{:>2}. {}", i + 1, record.prompt);
            }
            Ok(())
        }
        Command::Chat => run_chat(ChatSession::new(transport, config.request_timeout)).await,
    }
}

async fn run_tool<T: Tool>(panel: Panel<T>, words: &[String]) -> Result<(), CliError> {
    let text = words.join(" ");
    eprintln!("Loading...");
    if panel.submit(&text).await? == Submission::Cached {
        eprintln!("(from previous prompts)");
    }
    if let Some(view) = panel.view() {
        print!("{view}");
    }
    Ok(())
}

async fn run_chat(chat: ChatSession) -> Result<(), CliError> {
    println!("Career counselling chat. Type /quit to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/reset" => {
                chat.reset();
                continue;
            }
            _ => {}
        }

        match chat.send(&line).await {
            Ok(ChatOutcome::Replied(reply)) => println!("{}\n", format_reply(&reply.text)),
            Ok(ChatOutcome::Ignored) => {}
            // Validation and rate-limit messages are for the user, not fatal.
            Err(e) => println!("{e}\n"),
        }
    }

    Ok(())
}
