mod repl;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use docchat_core::{
    CharacterNgramEmbedder, ChunkingConfig, ConfigurationError, DashScopeEmbedder, Embedder, Event,
    HostedBackend, IngestionOptions, Mode, Outcome, Session, SessionSettings, CREDENTIAL_ENV,
    DEFAULT_BASE_URL, DEFAULT_CACHE_PATH, DEFAULT_MODEL, DEFAULT_REMOTE_EMBEDDING_MODEL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TOP_K, MAX_TOP_K, MIN_TOP_K, SUPPORTED_MODELS,
};
use repl::{
    parse_line, progress_hint, render_history, render_outcome, render_status,
    Command as ReplCommand, ReplHelper, HELP,
};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const MISSING_KEY_HELP: &str = "\
DASHSCOPE_API_KEY was not found. Configure it in one of these ways:

  1. Create a .env file in the working directory containing:
       DASHSCOPE_API_KEY=<your DashScope API key>

  2. Set an environment variable:
       Windows:      setx DASHSCOPE_API_KEY \"<your key>\"
       Linux/macOS:  export DASHSCOPE_API_KEY=\"<your key>\"";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmbedderKind {
    /// Hashed character trigrams computed locally.
    Local,
    /// DashScope embeddings endpoint.
    Remote,
}

#[derive(Parser)]
#[command(name = "docchat", version, about = "Chat with hosted LLMs and a PDF knowledge base")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// DashScope API key
    #[arg(long, env = "DASHSCOPE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenAI-compatible base URL
    #[arg(long, env = "DASHSCOPE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Model used for chat and knowledge-base answers
    #[arg(long, default_value = DEFAULT_MODEL, value_parser = clap::builder::PossibleValuesParser::new(SUPPORTED_MODELS))]
    model: String,

    /// Starting mode: chat or rag
    #[arg(long, default_value = "chat")]
    mode: Mode,

    /// System prompt prepended to every request
    #[arg(long, default_value = DEFAULT_SYSTEM_PROMPT)]
    system_prompt: String,

    /// Chunks retrieved per knowledge-base question
    #[arg(long, default_value_t = DEFAULT_TOP_K as u64, value_parser = clap::value_parser!(u64).range(MIN_TOP_K as u64..=MAX_TOP_K as u64))]
    top_k: u64,

    /// Where uploaded PDFs are copied before indexing
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache_path: PathBuf,

    /// Embedding backend for knowledge-base indexing
    #[arg(long, value_enum, default_value_t = EmbedderKind::Local)]
    embedder: EmbedderKind,

    /// Remote embedding model
    #[arg(long, default_value = DEFAULT_REMOTE_EMBEDDING_MODEL)]
    embedding_model: String,

    /// Remote embedding dimensions
    #[arg(long, default_value = "1024")]
    embedding_dimensions: usize,

    /// Maximum characters per indexed chunk
    #[arg(long, default_value = "800")]
    chunk_size: usize,

    /// Characters shared between neighbouring chunks
    #[arg(long, default_value = "150")]
    chunk_overlap: usize,
}

impl Cli {
    fn ingestion_options(&self) -> anyhow::Result<IngestionOptions> {
        let options = IngestionOptions {
            chunk_max_chars: self.chunk_size,
            chunk_overlap_chars: self.chunk_overlap,
        };
        ChunkingConfig::from(options.clone()).validate()?;
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default).
    Chat,
    /// Ask a single question and exit.
    Ask {
        /// The question
        question: String,
        /// Answer from this PDF instead of plain chat.
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = cli.ingestion_options()?;

    let embedder: Arc<dyn Embedder> = match cli.embedder {
        EmbedderKind::Local => Arc::new(CharacterNgramEmbedder::default()),
        EmbedderKind::Remote => Arc::new(DashScopeEmbedder::new(
            &cli.base_url,
            cli.api_key.clone().unwrap_or_default(),
            cli.embedding_model.clone(),
            cli.embedding_dimensions,
        )),
    };

    let backend = match HostedBackend::new(cli.api_key.clone(), cli.base_url.clone(), embedder) {
        Ok(backend) => backend.with_options(options),
        Err(error @ ConfigurationError::MissingCredential(_)) => {
            eprintln!("{MISSING_KEY_HELP}");
            return Err(error.into());
        }
        Err(error) => return Err(error.into()),
    };

    let settings = SessionSettings {
        mode: cli.mode,
        model: cli.model.clone(),
        system_prompt: cli.system_prompt.clone(),
        top_k: cli.top_k as usize,
        cache_path: cli.cache_path.clone(),
    };
    let mut session = Session::start(backend, settings)?;

    info!(
        version = app_version,
        session = %session.id(),
        credential_source = CREDENTIAL_ENV,
        started_at = %Utc::now().to_rfc3339(),
        "docchat boot"
    );

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_interactive(&mut session).await?,
        Command::Ask { question, pdf } => {
            if let Some(pdf) = pdf {
                session.handle(Event::SelectMode(Mode::Rag)).await;
                let indexed = session.handle(Event::Upload(pdf)).await;
                eprintln!("{}", render_outcome(&indexed));
                if let Outcome::IndexFailed(error) = indexed {
                    anyhow::bail!("could not index pdf: {error}");
                }
            }

            let outcome = session.handle(Event::Submit(question)).await;
            println!("{}", render_outcome(&outcome));
            match outcome {
                Outcome::PipelineFailed(_) => anyhow::bail!("the model request failed"),
                Outcome::Rejected(reason) => anyhow::bail!("question rejected: {reason}"),
                _ => {}
            }
        }
    }

    Ok(())
}

async fn run_interactive(session: &mut Session<HostedBackend>) -> anyhow::Result<()> {
    println!(
        "docchat: mode={} model={} (type /help for commands)",
        session.settings().mode,
        session.settings().model
    );

    let mut editor: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ReplHelper::new()));

    loop {
        let line = match tokio::task::block_in_place(|| editor.readline("> ")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("type /quit to exit");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ReplCommand::Event(event) => {
                if let Some(hint) = progress_hint(&event) {
                    eprintln!("{hint}");
                }
                let outcome = session.handle(event).await;
                if let Outcome::IndexFailed(error) = &outcome {
                    warn!(%error, "upload not indexed");
                }
                println!("{}", render_outcome(&outcome));
            }
            ReplCommand::Status => println!("{}", render_status(session)),
            ReplCommand::History => println!("{}", render_history(session)),
            ReplCommand::Models => println!("{}", SUPPORTED_MODELS.join("\n")),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
        }
    }

    info!(session = %session.id(), turns = session.transcript().len(), "session ended");
    Ok(())
}
