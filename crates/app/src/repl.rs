use docchat_core::{
    Event, Mode, Outcome, PipelineFactory, Role, Session, SourceCitation, SUPPORTED_MODELS,
};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::fmt::Write;
use std::path::PathBuf;

pub const HELP: &str = "\
commands:
  /mode chat|rag      switch between chat and knowledge-base mode
  /model <id>         switch model (clears the conversation)
  /models             list available models
  /clear              clear the conversation
  /system <text>      replace the system prompt
  /topk <n>           chunks retrieved per question (2-10)
  /upload <path>      index a PDF as the knowledge base (rag mode)
  /status             show current settings
  /history            print the conversation so far
  /help               show this help
  /quit               exit
anything else is sent as a message.";

const MODES: [&str; 2] = ["chat", "rag"];

/// Line-editor helper: completes command names, `/mode` and `/model`
/// arguments, and file paths after `/upload`.
pub struct ReplHelper {
    commands: Vec<String>,
    files: FilenameCompleter,
}

impl ReplHelper {
    pub fn new() -> Self {
        Self {
            commands: command_names(),
            files: FilenameCompleter::new(),
        }
    }

    /// Candidates for everything except paths. Returns the byte offset the
    /// replacement starts at.
    fn candidates(&self, head: &str) -> (usize, Vec<Pair>) {
        if !head.starts_with('/') {
            return (0, Vec::new());
        }

        let Some((name, argument)) = head.split_once(' ') else {
            return (0, pairs(self.commands.iter().map(String::as_str), head));
        };

        let start = name.len() + 1;
        let matches = match name {
            "/mode" => pairs(MODES.into_iter(), argument),
            "/model" => pairs(SUPPORTED_MODELS.into_iter(), argument),
            _ => Vec::new(),
        };
        (start, matches)
    }
}

impl Default for ReplHelper {
    fn default() -> Self {
        Self::new()
    }
}

/// Command names as listed in [`HELP`].
fn command_names() -> Vec<String> {
    HELP.lines()
        .filter_map(|line| line.strip_prefix("  /"))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(|name| format!("/{name}"))
        .collect()
}

fn pairs<'a>(options: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<Pair> {
    options
        .filter(|option| option.starts_with(prefix))
        .map(|option| Pair {
            display: option.to_string(),
            replacement: option.to_string(),
        })
        .collect()
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        if head.starts_with("/upload ") {
            return self.files.complete(line, pos, ctx);
        }
        Ok(self.candidates(head))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let head = &line[..pos];
        if pos < line.len() || !head.starts_with('/') || head.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|name| name.starts_with(head) && name.len() > head.len())
            .map(|name| name[head.len()..].to_string())
    }
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Status,
    History,
    Models,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix('/') else {
        return Ok(Some(Command::Event(Event::Submit(line.to_string()))));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    let parsed = match name {
        "mode" => Command::Event(Event::SelectMode(argument.parse::<Mode>()?)),
        "model" => {
            if argument.is_empty() {
                return Err(format!("usage: /model <{}>", SUPPORTED_MODELS.join("|")));
            }
            Command::Event(Event::SelectModel(argument.to_string()))
        }
        "models" => Command::Models,
        "clear" => Command::Event(Event::ClearConversation),
        "system" => {
            if argument.is_empty() {
                return Err("usage: /system <prompt text>".to_string());
            }
            Command::Event(Event::SetSystemPrompt(argument.to_string()))
        }
        "topk" => {
            let top_k = argument
                .parse::<usize>()
                .map_err(|_| format!("usage: /topk <n>, got `{argument}`"))?;
            Command::Event(Event::SetTopK(top_k))
        }
        "upload" => {
            if argument.is_empty() {
                return Err("usage: /upload <path to pdf>".to_string());
            }
            Command::Event(Event::Upload(PathBuf::from(argument)))
        }
        "status" => Command::Status,
        "history" => Command::History,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command /{other}, try /help")),
    };

    Ok(Some(parsed))
}

pub fn render_citations(citations: &[SourceCitation]) -> String {
    let mut rendered = String::from("sources:");
    for citation in citations {
        let _ = write!(
            rendered,
            "\n  [{}] page: {}\n      {}",
            citation.index,
            citation.page_label(),
            citation.excerpt.replace('\n', " ")
        );
    }
    rendered
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Answered { answer, citations } => {
            if citations.is_empty() {
                answer.clone()
            } else {
                format!("{answer}\n\n{}", render_citations(citations))
            }
        }
        Outcome::Guidance(text) | Outcome::PipelineFailed(text) => text.clone(),
        Outcome::ModeSelected(state) => format!("mode changed ({state:?})"),
        Outcome::ModelSwitched { model } => {
            format!("switched to {model}; conversation cleared")
        }
        Outcome::Cleared => "conversation cleared".to_string(),
        Outcome::SettingsUpdated => "settings updated".to_string(),
        Outcome::Indexed {
            fingerprint,
            chunk_count,
        } => format!(
            "knowledge base ready: {} ({} pages, {} chunks)",
            fingerprint.document_title, fingerprint.page_count, chunk_count
        ),
        Outcome::IndexFailed(error) => format!("knowledge base build failed: {error}"),
        Outcome::Rejected(reason) => format!("rejected: {reason}"),
        Outcome::Unchanged => "nothing changed".to_string(),
    }
}

pub fn render_status<F: PipelineFactory>(session: &Session<F>) -> String {
    let settings = session.settings();
    let document = session
        .document()
        .map(|document| format!("{} ({} pages)", document.document_title, document.page_count))
        .unwrap_or_else(|| "none".to_string());

    format!(
        "state: {:?}\nmode: {}\nmodel: {}\ntop-k: {}\nsystem prompt: {}\ndocument: {}\nturns: {}",
        session.state(),
        settings.mode,
        settings.model,
        settings.top_k,
        settings.system_prompt,
        document,
        session.transcript().len()
    )
}

pub fn render_history<F: PipelineFactory>(session: &Session<F>) -> String {
    if session.transcript().is_empty() {
        return "(no messages yet)".to_string();
    }

    session
        .transcript()
        .iter()
        .map(|turn| {
            let speaker = match turn.role() {
                Role::User => "you",
                Role::Assistant | Role::System => "assistant",
            };
            format!("{speaker}: {}", turn.content())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Events that block long enough to deserve a status line first.
pub fn progress_hint(event: &Event) -> Option<&'static str> {
    match event {
        Event::Upload(_) => Some("indexing document, this can take a moment..."),
        Event::Submit(_) => Some("thinking..."),
        _ => None,
    }
}
