use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SUPPORTED_MODELS: [&str; 3] = ["qwen-turbo", "qwen-plus", "qwen-max"];
pub const DEFAULT_MODEL: &str = SUPPORTED_MODELS[0];

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a rigorous assistant. If you have no basis for an answer, say clearly that you do not know.";

pub const MIN_TOP_K: usize = 2;
pub const MAX_TOP_K: usize = 10;
pub const DEFAULT_TOP_K: usize = 4;

/// Characters of chunk text shown per citation.
pub const CITATION_EXCERPT_CHARS: usize = 400;

pub fn is_supported_model(model_id: &str) -> bool {
    SUPPORTED_MODELS.contains(&model_id)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Wire shape shared by the chat-completions API and conversation memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One entry of the on-screen transcript. Never mutated after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceCitation {
    pub index: usize,
    pub page: Option<u32>,
    pub excerpt: String,
}

impl SourceCitation {
    pub fn from_chunk(index: usize, chunk: &DocumentChunk) -> Self {
        let mut excerpt: String = chunk.text.chars().take(CITATION_EXCERPT_CHARS).collect();
        excerpt.push('…');

        Self {
            index,
            page: chunk.page,
            excerpt,
        }
    }

    pub fn page_label(&self) -> String {
        self.page
            .map(|page| page.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFingerprint {
    pub document_id: String,
    pub document_title: String,
    pub source_path: String,
    pub checksum: String,
    pub page_count: usize,
    pub ingested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    pub chunk_id: String,
    pub document_id: String,
    pub source_path: String,
    /// 1-based page number; `None` when the source did not report one.
    pub page: Option<u32>,
    pub chunk_index: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Chat,
    Rag,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Chat => f.write_str("chat"),
            Mode::Rag => f.write_str("rag"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "chat" => Ok(Mode::Chat),
            "rag" | "kb" | "knowledge-base" => Ok(Mode::Rag),
            other => Err(format!("unknown mode `{other}` (expected chat or rag)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestionOptions {
    pub chunk_max_chars: usize,
    pub chunk_overlap_chars: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            chunk_max_chars: 800,
            chunk_overlap_chars: 150,
        }
    }
}
