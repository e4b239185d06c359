use crate::error::IndexBuildError;
use crate::models::IngestionOptions;
use std::collections::VecDeque;

/// Split points tried in order, coarsest first. The empty separator splits
/// between characters and always succeeds.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
}

impl From<IngestionOptions> for ChunkingConfig {
    fn from(value: IngestionOptions) -> Self {
        Self {
            max_chars: value.chunk_max_chars,
            overlap_chars: value.chunk_overlap_chars,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<(), IndexBuildError> {
        if self.max_chars == 0 {
            return Err(IndexBuildError::InvalidChunkConfig(
                "window size must be positive".to_string(),
            ));
        }
        if self.overlap_chars >= self.max_chars {
            return Err(IndexBuildError::InvalidChunkConfig(format!(
                "overlap {} must be smaller than window size {}",
                self.overlap_chars, self.max_chars
            )));
        }
        Ok(())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Recursively splits `text` into windows of at most `max_chars` characters,
/// carrying up to `overlap_chars` of trailing context into the next window.
pub fn split_recursive(text: &str, config: ChunkingConfig) -> Result<Vec<String>, IndexBuildError> {
    config.validate()?;
    Ok(split_with(text, &DEFAULT_SEPARATORS, config))
}

fn split_with(text: &str, separators: &[&str], config: ChunkingConfig) -> Vec<String> {
    let position = separators
        .iter()
        .position(|separator| separator.is_empty() || text.contains(separator))
        .unwrap_or(separators.len().saturating_sub(1));
    let separator = separators.get(position).copied().unwrap_or("");
    let finer = separators.get(position + 1..).unwrap_or(&[]);

    let pieces: Vec<String> = if separator.is_empty() {
        text.chars().map(String::from).collect()
    } else {
        text.split(separator)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    };

    let mut chunks = Vec::new();
    let mut fitting = Vec::new();
    for piece in pieces {
        if char_len(&piece) < config.max_chars {
            fitting.push(piece);
            continue;
        }

        if !fitting.is_empty() {
            chunks.extend(merge_pieces(&fitting, separator, config));
            fitting.clear();
        }
        if finer.is_empty() {
            chunks.push(piece);
        } else {
            chunks.extend(split_with(&piece, finer, config));
        }
    }

    if !fitting.is_empty() {
        chunks.extend(merge_pieces(&fitting, separator, config));
    }

    chunks
}

fn merge_pieces(pieces: &[String], separator: &str, config: ChunkingConfig) -> Vec<String> {
    let separator_len = char_len(separator);
    let mut merged = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let piece_len = char_len(piece);
        let joiner = |window: &VecDeque<&str>| if window.is_empty() { 0 } else { separator_len };

        if total + piece_len + joiner(&window) > config.max_chars {
            if !window.is_empty() {
                push_joined(&mut merged, &window, separator);

                while total > config.overlap_chars
                    || (total > 0 && total + piece_len + joiner(&window) > config.max_chars)
                {
                    let Some(front) = window.pop_front() else {
                        break;
                    };
                    let dropped = char_len(front) + if window.is_empty() { 0 } else { separator_len };
                    total = total.saturating_sub(dropped);
                }
            }
        }

        window.push_back(piece);
        total += piece_len + if window.len() > 1 { separator_len } else { 0 };
    }

    push_joined(&mut merged, &window, separator);
    merged
}

fn push_joined(target: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        target.push(trimmed.to_string());
    }
}
