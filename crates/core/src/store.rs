use crate::models::{DocumentChunk, SourceCitation};

/// A chunk returned by a similarity search, best match first.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreHit {
    pub score: f32,
    pub chunk: DocumentChunk,
}

impl StoreHit {
    pub fn into_citation(self, index: usize) -> SourceCitation {
        SourceCitation::from_chunk(index, &self.chunk)
    }
}
