use crate::error::{IndexBuildError, PipelineError};
use crate::models::DocumentChunk;
use crate::store::StoreHit;
use crate::traits::VectorIndex;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug)]
struct IndexEntry {
    chunk: DocumentChunk,
    vector: Vec<f32>,
}

/// Flat cosine-similarity index held in memory. Built once per uploaded
/// document and only read afterwards.
#[derive(Debug)]
pub struct InMemoryIndex {
    vector_size: usize,
    entries: RwLock<Vec<IndexEntry>>,
}

impl InMemoryIndex {
    pub fn new(vector_size: usize) -> Self {
        Self {
            vector_size,
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn vector_size(&self) -> usize {
        self.vector_size
    }
}

fn cosine_similarity(left: &[f32], right: &[f32]) -> f32 {
    let dot = left.iter().zip(right).map(|(a, b)| a * b).sum::<f32>();
    let left_norm = left.iter().map(|value| value * value).sum::<f32>().sqrt();
    let right_norm = right.iter().map(|value| value * value).sum::<f32>().sqrt();
    if left_norm == 0.0 || right_norm == 0.0 {
        0.0
    } else {
        dot / (left_norm * right_norm)
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn index_vector_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
    ) -> Result<(), IndexBuildError> {
        if chunks.len() != embeddings.len() {
            return Err(IndexBuildError::Index(format!(
                "embedding count {} doesn't match chunk count {}",
                embeddings.len(),
                chunks.len()
            )));
        }

        let entries = chunks
            .iter()
            .zip(embeddings.iter())
            .map(|(chunk, embedding)| {
                if embedding.len() != self.vector_size {
                    return Err(IndexBuildError::Index(format!(
                        "embedding dimension {} != {}",
                        embedding.len(),
                        self.vector_size
                    )));
                }

                Ok(IndexEntry {
                    chunk: chunk.clone(),
                    vector: embedding.clone(),
                })
            })
            .collect::<Result<Vec<_>, IndexBuildError>>()?;

        self.entries.write().await.extend(entries);
        Ok(())
    }

    async fn search_vector(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<StoreHit>, PipelineError> {
        if query_vector.len() != self.vector_size {
            return Err(PipelineError::Index(format!(
                "query vector dim {} is not {}",
                query_vector.len(),
                self.vector_size
            )));
        }

        let entries = self.entries.read().await;
        let mut hits = entries
            .iter()
            .map(|entry| StoreHit {
                score: cosine_similarity(query_vector, &entry.vector),
                chunk: entry.chunk.clone(),
            })
            .collect::<Vec<_>>();

        hits.sort_by(|left, right| {
            right
                .score
                .total_cmp(&left.score)
                .then_with(|| left.chunk.chunk_index.cmp(&right.chunk.chunk_index))
        });
        hits.truncate(top_k);
        Ok(hits)
    }

    async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}
