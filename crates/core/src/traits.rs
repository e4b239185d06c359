use crate::error::{ConfigurationError, IndexBuildError, PipelineError};
use crate::models::{ChatMessage, DocumentChunk};
use crate::retriever::IndexedDocument;
use crate::store::StoreHit;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait VectorIndex {
    async fn index_vector_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
    ) -> Result<(), IndexBuildError>;

    async fn search_vector(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<StoreHit>, PipelineError>;

    async fn entry_count(&self) -> usize;
}

/// A ready-to-call chat model. Implementations hold their own credential.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn model_id(&self) -> &str;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, PipelineError>;
}

/// Builds the collaborators a session swaps in and out: model handles on
/// model changes, retrievers on uploads.
#[async_trait]
pub trait PipelineFactory: Send + Sync {
    fn chat_model(&self, model_id: &str) -> Result<Arc<dyn ChatModel>, ConfigurationError>;

    async fn build_retriever(
        &self,
        document_path: &Path,
        top_k: usize,
    ) -> Result<IndexedDocument, IndexBuildError>;
}
