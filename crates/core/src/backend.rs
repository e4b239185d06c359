use crate::embeddings::Embedder;
use crate::error::{ConfigurationError, IndexBuildError};
use crate::llm::{get_client, CREDENTIAL_ENV};
use crate::models::IngestionOptions;
use crate::retriever::{build_retriever, IndexedDocument};
use crate::traits::{ChatModel, PipelineFactory};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Production factory: DashScope chat models and locally indexed PDFs.
pub struct HostedBackend {
    credential: String,
    base_url: String,
    embedder: Arc<dyn Embedder>,
    options: IngestionOptions,
}

impl HostedBackend {
    pub fn new(
        credential: Option<String>,
        base_url: impl Into<String>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, ConfigurationError> {
        let credential = credential
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigurationError::MissingCredential(CREDENTIAL_ENV.to_string()))?;

        Ok(Self {
            credential,
            base_url: base_url.into(),
            embedder,
            options: IngestionOptions::default(),
        })
    }

    pub fn with_options(mut self, options: IngestionOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl PipelineFactory for HostedBackend {
    fn chat_model(&self, model_id: &str) -> Result<Arc<dyn ChatModel>, ConfigurationError> {
        let client = get_client(model_id, Some(&self.credential), &self.base_url)?;
        Ok(Arc::new(client))
    }

    async fn build_retriever(
        &self,
        document_path: &Path,
        top_k: usize,
    ) -> Result<IndexedDocument, IndexBuildError> {
        build_retriever(document_path, top_k, self.embedder.clone(), &self.options).await
    }
}
