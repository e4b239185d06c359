use crate::chunking::{split_recursive, ChunkingConfig};
use crate::embeddings::Embedder;
use crate::error::{ConfigurationError, EmbeddingError, IndexBuildError, PipelineError};
use crate::extractor::{extract_page_texts, ExtractedPdf, PageText};
use crate::models::{DocumentChunk, DocumentFingerprint, IngestionOptions, MAX_TOP_K, MIN_TOP_K};
use crate::store::StoreHit;
use crate::stores::InMemoryIndex;
use crate::traits::VectorIndex;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub fn validate_top_k(top_k: usize) -> Result<usize, ConfigurationError> {
    if (MIN_TOP_K..=MAX_TOP_K).contains(&top_k) {
        Ok(top_k)
    } else {
        Err(ConfigurationError::InvalidTopK {
            value: top_k,
            min: MIN_TOP_K,
            max: MAX_TOP_K,
        })
    }
}

/// Answers top-k similarity queries over one document's chunks.
///
/// Clones share the underlying index; only `top_k` is per-clone.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<InMemoryIndex>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl fmt::Debug for Retriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("vector_size", &self.index.vector_size())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl Retriever {
    /// Embeds and indexes already-split chunks.
    pub async fn from_chunks(
        chunks: &[DocumentChunk],
        embedder: Arc<dyn Embedder>,
        top_k: usize,
    ) -> Result<Self, IndexBuildError> {
        let top_k = validate_top_k(top_k)?;
        let texts = chunks.iter().map(|chunk| chunk.text.clone()).collect::<Vec<_>>();
        let embeddings = embedder.embed(&texts).await?;

        let index = InMemoryIndex::new(embedder.dimensions());
        index.index_vector_chunks(chunks, &embeddings).await?;

        Ok(Self {
            index: Arc::new(index),
            embedder,
            top_k,
        })
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn set_top_k(&mut self, top_k: usize) -> Result<(), ConfigurationError> {
        self.top_k = validate_top_k(top_k)?;
        Ok(())
    }

    pub fn shares_index_with(&self, other: &Retriever) -> bool {
        Arc::ptr_eq(&self.index, &other.index)
    }

    pub async fn chunk_count(&self) -> usize {
        self.index.entry_count().await
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<StoreHit>, PipelineError> {
        let vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or(EmbeddingError::CountMismatch {
                expected: 1,
                got: 0,
            })?;

        let hits = self.index.search_vector(&query_vector, self.top_k).await?;
        debug!(top_k = self.top_k, hit_count = hits.len(), "retrieved chunks");
        Ok(hits)
    }
}

pub struct IndexedDocument {
    pub fingerprint: DocumentFingerprint,
    pub chunk_count: usize,
    pub retriever: Retriever,
}

/// Loads a PDF, splits each page into overlapping windows, embeds them and
/// wraps the resulting index as a [`Retriever`]. Always a full rebuild.
pub async fn build_retriever(
    document_path: &Path,
    top_k: usize,
    embedder: Arc<dyn Embedder>,
    options: &IngestionOptions,
) -> Result<IndexedDocument, IndexBuildError> {
    validate_top_k(top_k)?;
    let (extracted, fingerprint) = load_document(document_path.to_path_buf()).await?;
    let chunks = chunk_pages(&fingerprint, &extracted.pages, options)?;

    if chunks.is_empty() {
        return Err(IndexBuildError::NoText(fingerprint.source_path));
    }

    info!(
        path = %document_path.display(),
        pages = fingerprint.page_count,
        chunk_count = chunks.len(),
        "indexing document"
    );

    let retriever = Retriever::from_chunks(&chunks, embedder, top_k).await?;

    Ok(IndexedDocument {
        fingerprint,
        chunk_count: chunks.len(),
        retriever,
    })
}

/// Parses and digests the PDF on the blocking pool; both read the whole file.
async fn load_document(
    path: PathBuf,
) -> Result<(ExtractedPdf, DocumentFingerprint), IndexBuildError> {
    tokio::task::spawn_blocking(move || {
        let extracted = extract_page_texts(&path)?;
        let fingerprint = build_document_fingerprint(&path, extracted.page_count)?;
        Ok::<_, IndexBuildError>((extracted, fingerprint))
    })
    .await
    .map_err(|error| IndexBuildError::Io(io::Error::other(error.to_string())))?
}

pub fn chunk_pages(
    document: &DocumentFingerprint,
    pages: &[PageText],
    options: &IngestionOptions,
) -> Result<Vec<DocumentChunk>, IndexBuildError> {
    let config = ChunkingConfig::from(options.clone());
    let mut chunks = Vec::new();
    let mut cursor = 0u64;

    for page in pages {
        for text in split_recursive(&page.text, config)? {
            chunks.push(DocumentChunk {
                chunk_id: make_chunk_id(&document.document_id, page.number, cursor, &text),
                document_id: document.document_id.clone(),
                source_path: document.source_path.clone(),
                page: Some(page.number),
                chunk_index: cursor,
                text,
            });
            cursor = cursor.saturating_add(1);
        }
    }

    Ok(chunks)
}

pub fn digest_file(path: &Path) -> Result<String, IndexBuildError> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

fn build_document_fingerprint(
    path: &Path,
    page_count: usize,
) -> Result<DocumentFingerprint, IndexBuildError> {
    let checksum = digest_file(path)?;
    let title = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    Ok(DocumentFingerprint {
        document_id: checksum.chars().take(16).collect(),
        document_title: title,
        source_path: path.to_string_lossy().to_string(),
        checksum,
        page_count,
        ingested_at: Utc::now(),
    })
}

fn make_chunk_id(document_id: &str, page: u32, index: u64, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document_id.as_bytes());
    hasher.update(page.to_le_bytes());
    hasher.update(index.to_le_bytes());
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
