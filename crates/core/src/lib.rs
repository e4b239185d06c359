pub mod backend;
pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod retriever;
pub mod session;
pub mod store;
pub mod stores;
pub mod traits;

pub use backend::HostedBackend;
pub use chunking::{split_recursive, ChunkingConfig, DEFAULT_SEPARATORS};
pub use embeddings::{
    CharacterNgramEmbedder, DashScopeEmbedder, Embedder, DEFAULT_EMBEDDING_DIMENSIONS,
    DEFAULT_REMOTE_EMBEDDING_MODEL,
};
pub use error::{ConfigurationError, EmbeddingError, IndexBuildError, PipelineError};
pub use extractor::{extract_page_texts, ExtractedPdf, LopdfExtractor, PageText, PdfExtractor};
pub use llm::{get_client, DashScopeClient, CREDENTIAL_ENV, DEFAULT_BASE_URL};
pub use models::{
    is_supported_model, ChatMessage, DocumentChunk, DocumentFingerprint, IngestionOptions, Mode,
    Role, SourceCitation, Turn, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, DEFAULT_TOP_K, MAX_TOP_K,
    MIN_TOP_K, SUPPORTED_MODELS,
};
pub use pipeline::{ChatPipeline, ConversationMemory, RagAnswer, RagPipeline};
pub use retriever::{build_retriever, validate_top_k, IndexedDocument, Retriever};
pub use session::{
    cache_upload, Event, Outcome, Session, SessionSettings, SessionState, DEFAULT_CACHE_PATH,
    RAG_GUIDANCE,
};
pub use store::StoreHit;
pub use stores::InMemoryIndex;
pub use traits::{ChatModel, PipelineFactory, VectorIndex};
