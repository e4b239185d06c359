use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("missing credential: set {0} in the environment or a .env file")]
    MissingCredential(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("invalid endpoint {endpoint}: {details}")]
    InvalidEndpoint { endpoint: String, details: String },

    #[error("top-k {value} is outside {min}..={max}")]
    InvalidTopK { value: usize, min: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("embedding count {got} doesn't match input count {expected}")]
    CountMismatch { expected: usize, got: usize },
}

#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("pdf had no readable page text: {0}")]
    NoText(String),

    #[error("invalid chunking config: {0}")]
    InvalidChunkConfig(String),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index rejected entry: {0}")]
    Index(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {backend} ({status}): {details}")]
    BackendResponse {
        backend: String,
        status: u16,
        details: String,
    },

    #[error("model {0} returned an empty completion")]
    EmptyCompletion(String),

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] EmbeddingError),

    #[error("index query rejected: {0}")]
    Index(String),
}
