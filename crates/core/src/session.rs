//! Per-user session state and the single event dispatch entry point.
//!
//! A session always owns exactly one chat pipeline and at most one RAG
//! pipeline. Both are bound to the same model handle; changing the model
//! rebinds both before the next event is handled.

use crate::error::{ConfigurationError, IndexBuildError};
use crate::models::{
    is_supported_model, DocumentFingerprint, Mode, SourceCitation, Turn, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TOP_K,
};
use crate::pipeline::{ChatPipeline, RagPipeline};
use crate::retriever::validate_top_k;
use crate::traits::{ChatModel, PipelineFactory};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const RAG_GUIDANCE: &str =
    "Please upload a PDF first to build the knowledge base, then ask your question again.";

pub const DEFAULT_CACHE_PATH: &str = ".cache/kb.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    NoPipeline,
    ChatReady,
    RagEmpty,
    RagReady,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub mode: Mode,
    pub model: String,
    pub system_prompt: String,
    pub top_k: usize,
    /// Every upload is copied here, replacing the previous one.
    pub cache_path: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Chat,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            top_k: DEFAULT_TOP_K,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !is_supported_model(&self.model) {
            return Err(ConfigurationError::UnknownModel(self.model.clone()));
        }
        validate_top_k(self.top_k)?;
        Ok(())
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectMode(Mode),
    SelectModel(String),
    ClearConversation,
    SetSystemPrompt(String),
    SetTopK(usize),
    Upload(PathBuf),
    Submit(String),
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Answered {
        answer: String,
        citations: Vec<SourceCitation>,
    },
    Guidance(String),
    /// The pipeline failed; the message was appended as an assistant turn.
    PipelineFailed(String),
    ModeSelected(SessionState),
    ModelSwitched {
        model: String,
    },
    Cleared,
    SettingsUpdated,
    Indexed {
        fingerprint: DocumentFingerprint,
        chunk_count: usize,
    },
    IndexFailed(String),
    Rejected(String),
    Unchanged,
}

pub struct Session<F>
where
    F: PipelineFactory,
{
    id: Uuid,
    factory: F,
    settings: SessionSettings,
    transcript: Vec<Turn>,
    model: Arc<dyn ChatModel>,
    chat: ChatPipeline,
    rag: Option<RagPipeline>,
    document: Option<DocumentFingerprint>,
}

impl<F> Session<F>
where
    F: PipelineFactory,
{
    /// Validates settings and eagerly builds the chat pipeline.
    pub fn start(factory: F, settings: SessionSettings) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        let model = factory.chat_model(&settings.model)?;

        let session = Self {
            id: Uuid::new_v4(),
            factory,
            chat: ChatPipeline::new(model.clone()),
            model,
            settings,
            transcript: Vec::new(),
            rag: None,
            document: None,
        };

        info!(
            session = %session.id,
            from = ?SessionState::NoPipeline,
            to = ?session.state(),
            model = %session.settings.model,
            "session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        match (self.settings.mode, &self.rag) {
            (Mode::Chat, _) => SessionState::ChatReady,
            (Mode::Rag, None) => SessionState::RagEmpty,
            (Mode::Rag, Some(_)) => SessionState::RagReady,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn chat_pipeline(&self) -> &ChatPipeline {
        &self.chat
    }

    pub fn rag_pipeline(&self) -> Option<&RagPipeline> {
        self.rag.as_ref()
    }

    pub fn document(&self) -> Option<&DocumentFingerprint> {
        self.document.as_ref()
    }

    pub async fn handle(&mut self, event: Event) -> Outcome {
        let before = self.state();

        let outcome = match event {
            Event::SelectMode(mode) => {
                self.settings.mode = mode;
                Outcome::ModeSelected(self.state())
            }
            Event::SelectModel(model_id) => self.switch_model(&model_id),
            Event::ClearConversation => {
                self.transcript.clear();
                self.chat.reset_memory();
                info!(session = %self.id, "conversation cleared");
                Outcome::Cleared
            }
            Event::SetSystemPrompt(prompt) => {
                self.settings.system_prompt = prompt;
                Outcome::SettingsUpdated
            }
            Event::SetTopK(top_k) => self.set_top_k(top_k),
            Event::Upload(path) => self.upload(&path).await,
            Event::Submit(text) => self.submit(&text).await,
        };

        let after = self.state();
        if before != after {
            info!(session = %self.id, from = ?before, to = ?after, "session state changed");
        }
        outcome
    }

    fn switch_model(&mut self, model_id: &str) -> Outcome {
        if model_id == self.model.model_id() {
            return Outcome::Unchanged;
        }

        let model = match self.factory.chat_model(model_id) {
            Ok(model) => model,
            Err(error) => {
                warn!(session = %self.id, model = model_id, %error, "model switch rejected");
                return Outcome::Rejected(error.to_string());
            }
        };

        self.chat = ChatPipeline::new(model.clone());
        self.rag = self.rag.as_ref().map(|rag| rag.with_model(model.clone()));
        self.model = model;
        self.settings.model = model_id.to_string();
        // Conversational memory does not carry across models.
        self.transcript.clear();

        info!(
            session = %self.id,
            model = model_id,
            rag_rebound = self.rag.is_some(),
            "model switched"
        );
        Outcome::ModelSwitched {
            model: model_id.to_string(),
        }
    }

    fn set_top_k(&mut self, top_k: usize) -> Outcome {
        if let Err(error) = validate_top_k(top_k) {
            return Outcome::Rejected(error.to_string());
        }

        self.settings.top_k = top_k;
        if let Some(rag) = self.rag.as_mut() {
            if let Err(error) = rag.retriever_mut().set_top_k(top_k) {
                return Outcome::Rejected(error.to_string());
            }
        }
        Outcome::SettingsUpdated
    }

    async fn upload(&mut self, source: &Path) -> Outcome {
        if self.settings.mode != Mode::Rag {
            return Outcome::Rejected(
                "switch to rag mode before uploading a document".to_string(),
            );
        }

        match self.index_upload(source).await {
            Ok((fingerprint, chunk_count)) => {
                info!(
                    session = %self.id,
                    document = %fingerprint.document_title,
                    pages = fingerprint.page_count,
                    chunk_count,
                    "knowledge base ready"
                );
                Outcome::Indexed {
                    fingerprint,
                    chunk_count,
                }
            }
            Err(error) => {
                self.rag = None;
                self.document = None;
                warn!(session = %self.id, path = %source.display(), %error, "knowledge base build failed");
                Outcome::IndexFailed(error.to_string())
            }
        }
    }

    async fn index_upload(
        &mut self,
        source: &Path,
    ) -> Result<(DocumentFingerprint, usize), IndexBuildError> {
        let cached = cache_upload(source, &self.settings.cache_path).await?;
        let indexed = self
            .factory
            .build_retriever(&cached, self.settings.top_k)
            .await?;

        self.rag = Some(RagPipeline::new(self.model.clone(), indexed.retriever));
        self.document = Some(indexed.fingerprint.clone());
        Ok((indexed.fingerprint, indexed.chunk_count))
    }

    async fn submit(&mut self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Rejected("message is empty".to_string());
        }

        self.transcript.push(Turn::user(text));
        let system_prompt = self.settings.system_prompt.as_str();

        let result = match (self.settings.mode, self.rag.as_ref()) {
            (Mode::Rag, None) => {
                self.transcript.push(Turn::assistant(RAG_GUIDANCE));
                return Outcome::Guidance(RAG_GUIDANCE.to_string());
            }
            (Mode::Rag, Some(rag)) => rag
                .answer(system_prompt, text)
                .await
                .map(|answer| (answer.answer, answer.citations)),
            (Mode::Chat, _) => self
                .chat
                .predict(system_prompt, text)
                .await
                .map(|answer| (answer, Vec::new())),
        };

        match result {
            Ok((answer, citations)) => {
                self.transcript.push(Turn::assistant(answer.clone()));
                Outcome::Answered { answer, citations }
            }
            Err(error) => {
                warn!(session = %self.id, mode = %self.settings.mode, %error, "pipeline call failed");
                let message = format!("Error: {error}");
                self.transcript.push(Turn::assistant(message.clone()));
                Outcome::PipelineFailed(message)
            }
        }
    }
}

/// Copies an upload to the fixed cache location, overwriting any previous
/// document.
pub async fn cache_upload(source: &Path, cache_path: &Path) -> Result<PathBuf, IndexBuildError> {
    if let (Ok(from), Ok(to)) = (
        tokio::fs::canonicalize(source).await,
        tokio::fs::canonicalize(cache_path).await,
    ) {
        if from == to {
            return Ok(cache_path.to_path_buf());
        }
    }

    if let Some(parent) = cache_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::copy(source, cache_path).await?;
    Ok(cache_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::CharacterNgramEmbedder;
    use crate::extractor::fixtures::write_text_pdf;
    use crate::models::{IngestionOptions, Role};
    use crate::pipeline::fakes::ScriptedModel;
    use crate::retriever::{build_retriever, IndexedDocument};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct FakeFactory {
        failing_models: Vec<String>,
        handed_out: Mutex<Vec<Arc<ScriptedModel>>>,
    }

    impl FakeFactory {
        fn failing(model_id: &str) -> Self {
            Self {
                failing_models: vec![model_id.to_string()],
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PipelineFactory for FakeFactory {
        fn chat_model(&self, model_id: &str) -> Result<Arc<dyn ChatModel>, ConfigurationError> {
            if !is_supported_model(model_id) {
                return Err(ConfigurationError::UnknownModel(model_id.to_string()));
            }
            let model = if self.failing_models.iter().any(|failing| failing == model_id) {
                Arc::new(ScriptedModel::failing(model_id))
            } else {
                Arc::new(ScriptedModel::answering(model_id))
            };
            if let Ok(mut handed_out) = self.handed_out.lock() {
                handed_out.push(model.clone());
            }
            Ok(model)
        }

        async fn build_retriever(
            &self,
            document_path: &Path,
            top_k: usize,
        ) -> Result<IndexedDocument, IndexBuildError> {
            build_retriever(
                document_path,
                top_k,
                Arc::new(CharacterNgramEmbedder::default()),
                &IngestionOptions::default(),
            )
            .await
        }
    }

    fn total_model_calls(session: &Session<FakeFactory>) -> usize {
        session
            .factory
            .handed_out
            .lock()
            .map(|models| models.iter().map(|model| model.call_count()).sum())
            .unwrap_or(0)
    }

    fn start(factory: FakeFactory, dir: &TempDir) -> Result<Session<FakeFactory>, ConfigurationError> {
        Session::start(
            factory,
            SessionSettings {
                cache_path: dir.path().join(".cache").join("kb.pdf"),
                ..SessionSettings::default()
            },
        )
    }

    fn sample_pdf(dir: &TempDir) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = dir.path().join("manual.pdf");
        write_text_pdf(
            &path,
            &[
                "Hydraulic pump pressure limits",
                "Valve maintenance schedule",
                "Electrical wiring diagram",
                "Warranty and support contacts",
            ],
        )?;
        Ok(path)
    }

    async fn ready_rag_session(
        dir: &TempDir,
        factory: FakeFactory,
    ) -> Result<Session<FakeFactory>, Box<dyn std::error::Error>> {
        let mut session = start(factory, dir)?;
        session.handle(Event::SelectMode(Mode::Rag)).await;
        let pdf = sample_pdf(dir)?;
        let outcome = session.handle(Event::Upload(pdf)).await;
        assert!(matches!(outcome, Outcome::Indexed { .. }), "{outcome:?}");
        Ok(session)
    }

    #[tokio::test]
    async fn session_starts_chat_ready() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let session = start(FakeFactory::default(), &dir)?;

        assert_eq!(session.state(), SessionState::ChatReady);
        assert_eq!(session.chat_pipeline().model_id(), DEFAULT_MODEL);
        assert!(session.rag_pipeline().is_none());
        assert!(session.transcript().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_settings_fail_at_start() -> Result<(), Box<dyn std::error::Error>> {
        let result = Session::start(
            FakeFactory::default(),
            SessionSettings {
                top_k: 1,
                ..SessionSettings::default()
            },
        );
        assert!(matches!(result, Err(ConfigurationError::InvalidTopK { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn rag_without_document_returns_guidance_only() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::default(), &dir)?;

        let selected = session.handle(Event::SelectMode(Mode::Rag)).await;
        assert!(matches!(selected, Outcome::ModeSelected(SessionState::RagEmpty)));

        let outcome = session.handle(Event::Submit("what is the max pressure?".to_string())).await;

        assert!(matches!(outcome, Outcome::Guidance(ref text) if text == RAG_GUIDANCE));
        assert_eq!(total_model_calls(&session), 0);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].content(), RAG_GUIDANCE);
        Ok(())
    }

    #[tokio::test]
    async fn chat_message_round_trips_through_pipeline() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::default(), &dir)?;

        let outcome = session.handle(Event::Submit("hello".to_string())).await;

        match outcome {
            Outcome::Answered { answer, citations } => {
                assert_eq!(answer, "qwen-turbo says: hello");
                assert!(citations.is_empty());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        let roles = session.transcript().iter().map(Turn::role).collect::<Vec<_>>();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(session.chat_pipeline().memory().messages().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn uploaded_document_answers_with_page_citations() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = ready_rag_session(&dir, FakeFactory::default()).await?;

        assert_eq!(session.state(), SessionState::RagReady);
        assert!(session.settings().cache_path.is_file());
        assert_eq!(session.document().map(|document| document.page_count), Some(4));

        let outcome = session.handle(Event::Submit("valve maintenance".to_string())).await;
        let citations = match outcome {
            Outcome::Answered { citations, .. } => citations,
            other => panic!("expected an answer, got {other:?}"),
        };

        assert_eq!(citations.len(), DEFAULT_TOP_K);
        assert!(citations
            .iter()
            .all(|citation| matches!(citation.page, Some(page) if (1..=4).contains(&page))));
        assert_eq!(citations[0].page, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn upload_outside_rag_mode_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::default(), &dir)?;
        let pdf = sample_pdf(&dir)?;

        let outcome = session.handle(Event::Upload(pdf)).await;

        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(session.rag_pipeline().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn failed_upload_leaves_rag_empty() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = ready_rag_session(&dir, FakeFactory::default()).await?;

        let broken = dir.path().join("broken.pdf");
        std::fs::write(&broken, b"%PDF-1.4\n%broken")?;
        let outcome = session.handle(Event::Upload(broken)).await;

        assert!(matches!(outcome, Outcome::IndexFailed(_)));
        assert!(session.rag_pipeline().is_none());
        assert!(session.document().is_none());
        assert_eq!(session.state(), SessionState::RagEmpty);
        Ok(())
    }

    #[tokio::test]
    async fn model_switch_rebinds_both_pipelines_and_clears_transcript(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = ready_rag_session(&dir, FakeFactory::default()).await?;
        session.handle(Event::Submit("pump pressure".to_string())).await;
        assert_eq!(session.transcript().len(), 2);

        let before = session
            .rag_pipeline()
            .map(|rag| rag.retriever().clone())
            .ok_or("rag pipeline missing")?;

        let outcome = session.handle(Event::SelectModel("qwen-max".to_string())).await;

        assert!(matches!(outcome, Outcome::ModelSwitched { ref model } if model == "qwen-max"));
        assert!(session.transcript().is_empty());
        assert_eq!(session.chat_pipeline().model_id(), "qwen-max");
        let rag = session.rag_pipeline().ok_or("rag pipeline dropped")?;
        assert_eq!(rag.model_id(), "qwen-max");
        assert!(rag.retriever().shares_index_with(&before));
        assert_eq!(session.state(), SessionState::RagReady);
        Ok(())
    }

    #[tokio::test]
    async fn reselecting_current_model_keeps_transcript() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::default(), &dir)?;
        session.handle(Event::Submit("hello".to_string())).await;

        let outcome = session.handle(Event::SelectModel(DEFAULT_MODEL.to_string())).await;

        assert!(matches!(outcome, Outcome::Unchanged));
        assert_eq!(session.transcript().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_model_is_rejected_without_changes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::default(), &dir)?;
        session.handle(Event::Submit("hello".to_string())).await;

        let outcome = session.handle(Event::SelectModel("qwen-ultra".to_string())).await;

        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert_eq!(session.chat_pipeline().model_id(), DEFAULT_MODEL);
        assert_eq!(session.settings().model, DEFAULT_MODEL);
        assert_eq!(session.transcript().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn clearing_keeps_the_knowledge_base() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = ready_rag_session(&dir, FakeFactory::default()).await?;
        session.handle(Event::SelectMode(Mode::Chat)).await;
        session.handle(Event::Submit("hello".to_string())).await;

        let outcome = session.handle(Event::ClearConversation).await;

        assert!(matches!(outcome, Outcome::Cleared));
        assert!(session.transcript().is_empty());
        assert!(session.chat_pipeline().memory().is_empty());
        assert!(session.rag_pipeline().is_some());
        Ok(())
    }

    #[tokio::test]
    async fn pipeline_failure_appends_one_error_turn() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::failing("qwen-plus"), &dir)?;
        session.handle(Event::SelectModel("qwen-plus".to_string())).await;
        let settings_before = session.settings().clone();

        let outcome = session.handle(Event::Submit("hello".to_string())).await;

        assert!(matches!(outcome, Outcome::PipelineFailed(_)));
        let assistant_turns = session
            .transcript()
            .iter()
            .filter(|turn| turn.role() == Role::Assistant)
            .collect::<Vec<_>>();
        assert_eq!(assistant_turns.len(), 1);
        assert!(assistant_turns[0].content().starts_with("Error:"));
        assert!(assistant_turns[0].content().contains("model unavailable"));
        assert_eq!(session.state(), SessionState::ChatReady);
        assert_eq!(session.settings().model, settings_before.model);
        assert!(session.chat_pipeline().memory().is_empty());

        let retry = session.handle(Event::Submit("again".to_string())).await;
        assert!(matches!(retry, Outcome::PipelineFailed(_)));
        assert_eq!(session.transcript().len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn rag_pipeline_failure_appends_one_error_turn() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempdir()?;
        let mut session = ready_rag_session(&dir, FakeFactory::failing("qwen-plus")).await?;
        let before = session
            .rag_pipeline()
            .map(|rag| rag.retriever().clone())
            .ok_or("rag pipeline missing after upload")?;

        session.handle(Event::SelectModel("qwen-plus".to_string())).await;
        let outcome = session.handle(Event::Submit("valve maintenance".to_string())).await;

        assert!(matches!(outcome, Outcome::PipelineFailed(_)), "{outcome:?}");
        let assistant_turns = session
            .transcript()
            .iter()
            .filter(|turn| turn.role() == Role::Assistant)
            .collect::<Vec<_>>();
        assert_eq!(assistant_turns.len(), 1);
        assert!(assistant_turns[0].content().starts_with("Error:"));
        assert_eq!(session.state(), SessionState::RagReady);

        let rag = session.rag_pipeline().ok_or("rag pipeline dropped after failure")?;
        assert_eq!(rag.model_id(), "qwen-plus");
        assert!(rag.retriever().shares_index_with(&before));
        Ok(())
    }

    #[tokio::test]
    async fn top_k_changes_reach_existing_retriever() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = ready_rag_session(&dir, FakeFactory::default()).await?;

        assert!(matches!(session.handle(Event::SetTopK(2)).await, Outcome::SettingsUpdated));
        assert_eq!(
            session.rag_pipeline().map(|rag| rag.retriever().top_k()),
            Some(2)
        );

        assert!(matches!(session.handle(Event::SetTopK(11)).await, Outcome::Rejected(_)));
        assert_eq!(session.settings().top_k, 2);
        Ok(())
    }

    #[tokio::test]
    async fn blank_messages_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut session = start(FakeFactory::default(), &dir)?;

        let outcome = session.handle(Event::Submit("   ".to_string())).await;

        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(session.transcript().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn each_upload_overwrites_the_cached_copy() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let cache = dir.path().join("nested").join("kb.pdf");
        let first = dir.path().join("first.pdf");
        let second = dir.path().join("second.pdf");
        std::fs::write(&first, b"first")?;
        std::fs::write(&second, b"second")?;

        cache_upload(&first, &cache).await?;
        cache_upload(&second, &cache).await?;
        cache_upload(&cache, &cache).await?;

        assert_eq!(std::fs::read(&cache)?, b"second");
        Ok(())
    }
}
