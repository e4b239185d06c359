use crate::error::PipelineError;
use crate::models::{ChatMessage, SourceCitation};
use crate::retriever::Retriever;
use crate::store::StoreHit;
use crate::traits::ChatModel;
use std::sync::Arc;

/// Buffer of every completed exchange, replayed on each call.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    messages: Vec<ChatMessage>,
}

impl ConversationMemory {
    pub fn record(&mut self, input: &str, output: &str) {
        self.messages.push(ChatMessage::user(input));
        self.messages.push(ChatMessage::assistant(output));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

pub struct ChatPipeline {
    model: Arc<dyn ChatModel>,
    memory: ConversationMemory,
}

impl ChatPipeline {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            memory: ConversationMemory::default(),
        }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn reset_memory(&mut self) {
        self.memory.clear();
    }

    /// Memory is only extended when the model call succeeds.
    pub async fn predict(&mut self, system_prompt: &str, input: &str) -> Result<String, PipelineError> {
        let mut messages = Vec::with_capacity(self.memory.messages().len() + 2);
        if !system_prompt.trim().is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }
        messages.extend_from_slice(self.memory.messages());
        messages.push(ChatMessage::user(input));

        let answer = self.model.complete(&messages).await?;
        self.memory.record(input, &answer);
        Ok(answer)
    }
}

#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub answer: String,
    pub citations: Vec<SourceCitation>,
}

pub struct RagPipeline {
    model: Arc<dyn ChatModel>,
    retriever: Retriever,
}

impl RagPipeline {
    pub fn new(model: Arc<dyn ChatModel>, retriever: Retriever) -> Self {
        Self { model, retriever }
    }

    /// Same index, different model.
    pub fn with_model(&self, model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            retriever: self.retriever.clone(),
        }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn retriever_mut(&mut self) -> &mut Retriever {
        &mut self.retriever
    }

    pub async fn answer(&self, system_prompt: &str, question: &str) -> Result<RagAnswer, PipelineError> {
        let hits = self.retriever.retrieve(question).await?;

        let mut messages = Vec::with_capacity(2);
        if !system_prompt.trim().is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }
        messages.push(ChatMessage::user(stuff_prompt(&hits, question)));

        let answer = self.model.complete(&messages).await?;
        let citations = hits
            .into_iter()
            .enumerate()
            .map(|(position, hit)| hit.into_citation(position + 1))
            .collect();

        Ok(RagAnswer { answer, citations })
    }
}

fn stuff_prompt(hits: &[StoreHit], question: &str) -> String {
    let context = hits
        .iter()
        .map(|hit| hit.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
         {context}\n\nQuestion: {question}\nHelpful Answer:"
    )
}
