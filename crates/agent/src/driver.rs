//! The agent loop driver.
//!
//! A two-state machine: RUNNING while the model keeps requesting searches,
//! DONE once it emits a final answer. Each iteration renders the prompt with
//! the current scratchpad, asks the model for a completion (truncated at the
//! stop marker by the client), classifies it, and either executes the
//! requested search or returns the finish output.
//!
//! The driver is immutable after construction and holds no request state:
//! the step history is a local variable per call, so concurrent requests
//! share nothing but the read-only model and retriever handles. Model and
//! retriever failures are not caught here — they propagate unchanged to the
//! caller, as does malformed model output.

use crate::parser::{extract_between_tags, parse_completion};
use crate::prompt::{ChatTurn, PromptTemplate};
use crate::scratchpad::format_scratchpad;
use crate::{INFORMATION_TAG, STOP_SEQUENCE};
use agentwiki_core::error::Error;
use agentwiki_core::model::{GenerateRequest, Model};
use agentwiki_core::retriever::Retriever;
use agentwiki_core::step::{AgentAction, AgentFinish, AgentOutcome, Step};
use std::sync::Arc;
use tracing::{debug, info};

/// The retrieval agent: orchestrates model, parser, and retriever until a
/// final answer is produced.
pub struct RetrieverAgent {
    /// The language model client
    model: Arc<dyn Model>,

    /// The document retriever
    retriever: Arc<dyn Retriever>,

    /// Model identifier sent with each request
    model_id: String,

    /// Temperature setting
    temperature: f32,

    /// Maximum tokens per completion
    max_tokens: Option<u32>,

    /// Maximum loop iterations before a request is aborted
    max_iterations: u32,

    /// The prompt template, with the retriever description baked in
    prompt: PromptTemplate,
}

impl RetrieverAgent {
    /// Create a new agent.
    pub fn new(
        model: Arc<dyn Model>,
        retriever: Arc<dyn Retriever>,
        model_id: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let prompt = PromptTemplate::new(retriever.description());
        Self {
            model,
            retriever,
            model_id: model_id.into(),
            temperature,
            max_tokens: None,
            max_iterations: 10,
            prompt,
        }
    }

    /// Set the maximum tokens per completion.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set the maximum number of loop iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the loop for one question and return the raw finish output.
    pub async fn run(&self, question: &str) -> Result<AgentFinish, Error> {
        self.run_inner(question, &[]).await
    }

    /// Run the loop with prior conversation turns threaded into the prompt.
    pub async fn run_with_history(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<AgentFinish, Error> {
        self.run_inner(question, history).await
    }

    /// Run the loop and extract the user-facing answer from the
    /// `<information>` tag of the finish output.
    pub async fn answer(&self, question: &str) -> Result<String, Error> {
        let finish = self.run(question).await?;
        Self::extract_answer(&finish)
    }

    /// History-threading variant of [`answer`](Self::answer).
    pub async fn answer_with_history(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<String, Error> {
        let finish = self.run_with_history(question, history).await?;
        Self::extract_answer(&finish)
    }

    fn extract_answer(finish: &AgentFinish) -> Result<String, Error> {
        extract_between_tags(INFORMATION_TAG, &finish.answer).map_err(|source| {
            Error::TagExtraction {
                tag: INFORMATION_TAG.into(),
                source,
            }
        })
    }

    async fn run_inner(&self, question: &str, history: &[ChatTurn]) -> Result<AgentFinish, Error> {
        info!(model = %self.model_id, retriever = %self.retriever.name(), "Processing question");

        let mut steps: Vec<Step> = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!(iteration, steps = steps.len(), "Agent loop iteration");

            let scratchpad = format_scratchpad(&steps);
            let messages = self
                .prompt
                .render_with_history(question, &scratchpad, history);

            let request = GenerateRequest {
                model: self.model_id.clone(),
                messages,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                stop: vec![STOP_SEQUENCE.into()],
            };

            let completion = self.model.generate(request).await?;

            match parse_completion(&completion, &steps)? {
                AgentOutcome::Finish(finish) => {
                    info!(iterations = iteration, docs = finish.docs.len(), "Final answer produced");
                    return Ok(finish);
                }
                AgentOutcome::Continue { query, log } => {
                    debug!(%query, "Model requested a search");
                    let observation = self.retriever.search(&query).await?;
                    steps.push(Step::new(AgentAction { log, query }, observation));
                }
            }
        }

        Err(Error::LoopExceeded {
            iterations: self.max_iterations,
        })
    }
}
