//! End-to-end integration tests for the agentwiki assistant.
//!
//! These tests exercise the full pipeline from a user question to the
//! extracted answer: prompt rendering, scratchpad accumulation across
//! multiple searches, completion parsing, and final tag extraction —
//! against scripted model and retriever stubs.

use std::sync::{Arc, Mutex};

use agentwiki_agent::{ChatTurn, RetrieverAgent, STOP_SEQUENCE};
use agentwiki_core::error::{Error, ModelError, RetrieverError, TagError};
use agentwiki_core::message::Role;
use agentwiki_core::model::{GenerateRequest, Model};
use agentwiki_core::retriever::{Passage, Retriever};

// ── Mock Model ───────────────────────────────────────────────────────────

/// A mock model that returns scripted completions in sequence and records
/// every request it received.
#[derive(Debug)]
struct ScriptedModel {
    completions: Vec<String>,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    fn new(completions: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            completions: completions.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Model for ScriptedModel {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        let mut calls = self.calls.lock().unwrap();
        let completion = self
            .completions
            .get(calls.len())
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "ScriptedModel exhausted: call #{}, have {}",
                    calls.len() + 1,
                    self.completions.len()
                )
            });
        calls.push(request);
        Ok(completion)
    }
}

// ── Mock Retriever ───────────────────────────────────────────────────────

/// A mock retriever mapping known queries to passages.
struct CorpusRetriever {
    entries: Vec<(&'static str, Passage)>,
}

#[async_trait::async_trait]
impl Retriever for CorpusRetriever {
    fn name(&self) -> &str {
        "corpus"
    }

    fn description(&self) -> &str {
        "Searches a small in-memory encyclopedia."
    }

    async fn search(&self, query: &str) -> Result<Vec<Passage>, RetrieverError> {
        Ok(self
            .entries
            .iter()
            .filter(|(key, _)| query.contains(key))
            .map(|(_, passage)| passage.clone())
            .collect())
    }
}

fn spain_corpus() -> Arc<CorpusRetriever> {
    Arc::new(CorpusRetriever {
        entries: vec![
            (
                "capital of Spain",
                Passage::new("Madrid is the capital of Spain.", "Madrid"),
            ),
            (
                "population of Madrid",
                Passage::new("Madrid has a population of about 3.3 million.", "Madrid"),
            ),
        ],
    })
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn single_search_question() {
    let model = ScriptedModel::new(&[
        "Let me check.<search_query>capital of Spain",
        "The passage answers it.<information>Madrid</information>",
    ]);
    let agent = RetrieverAgent::new(model.clone(), spain_corpus(), "test-model", 0.0);

    let answer = agent.answer("What is the capital of Spain?").await.unwrap();
    assert_eq!(answer, "Madrid");
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn multi_search_accumulates_evidence() {
    let model = ScriptedModel::new(&[
        "<search_query>capital of Spain",
        "Now its size.<search_query>population of Madrid",
        "<information>Madrid, with about 3.3 million inhabitants</information>",
    ]);
    let agent = RetrieverAgent::new(model.clone(), spain_corpus(), "test-model", 0.0);

    let finish = agent
        .run("What is the capital of Spain and how many people live there?")
        .await
        .unwrap();

    // Both observations collected, in search order
    assert_eq!(finish.docs.len(), 2);
    assert!(finish.docs[0].content.contains("capital"));
    assert!(finish.docs[1].content.contains("3.3 million"));

    // The finish output replays the whole history
    assert!(finish.answer.contains("<search_query>capital of Spain</search_query>"));
    assert!(finish.answer.contains("<search_query>population of Madrid</search_query>"));
    assert!(finish.answer.ends_with("</information>"));
}

#[tokio::test]
async fn scratchpad_grows_across_iterations() {
    let model = ScriptedModel::new(&[
        "<search_query>capital of Spain",
        "<search_query>population of Madrid",
        "<information>done</information>",
    ]);
    let agent = RetrieverAgent::new(model.clone(), spain_corpus(), "test-model", 0.0);
    agent.run("q").await.unwrap();

    let calls = model.calls.lock().unwrap();
    assert_eq!(calls.len(), 3);

    // Every request carries the stop marker
    for call in calls.iter() {
        assert_eq!(call.stop, vec![STOP_SEQUENCE.to_string()]);
    }

    // First call has no prefill; later calls carry ever-longer scratchpads
    let prefill_len = |req: &GenerateRequest| {
        req.messages
            .iter()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.len())
            .unwrap_or(0)
    };
    assert_eq!(prefill_len(&calls[0]), 0);
    assert!(prefill_len(&calls[1]) > 0);
    assert!(prefill_len(&calls[2]) > prefill_len(&calls[1]));
}

#[tokio::test]
async fn conversation_history_threads_prior_turns() {
    let model = ScriptedModel::new(&[
        "<search_query>population of Madrid",
        "<information>About 3.3 million</information>",
    ]);
    let agent = RetrieverAgent::new(model.clone(), spain_corpus(), "test-model", 0.0);

    let history = vec![ChatTurn::new("What is the capital of Spain?", "Madrid")];
    let answer = agent
        .answer_with_history("How many people live there?", &history)
        .await
        .unwrap();
    assert_eq!(answer, "About 3.3 million");

    // Prior turns precede the instruction message in every request
    let calls = model.calls.lock().unwrap();
    for call in calls.iter() {
        assert_eq!(call.messages[0].content, "What is the capital of Spain?");
        assert_eq!(call.messages[0].role, Role::User);
        assert_eq!(call.messages[1].content, "Madrid");
        assert_eq!(call.messages[1].role, Role::Assistant);
        assert!(call.messages[2].content.contains("How many people live there?"));
    }
}

#[tokio::test]
async fn no_matching_passages_still_flows_through() {
    // The retriever returns an empty observation; the model concedes.
    let model = ScriptedModel::new(&[
        "<search_query>something obscure",
        "<information>The search results do not contain the answer.</information>",
    ]);
    let agent = RetrieverAgent::new(model.clone(), spain_corpus(), "test-model", 0.0);

    let finish = agent.run("q").await.unwrap();
    assert!(finish.docs.is_empty());
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn missing_answer_tag_surfaces_as_typed_error() {
    let model = ScriptedModel::new(&["no tags at all"]);
    let agent = RetrieverAgent::new(model, spain_corpus(), "test-model", 0.0);

    let err = agent.answer("q").await.unwrap_err();
    match err {
        Error::TagExtraction { tag, source } => {
            assert_eq!(tag, "information");
            assert_eq!(source, TagError::NotFound);
        }
        other => panic!("expected TagExtraction, got {other:?}"),
    }
}
