//! Step and outcome domain types.
//!
//! These are the value objects the agent loop accumulates while processing
//! one question. A `Step` records one iteration: the action the model took
//! and the passages observed for it. Steps live only for the duration of a
//! single request — there is no cross-request persistence.

use crate::retriever::Passage;
use serde::{Deserialize, Serialize};

/// One search action requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAction {
    /// The raw model completion that requested this action. Retained
    /// verbatim so the scratchpad can reconstruct the model's own prior
    /// reasoning in the next prompt.
    pub log: String,

    /// The extracted (trimmed) search query.
    pub query: String,
}

/// One completed loop iteration: an action and what it observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// The action the model requested.
    pub action: AgentAction,

    /// Passages returned by the retriever for the action's query, in
    /// relevance order.
    pub observation: Vec<Passage>,
}

impl Step {
    pub fn new(action: AgentAction, observation: Vec<Passage>) -> Self {
        Self {
            action,
            observation,
        }
    }
}

/// The classification of one model completion by the output parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    /// The model requested another search; the loop proceeds.
    Continue {
        /// The next search query (whitespace-trimmed).
        query: String,
        /// The raw completion, kept as the action log.
        log: String,
    },

    /// The model produced a final answer; the loop terminates.
    Finish(AgentFinish),
}

/// The terminal result of one agent loop run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFinish {
    /// The full finish output: every prior action log with its formatted
    /// observation, followed by the final completion text.
    pub answer: String,

    /// All passages observed across all steps, in order — the supporting
    /// evidence for the answer.
    pub docs: Vec<Passage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_holds_action_and_observation() {
        let step = Step::new(
            AgentAction {
                log: "<search_query>capital of Spain".into(),
                query: "capital of Spain".into(),
            },
            vec![Passage::new("Madrid is the capital of Spain.", "Madrid")],
        );
        assert_eq!(step.action.query, "capital of Spain");
        assert_eq!(step.observation.len(), 1);
    }

    #[test]
    fn finish_serialization_roundtrip() {
        let finish = AgentFinish {
            answer: "<information>Madrid</information>".into(),
            docs: vec![],
        };
        let json = serde_json::to_string(&finish).unwrap();
        let back: AgentFinish = serde_json::from_str(&json).unwrap();
        assert_eq!(back, finish);
    }
}
