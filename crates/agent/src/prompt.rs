//! Prompt rendering.
//!
//! One fixed instruction template describes the tag protocol and the
//! retriever; the accumulated scratchpad is sent as an assistant prefill so
//! the model continues its own prior reasoning. The conversation-history
//! variant threads earlier turns in as alternating user/assistant messages
//! ahead of the instructions.

use agentwiki_core::message::Message;

const RETRIEVAL_PROMPT: &str = r#"You will be answering a question using passages retrieved by a search engine. Here is a description of the search engine:

<tool_description>
{retriever_description}
</tool_description>

To run a search, write the query between search query tags, like this:

<search_query>your query here</search_query>

The search results will be returned as a list of <item> blocks, each containing the text of one retrieved passage inside <page_content> tags. Issue exactly one query at a time, then read the results before deciding whether to search again. Use short keyword queries rather than full sentences, and search as many times as you need.

Once the retrieved passages contain enough information to answer, stop searching and write your final answer between information tags, like this:

<information>your answer here</information>

Base the answer only on facts supported by the retrieved passages. If the passages do not contain the answer, say so inside the information tags.

Here is the question:

<question>{question}</question>"#;

/// One prior (question, answer) exchange, for the history variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

impl ChatTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Builds the message sequence sent to the model.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    retriever_description: String,
}

impl PromptTemplate {
    /// Create a template with the retriever description baked in.
    pub fn new(retriever_description: impl Into<String>) -> Self {
        Self {
            retriever_description: retriever_description.into(),
        }
    }

    fn instructions(&self, question: &str) -> String {
        RETRIEVAL_PROMPT
            .replace("{retriever_description}", &self.retriever_description)
            .replace("{question}", question)
    }

    /// Render the prompt for one question: instructions as a user message,
    /// the scratchpad as an assistant prefill.
    pub fn render(&self, question: &str, scratchpad: &str) -> Vec<Message> {
        self.render_with_history(question, scratchpad, &[])
    }

    /// Render with prior conversation turns threaded in before the
    /// instructions.
    pub fn render_with_history(
        &self,
        question: &str,
        scratchpad: &str,
        history: &[ChatTurn],
    ) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() * 2 + 2);

        for turn in history {
            messages.push(Message::user(&turn.question));
            messages.push(Message::assistant(&turn.answer));
        }

        messages.push(Message::user(self.instructions(question)));

        // Anthropic rejects empty assistant messages, so the prefill is
        // only sent once there is scratchpad content.
        if !scratchpad.is_empty() {
            messages.push(Message::assistant(scratchpad));
        }

        messages
    }
}
