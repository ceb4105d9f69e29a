//! The agentwiki agent: scratchpad formatting, output parsing, prompt
//! rendering, and the loop driver that ties them to a model and a retriever.
//!
//! The control flow for one question:
//!
//! ```text
//! question → driver → { prompt + scratchpad → model → parser
//!                        → (retriever, loop) | (final answer, stop) }
//! ```
//!
//! The model's output is constrained by the prompt to a small tag protocol:
//! a search request is `<search_query>…</search_query>` (the close tag is
//! also the stop sequence, so the driver sees the completion truncated right
//! before it), and the final user-facing answer is wrapped in
//! `<information>` tags.

pub mod driver;
pub mod parser;
pub mod prompt;
pub mod scratchpad;

pub use driver::RetrieverAgent;
pub use parser::{extract_between_tags, parse_completion};
pub use prompt::{ChatTurn, PromptTemplate};
pub use scratchpad::{format_docs, format_scratchpad};

/// Tag name the model uses to request a search.
pub const SEARCH_QUERY_TAG: &str = "search_query";

/// Stop sequence handed to the model client. Generation is truncated
/// immediately before its first occurrence.
pub const STOP_SEQUENCE: &str = "</search_query>";

/// Tag name wrapping the user-facing final answer.
pub const INFORMATION_TAG: &str = "information";
