//! Output parsing: the tag grammar and the completion classifier.
//!
//! The model's completion is classified by the number of
//! `<search_query>…</search_query>` pairs it contains: zero means the model
//! produced a final answer, one means it requested another search, and more
//! than one violates the single-query-per-turn contract and aborts the
//! request.
//!
//! Extraction is a strict scan rather than a lenient regex: the first close
//! tag after each open tag delimits the content (non-greedy), matching spans
//! newlines, and tags of other names — including ones that merely share a
//! prefix — never match.

use crate::scratchpad::format_docs;
use crate::{SEARCH_QUERY_TAG, STOP_SEQUENCE};
use agentwiki_core::error::{ParseError, TagError};
use agentwiki_core::step::{AgentFinish, AgentOutcome, Step};

/// Find the byte ranges of every non-overlapping `<tag>…</tag>` content
/// span in `text`, in order. A single space before `>` is tolerated in both
/// the open and close tag. An open tag without a matching close is ignored.
fn tag_content_spans(tag: &str, text: &str) -> Vec<(usize, usize)> {
    let opens = [format!("<{tag}>"), format!("<{tag} >")];
    let closes = [format!("</{tag}>"), format!("</{tag} >")];

    let find_first = |haystack: &str, needles: &[String]| -> Option<(usize, usize)> {
        needles
            .iter()
            .filter_map(|n| haystack.find(n.as_str()).map(|i| (i, n.len())))
            .min_by_key(|&(i, _)| i)
    };

    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some((open_at, open_len)) = find_first(&text[pos..], &opens) {
        let content_start = pos + open_at + open_len;
        let Some((close_at, close_len)) = find_first(&text[content_start..], &closes) else {
            break;
        };
        spans.push((content_start, content_start + close_at));
        pos = content_start + close_at + close_len;
    }
    spans
}

/// Extract the content of exactly one `<tag>…</tag>` occurrence.
///
/// Zero occurrences and duplicate occurrences are both typed, loud results —
/// the caller decides which (if either) is acceptable in its position. The
/// returned content is whitespace-trimmed.
pub fn extract_between_tags(tag: &str, text: &str) -> Result<String, TagError> {
    let spans = tag_content_spans(tag, text);
    match spans.as_slice() {
        [] => Err(TagError::NotFound),
        [(start, end)] => Ok(text[*start..*end].trim().to_string()),
        _ => Err(TagError::Duplicate),
    }
}

/// Classify one raw model completion into Continue or Finish.
///
/// A closing query tag is appended before scanning because generation stops
/// at (and swallows) the `</search_query>` marker, so a completion that
/// requested a search arrives truncated mid-tag.
pub fn parse_completion(completion: &str, steps: &[Step]) -> Result<AgentOutcome, ParseError> {
    let patched = format!("{completion}{STOP_SEQUENCE}");
    let spans = tag_content_spans(SEARCH_QUERY_TAG, &patched);

    match spans.as_slice() {
        [] => Ok(AgentOutcome::Finish(reconstruct_finish(completion, steps))),
        [(start, end)] => Ok(AgentOutcome::Continue {
            query: patched[*start..*end].trim().to_string(),
            log: completion.to_string(),
        }),
        many => Err(ParseError::MalformedOutput { found: many.len() }),
    }
}

/// Build the Finish outcome: the full history (every action log with its
/// formatted observation) followed by the final completion, plus every
/// passage observed across all steps as supporting evidence.
fn reconstruct_finish(completion: &str, steps: &[Step]) -> AgentFinish {
    let mut answer = String::new();
    let mut docs = Vec::new();
    for step in steps {
        answer.push_str(&step.action.log);
        answer.push_str(STOP_SEQUENCE);
        answer.push_str(&format_docs(&step.observation));
        docs.extend(step.observation.iter().cloned());
    }
    answer.push_str(completion);
    AgentFinish { answer, docs }
}
