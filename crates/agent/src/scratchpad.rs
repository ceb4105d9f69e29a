//! Scratchpad formatting.
//!
//! The scratchpad renders the history of (action, observation) pairs from
//! prior loop iterations into text appended to the next prompt, giving the
//! model visible history of its own reasoning and the retrieved evidence.
//! Formatting is pure: same steps in, same string out.

use crate::STOP_SEQUENCE;
use agentwiki_core::retriever::Passage;
use agentwiki_core::step::Step;
use std::fmt::Write;

/// Format retrieved passages as indexed, tagged evidence blocks.
///
/// Each passage becomes
/// `<item index="i">\n<page_content>\n{content}\n</page_content>\n</item>`
/// with a 1-based index, joined by newlines.
pub fn format_docs(docs: &[Passage]) -> String {
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write!(
            out,
            "<item index=\"{}\">\n<page_content>\n{}\n</page_content>\n</item>",
            i + 1,
            doc.content
        )
        .expect("writing to a String cannot fail");
    }
    out
}

/// Render the step history into scratchpad text.
///
/// For each step: the action's raw log (which ends mid-`<search_query>`
/// because generation stopped at the marker), the closing query tag, then
/// the formatted observation. Empty input yields an empty string.
pub fn format_scratchpad(steps: &[Step]) -> String {
    let mut thoughts = String::new();
    for step in steps {
        thoughts.push_str(&step.action.log);
        thoughts.push_str(STOP_SEQUENCE);
        thoughts.push_str(&format_docs(&step.observation));
    }
    thoughts
}
