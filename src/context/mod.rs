// Context-window search: word indexing, window expansion, interval merging,
// and snippet assembly, orchestrated for literal phrases and regex patterns.

pub mod snippet;
pub mod window;
pub mod word_index;

pub use snippet::{assemble_filtered, assemble_joined, SNIPPET_DELIMITER};
pub use window::{locate_windows, merge_spans, MatchSpan, WindowConfig};
pub use word_index::WordIndex;

use std::collections::HashSet;

use regex::RegexBuilder;
use tracing::debug;

use crate::error::{CarveError, Result};

/// Default pre/post window, in words, for literal phrase search.
pub const DEFAULT_KEYWORD_WINDOW: usize = 1000;
/// Default pre/post window, in words, for pattern search.
pub const DEFAULT_PATTERN_WINDOW: usize = 500;
/// Merged pattern snippets under this many words are discarded.
pub const DEFAULT_MIN_SNIPPET_WORDS: usize = 15;

/// Find every occurrence of each literal phrase (case-insensitive, exact
/// substring) and return the merged context windows joined by
/// [`SNIPPET_DELIMITER`]. Zero matches yields an empty string.
///
/// Phrases are escaped before matching, so the only possible failure is a
/// phrase large enough to blow the compiled-pattern size limit.
pub fn search_keywords<S: AsRef<str>>(
    text: &str,
    phrases: &[S],
    window: WindowConfig,
) -> Result<String> {
    let mut matchers = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        let phrase = phrase.as_ref();
        matchers.push(compile_case_insensitive(&regex::escape(phrase), phrase)?);
    }

    let index = WordIndex::build(text);
    if index.is_empty() {
        return Ok(String::new());
    }

    let mut offsets = Vec::new();
    for matcher in &matchers {
        offsets.extend(matcher.find_iter(text).map(|m| m.start()));
    }
    debug!(matches = offsets.len(), phrases = phrases.len(), "keyword scan complete");

    let spans = merge_spans(locate_windows(&index, offsets, window));
    Ok(assemble_joined(&index, &spans))
}

/// Find every match of a single case-insensitive regex and return the merged
/// context windows as an ordered list of snippets. Merged snippets shorter
/// than `min_words` are dropped, and an optional caller-owned `seen` set
/// dedupes identical snippet text across calls.
///
/// An invalid pattern is an error even when the document is empty; it is
/// never folded into an empty result.
pub fn search_pattern(
    text: &str,
    pattern: &str,
    window: WindowConfig,
    min_words: usize,
    seen: Option<&mut HashSet<String>>,
) -> Result<Vec<String>> {
    let matcher = compile_case_insensitive(pattern, pattern)?;

    let index = WordIndex::build(text);
    if index.is_empty() {
        return Ok(Vec::new());
    }

    let offsets: Vec<usize> = matcher.find_iter(text).map(|m| m.start()).collect();
    if offsets.is_empty() {
        return Ok(Vec::new());
    }
    debug!(matches = offsets.len(), "pattern scan complete");

    let spans = merge_spans(locate_windows(&index, offsets, window));
    Ok(assemble_filtered(&index, &spans, min_words, seen))
}

fn compile_case_insensitive(pattern: &str, reported: &str) -> Result<regex::Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| CarveError::InvalidPattern {
            pattern: reported.to_string(),
            source,
        })
}
