use std::collections::HashSet;

use tracing::debug;

use super::window::MatchSpan;
use super::word_index::WordIndex;

/// Delimiter line separating merged snippets in joined keyword output.
pub const SNIPPET_DELIMITER: &str = "\n\n--- SNIPPET BREAK ---\n\n";

/// Reconstruct each merged span and join them with [`SNIPPET_DELIMITER`].
pub fn assemble_joined(index: &WordIndex<'_>, spans: &[MatchSpan]) -> String {
    spans
        .iter()
        .map(|span| index.slice(span.start, span.end))
        .collect::<Vec<_>>()
        .join(SNIPPET_DELIMITER)
}

/// Reconstruct merged spans as discrete snippets, applying the optional
/// dedupe set and the minimum-word filter.
///
/// A snippet already present in `seen` is skipped. New snippets are recorded
/// in `seen` before the length filter runs, so a short snippet still
/// suppresses an identical later occurrence; that matches how the
/// surrounding system has always used the set.
pub fn assemble_filtered(
    index: &WordIndex<'_>,
    spans: &[MatchSpan],
    min_words: usize,
    mut seen: Option<&mut HashSet<String>>,
) -> Vec<String> {
    let mut snippets = Vec::new();
    let mut dropped_short = 0usize;

    for span in spans {
        let snippet = index.slice(span.start, span.end);

        if let Some(seen) = seen.as_deref_mut() {
            if seen.contains(&snippet) {
                continue;
            }
            seen.insert(snippet.clone());
        }

        // Near-boundary fragments carry too little context to be useful.
        if span.len() < min_words {
            dropped_short += 1;
            continue;
        }

        snippets.push(snippet);
    }

    if dropped_short > 0 {
        debug!(dropped_short, "dropped snippets under the word minimum");
    }
    snippets
}
