use tracing::debug;

use super::word_index::WordIndex;

/// Half-open interval `[start, end)` in word-index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of words covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Pre/post context sizes, in words, around each match.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    pub pre_words: usize,
    pub post_words: usize,
}

impl WindowConfig {
    pub fn new(pre_words: usize, post_words: usize) -> Self {
        Self {
            pre_words,
            post_words,
        }
    }
}

/// Expand raw match byte offsets into word-space windows of
/// `[idx - pre, idx + post + 1)`, clamped to `[0, word_count)`.
pub fn locate_windows(
    index: &WordIndex<'_>,
    match_offsets: impl IntoIterator<Item = usize>,
    window: WindowConfig,
) -> Vec<MatchSpan> {
    let total = index.word_count();
    if total == 0 {
        return Vec::new();
    }
    match_offsets
        .into_iter()
        .map(|offset| {
            let word = index.word_at_offset(offset);
            MatchSpan::new(
                word.saturating_sub(window.pre_words),
                (word + window.post_words + 1).min(total),
            )
        })
        .collect()
}

/// Merge overlapping or touching spans into a minimal sorted disjoint set.
///
/// Sort by start, then sweep once keeping an open span; a span whose start
/// is `<=` the open span's end extends it, anything else closes it. The
/// result covers exactly the union of the inputs, and consecutive output
/// spans satisfy `prev.end < next.start`.
pub fn merge_spans(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    if spans.is_empty() {
        return spans;
    }
    spans.sort_by_key(|span| (span.start, span.end));

    let mut merged = Vec::with_capacity(spans.len());
    let mut open = spans[0];
    for span in spans.into_iter().skip(1) {
        if span.start <= open.end {
            open.end = open.end.max(span.end);
        } else {
            merged.push(open);
            open = span;
        }
    }
    merged.push(open);

    debug!(merged = merged.len(), "merged match windows");
    merged
}
