// Character-offset to word-index mapping. A document of 10^5-10^6 words may
// take hundreds of offset lookups per search, so lookups are a binary
// predecessor search over a prefix-sum array rather than a scan.

/// Whitespace-tokenized view of a document with a parallel prefix-sum array
/// of starting byte offsets.
///
/// `offsets` has `words.len() + 1` entries, starts at 0, and is strictly
/// increasing. Offsets assume one separator byte between tokens, matching
/// text whose whitespace has been collapsed; on raw text with longer
/// whitespace runs the mapping drifts and windows become approximate.
#[derive(Debug)]
pub struct WordIndex<'a> {
    words: Vec<&'a str>,
    offsets: Vec<usize>,
}

impl<'a> WordIndex<'a> {
    /// Build the index in one O(n) pass.
    pub fn build(text: &'a str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut offsets = Vec::with_capacity(words.len() + 1);
        let mut running = 0usize;
        offsets.push(running);
        for word in &words {
            running += word.len() + 1;
            offsets.push(running);
        }
        Self { words, offsets }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Map a byte offset to the index of the word containing (or preceding)
    /// it: the rightmost prefix offset `<=` the given offset, clamped to
    /// `[0, word_count - 1]`. O(log word_count). Monotonic non-decreasing in
    /// the offset argument.
    pub fn word_at_offset(&self, offset: usize) -> usize {
        let idx = self.offsets.partition_point(|&o| o <= offset);
        idx.saturating_sub(1)
            .min(self.word_count().saturating_sub(1))
    }

    /// Rebuild the text of words `[start, end)` joined by single spaces.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.words[start..end].join(" ")
    }
}
