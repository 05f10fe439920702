// Scattered-topic extraction. Unlike the contiguous numbered sections,
// topic content is spread across a filing, so matching happens per sentence
// with a window of surrounding sentences attached to each hit.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{CarveError, Result};
use crate::sentence::{context_window, SentenceSplitter, DEFAULT_CONTEXT_SENTENCES};

/// The closed set of built-in scattered topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicKind {
    AiContent,
    RdContent,
}

impl TopicKind {
    pub const ALL: [TopicKind; 2] = [TopicKind::AiContent, TopicKind::RdContent];

    /// Registry name, also used as the wrapping tag.
    pub fn name(self) -> &'static str {
        match self {
            TopicKind::AiContent => "ai_content",
            TopicKind::RdContent => "rd_content",
        }
    }
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TopicKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "ai_content" => Ok(TopicKind::AiContent),
            "rd_content" => Ok(TopicKind::RdContent),
            other => Err(format!(
                "unknown topic `{other}` (expected one of: ai_content, rd_content)"
            )),
        }
    }
}

/// Keyword fragments for the AI topic. Each entry is a regex alternative;
/// short tokens carry word boundaries so "ai" does not fire inside "maintain".
pub const AI_TOPIC_KEYWORDS: &[&str] = &[
    r"artificial intelligence",
    r"machine learning",
    r"\bai\b",
    r"neural network",
    r"deep learning",
    r"generative ai",
    r"\bllm\b",
    r"large language model",
    r"computer vision",
    r"natural language processing",
    r"\bnlp\b",
];

/// R&D topic pattern: the spelled-out or abbreviated name, optionally
/// followed by a spending/activity noun.
const RD_TOPIC_PATTERN: &str = r"(?:Research\s+(?:&|and)\s+Development|R&D)\s*(?:costs|expenses|activities|initiatives|efforts|investments|spending|expenditures|programs|projects|operations|facilities|capabilities|strategy)?";

struct TopicRule {
    pattern: Regex,
}

static TOPIC_RULES: Lazy<HashMap<TopicKind, TopicRule>> = Lazy::new(|| {
    HashMap::from([
        (
            TopicKind::AiContent,
            TopicRule {
                pattern: compile_alternation(&AI_TOPIC_KEYWORDS.join("|"))
                    .expect("ai topic pattern"),
            },
        ),
        (
            TopicKind::RdContent,
            TopicRule {
                pattern: compile_alternation(RD_TOPIC_PATTERN).expect("rd topic pattern"),
            },
        ),
    ])
});

fn compile_alternation(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// One sentence-level topic hit.
#[derive(Debug, Clone)]
pub struct TopicMatch {
    /// The sentence that matched.
    pub sentence: String,
    /// The matched sentence with its surrounding sentences joined by spaces.
    pub context: String,
    /// Sentence position within the split document.
    pub position: usize,
}

/// Extract a built-in topic with the default context window.
pub fn extract_topic(text: &str, kind: TopicKind) -> Option<String> {
    extract_topic_with_context(text, kind, DEFAULT_CONTEXT_SENTENCES)
}

/// Extract a built-in topic with `context_sentences` sentences of context on
/// each side of every hit. Zero hits is `None`, never an error.
pub fn extract_topic_with_context(
    text: &str,
    kind: TopicKind,
    context_sentences: usize,
) -> Option<String> {
    let matches = topic_matches(text, kind, context_sentences);
    format_topic_section(&matches, kind.name())
}

/// Extract a caller-defined topic: `keywords` are regex alternatives joined
/// into one case-insensitive alternation, `tag` names the wrapping tag. An
/// alternative that fails to compile is a [`CarveError::InvalidPattern`].
pub fn extract_topic_with_keywords(
    text: &str,
    tag: &str,
    keywords: &[&str],
    context_sentences: usize,
) -> Result<Option<String>> {
    let pattern = keywords.join("|");
    let matcher = compile_alternation(&pattern).map_err(|source| CarveError::InvalidPattern {
        pattern,
        source,
    })?;
    let matches = match_sentences(text, &matcher, context_sentences);
    Ok(format_topic_section(&matches, tag))
}

/// Sentence-level hits for a built-in topic.
pub fn topic_matches(text: &str, kind: TopicKind, context_sentences: usize) -> Vec<TopicMatch> {
    match_sentences(text, &TOPIC_RULES[&kind].pattern, context_sentences)
}

fn match_sentences(text: &str, matcher: &Regex, context_sentences: usize) -> Vec<TopicMatch> {
    let splitter = SentenceSplitter::new();
    let sentences = splitter.split(text);

    let matches: Vec<TopicMatch> = sentences
        .iter()
        .enumerate()
        .filter(|(_, sentence)| matcher.is_match(sentence))
        .map(|(position, sentence)| TopicMatch {
            sentence: sentence.to_string(),
            context: context_window(&sentences, position, context_sentences),
            position,
        })
        .collect();

    debug!(hits = matches.len(), sentences = sentences.len(), "topic scan complete");
    matches
}

/// Format hits under a single wrapping tag. No hits means no section.
fn format_topic_section(matches: &[TopicMatch], tag: &str) -> Option<String> {
    if matches.is_empty() {
        return None;
    }
    let body = matches
        .iter()
        .map(|m| format!("Target Sentence: {}\nContext: {}\n", m.sentence, m.context))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("<{tag}>\n{body}\n</{tag}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "The company sells widgets worldwide. Our products embed machine learning models. \
        Competition remains intense. We invested in research and development programs this year. \
        Cash flow stayed strong.";

    #[test]
    fn test_ai_topic_matches_with_context() {
        let section = extract_topic(FIXTURE, TopicKind::AiContent).unwrap();
        assert!(section.starts_with("<ai_content>\n"));
        assert!(section.ends_with("\n</ai_content>"));
        assert!(section.contains("Target Sentence: Our products embed machine learning models."));
        // Context spans two sentences on each side of the hit.
        assert!(section.contains(
            "Context: The company sells widgets worldwide. Our products embed machine learning models. \
             Competition remains intense. We invested in research and development programs this year."
        ));
    }

    #[test]
    fn test_rd_topic_matches() {
        let section = extract_topic(FIXTURE, TopicKind::RdContent).unwrap();
        assert!(section.starts_with("<rd_content>\n"));
        assert!(section.contains("research and development programs"));
    }

    #[test]
    fn test_short_ai_token_respects_word_boundaries() {
        let text = "We maintain strict quality controls. Nothing else to report.";
        assert_eq!(extract_topic(text, TopicKind::AiContent), None);

        let text = "Our AI platform is growing quickly. Nothing else to report.";
        assert!(extract_topic(text, TopicKind::AiContent).is_some());
    }

    #[test]
    fn test_no_matches_returns_none() {
        assert_eq!(extract_topic("Plain text about farming.", TopicKind::AiContent), None);
        assert_eq!(extract_topic("", TopicKind::RdContent), None);
    }

    #[test]
    fn test_context_window_size_zero() {
        let section = extract_topic_with_context(FIXTURE, TopicKind::AiContent, 0).unwrap();
        assert!(section.contains("Context: Our products embed machine learning models.\n"));
    }

    #[test]
    fn test_custom_keywords() {
        let section = extract_topic_with_keywords(FIXTURE, "widget_content", &[r"\bwidgets\b"], 0)
            .unwrap()
            .unwrap();
        assert!(section.starts_with("<widget_content>\n"));
        assert!(section.contains("The company sells widgets worldwide."));
    }

    #[test]
    fn test_custom_keywords_invalid_pattern() {
        let err = extract_topic_with_keywords("text", "bad", &["(unclosed"], 0).unwrap_err();
        assert!(matches!(err, CarveError::InvalidPattern { .. }));
    }

    #[test]
    fn test_match_positions_are_sentence_indices() {
        let matches = topic_matches(FIXTURE, TopicKind::AiContent, 1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].position, 1);
    }
}
