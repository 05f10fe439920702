pub mod context;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod sections;
pub mod sentence;
pub mod topics;

// Re-export the engine surface for convenient access
pub use context::{
    search_keywords, search_pattern, MatchSpan, WindowConfig, WordIndex,
    DEFAULT_KEYWORD_WINDOW, DEFAULT_MIN_SNIPPET_WORDS, DEFAULT_PATTERN_WINDOW, SNIPPET_DELIMITER,
};
pub use error::{CarveError, Result};
pub use normalize::normalize;
pub use sections::{
    extract_section, extract_section_with_min, SectionKind, DEFAULT_MIN_SECTION_CHARS,
};
pub use sentence::{context_window, SentenceSplitter, DEFAULT_CONTEXT_SENTENCES};
pub use topics::{
    extract_topic, extract_topic_with_context, extract_topic_with_keywords, TopicKind, TopicMatch,
    AI_TOPIC_KEYWORDS,
};
