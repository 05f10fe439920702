use thiserror::Error;

/// Errors surfaced by the extraction and search pipeline.
///
/// Absence of a section, topic, or match is never an error; those outcomes
/// are `None` or empty collections. The only failure the engine itself can
/// produce is a caller-supplied pattern that does not compile.
#[derive(Debug, Error)]
pub enum CarveError {
    /// A caller-supplied regular expression failed to compile.
    #[error("invalid search pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, CarveError>;
