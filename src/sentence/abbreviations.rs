// Abbreviation handling for the sentence splitter. A period after one of
// these tokens is part of the token, not a sentence boundary.

/// One abbreviation entry. `needs_word_start` entries only match when the
/// character preceding the suffix is not a word character, so "Inc" does not
/// fire inside "Zinc".
#[derive(Debug, Clone, Copy)]
pub struct Abbreviation {
    pub suffix: &'static str,
    pub needs_word_start: bool,
}

/// The fixed suppression list. Knowingly incomplete: "No.", "vs.", "etc."
/// and decimal numbers are not guarded, which over-splits the occasional
/// sentence. The list is kept as-is rather than grown ad hoc.
pub const NON_BOUNDARY_ABBREVIATIONS: &[Abbreviation] = &[
    Abbreviation { suffix: "Mr", needs_word_start: false },
    Abbreviation { suffix: "Mrs", needs_word_start: false },
    Abbreviation { suffix: "Ms", needs_word_start: false },
    Abbreviation { suffix: "Dr", needs_word_start: false },
    Abbreviation { suffix: "U.S", needs_word_start: true },
    Abbreviation { suffix: "Inc", needs_word_start: true },
    Abbreviation { suffix: "Corp", needs_word_start: true },
    Abbreviation { suffix: "Ltd", needs_word_start: true },
];

/// Checks whether the text leading up to a period ends in an abbreviation
/// that suppresses the sentence boundary.
#[derive(Debug, Default)]
pub struct AbbreviationChecker;

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self
    }

    /// `before_period` is everything preceding the candidate `.` character.
    pub fn suppresses_boundary(&self, before_period: &str) -> bool {
        NON_BOUNDARY_ABBREVIATIONS.iter().any(|abbrev| {
            if !before_period.ends_with(abbrev.suffix) {
                return false;
            }
            if !abbrev.needs_word_start {
                return true;
            }
            let head = &before_period[..before_period.len() - abbrev.suffix.len()];
            head.chars().next_back().map_or(true, |c| !is_word_char(c))
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
