// Contiguous numbered-section extraction. Each section is a pair of
// boundary markers: the section's own heading and the heading of the next
// logical item. The first span in document order whose cleaned text beats
// the length gate wins; shorter spans are table-of-contents echoes of the
// same heading text and are skipped.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Cleaned spans at or under this many characters are treated as TOC echoes
/// and skipped. Observed heuristic default; override through
/// [`extract_section_with_min`].
pub const DEFAULT_MIN_SECTION_CHARS: usize = 100;

/// The closed set of contiguous sections this engine knows how to extract.
/// Scattered topics (AI, R&D content) live in [`crate::topics`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Business,
    RiskFactors,
    Mda,
    FinancialStatements,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Business,
        SectionKind::RiskFactors,
        SectionKind::Mda,
        SectionKind::FinancialStatements,
    ];

    /// Registry name, also used as the wrapping tag.
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Business => "business",
            SectionKind::RiskFactors => "risk_factors",
            SectionKind::Mda => "mda",
            SectionKind::FinancialStatements => "financial_statements",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "business" => Ok(SectionKind::Business),
            "risk_factors" => Ok(SectionKind::RiskFactors),
            "mda" => Ok(SectionKind::Mda),
            "financial_statements" => Ok(SectionKind::FinancialStatements),
            other => Err(format!(
                "unknown section `{other}` (expected one of: business, risk_factors, mda, financial_statements)"
            )),
        }
    }
}

/// Boundary rule: where a section starts and where the next item begins.
struct SectionRule {
    start: Regex,
    end: Regex,
}

impl SectionRule {
    fn new(start: &str, end: &str) -> Self {
        Self {
            start: Regex::new(start).expect("section start marker"),
            end: Regex::new(end).expect("section end marker"),
        }
    }
}

/// Heading patterns follow 10-K item numbering. `[^\n]*` keeps each marker
/// on a single heading line; the captured span between markers may cross
/// lines freely.
static SECTION_RULES: Lazy<HashMap<SectionKind, SectionRule>> = Lazy::new(|| {
    HashMap::from([
        (
            SectionKind::Business,
            SectionRule::new(r"(?i)Item[^\n]*1\.[^\n]*Business", r"(?i)Item[^\n]*1A|Item[^\n]*2"),
        ),
        (
            SectionKind::RiskFactors,
            SectionRule::new(
                r"(?i)Item[^\n]*1A\.[^\n]*Risk\s*Factors",
                r"(?i)Item[^\n]*1B|Item[^\n]*2",
            ),
        ),
        (
            SectionKind::Mda,
            SectionRule::new(
                r"(?i)Item[^\n]*7\.[^\n]*Management's\s*Discussion",
                r"(?i)Item[^\n]*7A|Item[^\n]*8",
            ),
        ),
        (
            SectionKind::FinancialStatements,
            SectionRule::new(
                r"(?i)Item\s*8\.\s*Financial\s*Statements",
                r"(?i)\s*Item\s*9|\s*Item\s*7",
            ),
        ),
    ])
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace run pattern"));

/// Extract a contiguous section with the default length gate. Absence of
/// the section is a valid result, not an error.
pub fn extract_section(text: &str, kind: SectionKind) -> Option<String> {
    extract_section_with_min(text, kind, DEFAULT_MIN_SECTION_CHARS)
}

/// Extract a contiguous section, skipping candidate spans whose cleaned
/// text is `min_chars` characters or fewer.
///
/// A heading can appear several times (TOC entry, then the actual body);
/// candidates are examined in document order and the first one past the
/// gate is returned. A qualifying span that happens to start at a TOC line
/// is a known, accepted false-negative source.
pub fn extract_section_with_min(text: &str, kind: SectionKind, min_chars: usize) -> Option<String> {
    let rule = &SECTION_RULES[&kind];
    let mut from = 0;

    while let Some(start) = rule.start.find_at(text, from) {
        // The span runs up to, not including, the next item's heading. No
        // end marker after this point means no bounded span exists at all.
        let end = rule.end.find_at(text, start.end())?;

        let raw_span = &text[start.start()..end.start()];
        let cleaned = WHITESPACE_RUN.replace_all(raw_span, " ");
        let cleaned = cleaned.trim();

        if cleaned.chars().count() > min_chars {
            debug!(section = kind.name(), chars = cleaned.len(), "section extracted");
            let tag = kind.name();
            return Some(format!("<{tag}>\n{cleaned}\n</{tag}>"));
        }

        debug!(section = kind.name(), chars = cleaned.len(), "skipped short candidate span");
        from = end.start().max(start.start() + 1);
    }

    None
}
