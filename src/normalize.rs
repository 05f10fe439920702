// Text normalization for raw filing dumps: encoding artifacts, HTML entity
// residue, and whitespace noise are folded into a canonical form while
// paragraph structure (blank lines) is preserved.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of spaces/tabs collapse to a single space; line breaks stay intact.
static HORIZONTAL_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("horizontal whitespace pattern"));

/// Spaces/tabs hugging a newline are dropped on both sides.
static NEWLINE_TRIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*\n[ \t]*").expect("newline trim pattern"));

/// Three or more consecutive newlines (allowing interior whitespace) become
/// exactly one blank line. Runs of 2 are untouched, so a blank line never
/// disappears entirely.
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("blank run pattern"));

/// Bullet glyphs commonly left behind by HTML-to-text conversion.
const BULLET_GLYPHS: [char; 4] = ['\u{2022}', '\u{00B7}', '\u{2023}', '\u{2219}'];

/// Normalize raw filing text.
///
/// Total on any input and idempotent: `normalize(normalize(x)) ==
/// normalize(x)`. Applied transformations, in order: zero-width/NUL and
/// stray `---|` table-rule stripping, HTML entity decoding (named, decimal,
/// hex), NBSP to plain space, smart quotes and en/em dashes to ASCII,
/// bullet glyphs to `"- "`, horizontal whitespace collapse, trim around
/// newlines, and collapse of 3+ blank lines to exactly 2 newlines.
pub fn normalize(text: &str) -> String {
    let mut text = text.replace('\u{200B}', "").replace('\0', "");

    // Stray markdown-style table rules from HTML conversion. Removal can
    // splice a new occurrence together, so repeat until none remain.
    while text.contains("---|") {
        text = text.replace("---|", "");
    }

    let mut text = decode_entities(&text);

    text = text.replace('\u{00A0}', " ");
    text = text
        .replace(['\u{2019}', '\u{2018}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2013}', '\u{2014}'], "-");
    text = text.replace(BULLET_GLYPHS, "- ");

    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = NEWLINE_TRIM.replace_all(&text, "\n");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.into_owned()
}

/// Longest entity body we will consider between `&` and `;`.
const MAX_ENTITY_LEN: usize = 32;

/// Decode HTML entities in a single left-to-right pass. Unrecognized or
/// malformed entities are passed through verbatim.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail[1..]
            .find(';')
            .filter(|&semi| semi > 0 && semi <= MAX_ENTITY_LEN)
            .and_then(|semi| decode_entity(&tail[1..1 + semi]).map(|ch| (ch, semi)))
        {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 2..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one entity body (the text between `&` and `;`).
fn decode_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    named_entity(body)
}

/// Named entities that actually occur in filing text. The numeric forms
/// cover everything else.
fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "bull" => '\u{2022}',
        "middot" => '\u{00B7}',
        "hellip" => '\u{2026}',
        "sect" => '\u{00A7}',
        "para" => '\u{00B6}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "deg" => '\u{00B0}',
        "plusmn" => '\u{00B1}',
        "cent" => '\u{00A2}',
        "pound" => '\u{00A3}',
        "euro" => '\u{20AC}',
        "yen" => '\u{00A5}',
        "times" => '\u{00D7}',
        "divide" => '\u{00F7}',
        "frac12" => '\u{00BD}',
        "frac14" => '\u{00BC}',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_zero_width_and_nul() {
        assert_eq!(normalize("a\u{200B}b\0c"), "abc");
    }

    #[test]
    fn test_strips_table_rules() {
        assert_eq!(normalize("Revenue ---|---| up"), "Revenue up");
        // Removal that splices a new occurrence still terminates clean.
        assert_eq!(normalize("------||"), "");
    }

    #[test]
    fn test_decodes_named_entities() {
        assert_eq!(normalize("Johnson &amp; Johnson"), "Johnson & Johnson");
        assert_eq!(normalize("5 &lt; 10 &gt; 2"), "5 < 10 > 2");
        assert_eq!(normalize("&quot;quoted&quot;"), "\"quoted\"");
    }

    #[test]
    fn test_decodes_numeric_entities() {
        assert_eq!(normalize("&#65;&#66;&#67;"), "ABC");
        assert_eq!(normalize("&#x41;&#X42;"), "AB");
        // Smart quote arriving as an entity is decoded then ASCII-folded.
        assert_eq!(normalize("company&#8217;s"), "company's");
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        assert_eq!(normalize("&bogus; &;"), "&bogus; &;");
        assert_eq!(normalize("AT&T"), "AT&T");
    }

    #[test]
    fn test_nbsp_becomes_space() {
        assert_eq!(normalize("a\u{00A0}b"), "a b");
        assert_eq!(normalize("a&nbsp;b"), "a b");
    }

    #[test]
    fn test_smart_punctuation_folds_to_ascii() {
        assert_eq!(
            normalize("\u{201C}It\u{2019}s fine\u{201D} \u{2013} mostly \u{2014} ok"),
            "\"It's fine\" - mostly - ok"
        );
    }

    #[test]
    fn test_bullets_become_dashes() {
        assert_eq!(normalize("\u{2022}First\n\u{00B7}Second"), "- First\n- Second");
    }

    #[test]
    fn test_horizontal_whitespace_collapses() {
        assert_eq!(normalize("a  \t b"), "a b");
    }

    #[test]
    fn test_whitespace_trimmed_around_newlines() {
        assert_eq!(normalize("line one   \n\t  line two"), "line one\nline two");
    }

    #[test]
    fn test_blank_runs_collapse_to_exactly_two_newlines() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n \n \n \nb"), "a\n\nb");
        // A single blank line is preserved, never dropped to zero.
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "plain text",
            "a\u{200B}b\0c &amp; &#65; &bogus;",
            "\u{2022}Item one\n\n\n\n\u{2022}Item two",
            "  spaced \t out \n\n\n\n text \u{2019}quotes\u{2019} ",
            "Revenue ---| grew &nbsp; 10%\n \n \nnext\u{00A0}paragraph",
            "\u{201C}Q\u{201D} \u{2013} A\n\n\nB",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }
}
