use std::collections::HashSet;

use carve::{
    normalize, search_keywords, search_pattern, CarveError, WindowConfig, SNIPPET_DELIMITER,
};

#[test]
fn test_adjacent_keyword_windows_merge_into_one_snippet() {
    let text = "AI is great. AI is also here.";
    let joined = search_keywords(text, &["AI"], WindowConfig::new(0, 2)).expect("search");
    // Windows [0,3) and [3,6) touch, so exactly one snippet comes back.
    assert!(!joined.contains(SNIPPET_DELIMITER));
    assert_eq!(joined, "AI is great. AI is also");
}

#[test]
fn test_distant_keyword_windows_stay_separate() {
    let text = "AI leads here. Filler words continue for a while longer. AI closes the text.";
    let joined = search_keywords(text, &["AI"], WindowConfig::new(0, 1)).expect("search");
    let snippets: Vec<&str> = joined.split(SNIPPET_DELIMITER).collect();
    assert_eq!(snippets.len(), 2);
    assert_eq!(snippets[0], "AI leads");
    assert_eq!(snippets[1], "AI closes");
}

#[test]
fn test_nearby_phrase_occurrences_merge() {
    let text = "alpha beta revenue growth gamma revenue growth delta epsilon zeta";
    let joined =
        search_keywords(text, &["revenue growth"], WindowConfig::new(2, 2)).expect("search");
    // Two occurrences three words apart produce overlapping windows; one
    // merged snippet, not two duplicated ones.
    assert!(!joined.contains(SNIPPET_DELIMITER));
    assert_eq!(joined, "alpha beta revenue growth gamma revenue growth delta");
}

#[test]
fn test_multiple_phrases_share_one_merge_pass() {
    let text = "margin pressure early on, then revenue growth late in the year";
    let joined = search_keywords(text, &["margin", "revenue"], WindowConfig::new(0, 0))
        .expect("search");
    let snippets: Vec<&str> = joined.split(SNIPPET_DELIMITER).collect();
    assert_eq!(snippets, vec!["margin", "revenue"]);
}

#[test]
fn test_keyword_search_no_match_and_empty_text() {
    assert_eq!(
        search_keywords("plain text", &["absent"], WindowConfig::new(5, 5)).expect("search"),
        ""
    );
    assert_eq!(
        search_keywords("", &["absent"], WindowConfig::new(5, 5)).expect("search"),
        ""
    );
}

#[test]
fn test_pattern_snippet_below_min_words_is_dropped() {
    // Match at the very end of the document with no post-window: the merged
    // snippet is three words, far below the 15-word minimum.
    let words: Vec<String> = (0..17).map(|i| format!("filler{i}")).collect();
    let text = format!("{} closing remark", words.join(" "));
    let snippets =
        search_pattern(&text, r"\bremark\b", WindowConfig::new(2, 0), 15, None).expect("search");
    assert!(snippets.is_empty());

    // The same search with a permissive minimum keeps the fragment.
    let snippets =
        search_pattern(&text, r"\bremark\b", WindowConfig::new(2, 0), 2, None).expect("search");
    assert_eq!(snippets, vec!["filler16 closing remark".to_string()]);
}

#[test]
fn test_pattern_search_returns_ordered_discrete_snippets() {
    let text = "one two alpha three four five six seven eight nine beta ten eleven";
    let snippets =
        search_pattern(text, r"\b(alpha|beta)\b", WindowConfig::new(1, 1), 1, None).expect("search");
    assert_eq!(
        snippets,
        vec!["two alpha three".to_string(), "nine beta ten".to_string()]
    );
}

#[test]
fn test_dedupe_set_spans_calls() {
    let doc_a = "prefix words here duplicated snippet body appears now suffix";
    let doc_b = "other lead-in text duplicated snippet body appears now trailing";
    let mut seen = HashSet::new();

    let first = search_pattern(
        doc_a,
        r"duplicated snippet",
        WindowConfig::new(0, 4),
        1,
        Some(&mut seen),
    )
    .expect("search");
    assert_eq!(first, vec!["duplicated snippet body appears now".to_string()]);

    // The identical merged snippet from a second document is suppressed by
    // the caller-owned set.
    let second = search_pattern(
        doc_b,
        r"duplicated snippet",
        WindowConfig::new(0, 4),
        1,
        Some(&mut seen),
    )
    .expect("search");
    assert!(second.is_empty());
    assert_eq!(seen.len(), 1);
}

#[test]
fn test_invalid_pattern_is_an_error_not_empty() {
    let err = search_pattern("text", "[unclosed", WindowConfig::new(1, 1), 1, None).unwrap_err();
    match err {
        CarveError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
    }
}

#[test]
fn test_case_insensitive_pattern_matching() {
    let text = "The Company reported RECORD revenue figures";
    let snippets =
        search_pattern(text, r"record revenue", WindowConfig::new(1, 2), 1, None).expect("search");
    assert_eq!(snippets, vec!["reported RECORD revenue figures".to_string()]);
}

#[test]
fn test_search_over_normalized_document() {
    let raw = "Research &amp; Development\u{00A0}expense   grew\n\n\n\nacross all programs";
    let text = normalize(raw);
    let snippets = search_pattern(
        &text,
        r"research & development",
        WindowConfig::new(0, 4),
        1,
        None,
    )
    .expect("search");
    assert_eq!(snippets, vec!["Research & Development expense grew".to_string()]);
}
