//! RDF term string helpers shared between the index builder and the query
//! front-end.
//!
//! Terms arrive as their textual surface forms: IRIs as `<...>`, literals as
//! `"value"` with an optional `@lang` or `^^<datatype>` suffix. Everything in
//! this module operates on those raw forms; no term is ever re-encoded here.

/// Check whether a term is an RDF literal (starts with a quote).
pub fn is_literal(word: &str) -> bool {
    word.starts_with('"')
}

/// Find the byte offset of the closing quote in a literal body (the text
/// after the opening quote), honoring backslash escapes. Returns `None` for
/// an unterminated literal, which can legitimately occur in prefix filters.
pub fn find_literal_end(body: &str) -> Option<usize> {
    let mut escaped = false;
    for (pos, b) in body.bytes().enumerate() {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            return Some(pos);
        }
    }
    None
}

/// The language tag of a literal, without the leading `@`, or `""` when the
/// literal carries none (or the word is not a literal at all).
pub fn language_of_literal(word: &str) -> &str {
    if !is_literal(word) {
        return "";
    }
    let body = &word[1..];
    let Some(end) = find_literal_end(body) else {
        return "";
    };
    let suffix = &body[end + 1..];
    match suffix.strip_prefix('@') {
        Some(lang) => lang,
        None => "",
    }
}

/// Canonical form of a language-tagged predicate: `@{lang}@{iri}`.
///
/// This shape is shared between the index builder and prefix expansion, so
/// that `@en@rdfs:label` in a query resolves to the same string the index
/// stores for English labels.
pub fn language_tagged_predicate(iri: &str, lang: &str) -> String {
    format!("@{lang}@{iri}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_classification() {
        assert!(is_literal("\"apple\""));
        assert!(is_literal("\"apple\"@en"));
        assert!(!is_literal("<http://example.org/a>"));
        assert!(!is_literal("plain"));
    }

    #[test]
    fn literal_end_honors_escapes() {
        // body of "a\"b"
        assert_eq!(find_literal_end("a\\\"b\""), Some(4));
        assert_eq!(find_literal_end("abc\""), Some(3));
        assert_eq!(find_literal_end("abc"), None);
    }

    #[test]
    fn language_extraction() {
        assert_eq!(language_of_literal("\"apple\"@en"), "en");
        assert_eq!(language_of_literal("\"apple\"@en-GB"), "en-GB");
        assert_eq!(language_of_literal("\"apple\""), "");
        assert_eq!(language_of_literal("\"1\"^^<http://www.w3.org/2001/XMLSchema#int>"), "");
        assert_eq!(language_of_literal("<http://example.org/a>"), "");
        // unterminated literal from a prefix filter
        assert_eq!(language_of_literal("\"app"), "");
    }

    #[test]
    fn language_tagged_predicate_shape() {
        assert_eq!(
            language_tagged_predicate("<http://www.w3.org/2000/01/rdf-schema#label>", "en"),
            "@en@<http://www.w3.org/2000/01/rdf-schema#label>"
        );
    }
}
