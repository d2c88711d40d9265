//! XPath 1.0 expression builders shared by the strategies.
//!
//! Every strategy formats predicates through these helpers so that two
//! strategies describing the same locator produce byte-identical strings.

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Quote `value` as an XPath string literal. XPath 1.0 has no escapes, so a
/// value holding both quote kinds is spliced together with `concat()`.
pub fn literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{}'", part)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

pub fn attr_equals(name: &str, value: &str) -> String {
    format!("@{}={}", name, literal(value))
}

pub fn contains(subject: &str, value: &str) -> String {
    format!("contains({}, {})", subject, literal(value))
}

pub fn attr_contains(name: &str, value: &str) -> String {
    contains(&format!("@{}", name), value)
}

/// `contains(@class, ...)` for every class, joined with `and`.
pub fn class_predicate(classes: &[&str]) -> String {
    classes
        .iter()
        .map(|class| attr_contains("class", class))
        .collect::<Vec<_>>()
        .join(" and ")
}

/// ASCII case folding; XPath 1.0 has no `lower-case()`.
pub fn lowercase(subject: &str) -> String {
    format!("translate({}, '{}', '{}')", subject, UPPER, LOWER)
}

pub fn contains_ignore_case(subject: &str, value: &str) -> String {
    format!(
        "contains({}, {})",
        lowercase(subject),
        literal(&value.to_ascii_lowercase())
    )
}

pub fn starts_with(subject: &str, value: &str) -> String {
    format!("starts-with({}, {})", subject, literal(value))
}

/// Suffix test built from `substring`/`string-length`; `ends-with()` is
/// XPath 2.0 only.
pub fn ends_with(subject: &str, value: &str) -> String {
    let offset = value.chars().count().saturating_sub(1);
    format!(
        "substring({subject}, string-length({subject}) - {offset}) = {}",
        literal(value)
    )
}

/// Name test for an element. Tags that are not a bare XPath name (`o:p`
/// from Word markup, say) would be read as a namespace prefix, so they are
/// matched by `name()` instead.
pub fn node_test(tag: &str) -> String {
    if tag == "*" || is_plain_name(tag) {
        tag.to_string()
    } else {
        format!("*[name()={}]", literal(tag))
    }
}

pub fn step(tag: &str, predicate: &str) -> String {
    format!("{}[{}]", node_test(tag), predicate)
}

/// Anchor a relative path anywhere in the document.
pub fn anywhere(path: &str) -> String {
    format!("//{}", path)
}

/// Pick the `position`-th match (1-based, document order) of `expression`.
pub fn nth(expression: &str, position: usize) -> String {
    format!("({})[{}]", expression, position)
}

/// What `normalize-space()` yields: only space, tab, CR and LF count as
/// whitespace in XPath 1.0.
pub fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Names usable as a bare step or `@name` (no prefix, no odd characters).
pub fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_quoting() {
        assert_eq!(literal("main"), "'main'");
        assert_eq!(literal("it's"), "\"it's\"");
        assert_eq!(literal(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(literal(r#"it's "x""#), r#"concat('it', "'", 's "x"')"#);
    }

    #[test]
    fn test_predicates() {
        assert_eq!(attr_equals("data-testid", "submit"), "@data-testid='submit'");
        assert_eq!(
            class_predicate(&["btn", "primary"]),
            "contains(@class, 'btn') and contains(@class, 'primary')"
        );
        assert_eq!(
            contains_ignore_case("@title", "Hello"),
            "contains(translate(@title, 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), 'hello')"
        );
        assert_eq!(
            ends_with("@id", "main"),
            "substring(@id, string-length(@id) - 3) = 'main'"
        );
        assert_eq!(nth(&anywhere(&step("li", "@x='1'")), 2), "(//li[@x='1'])[2]");
    }

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("aria-label"));
        assert!(is_plain_name("data_x.y"));
        assert!(!is_plain_name("xml:lang"));
        assert!(!is_plain_name("1st"));
        assert!(!is_plain_name("@click"));
    }

    #[test]
    fn test_prefixed_tags_match_by_name() {
        assert_eq!(node_test("li"), "li");
        assert_eq!(node_test("*"), "*");
        assert_eq!(node_test("o:p"), "*[name()='o:p']");
        assert_eq!(step("o:p", "@id='w'"), "*[name()='o:p'][@id='w']");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace("a\u{a0}b  c"), "a\u{a0}b c");
    }
}
