//! Round-trip check: does a generated locator actually resolve in the fragment?
//!
//! XPath candidates are evaluated with sxd-xpath against an sxd-document copy
//! of the sanitized tree, wrapped in `<html><body>` the way a browser parse
//! would place it. CSS selectors are run through kuchiki's selector engine.

use crate::document::{sanitized_document, Child, Fragment};
use crate::errors::LocatorError;
use crate::models::{LocatorCandidate, ValidatedResult};
use log::debug;
use sxd_document::dom::{Document, Element};
use sxd_document::Package;
use sxd_xpath::{evaluate_xpath, Value};

/// Immutable XPath-queryable copy of one fragment.
pub struct XPathIndex {
    package: Package,
}

impl XPathIndex {
    pub fn build(fragment: &Fragment) -> Self {
        let package = Package::new();
        {
            let document = package.as_document();
            let html = document.create_element("html");
            let body = document.create_element("body");
            html.append_child(body);
            document.root().append_child(html);
            for child in fragment.top_level() {
                mirror(&document, body, fragment, child);
            }
        }
        Self { package }
    }

    /// Number of nodes `expression` selects. Expressions that fail to parse,
    /// fail to evaluate, or yield something other than a node-set are errors.
    pub fn count_matches(&self, expression: &str) -> Result<usize, LocatorError> {
        // sxd-xpath panics on a prefix it cannot resolve, and the mirror
        // declares no namespaces.
        if has_prefixed_name(expression) {
            return Err(LocatorError::InvalidExpression {
                expression: expression.to_string(),
                reason: "namespace prefixes are not supported".to_string(),
            });
        }
        let document = self.package.as_document();
        let value = evaluate_xpath(&document, expression);
        match value {
            Ok(Value::Nodeset(nodes)) => Ok(nodes.size()),
            Ok(_) => Err(LocatorError::InvalidExpression {
                expression: expression.to_string(),
                reason: "expression does not select nodes".to_string(),
            }),
            Err(e) => Err(LocatorError::InvalidExpression {
                expression: expression.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn resolves(&self, expression: &str) -> bool {
        matches!(self.count_matches(expression), Ok(n) if n > 0)
    }
}

/// Whether `expression` uses a `prefix:name` test outside string literals.
/// Axis separators (`::`) are not prefixes.
fn has_prefixed_name(expression: &str) -> bool {
    let chars: Vec<char> = expression.chars().collect();
    let mut quote = None;
    for (i, &c) in chars.iter().enumerate() {
        match quote {
            Some(open) => {
                if c == open {
                    quote = None;
                }
            }
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ':' => {
                let before = if i > 0 { chars.get(i - 1).copied() } else { None };
                let after = chars.get(i + 1).copied();
                if before == Some(':') || after == Some(':') {
                    continue;
                }
                let named_before = before.map_or(false, |b| b.is_alphanumeric() || matches!(b, '_' | '-' | '.'));
                let named_after = after.map_or(false, |a| a.is_alphabetic() || matches!(a, '_' | '*'));
                if named_before && named_after {
                    return true;
                }
            }
            None => {}
        }
    }
    false
}

fn mirror<'d>(document: &Document<'d>, parent: Element<'d>, fragment: &Fragment, child: &Child) {
    match child {
        Child::Text(text) => parent.append_child(document.create_text(text)),
        Child::Element(index) => {
            let node = fragment.node(*index);
            let element = document.create_element(node.tag.as_str());
            for (name, value) in &node.attributes {
                element.set_attribute_value(name.as_str(), value);
            }
            parent.append_child(element);
            for grandchild in &node.children {
                mirror(document, element, fragment, grandchild);
            }
        }
    }
}

/// Parse `html` afresh and check that `expression` selects at least one node.
/// Never fails: bad input or a bad expression is simply "no match".
pub fn validate_xpath(expression: &str, html: &str) -> bool {
    match Fragment::parse(html) {
        Ok(fragment) => XPathIndex::build(&fragment).resolves(expression),
        Err(e) => {
            debug!("Cannot validate {}: {}", expression, e);
            false
        }
    }
}

/// CSS counterpart of [`validate_xpath`].
pub fn validate_selector(selector: &str, html: &str) -> bool {
    let document = sanitized_document(html);
    match document.select(selector) {
        Ok(mut matches) => matches.next().is_some(),
        Err(()) => {
            debug!("Invalid CSS selector: {}", selector);
            false
        }
    }
}

/// Keep the candidates that resolve, recording how many nodes each selects.
/// Failures are dropped here and never reach the caller.
pub(crate) fn validate(candidates: Vec<LocatorCandidate>, index: &XPathIndex) -> Vec<ValidatedResult> {
    candidates
        .into_iter()
        .filter_map(|candidate| match index.count_matches(&candidate.locator) {
            Ok(0) => {
                debug!("Dropping {}: matches nothing", candidate.locator);
                None
            }
            Ok(matches) => Some(candidate.validated(matches)),
            Err(e) => {
                debug!("Dropping candidate: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocatorKind, Strategy};

    const HTML: &str = r#"<ul class="menu"><li id="a">One</li><li>Two</li></ul>"#;

    #[test]
    fn test_count_matches() {
        let fragment = Fragment::parse(HTML).unwrap();
        let index = XPathIndex::build(&fragment);
        assert_eq!(index.count_matches("//li").unwrap(), 2);
        assert_eq!(index.count_matches("//*[@id='a']").unwrap(), 1);
        assert_eq!(index.count_matches("//ul/li[text()='Two']").unwrap(), 1);
        assert_eq!(index.count_matches("(//li)[2]").unwrap(), 1);
        assert_eq!(index.count_matches("//li[preceding-sibling::*[1][self::li]]").unwrap(), 1);
        assert_eq!(index.count_matches("//table").unwrap(), 0);
    }

    #[test]
    fn test_faults_are_errors_not_panics() {
        let fragment = Fragment::parse(HTML).unwrap();
        let index = XPathIndex::build(&fragment);
        assert!(index.count_matches("//li[@id='a'").is_err());
        assert!(index.count_matches("count(//li)").is_err());
        assert!(!index.resolves("//*[@class='it's']"));
        assert!(index.count_matches("//o:p").is_err());
        assert!(index.count_matches("//li[@xml:lang='en']").is_err());
    }

    #[test]
    fn test_prefix_detection() {
        assert!(has_prefixed_name("//o:p[text()='x']"));
        assert!(has_prefixed_name("//svg:*"));
        assert!(!has_prefixed_name("//li[preceding-sibling::*[1][self::li]]"));
        assert!(!has_prefixed_name("//*[name()='o:p']"));
        assert!(!has_prefixed_name(r#"//a[@href="http://x"]"#));
        assert!(!has_prefixed_name(r#"//p[text()=concat('a:b', "'", 'c')]"#));
    }

    #[test]
    fn test_prefixed_elements_are_matched_by_name() {
        let fragment = Fragment::parse("<div><o:p>Hello</o:p></div>").unwrap();
        let index = XPathIndex::build(&fragment);
        assert_eq!(index.count_matches("//*[name()='o:p']").unwrap(), 1);
        assert_eq!(index.count_matches("//div/*[name()='o:p'][text()='Hello']").unwrap(), 1);
    }

    #[test]
    fn test_validate_against_raw_fragment() {
        assert!(validate_xpath("//*[@id='a']", HTML));
        assert!(!validate_xpath("//*[@id='b']", HTML));
        assert!(!validate_xpath("//*", ""));
        assert!(validate_selector("ul.menu > li#a", HTML));
        assert!(!validate_selector("#missing", HTML));
        assert!(!validate_selector("li[", HTML));
    }

    #[test]
    fn test_sanitized_content_is_not_matchable() {
        let html = r#"<div><script>x()</script><a onclick="y()">z</a></div>"#;
        assert!(!validate_xpath("//script", html));
        assert!(!validate_xpath("//a[@onclick]", html));
        assert!(validate_xpath("//div/a", html));
    }

    #[test]
    fn test_validate_drops_bad_candidates() {
        let fragment = Fragment::parse(HTML).unwrap();
        let index = XPathIndex::build(&fragment);
        let kind = LocatorKind::Xpath(Strategy::Attribute);
        let candidates = vec![
            LocatorCandidate::new("//li", kind, "", 0.5),
            LocatorCandidate::new("//li[", kind, "", 0.9),
            LocatorCandidate::new("//p", kind, "", 0.9),
        ];
        let validated = validate(candidates, &index);
        assert_eq!(validated.len(), 1);
        assert_eq!(validated[0].locator(), "//li");
        assert_eq!(validated[0].matches, Some(2));
    }
}
