//! Sanitized, navigable view of an HTML fragment.
//!
//! Markup is parsed with kuchiki, stripped of anything executable, and then
//! copied into an arena of plain owned nodes. Arena indices follow document
//! order. Children are owned by their parent's `children` list; the `parent`
//! index is only used to walk upwards.

use crate::errors::LocatorError;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use kuchiki::traits::*;
use kuchiki::NodeRef;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

const BLOCKED_ELEMENTS: &[&str] = &[
    "script", "iframe", "object", "embed", "frame", "frameset", "noscript", "base",
];

const URI_ATTRIBUTES: &[&str] = &[
    "href", "src", "action", "formaction", "data", "poster", "background",
];

fn script_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:javascript:|vbscript:|data:text/html)").expect("URI pattern is valid")
    })
}

/// Parse `html` and strip executable content: blocked elements with their
/// subtrees, comments, `on*` handlers and script-bearing URIs.
pub fn sanitized_document(html: &str) -> NodeRef {
    let document = kuchiki::parse_html().one(html);
    remove_executable_content(&document);
    document
}

fn remove_executable_content(document: &NodeRef) {
    let doomed: Vec<NodeRef> = document
        .descendants()
        .filter(|node| {
            node.as_comment().is_some()
                || node.as_element().map_or(false, |element| {
                    BLOCKED_ELEMENTS.iter().any(|blocked| *blocked == &*element.name.local)
                })
        })
        .collect();
    for node in doomed {
        node.detach();
    }

    for node in document.descendants() {
        if let Some(element) = node.as_element() {
            let mut attributes = element.attributes.borrow_mut();
            attributes.map.retain(|name, attribute| {
                let keep = is_safe_attribute(&name.local, &attribute.value);
                if !keep {
                    debug!("Stripping attribute {} from <{}>", &*name.local, &*element.name.local);
                }
                keep
            });
        }
    }
}

// Every `on*` name goes, not only the known event handlers.
fn is_safe_attribute(name: &str, value: &str) -> bool {
    if name.to_ascii_lowercase().starts_with("on") {
        return false;
    }
    if URI_ATTRIBUTES.iter().any(|uri| *uri == name) {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .collect();
        return !script_uri_pattern().is_match(&compact);
    }
    true
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Child {
    Element(usize),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct ElementNode {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Child>,
    parent: Option<usize>,
}

/// A parsed, sanitized fragment with one element singled out as the target.
#[derive(Debug, Clone)]
pub struct Fragment {
    nodes: Vec<ElementNode>,
    top_level: Vec<Child>,
    target: usize,
}

impl Fragment {
    /// Parse `html`, targeting its first top-level element.
    pub fn parse(html: &str) -> Result<Self, LocatorError> {
        Self::build(html, None)
    }

    /// Parse `html`, targeting the first element matching the CSS `selector`.
    pub fn parse_targeting(html: &str, selector: &str) -> Result<Self, LocatorError> {
        Self::build(html, Some(selector))
    }

    fn build(html: &str, selector: Option<&str>) -> Result<Self, LocatorError> {
        if html.trim().is_empty() {
            return Err(LocatorError::EmptyInput);
        }

        let document = sanitized_document(html);
        let body = match document.select_first("body") {
            Ok(body) => body.as_node().clone(),
            Err(_) => document.clone(),
        };

        let mut builder = TreeBuilder {
            nodes: Vec::new(),
            sources: Vec::new(),
            order: SourceOrder::scan(html),
        };
        let top_level = builder.children_of(&body, None);
        if builder.nodes.is_empty() {
            return Err(LocatorError::NoElementFound);
        }

        // Pre-order arena: index 0 is the first top-level element.
        let target = match selector {
            None => 0,
            Some(css) => {
                let mut matches = body
                    .select(css)
                    .map_err(|()| LocatorError::InvalidSelector(css.to_string()))?;
                let found = matches.next().ok_or(LocatorError::NoElementFound)?;
                builder
                    .sources
                    .iter()
                    .position(|source| source == found.as_node())
                    .ok_or(LocatorError::NoElementFound)?
            }
        };

        debug!(
            "Parsed fragment: {} elements, target <{}>",
            builder.nodes.len(),
            builder.nodes[target].tag
        );

        Ok(Self {
            nodes: builder.nodes,
            top_level,
            target,
        })
    }

    pub fn target(&self) -> TargetElement<'_> {
        ElementRef {
            fragment: self,
            index: self.target,
        }
    }

    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn top_level(&self) -> &[Child] {
        &self.top_level
    }

    pub(crate) fn node(&self, index: usize) -> &ElementNode {
        &self.nodes[index]
    }

    fn siblings_of(&self, index: usize) -> &[Child] {
        match self.nodes[index].parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.top_level,
        }
    }
}

struct TreeBuilder {
    nodes: Vec<ElementNode>,
    sources: Vec<NodeRef>,
    order: SourceOrder,
}

impl TreeBuilder {
    fn children_of(&mut self, node: &NodeRef, parent: Option<usize>) -> Vec<Child> {
        let mut children = Vec::new();
        for child in node.children() {
            if let Some(element) = child.as_element() {
                let index = self.nodes.len();
                let tag = element.name.local.to_string();
                let mut attributes: Vec<(String, String)> = element
                    .attributes
                    .borrow()
                    .map
                    .iter()
                    .map(|(name, attribute)| (name.local.to_string(), attribute.value.clone()))
                    .collect();
                self.order.arrange(&tag, &mut attributes);
                self.nodes.push(ElementNode {
                    tag,
                    attributes,
                    children: Vec::new(),
                    parent,
                });
                self.sources.push(child.clone());

                let grandchildren = self.children_of(&child, Some(index));
                self.nodes[index].children = grandchildren;
                children.push(Child::Element(index));
            } else if let Some(text) = child.as_text() {
                // Runs split by a removed script or comment become one node again.
                let text = text.borrow();
                match children.last_mut() {
                    Some(Child::Text(previous)) => previous.push_str(&text),
                    _ => children.push(Child::Text(text.clone())),
                }
            }
        }
        children
    }
}

/// Start tags as written, with their attribute names in source order.
///
/// kuchiki keeps attributes in a map sorted by name, so the raw markup is
/// tokenized once more and each arena element takes the order of the first
/// unclaimed start tag with the same name that carries all its attributes.
/// Elements the parser invented match nothing and stay sorted by name.
struct SourceOrder {
    tags: Vec<(String, Vec<String>)>,
    next: usize,
}

impl SourceOrder {
    fn scan(html: &str) -> Self {
        let mut queue = BufferQueue::new();
        queue.push_back(StrTendril::from_slice(html));
        let mut tokenizer = Tokenizer::new(StartTags::default(), TokenizerOpts::default());
        let _ = tokenizer.feed(&mut queue);
        tokenizer.end();
        Self {
            tags: tokenizer.sink.0,
            next: 0,
        }
    }

    fn arrange(&mut self, tag: &str, attributes: &mut [(String, String)]) {
        let found = self.tags[self.next..].iter().position(|(name, written)| {
            name.eq_ignore_ascii_case(tag) && attributes.iter().all(|(attr, _)| written.contains(attr))
        });
        if let Some(offset) = found {
            let written = &self.tags[self.next + offset].1;
            attributes.sort_by_key(|(attr, _)| written.iter().position(|w| w == attr).unwrap_or(usize::MAX));
            self.next += offset + 1;
        }
    }
}

#[derive(Default)]
struct StartTags(Vec<(String, Vec<String>)>);

impl TokenSink for StartTags {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(Tag {
            kind: TagKind::StartTag,
            name,
            attrs,
            ..
        }) = token
        {
            let names = attrs.iter().map(|attr| attr.name.local.to_string()).collect();
            self.0.push((name.to_string(), names));
        }
        TokenSinkResult::Continue
    }
}

/// Read-only handle on one element of a [`Fragment`].
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    fragment: &'a Fragment,
    index: usize,
}

/// The element locators are generated for.
pub type TargetElement<'a> = ElementRef<'a>;

impl<'a> ElementRef<'a> {
    fn node(&self) -> &'a ElementNode {
        &self.fragment.nodes[self.index]
    }

    fn at(&self, index: usize) -> ElementRef<'a> {
        ElementRef {
            fragment: self.fragment,
            index,
        }
    }

    pub fn tag(&self) -> &'a str {
        &self.node().tag
    }

    /// Attributes in the order they were written.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.node()
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The attribute value exactly as written, even when blank.
    pub fn raw_attribute(&self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// The attribute value, or `None` when missing or blank.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.raw_attribute(name).filter(|value| !value.trim().is_empty())
    }

    /// Class list split the way HTML splits it: on ASCII whitespace only.
    pub fn classes(&self) -> Vec<&'a str> {
        self.raw_attribute("class")
            .map(|value| {
                value
                    .split(|c: char| c.is_ascii_whitespace())
                    .filter(|class| !class.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Substring test on the raw `class` value, the same check
    /// `contains(@class, ...)` performs.
    pub fn class_attribute_contains_all(&self, fragments: &[&str]) -> bool {
        match self.raw_attribute("class") {
            Some(value) => fragments.iter().all(|fragment| value.contains(fragment)),
            None => false,
        }
    }

    /// Descendant text, trimmed.
    pub fn text(&self) -> String {
        let mut text = String::new();
        collect_text(self.fragment, &self.node().children, &mut text);
        text.trim().to_string()
    }

    /// Whether one of the element's own text nodes equals `text`.
    pub fn has_text_node(&self, text: &str) -> bool {
        self.node()
            .children
            .iter()
            .any(|child| matches!(child, Child::Text(t) if t == text))
    }

    /// Enclosing element inside the fragment. Top-level elements have none.
    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.node().parent.map(|index| self.at(index))
    }

    /// Enclosing elements, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = ElementRef<'a>> {
        std::iter::successors(self.parent(), |element| element.parent())
    }

    pub fn previous_element_sibling(&self) -> Option<ElementRef<'a>> {
        let siblings = self.fragment.siblings_of(self.index);
        let own = self.position_in(siblings)?;
        siblings[..own].iter().rev().find_map(|child| self.element_of(child))
    }

    pub fn next_element_sibling(&self) -> Option<ElementRef<'a>> {
        let siblings = self.fragment.siblings_of(self.index);
        let own = self.position_in(siblings)?;
        siblings[own + 1..].iter().find_map(|child| self.element_of(child))
    }

    fn position_in(&self, siblings: &[Child]) -> Option<usize> {
        siblings
            .iter()
            .position(|child| *child == Child::Element(self.index))
    }

    fn element_of(&self, child: &Child) -> Option<ElementRef<'a>> {
        match child {
            Child::Element(index) => Some(self.at(*index)),
            Child::Text(_) => None,
        }
    }

    /// 1-based position of this element among same-tag elements satisfying
    /// `predicate`, in document order, together with the number of such
    /// elements. `None` if this element does not satisfy it.
    pub fn document_position<F>(&self, predicate: F) -> Option<(usize, usize)>
    where
        F: Fn(&ElementRef<'a>) -> bool,
    {
        let mut position = None;
        let mut total = 0;
        for index in 0..self.fragment.nodes.len() {
            let element = self.at(index);
            if element.tag() != self.tag() || !predicate(&element) {
                continue;
            }
            total += 1;
            if index == self.index {
                position = Some(total);
            }
        }
        position.map(|position| (position, total))
    }
}

fn collect_text(fragment: &Fragment, children: &[Child], out: &mut String) {
    for child in children {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Element(index) => collect_text(fragment, &fragment.nodes[*index].children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_top_level_element_is_target() {
        let fragment = Fragment::parse("  <!-- note --> <button id=\"save\" class=\"btn primary\">Save</button>  ").unwrap();
        let target = fragment.target();
        assert_eq!(target.tag(), "button");
        assert_eq!(target.attribute("id"), Some("save"));
        assert_eq!(target.classes(), vec!["btn", "primary"]);
        assert_eq!(target.text(), "Save");
        assert!(target.parent().is_none());
    }

    #[test]
    fn test_empty_and_elementless_input() {
        assert_eq!(Fragment::parse("").unwrap_err(), LocatorError::EmptyInput);
        assert_eq!(Fragment::parse("   \n ").unwrap_err(), LocatorError::EmptyInput);
        assert_eq!(Fragment::parse("just text").unwrap_err(), LocatorError::NoElementFound);
        assert_eq!(Fragment::parse("<script>alert(1)</script>").unwrap_err(), LocatorError::NoElementFound);
    }

    #[test]
    fn test_sanitizer_strips_executable_content() {
        let html = r#"<div id="box" onclick="steal()" onmouseover="x()"><a href="javascript:alert(1)" title="t">go</a><script>bad()</script><a href=" JaVa script:alert(1)">two</a><a href="/safe">ok</a></div>"#;
        let fragment = Fragment::parse(html).unwrap();
        let target = fragment.target();
        assert_eq!(target.attribute("id"), Some("box"));
        assert!(target.raw_attribute("onclick").is_none());
        assert!(target.raw_attribute("onmouseover").is_none());
        assert_eq!(fragment.element_count(), 4);
        assert_eq!(target.text(), "gotwook");

        let links: Vec<_> = (1..4).map(|i| target.at(i)).collect();
        assert!(links[0].raw_attribute("href").is_none());
        assert_eq!(links[0].attribute("title"), Some("t"));
        assert!(links[1].raw_attribute("href").is_none());
        assert_eq!(links[2].attribute("href"), Some("/safe"));
    }

    #[test]
    fn test_sanitizer_strips_other_script_schemes() {
        let html = r#"<div><a href="vbscript:msgbox(1)">a</a><img src="DATA:text/html;base64,PHNjcmlwdD4=" alt="b"><a href="data:image/png;base64,AAAA">c</a><form action=" vbscript:x"></form></div>"#;
        let fragment = Fragment::parse(html).unwrap();
        let target = fragment.target();
        let (vbscript, img, png, form) = (target.at(1), target.at(2), target.at(3), target.at(4));
        assert!(vbscript.raw_attribute("href").is_none());
        assert!(img.raw_attribute("src").is_none());
        assert_eq!(img.attribute("alt"), Some("b"));
        assert_eq!(png.attribute("href"), Some("data:image/png;base64,AAAA"));
        assert_eq!(form.tag(), "form");
        assert!(form.raw_attribute("action").is_none());
    }

    #[test]
    fn test_every_on_attribute_is_stripped() {
        let fragment = Fragment::parse(r#"<p one="1" OnLoad="x()" data-one="2">t</p>"#).unwrap();
        let target = fragment.target();
        assert!(target.raw_attribute("one").is_none());
        assert!(target.raw_attribute("onload").is_none());
        assert_eq!(target.attribute("data-one"), Some("2"));
    }

    #[test]
    fn test_removed_content_leaves_one_text_node() {
        let fragment =
            Fragment::parse(r#"<button class="go">Save<script>x()</script> now<!-- c -->!</button>"#).unwrap();
        let target = fragment.target();
        assert_eq!(fragment.element_count(), 1);
        assert!(target.has_text_node("Save now!"));
        assert_eq!(target.text(), "Save now!");
    }

    #[test]
    fn test_prefixed_tag_names_are_kept() {
        let fragment = Fragment::parse_targeting(r#"<o:p id="w"><span>x</span></o:p>"#, "span").unwrap();
        let parent = fragment.target().parent().unwrap();
        assert_eq!(parent.tag(), "o:p");
        assert_eq!(parent.attribute("id"), Some("w"));
    }

    #[test]
    fn test_attributes_keep_source_order() {
        let html = r#"<form><input type="email" name="login" placeholder="x"><input name="b" type="text" onfocus="y()" id="z"></form>"#;
        fn names(element: ElementRef<'_>) -> Vec<&str> {
            element.attributes().map(|(name, _)| name).collect()
        }
        let fragment = Fragment::parse_targeting(html, "input").unwrap();
        let first = fragment.target();
        assert_eq!(names(first), vec!["type", "name", "placeholder"]);
        assert_eq!(names(first.next_element_sibling().unwrap()), vec!["name", "type", "id"]);
    }

    #[test]
    fn test_classes_split_on_ascii_whitespace_only() {
        let fragment = Fragment::parse("<div class=\"a\u{a0}b\tc\n d\">x</div>").unwrap();
        assert_eq!(fragment.target().classes(), vec!["a\u{a0}b", "c", "d"]);
    }

    #[test]
    fn test_blank_attribute_is_absent() {
        let fragment = Fragment::parse(r#"<input name="  " type="text">"#).unwrap();
        let target = fragment.target();
        assert_eq!(target.raw_attribute("name"), Some("  "));
        assert_eq!(target.attribute("name"), None);
        assert_eq!(target.attribute("type"), Some("text"));
    }

    #[test]
    fn test_target_selector_and_navigation() {
        let html = r#"<ul id="menu"><li>Home</li> <li class="active">About</li> <li>Contact</li></ul>"#;
        let fragment = Fragment::parse_targeting(html, "li.active").unwrap();
        let target = fragment.target();
        assert_eq!(target.text(), "About");

        let parent = target.parent().unwrap();
        assert_eq!(parent.attribute("id"), Some("menu"));
        assert_eq!(target.ancestors().count(), 1);
        assert_eq!(target.previous_element_sibling().unwrap().text(), "Home");
        assert_eq!(target.next_element_sibling().unwrap().text(), "Contact");
        assert_eq!(target.document_position(|_| true), Some((2, 3)));
        assert_eq!(target.document_position(|el| el.attribute("class").is_some()), Some((1, 1)));
    }

    #[test]
    fn test_target_selector_errors() {
        let html = "<div><span>x</span></div>";
        assert_eq!(
            Fragment::parse_targeting(html, "p").unwrap_err(),
            LocatorError::NoElementFound
        );
        assert!(matches!(
            Fragment::parse_targeting(html, "span[").unwrap_err(),
            LocatorError::InvalidSelector(_)
        ));
    }
}
