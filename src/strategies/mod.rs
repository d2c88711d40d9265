//! Locator derivation strategies.
//!
//! Each strategy reads the target element and returns raw XPath expressions
//! with the reliability it assigns them. Strategies never see each other's
//! output and only get a read-only view of the element.

mod attribute;
mod axes;
mod combined;
mod contains;
mod logical;
mod text;

use crate::document::TargetElement;
use crate::models::Strategy;

pub use attribute::SEMANTIC_ATTRIBUTES;
pub use contains::PARTIAL_MATCH_ATTRIBUTES;

/// An expression as emitted by a strategy, before description and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLocator {
    pub expression: String,
    pub reliability: f64,
}

impl RawLocator {
    pub(crate) fn new(expression: impl Into<String>, reliability: f64) -> Self {
        Self {
            expression: expression.into(),
            reliability,
        }
    }
}

impl Strategy {
    pub fn derive(&self, target: &TargetElement<'_>) -> Vec<RawLocator> {
        match self {
            Strategy::Attribute => attribute::derive(target),
            Strategy::TextBased => text::derive(target),
            Strategy::Contains => contains::derive(target),
            Strategy::Axes => axes::derive(target),
            Strategy::Logical => logical::derive(target),
            Strategy::Combined => combined::derive(target),
        }
    }
}

#[cfg(test)]
pub(crate) fn expressions(strategy: Strategy, html: &str) -> Vec<String> {
    let fragment = crate::document::Fragment::parse(html).unwrap();
    strategy
        .derive(&fragment.target())
        .into_iter()
        .map(|raw| raw.expression)
        .collect()
}
