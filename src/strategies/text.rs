use super::RawLocator;
use crate::document::TargetElement;
use crate::expr::{anywhere, contains, contains_ignore_case, literal, normalize_whitespace, nth, step};

const EXACT: f64 = 0.9;
const NORMALIZED: f64 = 0.9;
const PARTIAL: f64 = 0.85;
const IGNORE_CASE: f64 = 0.85;
const POSITIONED: f64 = 0.85;

pub(super) fn derive(target: &TargetElement<'_>) -> Vec<RawLocator> {
    let text = target.text();
    if text.is_empty() {
        return Vec::new();
    }

    let tag = target.tag();
    let exact = format!("text()={}", literal(&text));
    let normalized = format!("normalize-space()={}", literal(&normalize_whitespace(&text)));

    let mut locators = vec![
        RawLocator::new(anywhere(&step(tag, &exact)), EXACT),
        RawLocator::new(anywhere(&step(tag, &contains("text()", &text))), PARTIAL),
        RawLocator::new(anywhere(&step(tag, &normalized)), NORMALIZED),
        RawLocator::new(anywhere(&step(tag, &contains_ignore_case(".", &text))), IGNORE_CASE),
    ];

    if let Some((position, total)) = target.document_position(|element| element.has_text_node(&text)) {
        if total > 1 {
            locators.push(RawLocator::new(nth(&anywhere(&step(tag, &exact)), position), POSITIONED));
        }
    }

    locators
}
