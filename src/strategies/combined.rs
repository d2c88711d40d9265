use super::RawLocator;
use crate::document::TargetElement;
use crate::expr::{anywhere, attr_equals, class_predicate, literal, normalize_whitespace, nth, step};

const COMBINED: f64 = 0.95;

pub(super) fn derive(target: &TargetElement<'_>) -> Vec<RawLocator> {
    let classes = target.classes();
    if classes.is_empty() {
        return Vec::new();
    }

    let tag = target.tag();
    let class_pred = class_predicate(&classes);
    let mut locators = Vec::new();

    let text = target.text();
    if !text.is_empty() {
        let class_step = step(tag, &class_pred);
        locators.push(RawLocator::new(
            anywhere(&format!("{}[text()={}]", class_step, literal(&text))),
            COMBINED,
        ));
        let predicate = format!(
            "{} and normalize-space()={}",
            class_pred,
            literal(&normalize_whitespace(&text))
        );
        locators.push(RawLocator::new(anywhere(&step(tag, &predicate)), COMBINED));
    }

    if let Some(id) = target.attribute("id") {
        let predicate = format!("{} and {}", attr_equals("id", id), class_pred);
        let position = target
            .document_position(|element| {
                element.raw_attribute("id") == Some(id) && element.class_attribute_contains_all(&classes)
            })
            .map_or(1, |(position, _)| position);
        locators.push(RawLocator::new(nth(&anywhere(&step(tag, &predicate)), position), COMBINED));
    }

    if let Some(parent) = target.parent() {
        let parent_classes = parent.classes();
        if !parent_classes.is_empty() {
            let path = format!(
                "{}//{}",
                step(parent.tag(), &class_predicate(&parent_classes)),
                step(tag, &class_pred)
            );
            locators.push(RawLocator::new(anywhere(&path), COMBINED));
        }
    }

    locators
}
