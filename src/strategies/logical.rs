use super::RawLocator;
use crate::document::TargetElement;
use crate::expr::{anywhere, attr_equals, class_predicate, contains, is_plain_name, step};

const CONJUNCTION: f64 = 0.9;
const DISJUNCTION: f64 = 0.8;

pub(super) fn derive(target: &TargetElement<'_>) -> Vec<RawLocator> {
    let tag = target.tag();
    let mut locators = Vec::new();

    let predicates: Vec<String> = target
        .attributes()
        .filter(|(name, value)| !value.trim().is_empty() && is_plain_name(name))
        .map(|(name, value)| attr_equals(name, value))
        .collect();

    if predicates.len() >= 2 {
        let pair = &predicates[..2];
        locators.push(RawLocator::new(anywhere(&step(tag, &pair.join(" and "))), CONJUNCTION));
        locators.push(RawLocator::new(anywhere(&step(tag, &pair.join(" or "))), DISJUNCTION));
    }
    if predicates.len() >= 3 {
        let triple = &predicates[..3];
        locators.push(RawLocator::new(anywhere(&step(tag, &triple.join(" and "))), CONJUNCTION));
    }

    let text = target.text();
    if !text.is_empty() {
        let classes = target.classes();
        let attribute = if classes.is_empty() {
            predicates.first().cloned()
        } else {
            Some(class_predicate(&classes))
        };
        if let Some(attribute) = attribute {
            let text_predicate = contains("text()", &text);
            locators.push(RawLocator::new(
                anywhere(&step(tag, &format!("{} and {}", attribute, text_predicate))),
                CONJUNCTION,
            ));
            locators.push(RawLocator::new(
                anywhere(&step(tag, &format!("{} or {}", attribute, text_predicate))),
                DISJUNCTION,
            ));
        }
    }

    locators
}
