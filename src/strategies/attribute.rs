use super::RawLocator;
use crate::document::TargetElement;
use crate::expr::{anywhere, attr_equals, class_predicate, nth, step};

/// Attributes that usually exist to identify an element.
pub const SEMANTIC_ATTRIBUTES: &[&str] = &[
    "name",
    "data-testid",
    "data-id",
    "data-automation",
    "data-cy",
    "data-test",
    "role",
    "aria-label",
    "aria-labelledby",
    "aria-describedby",
];

const ID: f64 = 0.95;
const SEMANTIC: f64 = 0.9;
const CLASS: f64 = 0.85;
const POSITIONED: f64 = 0.8;

pub(super) fn derive(target: &TargetElement<'_>) -> Vec<RawLocator> {
    let tag = target.tag();
    let mut locators = Vec::new();

    if let Some(id) = target.attribute("id") {
        let predicate = attr_equals("id", id);
        locators.push(RawLocator::new(anywhere(&step("*", &predicate)), ID));
        locators.push(RawLocator::new(anywhere(&step(tag, &predicate)), ID));
    }

    let classes = target.classes();
    if !classes.is_empty() {
        class_locators(target, &classes[..1], &mut locators);
        if classes.len() > 1 {
            class_locators(target, &classes, &mut locators);
        }
    }

    for name in SEMANTIC_ATTRIBUTES {
        if let Some(value) = target.attribute(name) {
            let predicate = attr_equals(name, value);
            locators.push(RawLocator::new(anywhere(&step(tag, &predicate)), SEMANTIC));
            locators.push(RawLocator::new(anywhere(&step("*", &predicate)), SEMANTIC));
        }
    }

    locators
}

fn class_locators(target: &TargetElement<'_>, classes: &[&str], locators: &mut Vec<RawLocator>) {
    let predicate = class_predicate(classes);
    locators.push(RawLocator::new(anywhere(&step("*", &predicate)), CLASS));

    // Several same-tag elements share these classes: pin ours by position.
    if let Some((position, total)) =
        target.document_position(|element| element.class_attribute_contains_all(classes))
    {
        if total > 1 {
            let scoped = anywhere(&step(target.tag(), &predicate));
            locators.push(RawLocator::new(nth(&scoped, position), POSITIONED));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Strategy;
    use crate::strategies::expressions;

    #[test]
    fn test_id_only() {
        assert_eq!(
            expressions(Strategy::Attribute, r#"<div id="main"></div>"#),
            vec!["//*[@id='main']", "//div[@id='main']"]
        );
    }

    #[test]
    fn test_classes_and_semantic_attributes() {
        let html = r#"<button class="btn primary" data-testid="save" aria-label="Save file">Save</button>"#;
        assert_eq!(
            expressions(Strategy::Attribute, html),
            vec![
                "//*[contains(@class, 'btn')]",
                "//*[contains(@class, 'btn') and contains(@class, 'primary')]",
                "//button[@data-testid='save']",
                "//*[@data-testid='save']",
                "//button[@aria-label='Save file']",
                "//*[@aria-label='Save file']",
            ]
        );
    }

    #[test]
    fn test_shared_class_gets_position() {
        let html = r#"<li class="item">A</li><li class="item">B</li>"#;
        assert_eq!(
            expressions(Strategy::Attribute, html),
            vec!["//*[contains(@class, 'item')]", "(//li[contains(@class, 'item')])[1]"]
        );
    }

    #[test]
    fn test_no_attributes() {
        assert!(expressions(Strategy::Attribute, "<span>Hello</span>").is_empty());
    }
}
