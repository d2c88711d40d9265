use super::RawLocator;
use crate::document::{ElementRef, TargetElement};
use crate::expr::{anywhere, attr_equals, class_predicate, node_test, step};

const QUALIFIED: f64 = 0.8;
const STRUCTURAL: f64 = 0.7;

pub(super) fn derive(target: &TargetElement<'_>) -> Vec<RawLocator> {
    let tag = target.tag();
    let name = node_test(tag);
    let mut locators = Vec::new();

    if let Some(parent) = target.parent() {
        locators.push(RawLocator::new(
            anywhere(&format!("{}/{}", node_test(parent.tag()), name)),
            STRUCTURAL,
        ));
        if let Some(id) = parent.attribute("id") {
            let parent_step = step(parent.tag(), &attr_equals("id", id));
            locators.push(RawLocator::new(anywhere(&format!("{}/{}", parent_step, name)), QUALIFIED));
        }
        let parent_classes = parent.classes();
        if !parent_classes.is_empty() {
            let parent_step = step(parent.tag(), &class_predicate(&parent_classes));
            locators.push(RawLocator::new(anywhere(&format!("{}/{}", parent_step, name)), QUALIFIED));
        }
    }

    if target.previous_element_sibling().map_or(false, |sibling| sibling.tag() == tag) {
        let predicate = format!("preceding-sibling::*[1][self::{}]", name);
        locators.push(RawLocator::new(anywhere(&step(tag, &predicate)), STRUCTURAL));
    }
    if target.next_element_sibling().map_or(false, |sibling| sibling.tag() == tag) {
        let predicate = format!("following-sibling::*[1][self::{}]", name);
        locators.push(RawLocator::new(anywhere(&step(tag, &predicate)), STRUCTURAL));
    }

    // Walk up to the fragment root, anchoring on every ancestor that has a
    // handle and spelling out the child steps below it.
    let mut path = name;
    for ancestor in target.ancestors() {
        if let Some(anchor) = anchor_step(&ancestor) {
            locators.push(RawLocator::new(anywhere(&format!("{}/{}", anchor, path)), QUALIFIED));
        }
        path = format!("{}/{}", node_test(ancestor.tag()), path);
    }

    locators
}

fn anchor_step(element: &ElementRef<'_>) -> Option<String> {
    if let Some(id) = element.attribute("id") {
        return Some(step(element.tag(), &attr_equals("id", id)));
    }
    let classes = element.classes();
    if classes.is_empty() {
        None
    } else {
        Some(step(element.tag(), &class_predicate(&classes)))
    }
}
