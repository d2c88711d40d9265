use super::RawLocator;
use crate::document::TargetElement;
use crate::expr::{anywhere, contains, contains_ignore_case, ends_with, starts_with, step};

/// Attributes that get partial-match candidates.
pub const PARTIAL_MATCH_ATTRIBUTES: &[&str] = &[
    "class",
    "id",
    "name",
    "data-testid",
    "role",
    "title",
    "placeholder",
];

const SUBSTRING: f64 = 0.85;
const PREFIX: f64 = 0.85;
const IGNORE_CASE: f64 = 0.8;
const SUFFIX: f64 = 0.8;

pub(super) fn derive(target: &TargetElement<'_>) -> Vec<RawLocator> {
    let mut locators = Vec::new();

    for name in PARTIAL_MATCH_ATTRIBUTES {
        let Some(value) = target.attribute(name) else {
            continue;
        };
        let subject = format!("@{}", name);
        locators.push(RawLocator::new(anywhere(&step("*", &contains(&subject, value))), SUBSTRING));
        locators.push(RawLocator::new(
            anywhere(&step("*", &contains_ignore_case(&subject, value))),
            IGNORE_CASE,
        ));
        locators.push(RawLocator::new(anywhere(&step("*", &starts_with(&subject, value))), PREFIX));
        locators.push(RawLocator::new(anywhere(&step("*", &ends_with(&subject, value))), SUFFIX));
    }

    locators
}

#[cfg(test)]
mod tests {
    use crate::models::Strategy;
    use crate::strategies::expressions;

    #[test]
    fn test_partial_matches_for_id() {
        assert_eq!(
            expressions(Strategy::Contains, r#"<input id="email" type="text">"#),
            vec![
                "//*[contains(@id, 'email')]",
                "//*[contains(translate(@id, 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), 'email')]",
                "//*[starts-with(@id, 'email')]",
                "//*[substring(@id, string-length(@id) - 4) = 'email']",
            ]
        );
    }

    #[test]
    fn test_only_allowlisted_attributes() {
        let found = expressions(Strategy::Contains, r#"<a href="/x" title="Docs" data-cy="nav">Docs</a>"#);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|expr| expr.contains("@title")));
    }
}
