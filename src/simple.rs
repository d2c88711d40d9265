//! Plain `#id` / `.class` CSS selectors.
//!
//! These come straight from attributes that are present on the element, so
//! they are not run through the validator.

use crate::document::TargetElement;
use crate::i18n;
use crate::models::{Locale, LocatorCandidate, LocatorKind, SimpleKind, ValidatedResult};

const ID: f64 = 1.0;
const CLASS: f64 = 0.8;
const MULTI_CLASS: f64 = 0.9;

pub fn derive(target: &TargetElement<'_>, kind: SimpleKind, locale: Locale) -> Vec<ValidatedResult> {
    match kind {
        SimpleKind::Id => target
            .attribute("id")
            .map(|id| {
                LocatorCandidate::new(
                    format!("#{}", css_identifier(id)),
                    LocatorKind::Id,
                    i18n::id_description(locale),
                    ID,
                )
                .trusted()
            })
            .into_iter()
            .collect(),
        SimpleKind::Class => {
            let classes: Vec<String> = target.classes().into_iter().map(css_identifier).collect();
            let mut results: Vec<ValidatedResult> = classes
                .iter()
                .map(|class| {
                    LocatorCandidate::new(
                        format!(".{}", class),
                        LocatorKind::Class,
                        i18n::class_description(locale),
                        CLASS,
                    )
                    .trusted()
                })
                .collect();
            if classes.len() > 1 {
                results.push(
                    LocatorCandidate::new(
                        format!(".{}", classes.join(".")),
                        LocatorKind::Class,
                        i18n::multi_class_description(locale),
                        MULTI_CLASS,
                    )
                    .trusted(),
                );
            }
            results
        }
    }
}

/// Escape `value` for use as a CSS identifier (CSSOM "serialize an identifier").
pub fn css_identifier(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let chars: Vec<char> = value.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        let leading_digit = c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        if c == '\0' {
            out.push('\u{FFFD}');
        } else if c.is_control() || leading_digit {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if i == 0 && c == '-' && chars.len() == 1 {
            out.push_str("\\-");
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}
