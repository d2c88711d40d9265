use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derivation strategy that produced an XPath candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Attribute,
    TextBased,
    Contains,
    Axes,
    Logical,
    Combined,
}

impl Strategy {
    /// Every strategy, in the order the engine runs them.
    pub const ALL: [Strategy; 6] = [
        Strategy::Attribute,
        Strategy::TextBased,
        Strategy::Contains,
        Strategy::Axes,
        Strategy::Logical,
        Strategy::Combined,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Attribute => "attribute",
            Strategy::TextBased => "text-based",
            Strategy::Contains => "contains",
            Strategy::Axes => "axes",
            Strategy::Logical => "logical",
            Strategy::Combined => "combined",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of locator a candidate is: an XPath from one of the strategies,
/// or one of the plain CSS selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "strategy", rename_all = "lowercase")]
pub enum LocatorKind {
    Xpath(Strategy),
    Id,
    Class,
}

impl LocatorKind {
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            LocatorKind::Xpath(strategy) => Some(*strategy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocatorKind::Xpath(strategy) => strategy.name(),
            LocatorKind::Id => "id",
            LocatorKind::Class => "class",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::Pt),
            other => Err(format!("unsupported locale '{}' (expected en or pt)", other)),
        }
    }
}

/// Which family of locators to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorFamily {
    #[default]
    Xpath,
    ById,
    ByClass,
}

impl FromStr for SelectorFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "xpath" => Ok(SelectorFamily::Xpath),
            "by-id" | "byId" | "id" => Ok(SelectorFamily::ById),
            "by-class" | "byClass" | "class" => Ok(SelectorFamily::ByClass),
            other => Err(format!(
                "unsupported selector family '{}' (expected xpath, by-id or by-class)",
                other
            )),
        }
    }
}

/// The two plain CSS selector families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKind {
    Id,
    Class,
}

/// A generated locator before it has been checked against the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorCandidate {
    pub locator: String,
    #[serde(flatten)]
    pub kind: LocatorKind,
    pub description: String,
    pub reliability: f64,
}

impl LocatorCandidate {
    pub fn new(locator: impl Into<String>, kind: LocatorKind, description: impl Into<String>, reliability: f64) -> Self {
        Self {
            locator: locator.into(),
            kind,
            description: description.into(),
            reliability: reliability.clamp(0.0, 1.0),
        }
    }

    /// Accept the candidate after it resolved to `matches` nodes.
    pub fn validated(self, matches: usize) -> ValidatedResult {
        ValidatedResult {
            candidate: self,
            matches: Some(matches),
        }
    }

    /// Accept the candidate without evaluating it.
    pub fn trusted(self) -> ValidatedResult {
        ValidatedResult {
            candidate: self,
            matches: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedResult {
    #[serde(flatten)]
    pub candidate: LocatorCandidate,
    /// Number of nodes the locator resolved to; absent when it was not evaluated.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub matches: Option<usize>,
}

impl ValidatedResult {
    pub fn locator(&self) -> &str {
        &self.candidate.locator
    }

    pub fn kind(&self) -> LocatorKind {
        self.candidate.kind
    }

    pub fn description(&self) -> &str {
        &self.candidate.description
    }

    pub fn reliability(&self) -> f64 {
        self.candidate.reliability
    }

    /// True when the locator is known to point at exactly one node.
    pub fn is_unique(&self) -> bool {
        self.matches == Some(1)
    }
}

/// Ranked locators: non-increasing reliability, one entry per locator string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<ValidatedResult>,
}

impl ResultSet {
    pub(crate) fn from_ranked(results: Vec<ValidatedResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidatedResult> {
        self.results.iter()
    }

    pub fn first(&self) -> Option<&ValidatedResult> {
        self.results.first()
    }

    pub fn locators(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.locator()).collect()
    }

    pub fn get(&self, locator: &str) -> Option<&ValidatedResult> {
        self.results.iter().find(|r| r.locator() == locator)
    }

    pub fn into_vec(self) -> Vec<ValidatedResult> {
        self.results
    }

    /// Drop everything below `min` and keep at most `limit` entries.
    pub fn truncate(&mut self, min: f64, limit: Option<usize>) {
        self.results.retain(|r| r.reliability() >= min);
        if let Some(limit) = limit {
            self.results.truncate(limit);
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ValidatedResult;
    type IntoIter = std::slice::Iter<'a, ValidatedResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub locale: Locale,
    /// CSS selector picking the target inside the fragment. The first
    /// top-level element is used when unset.
    pub target: Option<String>,
    pub min_reliability: f64,
    pub max_results: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            target: None,
            min_reliability: 0.0,
            max_results: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_xpath_result_serializes_flat() {
        let result = LocatorCandidate::new(
            "//*[@id='main']",
            LocatorKind::Xpath(Strategy::Attribute),
            "Uses element attributes for precise location",
            0.95,
        )
        .validated(1);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "locator": "//*[@id='main']",
                "kind": "xpath",
                "strategy": "attribute",
                "description": "Uses element attributes for precise location",
                "reliability": 0.95,
                "matches": 1
            })
        );
    }

    #[test]
    fn test_simple_result_omits_strategy_and_matches() {
        let result = LocatorCandidate::new("#main", LocatorKind::Id, "Locates the element by its ID", 1.0).trusted();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "id");
        assert!(value.get("strategy").is_none());
        assert!(value.get("matches").is_none());
    }

    #[test]
    fn test_reliability_is_clamped() {
        let candidate = LocatorCandidate::new("//a", LocatorKind::Xpath(Strategy::Axes), "", 1.7);
        assert_eq!(candidate.reliability, 1.0);
    }

    #[test]
    fn test_parse_locale_and_family() {
        assert_eq!("pt".parse::<Locale>().unwrap(), Locale::Pt);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!("byClass".parse::<SelectorFamily>().unwrap(), SelectorFamily::ByClass);
        assert_eq!("by-id".parse::<SelectorFamily>().unwrap(), SelectorFamily::ById);
        assert!("css".parse::<SelectorFamily>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GeneratorConfig = serde_json::from_value(json!({"locale": "pt", "max_results": 5})).unwrap();
        assert_eq!(config.locale, Locale::Pt);
        assert_eq!(config.max_results, Some(5));
        assert_eq!(config.target, None);
        assert_eq!(config.min_reliability, 0.0);
    }
}
