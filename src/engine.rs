use crate::aggregator::aggregate;
use crate::document::Fragment;
use crate::errors::LocatorError;
use crate::i18n;
use crate::models::{
    GeneratorConfig, Locale, LocatorCandidate, LocatorKind, ResultSet, SelectorFamily, SimpleKind, Strategy,
};
use crate::simple;
use crate::validator::{self, XPathIndex};
use log::{debug, info, warn};

/// Entry point for locator generation: one fragment in, one ranked
/// [`ResultSet`] out.
#[derive(Debug, Clone, Default)]
pub struct LocatorEngine {
    config: GeneratorConfig,
}

impl LocatorEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, html: &str, family: SelectorFamily) -> Result<ResultSet, LocatorError> {
        match family {
            SelectorFamily::Xpath => self.xpath_locators(html),
            SelectorFamily::ById => self.simple_locators(html, SimpleKind::Id),
            SelectorFamily::ByClass => self.simple_locators(html, SimpleKind::Class),
        }
    }

    /// Run every strategy, keep the candidates that resolve, rank them.
    ///
    /// An empty set means the element was found but nothing about it could be
    /// turned into a working locator.
    pub fn xpath_locators(&self, html: &str) -> Result<ResultSet, LocatorError> {
        let fragment = self.parse(html)?;
        let target = fragment.target();
        let locale = self.config.locale;

        let candidates: Vec<LocatorCandidate> = Strategy::ALL
            .iter()
            .flat_map(|strategy| {
                let raw = strategy.derive(&target);
                debug!("{} strategy produced {} candidates", strategy, raw.len());
                raw.into_iter().map(move |raw| {
                    LocatorCandidate::new(
                        raw.expression,
                        LocatorKind::Xpath(*strategy),
                        i18n::strategy_description(*strategy, locale),
                        raw.reliability,
                    )
                })
            })
            .collect();
        let generated = candidates.len();

        let index = XPathIndex::build(&fragment);
        let validated = validator::validate(candidates, &index);
        info!(
            "Generated {} XPath candidates for <{}>, {} resolved",
            generated,
            target.tag(),
            validated.len()
        );

        let results = self.finish(aggregate(validated));
        if results.is_empty() {
            warn!("No viable locator for <{}>", target.tag());
        }
        Ok(results)
    }

    /// `#id` or `.class` selectors taken directly from the element.
    pub fn simple_locators(&self, html: &str, kind: SimpleKind) -> Result<ResultSet, LocatorError> {
        let fragment = self.parse(html)?;
        let results = simple::derive(&fragment.target(), kind, self.config.locale);
        info!("Generated {} {:?} selectors", results.len(), kind);
        Ok(self.finish(aggregate(results)))
    }

    fn parse(&self, html: &str) -> Result<Fragment, LocatorError> {
        match &self.config.target {
            Some(selector) => Fragment::parse_targeting(html, selector),
            None => Fragment::parse(html),
        }
    }

    fn finish(&self, mut results: ResultSet) -> ResultSet {
        results.truncate(self.config.min_reliability, self.config.max_results);
        results
    }
}

pub fn generate_xpath_locators(html: &str, locale: Locale) -> Result<ResultSet, LocatorError> {
    LocatorEngine::new(GeneratorConfig {
        locale,
        ..Default::default()
    })
    .xpath_locators(html)
}

pub fn generate_simple_locators(html: &str, kind: SimpleKind) -> Result<ResultSet, LocatorError> {
    LocatorEngine::default().simple_locators(html, kind)
}
