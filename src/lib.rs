//! Generate and rank XPath and CSS locators for a single HTML element.
//!
//! ```no_run
//! use locator_forge::{generate_xpath_locators, Locale};
//!
//! let results = generate_xpath_locators(r#"<button id="save">Save</button>"#, Locale::En)?;
//! for result in &results {
//!     println!("{:.2} {}", result.reliability(), result.locator());
//! }
//! # Ok::<(), locator_forge::LocatorError>(())
//! ```

pub mod aggregator;
pub mod document;
pub mod engine;
pub mod errors;
pub mod expr;
pub mod i18n;
pub mod models;
pub mod simple;
pub mod strategies;
pub mod validator;

pub use engine::{generate_simple_locators, generate_xpath_locators, LocatorEngine};
pub use errors::LocatorError;
pub use models::{
    GeneratorConfig, Locale, LocatorCandidate, LocatorKind, ResultSet, SelectorFamily, SimpleKind, Strategy,
    ValidatedResult,
};
pub use validator::{validate_selector, validate_xpath};
