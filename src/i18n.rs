//! Human-readable strings for results and errors, in English and Portuguese.
//! Locale only picks the wording; it never changes what gets generated.

use crate::errors::LocatorError;
use crate::models::{Locale, LocatorKind, Strategy};

pub fn strategy_description(strategy: Strategy, locale: Locale) -> &'static str {
    match (locale, strategy) {
        (Locale::En, Strategy::Attribute) => "Uses element attributes for precise location",
        (Locale::En, Strategy::TextBased) => "Locates element by its text content",
        (Locale::En, Strategy::Contains) => "Uses partial matching for flexible selection",
        (Locale::En, Strategy::Axes) => "Navigates through document relationships",
        (Locale::En, Strategy::Logical) => "Combines conditions with AND/OR operators",
        (Locale::En, Strategy::Combined) => "Uses multiple strategies for robust selection",
        (Locale::Pt, Strategy::Attribute) => "Usa atributos do elemento para localização precisa",
        (Locale::Pt, Strategy::TextBased) => "Localiza o elemento pelo seu conteúdo de texto",
        (Locale::Pt, Strategy::Contains) => "Usa correspondência parcial para seleção flexível",
        (Locale::Pt, Strategy::Axes) => "Navega através das relações do documento",
        (Locale::Pt, Strategy::Logical) => "Combina condições com operadores E/OU",
        (Locale::Pt, Strategy::Combined) => "Usa múltiplas estratégias para seleção robusta",
    }
}

/// Short display name for a locator kind.
pub fn kind_label(kind: LocatorKind, locale: Locale) -> &'static str {
    match (locale, kind) {
        (Locale::En, LocatorKind::Xpath(Strategy::Attribute)) => "Attribute-based",
        (Locale::En, LocatorKind::Xpath(Strategy::TextBased)) => "Text-based",
        (Locale::En, LocatorKind::Xpath(Strategy::Contains)) => "Contains",
        (Locale::En, LocatorKind::Xpath(Strategy::Axes)) => "Axes-based",
        (Locale::En, LocatorKind::Xpath(Strategy::Logical)) => "Logical operators",
        (Locale::En, LocatorKind::Xpath(Strategy::Combined)) => "Combined",
        (Locale::En, LocatorKind::Id) => "ID",
        (Locale::En, LocatorKind::Class) => "Class",
        (Locale::Pt, LocatorKind::Xpath(Strategy::Attribute)) => "Baseado em atributos",
        (Locale::Pt, LocatorKind::Xpath(Strategy::TextBased)) => "Baseado em texto",
        (Locale::Pt, LocatorKind::Xpath(Strategy::Contains)) => "Contém",
        (Locale::Pt, LocatorKind::Xpath(Strategy::Axes)) => "Baseado em eixos",
        (Locale::Pt, LocatorKind::Xpath(Strategy::Logical)) => "Operadores lógicos",
        (Locale::Pt, LocatorKind::Xpath(Strategy::Combined)) => "Combinado",
        (Locale::Pt, LocatorKind::Id) => "ID",
        (Locale::Pt, LocatorKind::Class) => "Classe",
    }
}

pub fn id_description(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Locates the element by its ID",
        Locale::Pt => "Localiza o elemento pelo ID",
    }
}

pub fn class_description(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Locates the element by its CSS class",
        Locale::Pt => "Localiza o elemento pela classe CSS",
    }
}

pub fn multi_class_description(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Locates the element by multiple classes",
        Locale::Pt => "Localiza o elemento por múltiplas classes",
    }
}

pub fn reliability_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "reliable",
        Locale::Pt => "confiável",
    }
}

pub fn no_viable_locator(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "No locator could be validated for this element",
        Locale::Pt => "Nenhum seletor pôde ser validado para este elemento",
    }
}

pub fn error_message(error: &LocatorError, locale: Locale) -> &'static str {
    match (locale, error) {
        (Locale::En, LocatorError::EmptyInput) => "Please provide an HTML fragment",
        (Locale::En, LocatorError::NoElementFound) => "No valid element found in the HTML fragment",
        (Locale::En, _) => "Error processing HTML. Please check your input.",
        (Locale::Pt, LocatorError::EmptyInput) => "Por favor, forneça um fragmento HTML",
        (Locale::Pt, LocatorError::NoElementFound) => "Nenhum elemento válido encontrado no fragmento HTML",
        (Locale::Pt, _) => "Erro ao processar HTML. Por favor, verifique sua entrada.",
    }
}
