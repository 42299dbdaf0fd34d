// src/application/registry.rs
use crate::domain::DomainError;
use tracing::debug;

/// Names the HTML standard reserves even though they contain a hyphen.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Tag names defined by the hosting page, in definition order.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    defined: Vec<String>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom element tag name. Each name can be defined once.
    pub fn define(&mut self, name: &str) -> Result<(), DomainError> {
        if !is_valid_element_name(name) {
            return Err(DomainError::InvalidElementName(name.to_string()));
        }
        if self.is_defined(name) {
            return Err(DomainError::ElementAlreadyDefined(name.to_string()));
        }
        debug!(name, "Defined element");
        self.defined.push(name.to_string());
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.iter().any(|defined| defined == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(String::as_str)
    }
}

/// Lowercase ASCII letter first, at least one hyphen, then only `[a-z0-9._-]`.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_lowercase = chars.next().is_some_and(|c| c.is_ascii_lowercase());

    starts_lowercase
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
        && !RESERVED_NAMES.contains(&name)
}
