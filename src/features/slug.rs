//! Slug derivation from alt text

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lowercase `text`, collapse every run of characters outside `[a-z0-9]`
/// into one hyphen, and strip hyphens at either end
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug field that follows the alt text until edited by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugField {
    value: String,
    /// Set once the user types into the slug field directly
    manual: bool,
}

impl SlugField {
    /// Field holding an existing slug (never auto-derived)
    pub fn existing(slug: impl Into<String>) -> Self {
        let value = slug.into();
        Self {
            manual: !value.is_empty(),
            value,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Alt text changed; derive the slug unless the user owns it
    pub fn alt_changed(&mut self, alt: &str) {
        if self.value.is_empty() || !self.manual {
            self.value = slugify(alt);
            self.manual = false;
        }
    }

    /// User typed into the slug field
    pub fn edited(&mut self, value: String) {
        // Clearing the field hands it back to the alt text
        self.manual = !value.is_empty();
        self.value = value;
    }
}
