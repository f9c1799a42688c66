// SPDX-License-Identifier: MPL-2.0
//! Source-locator derivation.
//!
//! The fetch target is a pure function of the identity token: the token is
//! substituted into a URL template. No cache-busting query parameter is
//! appended, so repeated loads of the same token stay cacheable.

use std::fmt;

/// Placeholder substituted with the identity token.
pub const FACE_ID_PLACEHOLDER: &str = "{face_id}";

/// Derived fetch target for an identity token.
///
/// Two locators derived from the same template and token are always equal;
/// retries of one epoch reuse the identical locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    url: String,
}

impl SourceLocator {
    /// Derives the locator for `face_id` from `template`.
    #[must_use]
    pub fn derive(template: &str, face_id: &str) -> Self {
        Self {
            url: template.replace(FACE_ID_PLACEHOLDER, face_id),
        }
    }

    /// The locator as a URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_URL_TEMPLATE;

    #[test]
    fn substitutes_token_into_template() {
        let locator = SourceLocator::derive(DEFAULT_URL_TEMPLATE, "abc");
        assert_eq!(locator.as_str(), "https://picsum.photos/seed/abc/100");
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = SourceLocator::derive(DEFAULT_URL_TEMPLATE, "abc");
        let second = SourceLocator::derive(DEFAULT_URL_TEMPLATE, "abc");
        assert_eq!(first, second);
    }

    #[test]
    fn no_cache_busting_parameter_is_appended() {
        let locator = SourceLocator::derive(DEFAULT_URL_TEMPLATE, "abc");
        assert!(!locator.as_str().contains('?'));
    }

    #[test]
    fn template_without_placeholder_is_returned_verbatim() {
        let locator = SourceLocator::derive("https://example.test/fixed.png", "abc");
        assert_eq!(locator.as_str(), "https://example.test/fixed.png");
    }
}
