//! Free-form language identifier normalization.

use crate::i18n::{Language, LanguageRegistry};
use tracing::debug;

/// Map a free-form language identifier to a supported [`Language`].
///
/// Accepts codes (`"hi"`), English names (`"Hindi"`), native names
/// (`"हिन्दी"`) and region-qualified codes (`"en-US"`, `"zh_CN"`). Matching is
/// case-insensitive and ignores surrounding whitespace.
///
/// Unrecognized input resolves to the registry's default language (English).
/// Normalization never fails.
pub fn normalize(identifier: &str) -> Language {
    let registry = LanguageRegistry::get();
    let key = identifier.trim().to_lowercase();

    if let Some(lang) = registry.lookup(&key) {
        return lang;
    }

    // Region-qualified: keep the primary subtag
    if let Some(primary) = key.split(['-', '_']).next() {
        if let Some(lang) = registry.lookup(primary.trim()) {
            return lang;
        }
    }

    let fallback = registry.default_language();
    debug!(
        "Unrecognized language identifier {:?}, defaulting to {}",
        identifier, fallback
    );
    fallback
}
