//! Language type: the canonical two-letter codes the relay translates between.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported language, always in canonical form.
///
/// Serializes as its ISO 639-1 code (e.g., `"hi"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Es,
    Fr,
    De,
    Ja,
    Ko,
    Zh,
    Ar,
}

impl Language {
    /// Every supported language, in registry order.
    pub const ALL: [Language; 9] = [
        Language::En,
        Language::Hi,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Ja,
        Language::Ko,
        Language::Zh,
        Language::Ar,
    ];

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Ar => "ar",
        }
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the registry has no entry for this language, which would mean
    /// the registry table and this enum have drifted apart.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .config_for(*self)
            .expect("every Language has a registry entry")
    }

    /// Get the English name of the language (e.g., "Hindi").
    pub fn name(&self) -> &'static str {
        self.config().name
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
