//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of every language the relay can
//! translate between, together with the names and aliases clients are allowed
//! to use when naming a language. It uses a singleton pattern with `OnceLock`
//! to ensure thread-safe initialization and access.

use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// The language this entry describes
    pub language: Language,

    /// English name of the language (e.g., "English", "Hindi")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "हिन्दी")
    pub native_name: &'static str,

    /// Additional lowercase identifiers accepted for this language
    /// (ISO 639-2 codes, unaccented spellings, alternative native spellings)
    pub aliases: &'static [&'static str],

    /// Whether unrecognized identifiers resolve to this language (only one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,

    /// Lowercase identifier -> language, covering codes, names and aliases
    identifiers: HashMap<String, Language>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry::from_configs(default_languages()))
    }

    fn from_configs(languages: Vec<LanguageConfig>) -> Self {
        let mut identifiers = HashMap::new();
        for config in &languages {
            let lang = config.language;
            identifiers.insert(lang.code().to_string(), lang);
            identifiers.insert(config.name.to_lowercase(), lang);
            identifiers.insert(config.native_name.to_lowercase(), lang);
            for alias in config.aliases {
                identifiers.insert(alias.to_lowercase(), lang);
            }
        }

        Self {
            languages,
            identifiers,
        }
    }

    /// Get the configuration entry for a language.
    pub fn config_for(&self, language: Language) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|config| config.language == language)
    }

    /// Look up an already lowercased, trimmed identifier.
    ///
    /// Matches codes, English names, native names and aliases exactly.
    pub fn lookup(&self, identifier: &str) -> Option<Language> {
        self.identifiers.get(identifier).copied()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if no default language is found or if multiple default
    /// languages are defined (this indicates a configuration error).
    pub fn default_config(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|config| config.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// The language unrecognized identifiers resolve to.
    pub fn default_language(&self) -> Language {
        self.default_config().language
    }
}

/// Default language configurations: the fixed supported set.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            language: Language::En,
            name: "English",
            native_name: "English",
            aliases: &["eng"],
            is_default: true,
        },
        LanguageConfig {
            language: Language::Hi,
            name: "Hindi",
            native_name: "हिन्दी",
            aliases: &["hin", "हिंदी"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::Es,
            name: "Spanish",
            native_name: "Español",
            aliases: &["spa", "espanol", "castellano"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::Fr,
            name: "French",
            native_name: "Français",
            aliases: &["fra", "fre", "francais"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::De,
            name: "German",
            native_name: "Deutsch",
            aliases: &["deu", "ger"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::Ja,
            name: "Japanese",
            native_name: "日本語",
            aliases: &["jpn"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::Ko,
            name: "Korean",
            native_name: "한국어",
            aliases: &["kor"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::Zh,
            name: "Chinese",
            native_name: "中文",
            aliases: &["zho", "chi", "mandarin"],
            is_default: false,
        },
        LanguageConfig {
            language: Language::Ar,
            name: "Arabic",
            native_name: "العربية",
            aliases: &["ara"],
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_every_language_has_an_entry() {
        let registry = LanguageRegistry::get();
        for lang in Language::ALL {
            let config = registry.config_for(lang).expect("entry should exist");
            assert_eq!(config.language, lang);
        }
        assert_eq!(registry.languages.len(), Language::ALL.len());
    }

    #[test]
    fn test_hindi_entry() {
        let config = LanguageRegistry::get()
            .config_for(Language::Hi)
            .expect("Hindi should be registered");
        assert_eq!(config.name, "Hindi");
        assert_eq!(config.native_name, "हिन्दी");
        assert!(!config.is_default);
    }

    #[test]
    fn test_unsupported_identifiers_miss() {
        assert!(LanguageRegistry::get().lookup("pt").is_none());
        assert!(LanguageRegistry::get().lookup("").is_none());
    }

    #[test]
    fn test_default_is_english() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.default_language(), Language::En);
        assert!(registry.default_config().is_default);
    }

    #[test]
    fn test_lookup_names_and_aliases() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.lookup("english"), Some(Language::En));
        assert_eq!(registry.lookup("español"), Some(Language::Es));
        assert_eq!(registry.lookup("espanol"), Some(Language::Es));
        assert_eq!(registry.lookup("français"), Some(Language::Fr));
        assert_eq!(registry.lookup("deutsch"), Some(Language::De));
        assert_eq!(registry.lookup("日本語"), Some(Language::Ja));
        assert_eq!(registry.lookup("mandarin"), Some(Language::Zh));
        assert_eq!(registry.lookup("हिंदी"), Some(Language::Hi));
        assert_eq!(registry.lookup("klingon"), None);
    }

    #[test]
    fn test_lookup_is_exact() {
        // Callers are responsible for lowercasing and trimming
        let registry = LanguageRegistry::get();
        assert_eq!(registry.lookup("English"), None);
        assert_eq!(registry.lookup(" en"), None);
    }
}
