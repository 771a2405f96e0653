//! Language handling: the supported set, identifier normalization and the
//! phrase dictionary consulted before any provider.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their names
//! - `language`: The canonical `Language` enum
//! - `normalize`: Free-form identifier -> `Language`
//! - `dictionary`: Verified short-phrase translations per language direction
//!
//! # Example
//!
//! ```rust
//! use linguabridge::i18n::{self, Language};
//!
//! assert_eq!(i18n::normalize(" Hindi "), Language::Hi);
//! assert_eq!(i18n::lookup("hello", Language::En, Language::Hi), Some("नमस्ते"));
//! ```

mod dictionary;
mod language;
mod normalize;
mod registry;

pub use dictionary::{lookup, PhraseDictionary};
pub use language::Language;
pub use normalize::normalize;
pub use registry::{LanguageConfig, LanguageRegistry};
