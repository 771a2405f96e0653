//! LinguaBridge: multi-provider translation resolution.
//!
//! A request passes through language normalization, the verified phrase
//! dictionary, an ordered chain of external providers and a content filter,
//! and always comes back as a [`engine::TranslationResult`] unless the request
//! itself is invalid.

pub mod config;
pub mod engine;
pub mod filter;
pub mod i18n;
pub mod metrics;
pub mod providers;
pub mod retry;
pub mod routing;
pub mod server;
