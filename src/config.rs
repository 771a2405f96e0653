use crate::engine::ResolutionStrategy;
use crate::filter::DEFAULT_QUALITY_THRESHOLD;
use crate::providers::{bing, google, libretranslate, mymemory, ProviderId};
use anyhow::{anyhow, Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// Endpoint and time budget for one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub id: ProviderId,
    pub url: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Built-in endpoint and timeout for a provider.
    pub fn defaults(id: ProviderId) -> Self {
        let (url, timeout_secs) = match id {
            ProviderId::Google => (google::DEFAULT_URL, 8),
            ProviderId::Bing => (bing::DEFAULT_URL, 8),
            ProviderId::MyMemory => (mymemory::DEFAULT_URL, 10),
            ProviderId::LibreTranslate => (libretranslate::DEFAULT_URL, 10),
        };
        Self {
            id,
            url: url.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Resolution
    pub quality_threshold: f64,
    pub strategy: ResolutionStrategy,

    /// Enabled providers; routing policy decides the order they are tried in
    pub providers: Vec<ProviderSettings>,

    // LibreTranslate
    pub libretranslate_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            strategy: ResolutionStrategy::Sequential,
            providers: ProviderId::ALL
                .iter()
                .map(|id| ProviderSettings::defaults(*id))
                .collect(),
            libretranslate_api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Every variable is optional; unset or blank values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let enabled: Vec<ProviderId> = match var("PROVIDERS") {
            Some(list) => list
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(|name| name.parse::<ProviderId>().map_err(|e| anyhow!(e)))
                .collect::<Result<_>>()
                .context("Invalid PROVIDERS")?,
            None => ProviderId::ALL.to_vec(),
        };

        let mut providers = Vec::new();
        for id in enabled {
            if providers.iter().any(|p: &ProviderSettings| p.id == id) {
                continue;
            }
            let mut settings = ProviderSettings::defaults(id);
            let prefix = env_prefix(id);
            if let Some(url) = var(&format!("{}_URL", prefix)) {
                settings.url = url;
            }
            if let Some(secs) = var(&format!("{}_TIMEOUT_SECS", prefix)) {
                let name = format!("{}_TIMEOUT_SECS", prefix);
                let secs: u64 = parse(&name, &secs)?;
                if secs == 0 {
                    anyhow::bail!("{} must be at least 1 second", name);
                }
                settings.timeout = Duration::from_secs(secs);
            }
            providers.push(settings);
        }

        let quality_threshold = match var("QUALITY_THRESHOLD") {
            Some(v) => parse("QUALITY_THRESHOLD", &v)?,
            None => defaults.quality_threshold,
        };
        if !(0.0..=100.0).contains(&quality_threshold) {
            anyhow::bail!(
                "QUALITY_THRESHOLD must be between 0 and 100, got {}",
                quality_threshold
            );
        }

        Ok(Self {
            port: match var("PORT") {
                Some(v) => parse("PORT", &v)?,
                None => defaults.port,
            },
            quality_threshold,
            strategy: match var("RESOLUTION_STRATEGY") {
                Some(v) => v
                    .parse::<ResolutionStrategy>()
                    .map_err(|e| anyhow!(e))
                    .context("Invalid RESOLUTION_STRATEGY")?,
                None => defaults.strategy,
            },
            providers,
            libretranslate_api_key: var("LIBRETRANSLATE_API_KEY"),
        })
    }
}

fn env_prefix(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Google => "GOOGLE_TRANSLATE",
        ProviderId::Bing => "BING_TRANSLATE",
        ProviderId::MyMemory => "MYMEMORY",
        ProviderId::LibreTranslate => "LIBRETRANSLATE",
    }
}

fn parse<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}: {:?}", name, value))
}
