//! Static provider ordering.
//!
//! Which provider to ask first is a fixed, documented policy keyed by the
//! target language. It is never learned or adjusted at runtime.

use crate::i18n::Language;
use crate::providers::ProviderId;

/// Provider order per target language.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    default_order: Vec<ProviderId>,
    overrides: Vec<(Language, Vec<ProviderId>)>,
}

impl RoutingPolicy {
    /// A policy that uses one order for every pair.
    pub fn uniform(order: Vec<ProviderId>) -> Self {
        Self {
            default_order: order,
            overrides: Vec::new(),
        }
    }

    /// Use `order` whenever `target` is the target language.
    pub fn with_override(mut self, target: Language, order: Vec<ProviderId>) -> Self {
        self.overrides.retain(|(lang, _)| *lang != target);
        self.overrides.push((target, order));
        self
    }

    /// Providers to try, in order, for a language pair.
    pub fn order_for(&self, _source: Language, target: Language) -> &[ProviderId] {
        self.overrides
            .iter()
            .find(|(lang, _)| *lang == target)
            .map(|(_, order)| order.as_slice())
            .unwrap_or(&self.default_order)
    }
}

impl Default for RoutingPolicy {
    /// Google first everywhere. For CJK and Arabic targets MyMemory's crowd
    /// memory is thin, so LibreTranslate is tried before it.
    fn default() -> Self {
        use ProviderId::*;

        let cjk_and_arabic = vec![Google, Bing, LibreTranslate, MyMemory];
        RoutingPolicy::uniform(vec![Google, Bing, MyMemory, LibreTranslate])
            .with_override(Language::Ja, cjk_and_arabic.clone())
            .with_override(Language::Ko, cjk_and_arabic.clone())
            .with_override(Language::Zh, cjk_and_arabic.clone())
            .with_override(Language::Ar, cjk_and_arabic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProviderId::*;

    #[test]
    fn test_default_order() {
        let policy = RoutingPolicy::default();
        assert_eq!(
            policy.order_for(Language::En, Language::Hi),
            &[Google, Bing, MyMemory, LibreTranslate]
        );
        assert_eq!(
            policy.order_for(Language::Hi, Language::En),
            &[Google, Bing, MyMemory, LibreTranslate]
        );
    }

    #[test]
    fn test_override_for_target() {
        let policy = RoutingPolicy::default();
        assert_eq!(
            policy.order_for(Language::En, Language::Ja),
            &[Google, Bing, LibreTranslate, MyMemory]
        );
        assert_eq!(
            policy.order_for(Language::Fr, Language::Ar),
            &[Google, Bing, LibreTranslate, MyMemory]
        );
    }

    #[test]
    fn test_override_replaces_previous() {
        let policy = RoutingPolicy::uniform(vec![Google])
            .with_override(Language::De, vec![Bing])
            .with_override(Language::De, vec![MyMemory]);
        assert_eq!(policy.order_for(Language::En, Language::De), &[MyMemory]);
        assert_eq!(policy.order_for(Language::En, Language::Fr), &[Google]);
    }
}
