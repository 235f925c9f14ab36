use doh_relay_application::ports::ProviderSelector;
use doh_relay_domain::{Provider, ProviderRegistry};
use tracing::trace;

/// Cumulative-weight roulette over the registry.
///
/// `[0, total_weight)` is split into consecutive intervals, one per provider
/// and sized by its weight, in registry order. A uniform integer draw picks
/// the interval it falls into.
pub struct WeightedSelector;

impl WeightedSelector {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic part of the selection for a given draw.
    ///
    /// A draw past the last interval yields the last provider.
    pub fn pick(registry: &ProviderRegistry, draw: u64) -> &Provider {
        let mut remaining = draw;
        for provider in registry.providers() {
            let weight = u64::from(provider.weight);
            if remaining < weight {
                return provider;
            }
            remaining -= weight;
        }
        registry.last()
    }
}

impl Default for WeightedSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderSelector for WeightedSelector {
    fn select<'a>(&self, registry: &'a ProviderRegistry) -> &'a Provider {
        let total = registry.total_weight();
        if total == 0 {
            return registry.last();
        }

        let draw = fastrand::u64(0..total);
        let provider = Self::pick(registry, draw);
        trace!(draw, total, provider = %provider.name, "Weighted draw");
        provider
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}
