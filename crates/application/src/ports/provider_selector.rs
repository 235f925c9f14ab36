use doh_relay_domain::{Provider, ProviderRegistry};

/// Chooses the primary provider for one request.
///
/// Implementations must return a provider from `registry`; the registry is
/// guaranteed non-empty.
pub trait ProviderSelector: Send + Sync {
    fn select<'a>(&self, registry: &'a ProviderRegistry) -> &'a Provider;

    fn name(&self) -> &'static str;
}
