use arc_swap::ArcSwap;
use doh_relay_application::use_cases::ForwardDnsQueryUseCase;
use doh_relay_domain::ProviderRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub forward_dns_query: Arc<ForwardDnsQueryUseCase>,
    /// Shared with the use case and the reload task.
    pub registry: Arc<ArcSwap<ProviderRegistry>>,
    pub cache_ttl: u32,
}
