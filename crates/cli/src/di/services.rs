use arc_swap::ArcSwap;
use doh_relay_application::use_cases::{ForwardDnsQueryUseCase, ReloadProvidersUseCase};
use doh_relay_domain::{Config, ProviderRegistry};
use doh_relay_infrastructure::dns::{HttpsForwarder, WeightedSelector};
use std::sync::Arc;
use tracing::info;

pub struct RelayServices {
    pub registry: Arc<ArcSwap<ProviderRegistry>>,
    pub forward_dns_query: Arc<ForwardDnsQueryUseCase>,
    pub reload_providers: Arc<ReloadProvidersUseCase>,
}

impl RelayServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = ProviderRegistry::load(&config.upstream.providers);
        info!(
            providers = registry.len(),
            total_weight = registry.total_weight(),
            "Provider registry loaded"
        );
        for provider in registry.providers() {
            info!(name = %provider.name, url = %provider.url, weight = provider.weight, "Upstream provider");
        }

        let registry = Arc::new(ArcSwap::from_pointee(registry));
        let forwarder = Arc::new(HttpsForwarder::from_config(&config.upstream)?);

        let forward_dns_query = Arc::new(ForwardDnsQueryUseCase::new(
            Arc::clone(&registry),
            Arc::new(WeightedSelector::new()),
            forwarder,
        ));
        let reload_providers = Arc::new(
            ReloadProvidersUseCase::new(Arc::clone(&registry))
                .with_active_upstream(&config.upstream),
        );

        Ok(Self {
            registry,
            forward_dns_query,
            reload_providers,
        })
    }
}
