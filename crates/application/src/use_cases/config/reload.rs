use arc_swap::ArcSwap;
use doh_relay_domain::config::UpstreamConfig;
use doh_relay_domain::{CliOverrides, Config, DomainError, ProviderRegistry};
use std::sync::Arc;
use tracing::{info, warn};

/// Rebuilds the provider registry from the configuration source and swaps it
/// in atomically. Requests already in flight keep the snapshot they took.
///
/// Only the registry is replaced. Upstream settings the running process was
/// started with are compared against the reloaded file and reported when
/// they differ, since they need a restart.
pub struct ReloadProvidersUseCase {
    registry: Arc<ArcSwap<ProviderRegistry>>,
    active_upstream: Option<UpstreamConfig>,
}

impl ReloadProvidersUseCase {
    pub fn new(registry: Arc<ArcSwap<ProviderRegistry>>) -> Self {
        Self {
            registry,
            active_upstream: None,
        }
    }

    /// Record the upstream settings in effect, for restart-required checks.
    pub fn with_active_upstream(mut self, upstream: &UpstreamConfig) -> Self {
        self.active_upstream = Some(upstream.clone());
        self
    }

    pub fn execute(&self, config_path: Option<&str>) -> Result<Arc<ProviderRegistry>, DomainError> {
        let config = Config::load(config_path, CliOverrides::default())
            .map_err(|e| DomainError::ConfigError(format!("Config load error: {}", e)))?;

        Ok(self.apply(&config))
    }

    /// Replace the registry with one built from `config`.
    pub fn apply(&self, config: &Config) -> Arc<ProviderRegistry> {
        let registry = Arc::new(ProviderRegistry::load(&config.upstream.providers));
        self.registry.store(Arc::clone(&registry));

        info!(
            providers = registry.len(),
            total_weight = registry.total_weight(),
            "Provider registry reloaded"
        );

        let pending = self.restart_required(config);
        if !pending.is_empty() {
            warn!(
                settings = ?pending,
                "Reloaded config changes settings that only apply after a restart"
            );
        }

        registry
    }

    /// Upstream settings in `config` that differ from the running ones.
    pub fn restart_required(&self, config: &Config) -> Vec<&'static str> {
        let Some(active) = &self.active_upstream else {
            return Vec::new();
        };

        let mut changed = Vec::new();
        if active.cache_ttl != config.upstream.cache_ttl {
            changed.push("cache_ttl");
        }
        if active.timeout_ms != config.upstream.timeout_ms {
            changed.push("timeout_ms");
        }
        if active.user_agent != config.upstream.user_agent {
            changed.push("user_agent");
        }
        changed
    }
}
