use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::provider::{Provider, ProviderDescriptor};
use crate::DomainError;

/// Ordered, non-empty set of upstream providers.
///
/// Order is configuration order and drives the fallback sweep. A registry is
/// never mutated after construction; a config reload builds a new one.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

const BUILTIN_PROVIDERS: &[(&str, &str, u32)] = &[
    ("Cloudflare", "https://cloudflare-dns.com/dns-query", 20),
    ("Google", "https://dns.google/dns-query", 15),
    ("Quad9", "https://dns.quad9.net/dns-query", 15),
    ("OpenDNS", "https://doh.opendns.com/dns-query", 10),
    ("AdGuard", "https://dns.adguard.com/dns-query", 10),
    ("ControlD", "https://freedns.controld.com/p2", 10),
    ("Mullvad", "https://adblock.dns.mullvad.net/dns-query", 10),
    ("NextDNS", "https://dns.nextdns.io/dns-query", 10),
];

impl ProviderRegistry {
    pub fn new(providers: Vec<Provider>) -> Result<Self, DomainError> {
        if providers.is_empty() {
            return Err(DomainError::EmptyRegistry);
        }
        if let Some(p) = providers.iter().find(|p| p.weight == 0) {
            return Err(DomainError::InvalidProvider(format!(
                "{}: weight must be a positive integer",
                p.name
            )));
        }
        Ok(Self { providers })
    }

    /// Decode each descriptor independently, skipping the ones that fail.
    ///
    /// Falls back to [`ProviderRegistry::builtin`] when nothing usable is
    /// left, so the result is always non-empty.
    pub fn load(descriptors: &[String]) -> Self {
        let mut providers: Vec<Provider> = Vec::with_capacity(descriptors.len());
        let mut seen: HashSet<Arc<str>> = HashSet::with_capacity(descriptors.len());

        for (index, raw) in descriptors.iter().enumerate() {
            let decoded = ProviderDescriptor::from_json(raw).and_then(Provider::try_from);
            match decoded {
                Ok(provider) if seen.contains(&provider.name) => {
                    warn!(index, name = %provider.name, "Skipping duplicate provider name");
                }
                Ok(provider) => {
                    debug!(index, name = %provider.name, weight = provider.weight, "Loaded provider");
                    seen.insert(Arc::clone(&provider.name));
                    providers.push(provider);
                }
                Err(e) => {
                    warn!(index, descriptor = %raw, error = %e, "Skipping invalid provider descriptor");
                }
            }
        }

        if providers.is_empty() {
            if !descriptors.is_empty() {
                warn!(
                    configured = descriptors.len(),
                    "No valid providers configured, using built-in defaults"
                );
            }
            return Self::builtin();
        }

        Self { providers }
    }

    pub fn builtin() -> Self {
        let providers = BUILTIN_PROVIDERS
            .iter()
            .map(|&(name, url, weight)| Provider {
                name: Arc::from(name),
                url: Arc::from(url),
                weight,
            })
            .collect();
        Self { providers }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Last provider in configuration order.
    pub fn last(&self) -> &Provider {
        // Non-empty by construction.
        &self.providers[self.providers.len() - 1]
    }

    pub fn total_weight(&self) -> u64 {
        self.providers.iter().map(|p| u64::from(p.weight)).sum()
    }

    pub fn get(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| &*p.name == name)
    }

    /// Providers not in `excluded`, in registry order.
    pub fn select_excluding(&self, excluded: &HashSet<Arc<str>>) -> Vec<&Provider> {
        self.providers
            .iter()
            .filter(|p| !excluded.contains(&p.name))
            .collect()
    }
}
