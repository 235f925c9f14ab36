#![allow(dead_code)]

use async_trait::async_trait;
use doh_relay_application::ports::{
    ForwardOutcome, ProviderSelector, UpstreamForwarder, UpstreamResponse,
};
use doh_relay_domain::{DnsMessage, DomainError, Provider, ProviderRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Forwarder returning scripted outcomes per provider name and recording
/// every call. Providers without a script fail with a transport error.
#[derive(Clone, Default)]
pub struct MockUpstreamForwarder {
    outcomes: Arc<Mutex<HashMap<String, ForwardOutcome>>>,
    calls: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockUpstreamForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, provider: &str, body: &[u8]) {
        self.outcomes.lock().unwrap().insert(
            provider.to_string(),
            ForwardOutcome::Success(UpstreamResponse::dns_message(body.to_vec())),
        );
    }

    pub fn fail(&self, provider: &str) {
        self.outcomes.lock().unwrap().insert(
            provider.to_string(),
            ForwardOutcome::Failure(DomainError::UpstreamTransport {
                provider: provider.to_string(),
                reason: "connection refused".to_string(),
            }),
        );
    }

    pub fn fail_with(&self, provider: &str, error: DomainError) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(provider.to_string(), ForwardOutcome::Failure(error));
    }

    pub fn called_providers(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn sent_bodies(&self) -> Vec<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn forward(&self, provider: &Provider, query: &DnsMessage) -> ForwardOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((provider.name.to_string(), query.bytes().to_vec()));

        self.outcomes
            .lock()
            .unwrap()
            .get(&*provider.name)
            .cloned()
            .unwrap_or_else(|| {
                ForwardOutcome::Failure(DomainError::UpstreamTransport {
                    provider: provider.name.to_string(),
                    reason: "no scripted outcome".to_string(),
                })
            })
    }
}

/// Selector that always picks the provider with the given name.
pub struct FixedSelector(pub &'static str);

impl ProviderSelector for FixedSelector {
    fn select<'a>(&self, registry: &'a ProviderRegistry) -> &'a Provider {
        registry
            .get(self.0)
            .unwrap_or_else(|| &registry.providers()[0])
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
