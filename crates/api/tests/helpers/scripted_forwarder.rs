#![allow(dead_code)]

use arc_swap::ArcSwap;
use async_trait::async_trait;
use axum::Router;
use doh_relay_api::{create_routes, AppState};
use doh_relay_application::ports::{
    ForwardOutcome, ProviderSelector, UpstreamForwarder, UpstreamResponse,
};
use doh_relay_application::use_cases::ForwardDnsQueryUseCase;
use doh_relay_domain::{DnsMessage, DomainError, Provider, ProviderRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Upstream stand-in: answers for the providers it was told to, fails for
/// the rest, and remembers who was called with what.
#[derive(Clone, Default)]
pub struct ScriptedForwarder {
    answers: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl ScriptedForwarder {
    pub fn answer(&self, provider: &str, body: &[u8]) {
        self.answers
            .lock()
            .unwrap()
            .insert(provider.to_string(), body.to_vec());
    }

    pub fn calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_providers(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl UpstreamForwarder for ScriptedForwarder {
    async fn forward(&self, provider: &Provider, query: &DnsMessage) -> ForwardOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((provider.name.to_string(), query.bytes().to_vec()));

        match self.answers.lock().unwrap().get(&*provider.name) {
            Some(body) => ForwardOutcome::Success(UpstreamResponse::dns_message(body.clone())),
            None => ForwardOutcome::Failure(DomainError::UpstreamTransport {
                provider: provider.name.to_string(),
                reason: "connection reset".to_string(),
            }),
        }
    }
}

/// Always starts the sweep at the first registered provider.
struct FirstSelector;

impl ProviderSelector for FirstSelector {
    fn select<'a>(&self, registry: &'a ProviderRegistry) -> &'a Provider {
        &registry.providers()[0]
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

pub struct TestApp {
    pub router: Router,
    pub forwarder: ScriptedForwarder,
    pub registry: Arc<ArcSwap<ProviderRegistry>>,
}

pub fn test_app(providers: &[(&str, u32)], cache_ttl: u32) -> TestApp {
    let providers = providers
        .iter()
        .map(|(name, weight)| {
            Provider::new(
                *name,
                format!("https://{}.example/dns-query", name.to_lowercase()),
                *weight,
            )
            .unwrap()
        })
        .collect();
    let registry = Arc::new(ArcSwap::from_pointee(
        ProviderRegistry::new(providers).unwrap(),
    ));
    let forwarder = ScriptedForwarder::default();

    let use_case = ForwardDnsQueryUseCase::new(
        Arc::clone(&registry),
        Arc::new(FirstSelector),
        Arc::new(forwarder.clone()),
    );

    let state = AppState {
        forward_dns_query: Arc::new(use_case),
        registry: Arc::clone(&registry),
        cache_ttl,
    };

    TestApp {
        router: create_routes(state),
        forwarder,
        registry,
    }
}
