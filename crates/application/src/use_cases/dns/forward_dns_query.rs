use crate::ports::{ForwardOutcome, ProviderSelector, UpstreamForwarder, UpstreamResponse};
use arc_swap::ArcSwap;
use doh_relay_domain::{DnsMessage, DomainError, Provider, ProviderRegistry};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// One upstream call made while serving a request.
#[derive(Debug, Clone)]
pub struct ForwardAttempt {
    pub provider: Arc<str>,
    pub outcome: ForwardOutcome,
}

/// Answer relayed to the client, with the provider that produced it.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub provider: Provider,
    pub response: UpstreamResponse,
    pub attempts: Vec<ForwardAttempt>,
}

enum SweepState<'a> {
    Attempting(&'a Provider),
    Done(&'a Provider, UpstreamResponse),
    Exhausted,
}

/// Forwards a DNS message to a weighted-random primary provider and, when it
/// fails, sweeps the remaining providers in registry order until one answers.
///
/// Attempts are strictly sequential and every provider is tried at most once.
pub struct ForwardDnsQueryUseCase {
    registry: Arc<ArcSwap<ProviderRegistry>>,
    selector: Arc<dyn ProviderSelector>,
    forwarder: Arc<dyn UpstreamForwarder>,
}

impl ForwardDnsQueryUseCase {
    pub fn new(
        registry: Arc<ArcSwap<ProviderRegistry>>,
        selector: Arc<dyn ProviderSelector>,
        forwarder: Arc<dyn UpstreamForwarder>,
    ) -> Self {
        Self {
            registry,
            selector,
            forwarder,
        }
    }

    pub async fn execute(&self, query: &DnsMessage) -> Result<ForwardedResponse, DomainError> {
        let start = Instant::now();
        // Snapshot once so a concurrent reload cannot change the sweep.
        let registry = self.registry.load_full();

        let primary = self.selector.select(&registry);
        debug!(
            selector = self.selector.name(),
            provider = %primary.name,
            query_len = query.len(),
            "Selected primary provider"
        );

        let mut attempts: Vec<ForwardAttempt> = Vec::with_capacity(registry.len());
        let mut fallback: Option<std::vec::IntoIter<&Provider>> = None;
        let mut state = SweepState::Attempting(primary);

        loop {
            state = match state {
                SweepState::Attempting(provider) => {
                    let outcome = self.forwarder.forward(provider, query).await;
                    attempts.push(ForwardAttempt {
                        provider: Arc::clone(&provider.name),
                        outcome: outcome.clone(),
                    });

                    match outcome {
                        ForwardOutcome::Success(response) => SweepState::Done(provider, response),
                        ForwardOutcome::Failure(e) => {
                            warn!(
                                provider = %provider.name,
                                position = attempts.len(),
                                error = %e,
                                "Provider failed, trying next"
                            );
                            let remaining = fallback.get_or_insert_with(|| {
                                let excluded: HashSet<Arc<str>> =
                                    [Arc::clone(&primary.name)].into_iter().collect();
                                registry.select_excluding(&excluded).into_iter()
                            });
                            match remaining.next() {
                                Some(next) => SweepState::Attempting(next),
                                None => SweepState::Exhausted,
                            }
                        }
                    }
                }
                SweepState::Done(provider, response) => {
                    debug!(
                        provider = %provider.name,
                        status = response.status,
                        attempts = attempts.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Upstream answered"
                    );
                    return Ok(ForwardedResponse {
                        provider: provider.clone(),
                        response,
                        attempts,
                    });
                }
                SweepState::Exhausted => {
                    error!(
                        attempts = attempts.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "All DNS providers are unavailable"
                    );
                    return Err(DomainError::AllProvidersUnavailable);
                }
            };
        }
    }
}
