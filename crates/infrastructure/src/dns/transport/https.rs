//! HTTPS upstream client — DNS-over-HTTPS (RFC 8484)
//!
//! Every query is sent as an HTTP POST with `application/dns-message`
//! content type, whatever method the client used towards the proxy. The
//! request body is the buffered DNS message and the response body is relayed
//! unchanged.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//! User-Agent: DoH-Proxy-Worker/1.0
//!
//! <raw DNS message bytes>
//! ```

use async_trait::async_trait;
use doh_relay_application::ports::{
    ForwardOutcome, UpstreamForwarder, UpstreamResponse, DNS_MESSAGE_CONTENT_TYPE,
};
use doh_relay_domain::config::UpstreamConfig;
use doh_relay_domain::{DnsMessage, DomainError, Provider};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::{Duration, Instant};
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// DNS-over-HTTPS forwarder with a pooled client shared by all requests.
pub struct HttpsForwarder {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsForwarder {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, DomainError> {
        Self::new(Duration::from_millis(config.timeout_ms), &config.user_agent)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send(
        &self,
        provider: &Provider,
        query: &DnsMessage,
    ) -> Result<UpstreamResponse, DomainError> {
        let response = self
            .client
            .post(&*provider.url)
            .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .body(query.bytes().clone())
            .send()
            .await
            .map_err(|e| transport_error(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamStatus {
                provider: provider.name.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DNS_MESSAGE_CONTENT_TYPE)
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(provider, e))?;

        Ok(UpstreamResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[async_trait]
impl UpstreamForwarder for HttpsForwarder {
    async fn forward(&self, provider: &Provider, query: &DnsMessage) -> ForwardOutcome {
        let start = Instant::now();
        debug!(
            provider = %provider.name,
            url = %provider.url,
            message_len = query.len(),
            "Sending DoH query"
        );

        // One deadline covers connect, send and body read.
        let result = tokio::time::timeout(self.timeout, self.send(provider, query))
            .await
            .unwrap_or_else(|_| {
                Err(DomainError::UpstreamTimeout {
                    provider: provider.name.to_string(),
                })
            });

        if let Ok(response) = &result {
            debug!(
                provider = %provider.name,
                status = response.status,
                response_len = response.body.len(),
                latency_ms = start.elapsed().as_millis() as u64,
                "DoH response received"
            );
        }

        result.into()
    }
}

fn transport_error(provider: &Provider, e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        return DomainError::UpstreamTimeout {
            provider: provider.name.to_string(),
        };
    }
    DomainError::UpstreamTransport {
        provider: provider.name.to_string(),
        reason: error_chain(&e),
    }
}

/// Error message followed by its source chain.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
