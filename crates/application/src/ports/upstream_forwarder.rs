use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_domain::{DnsMessage, DomainError, Provider};

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Completed 2xx answer from an upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn dns_message(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            content_type: DNS_MESSAGE_CONTENT_TYPE.to_string(),
            body: body.into(),
        }
    }
}

/// Result of a single upstream attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Success(UpstreamResponse),
    Failure(DomainError),
}

impl ForwardOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<UpstreamResponse, DomainError>> for ForwardOutcome {
    fn from(result: Result<UpstreamResponse, DomainError>) -> Self {
        match result {
            Ok(response) => Self::Success(response),
            Err(e) => Self::Failure(e),
        }
    }
}

/// Sends one DNS message to one provider. No retries: a failed attempt is
/// reported as [`ForwardOutcome::Failure`] and the caller decides what next.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    async fn forward(&self, provider: &Provider, query: &DnsMessage) -> ForwardOutcome;
}
