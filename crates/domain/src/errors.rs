use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing DNS query parameter")]
    MissingParameter,

    #[error("Invalid DNS query: {0}")]
    InvalidQuery(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Upstream {provider} transport error: {reason}")]
    UpstreamTransport { provider: String, reason: String },

    #[error("Upstream {provider} timed out")]
    UpstreamTimeout { provider: String },

    #[error("Upstream {provider} returned HTTP {status}")]
    UpstreamStatus { provider: String, status: u16 },

    #[error("Invalid provider descriptor: {0}")]
    InvalidProvider(String),

    #[error("Provider registry cannot be empty")]
    EmptyRegistry,

    #[error("All DNS providers are unavailable")]
    AllProvidersUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for failures of a single upstream attempt, which the fallback
    /// sweep recovers from by moving to the next provider.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTransport { .. } | Self::UpstreamTimeout { .. } | Self::UpstreamStatus { .. }
        )
    }
}
