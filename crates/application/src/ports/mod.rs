mod provider_selector;
mod upstream_forwarder;

pub use provider_selector::ProviderSelector;
pub use upstream_forwarder::{
    ForwardOutcome, UpstreamForwarder, UpstreamResponse, DNS_MESSAGE_CONTENT_TYPE,
};

// Re-export for convenience
pub use doh_relay_domain::{DnsMessage, Provider, ProviderRegistry};
