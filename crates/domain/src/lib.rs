//! doh-relay domain layer
pub mod config;
pub mod dns_message;
pub mod errors;
pub mod provider;
pub mod registry;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::DnsMessage;
pub use errors::DomainError;
pub use provider::{Provider, ProviderDescriptor};
pub use registry::ProviderRegistry;
