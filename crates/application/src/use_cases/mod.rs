pub mod config;
pub mod dns;

// Re-export use cases
pub use config::ReloadProvidersUseCase;
pub use dns::{ForwardAttempt, ForwardDnsQueryUseCase, ForwardedResponse};
