pub mod health;
pub mod provider;

pub use health::HealthResponse;
pub use provider::ProviderResponse;
