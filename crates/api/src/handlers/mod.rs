pub mod dns_query;
pub mod health;
pub mod providers;

pub use dns_query::{dns_query, invalid_endpoint};
pub use health::health_check;
pub use providers::get_providers;
