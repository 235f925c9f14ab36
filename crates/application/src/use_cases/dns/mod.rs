mod forward_dns_query;

pub use forward_dns_query::{ForwardAttempt, ForwardDnsQueryUseCase, ForwardedResponse};
