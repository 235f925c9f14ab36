//! doh-relay infrastructure: provider selection and the HTTPS upstream client
pub mod dns;
