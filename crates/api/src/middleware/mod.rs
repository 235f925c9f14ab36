pub mod cors;

pub use cors::{preflight, with_cors_headers};
