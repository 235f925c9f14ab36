mod doh_upstream_mock;

pub use doh_upstream_mock::{MockDohUpstream, RecordedRequest};
