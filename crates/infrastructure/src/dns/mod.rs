pub mod load_balancer;
pub mod transport;

pub use load_balancer::WeightedSelector;
pub use transport::HttpsForwarder;
