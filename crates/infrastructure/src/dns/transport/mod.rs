pub mod https;

pub use https::HttpsForwarder;
