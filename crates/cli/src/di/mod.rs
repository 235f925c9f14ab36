mod services;

pub use services::RelayServices;
