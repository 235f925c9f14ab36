pub mod dto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_routes;
pub use state::AppState;
