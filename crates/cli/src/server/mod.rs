#[cfg(unix)]
pub mod reload;
pub mod web;

#[cfg(unix)]
pub use reload::spawn_reload_on_sighup;
pub use web::start_web_server;
