use doh_relay_application::use_cases::ReloadProvidersUseCase;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

/// Re-read the configuration on every SIGHUP and swap in a new registry.
/// A failed reload keeps the current registry.
pub fn spawn_reload_on_sighup(
    reload: Arc<ReloadProvidersUseCase>,
    config_path: Option<String>,
) -> anyhow::Result<()> {
    let mut hangup = signal(SignalKind::hangup())?;

    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            info!(config_path = ?config_path, "SIGHUP received, reloading providers");
            if let Err(e) = reload.execute(config_path.as_deref()) {
                error!(error = %e, "Provider reload failed, keeping current registry");
            }
        }
    });

    Ok(())
}
