use clap::Parser;
use doh_relay_api::AppState;
use doh_relay_domain::CliOverrides;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "doh-relay")]
#[command(version)]
#[command(about = "DNS-over-HTTPS relay with weighted provider selection and failover")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Cache-Control max-age for relayed answers, in seconds
    #[arg(long)]
    cache_ttl: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        cache_ttl: cli.cache_ttl,
    };

    let (config, config_path) = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting doh-relay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_path = config_path.as_deref().unwrap_or("<defaults>"),
        cache_ttl = config.upstream.cache_ttl,
        timeout_ms = config.upstream.timeout_ms,
        "Configuration loaded"
    );

    let services = di::RelayServices::new(&config)?;

    #[cfg(unix)]
    server::spawn_reload_on_sighup(services.reload_providers.clone(), config_path)?;

    let app_state = AppState {
        forward_dns_query: services.forward_dns_query,
        registry: services.registry,
        cache_ttl: config.upstream.cache_ttl,
    };

    let web_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    server::start_web_server(web_addr, app_state).await?;

    info!("Server shutdown complete");
    Ok(())
}
