use doh_relay_domain::{CliOverrides, Config};

/// Load configuration and report which file it came from, if any.
pub fn load_config(
    path: Option<&str>,
    overrides: CliOverrides,
) -> anyhow::Result<(Config, Option<String>)> {
    let source = path.map(str::to_string).or_else(Config::get_config_path);
    let config = Config::load(source.as_deref(), overrides)?;
    Ok((config, source))
}
