use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Upstream forwarding settings.
///
/// `providers` holds one JSON-encoded descriptor per entry, e.g.
/// `'{"name":"Google","url":"https://dns.google/dns-query","weight":15}'`.
/// Inline tables are accepted too and kept as their JSON encoding. Entries
/// are decoded one by one when the registry is built; an invalid entry of
/// any type is dropped without affecting the others.
///
/// A SIGHUP reload only rebuilds the provider registry. `cache_ttl`,
/// `timeout_ms` and `user_agent` are read once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Seconds advertised in `Cache-Control: max-age` on relayed answers.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default, deserialize_with = "deserialize_descriptors")]
    pub providers: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            providers: Vec::new(),
        }
    }
}

impl UpstreamConfig {
    /// Replace `providers` from a `PROVIDERS`-style JSON array.
    ///
    /// Array elements may be descriptor strings or inline objects. A value
    /// that is not a JSON array is ignored and the current list is kept.
    pub fn set_providers_from_json(&mut self, raw: &str) {
        let items: Vec<serde_json::Value> = match serde_json::from_str(raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Ignoring PROVIDERS: expected a JSON array");
                return;
            }
        };

        self.providers = items.into_iter().map(descriptor_string).collect();
    }
}

/// String entries are kept verbatim, anything else is re-encoded as JSON
/// and left for the registry to accept or reject.
fn descriptor_string(item: serde_json::Value) -> String {
    match item {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn deserialize_descriptors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(items.into_iter().map(descriptor_string).collect())
}

fn default_cache_ttl() -> u32 {
    300
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    "DoH-Proxy-Worker/1.0".to_string()
}
