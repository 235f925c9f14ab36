use doh_relay_domain::Provider;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub name: String,
    pub url: String,
    pub weight: u32,
    /// Percentage of total weight, two decimals.
    pub share: f64,
}

impl ProviderResponse {
    pub fn from_provider(provider: &Provider, total_weight: u64) -> Self {
        let share = if total_weight == 0 {
            0.0
        } else {
            let percent = f64::from(provider.weight) * 100.0 / total_weight as f64;
            (percent * 100.0).round() / 100.0
        };

        Self {
            name: provider.name.to_string(),
            url: provider.url.to_string(),
            weight: provider.weight,
            share,
        }
    }
}
