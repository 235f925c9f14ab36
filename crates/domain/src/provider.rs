use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::DomainError;

/// Upstream DoH resolver endpoint.
///
/// `name` is both the display label (`X-Provider`) and the key used to
/// exclude already-attempted providers during a fallback sweep.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provider {
    pub name: Arc<str>,
    pub url: Arc<str>,
    pub weight: u32,
}

impl Provider {
    pub fn new(
        name: impl Into<Arc<str>>,
        url: impl Into<Arc<str>>,
        weight: u32,
    ) -> Result<Self, DomainError> {
        let name: Arc<str> = name.into();
        let url: Arc<str> = url.into();

        if name.trim().is_empty() {
            return Err(DomainError::InvalidProvider("name is empty".into()));
        }
        if !is_absolute_http_url(&url) {
            return Err(DomainError::InvalidProvider(format!(
                "{}: url '{}' is not an absolute https endpoint",
                name, url
            )));
        }
        if weight == 0 {
            return Err(DomainError::InvalidProvider(format!(
                "{}: weight must be a positive integer",
                name
            )));
        }

        Ok(Self { name, url, weight })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Serialized form of a provider as it appears in configuration.
///
/// `weight` is kept as a raw JSON value so that negative, fractional or
/// string weights are reported as invalid rather than silently coerced.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub url: String,
    pub weight: serde_json::Value,
}

impl ProviderDescriptor {
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidProvider(e.to_string()))
    }
}

impl TryFrom<ProviderDescriptor> for Provider {
    type Error = DomainError;

    fn try_from(descriptor: ProviderDescriptor) -> Result<Self, Self::Error> {
        let weight = descriptor
            .weight
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| {
                DomainError::InvalidProvider(format!(
                    "{}: weight {} is not a positive integer",
                    descriptor.name, descriptor.weight
                ))
            })?;

        Provider::new(descriptor.name, descriptor.url, weight)
    }
}

fn is_absolute_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}
