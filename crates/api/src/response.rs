//! Success response for a relayed DNS answer.
//!
//! CORS headers are not set here; the router adds them to every response.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use doh_relay_application::ports::DNS_MESSAGE_CONTENT_TYPE;
use doh_relay_application::use_cases::ForwardedResponse;
use tracing::warn;

pub const X_PROVIDER: HeaderName = HeaderName::from_static("x-provider");

/// IMF-fixdate, as used by `Expires` (RFC 9110 §5.6.7).
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn compose_dns_response(forwarded: ForwardedResponse, cache_ttl: u32) -> Response {
    compose_dns_response_at(forwarded, cache_ttl, Utc::now())
}

pub fn compose_dns_response_at(
    forwarded: ForwardedResponse,
    cache_ttl: u32,
    now: DateTime<Utc>,
) -> Response {
    let ForwardedResponse {
        provider, response, ..
    } = forwarded;

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
    let content_type = HeaderValue::from_str(&response.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DNS_MESSAGE_CONTENT_TYPE));

    let mut out = Response::new(Body::from(response.body));
    *out.status_mut() = status;

    let headers = out.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Ok(value) = HeaderValue::from_str(&cache_control(cache_ttl)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    if let Ok(value) = HeaderValue::from_str(&expires(now, cache_ttl)) {
        headers.insert(header::EXPIRES, value);
    }
    match HeaderValue::from_str(&provider.name) {
        Ok(value) => {
            headers.insert(X_PROVIDER, value);
        }
        Err(_) => warn!(provider = %provider.name, "Provider name is not a valid header value"),
    }

    out
}

pub fn cache_control(cache_ttl: u32) -> String {
    format!("public, max-age={}", cache_ttl)
}

pub fn expires(now: DateTime<Utc>, cache_ttl: u32) -> String {
    (now + Duration::seconds(i64::from(cache_ttl)))
        .format(HTTP_DATE_FORMAT)
        .to_string()
}
