use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use doh_relay_domain::{DnsMessage, DomainError};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::errors::{ApiError, INVALID_ENDPOINT_MESSAGE};
use crate::response::compose_dns_response;
use crate::state::AppState;

const DNS_PARAM: &str = "dns";

/// `GET /dns-query?dns=<base64url>` and `POST /dns-query`.
#[instrument(skip_all, name = "dns_query", fields(method = %method))]
pub async fn dns_query(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let query = extract_query(&method, &uri, body)?;

    let forwarded = state.forward_dns_query.execute(&query).await?;

    debug!(
        provider = %forwarded.provider.name,
        attempts = forwarded.attempts.len(),
        query_len = query.len(),
        response_len = forwarded.response.body.len(),
        "DNS query relayed"
    );

    Ok(compose_dns_response(forwarded, state.cache_ttl))
}

/// Turn the inbound request into the buffered DNS message.
///
/// OPTIONS never gets here; the preflight middleware answers it.
pub fn extract_query(method: &Method, uri: &Uri, body: Bytes) -> Result<DnsMessage, DomainError> {
    match *method {
        Method::GET => {
            let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
                .map_err(|e| DomainError::InvalidQuery(e.body_text()))?;
            let encoded = params.get(DNS_PARAM).ok_or(DomainError::MissingParameter)?;
            DnsMessage::from_base64url(encoded)
        }
        Method::POST => DnsMessage::from_body(body),
        _ => Err(DomainError::MethodNotAllowed(method.to_string())),
    }
}

pub async fn invalid_endpoint() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, INVALID_ENDPOINT_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_get_with_dns_param() {
        let msg = extract_query(
            &Method::GET,
            &uri("/dns-query?dns=AAABAAABAAAAAAAAB2V4YW1wbGUDY29tAAABAAE"),
            Bytes::new(),
        )
        .unwrap();
        assert_eq!(msg.len(), 29);
    }

    #[test]
    fn test_get_ignores_body() {
        let msg = extract_query(
            &Method::GET,
            &uri("/dns-query?ct=application/dns-message&dns=q80"),
            Bytes::from_static(b"ignored"),
        )
        .unwrap();
        assert_eq!(msg.bytes().as_ref(), &[0xab, 0xcd]);
    }

    #[test]
    fn test_get_without_param_is_missing() {
        assert_eq!(
            extract_query(&Method::GET, &uri("/dns-query"), Bytes::new()),
            Err(DomainError::MissingParameter)
        );
        assert_eq!(
            extract_query(&Method::GET, &uri("/dns-query?name=example.com"), Bytes::new()),
            Err(DomainError::MissingParameter)
        );
    }

    #[test]
    fn test_get_with_percent_encoded_padding() {
        let msg = extract_query(&Method::GET, &uri("/dns-query?dns=q80%3D"), Bytes::new()).unwrap();
        assert_eq!(msg.bytes().as_ref(), &[0xab, 0xcd]);
    }

    #[test]
    fn test_get_with_bad_encoding_is_invalid() {
        let result = extract_query(&Method::GET, &uri("/dns-query?dns=%21%21%21%21"), Bytes::new());
        assert!(matches!(result, Err(DomainError::InvalidQuery(_))));
    }

    #[test]
    fn test_get_standard_alphabet_needs_percent_encoded_plus() {
        let msg = extract_query(&Method::GET, &uri("/dns-query?dns=%2B%2F8"), Bytes::new()).unwrap();
        assert_eq!(msg.bytes().as_ref(), &[0xfb, 0xff]);

        // A bare `+` is form-decoded to a space.
        let result = extract_query(&Method::GET, &uri("/dns-query?dns=+/8"), Bytes::new());
        assert!(matches!(result, Err(DomainError::InvalidQuery(_))));
    }

    #[test]
    fn test_post_takes_body_verbatim() {
        let msg = extract_query(
            &Method::POST,
            &uri("/dns-query?dns=ignored"),
            Bytes::from_static(b"\x12\x34"),
        )
        .unwrap();
        assert_eq!(msg.bytes().as_ref(), b"\x12\x34");
    }

    #[test]
    fn test_post_empty_body_passes_through() {
        let msg = extract_query(&Method::POST, &uri("/dns-query"), Bytes::new()).unwrap();
        assert!(msg.is_empty());
    }

    #[test]
    fn test_other_methods_not_allowed() {
        for method in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
            assert!(matches!(
                extract_query(&method, &uri("/dns-query"), Bytes::new()),
                Err(DomainError::MethodNotAllowed(_))
            ));
        }
    }
}
