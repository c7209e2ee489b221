//! Payment provider webhook endpoint.
//!
//! Verifies the request signature, then applies the event through the sync
//! service. Anything that goes wrong after verification is logged and
//! captured, never surfaced: the provider retries non-2xx deliveries, and a
//! sync bug must not turn into an unbounded retry storm, so a verified
//! event always gets a 200.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{error, instrument, warn};

use crate::services::sync::{self, WebhookEvent};
use crate::state::AppState;

/// Header carrying the signature timestamp.
pub const TIMESTAMP_HEADER: &str = "x-payments-timestamp";

/// Header carrying the hex HMAC signature.
pub const SIGNATURE_HEADER: &str = "x-payments-signature";

/// Receive a provider webhook delivery.
#[instrument(skip(state, headers, body))]
pub async fn payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let Some(timestamp) = header_str(&headers, TIMESTAMP_HEADER) else {
        return StatusCode::BAD_REQUEST;
    };
    let Some(signature) = header_str(&headers, SIGNATURE_HEADER) else {
        return StatusCode::BAD_REQUEST;
    };

    if let Err(err) = state
        .payments()
        .verify_signature(timestamp, &body, signature)
    {
        warn!(error = %err, "Rejected webhook delivery");
        return StatusCode::UNAUTHORIZED;
    }

    // Verified from here on: always 200.
    let event: WebhookEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(err) => {
            error!(error = %err, "Unparseable webhook payload");
            sentry::capture_error(&err);
            return StatusCode::OK;
        }
    };

    if let Err(err) = sync::apply_event(state.store(), &event).await {
        error!(error = %err, kind = %event.kind, "Sync event failed");
        sentry::capture_error(&err);
    }

    StatusCode::OK
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use hmac::{Hmac, Mac};
    use secrecy::SecretString;
    use sha2::Sha256;

    use oakline_core::{DocumentStatus, Slug};

    use crate::cms::collections;
    use crate::cms::documents::Document;
    use crate::cms::store::MutationCtx;
    use crate::config::{PaymentsConfig, StorefrontConfig};

    const WEBHOOK_SECRET: &str = "whsec_test_secret";

    fn test_state() -> AppState {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            payments: PaymentsConfig {
                api_url: "https://api.payments.example.com/v1".to_string(),
                dashboard_url: "https://dashboard.payments.example.com".to_string(),
                secret_key: SecretString::from("sk_test_secret"),
                publishable_key: "pk_test_publishable".to_string(),
                webhook_secret: SecretString::from(WEBHOOK_SECRET),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };
        AppState::in_memory(config).unwrap()
    }

    fn signed_headers(body: &str) -> HeaderMap {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            .to_string();
        let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.{body}").as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        let mut headers = HeaderMap::new();
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(&timestamp).unwrap());
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_missing_signature_headers_are_rejected() {
        let state = test_state();
        let body = r#"{"type":"product.updated"}"#.to_string();

        let status = payments(State(state), HeaderMap::new(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_signature_is_rejected_before_sync() {
        let state = test_state();
        let body = r#"{"type":"product.updated"}"#.to_string();

        let mut headers = signed_headers(&body);
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static("deadbeef"));

        let status = payments(State(state), headers, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unparseable_verified_payload_still_gets_200() {
        let state = test_state();
        let body = "not json at all".to_string();
        let headers = signed_headers(&body);

        let status = payments(State(state), headers, body).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sync_failure_on_verified_event_still_gets_200() {
        let state = test_state();

        // A stored product whose payload no longer decodes: the price is a
        // string, so the update path errors after verification.
        let corrupt = Document::new(
            collections::PRODUCTS,
            Some(Slug::parse("oak-barrel").unwrap()),
            DocumentStatus::Published,
            &serde_json::json!({
                "title": "Oak Barrel",
                "providerId": "prod_broken",
                "price": "ten dollars",
            }),
        )
        .unwrap();
        state
            .store()
            .create(&MutationCtx::local(), corrupt)
            .await
            .unwrap();

        let body = serde_json::json!({
            "type": "product.updated",
            "data": { "object": { "id": "prod_broken", "name": "Oak Barrel 5L" } },
        })
        .to_string();
        let headers = signed_headers(&body);

        let status = payments(State(state), headers, body).await;
        assert_eq!(status, StatusCode::OK);
    }
}
