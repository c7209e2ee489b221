//! Payment provider API client.
//!
//! Outbound product pushes and inbound webhook signature verification for
//! the hosted payment provider. Every record this client writes carries the
//! `origin: cms` metadata tag, which is what lets the webhook handlers
//! recognize the echo of our own writes and break the sync loop.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use oakline_core::{CMS_ORIGIN_TAG, ORIGIN_METADATA_KEY};

use crate::config::PaymentsConfig;

/// Maximum accepted webhook timestamp skew, in seconds.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Errors that can occur when interacting with the payment provider.
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Webhook signature verification failed.
    #[error("invalid webhook signature: {0}")]
    InvalidSignature(String),

    /// Failed to parse a response or payload.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A product record as the provider represents it, on both the API and the
/// webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

const fn default_active() -> bool {
    true
}

impl ProviderProduct {
    /// The `origin` metadata tag value, when present.
    #[must_use]
    pub fn origin_tag(&self) -> Option<&str> {
        self.metadata.get(ORIGIN_METADATA_KEY).map(String::as_str)
    }
}

/// Fields for an outbound product push.
#[derive(Debug, Clone, Serialize)]
struct ProductWrite<'a> {
    name: &'a str,
    description: Option<&'a str>,
    active: bool,
    metadata: HashMap<&'a str, &'a str>,
}

/// Payment provider API client.
#[derive(Clone)]
pub struct PaymentsClient {
    client: reqwest::Client,
    api_url: String,
    webhook_secret: SecretString,
}

impl PaymentsClient {
    /// Create a new provider API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &PaymentsConfig) -> Result<Self, PaymentsError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentsError::Parse(format!("Invalid secret key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            webhook_secret: config.webhook_secret.clone(),
        })
    }

    /// Create a product at the provider, stamped with the CMS origin tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    pub async fn create_product(
        &self,
        name: &str,
        description: Option<&str>,
        active: bool,
    ) -> Result<ProviderProduct, PaymentsError> {
        let url = format!("{}/products", self.api_url);
        let body = ProductWrite {
            name,
            description,
            active,
            metadata: HashMap::from([(ORIGIN_METADATA_KEY, CMS_ORIGIN_TAG)]),
        };
        self.send_product_write(self.client.post(&url).json(&body))
            .await
    }

    /// Update a product at the provider, re-stamping the CMS origin tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    pub async fn update_product(
        &self,
        provider_id: &str,
        name: &str,
        description: Option<&str>,
        active: bool,
    ) -> Result<ProviderProduct, PaymentsError> {
        let url = format!("{}/products/{provider_id}", self.api_url);
        let body = ProductWrite {
            name,
            description,
            active,
            metadata: HashMap::from([(ORIGIN_METADATA_KEY, CMS_ORIGIN_TAG)]),
        };
        self.send_product_write(self.client.post(&url).json(&body))
            .await
    }

    async fn send_product_write(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ProviderProduct, PaymentsError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaymentsError::Parse(e.to_string()))
    }

    /// Verify an inbound webhook signature.
    ///
    /// The provider signs `"{timestamp}.{body}"` with HMAC-SHA256 using the
    /// shared webhook secret and sends the hex digest. Timestamps more than
    /// five minutes from now are rejected to prevent replay.
    ///
    /// # Errors
    ///
    /// Returns `PaymentsError::InvalidSignature` on any mismatch.
    pub fn verify_signature(
        &self,
        timestamp: &str,
        body: &str,
        signature: &str,
    ) -> Result<(), PaymentsError> {
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| PaymentsError::InvalidSignature("Invalid timestamp".to_string()))?;

        let now_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| PaymentsError::InvalidSignature(e.to_string()))?
            .as_secs();

        let now = i64::try_from(now_secs)
            .map_err(|_| PaymentsError::InvalidSignature("System time overflow".to_string()))?;

        if (now - ts).abs() > SIGNATURE_TOLERANCE_SECS {
            return Err(PaymentsError::InvalidSignature(
                "Request timestamp too old".to_string(),
            ));
        }

        let signed_payload = format!("{timestamp}.{body}");

        let mut mac = Hmac::<Sha256>::new_from_slice(self.webhook_secret.expose_secret().as_bytes())
            .map_err(|e| PaymentsError::InvalidSignature(e.to_string()))?;
        mac.update(signed_payload.as_bytes());

        let expected = hex::encode(mac.finalize().into_bytes());

        // Constant-time comparison
        if !constant_time_compare(&expected, signature) {
            return Err(PaymentsError::InvalidSignature(
                "Signature mismatch".to_string(),
            ));
        }

        debug!("Webhook signature verified");

        Ok(())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> PaymentsClient {
        let config = PaymentsConfig {
            api_url: "https://api.payments.example.com/v1".to_string(),
            dashboard_url: "https://dashboard.payments.example.com".to_string(),
            secret_key: SecretString::from("sk_test_secret".to_string()),
            publishable_key: "pk_test_publishable".to_string(),
            webhook_secret: SecretString::from("whsec_test_secret".to_string()),
        };
        PaymentsClient::new(&config).expect("client builds")
    }

    fn sign(secret: &str, timestamp: &str, body: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac key");
        mac.update(format!("{timestamp}.{body}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn now_timestamp() -> String {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before epoch")
            .as_secs()
            .to_string()
    }

    #[test]
    fn test_valid_signature_accepted() {
        let client = test_client();
        let timestamp = now_timestamp();
        let body = r#"{"type":"product.updated"}"#;
        let signature = sign("whsec_test_secret", &timestamp, body);

        assert!(client.verify_signature(&timestamp, body, &signature).is_ok());
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let client = test_client();
        let timestamp = now_timestamp();
        let body = r#"{"type":"product.updated"}"#;

        let result = client.verify_signature(&timestamp, body, "deadbeef");
        assert!(matches!(result, Err(PaymentsError::InvalidSignature(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let client = test_client();
        let timestamp = now_timestamp();
        let body = r#"{"type":"product.updated"}"#;
        let signature = sign("whsec_other_secret", &timestamp, body);

        let result = client.verify_signature(&timestamp, body, &signature);
        assert!(matches!(result, Err(PaymentsError::InvalidSignature(_))));
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let client = test_client();
        let body = r#"{"type":"product.updated"}"#;
        let stale = "1136073600"; // far in the past
        let signature = sign("whsec_test_secret", stale, body);

        let result = client.verify_signature(stale, body, &signature);
        assert!(matches!(result, Err(PaymentsError::InvalidSignature(_))));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let client = test_client();
        let timestamp = now_timestamp();
        let signature = sign("whsec_test_secret", &timestamp, r#"{"active":false}"#);

        let result = client.verify_signature(&timestamp, r#"{"active":true}"#, &signature);
        assert!(matches!(result, Err(PaymentsError::InvalidSignature(_))));
    }

    #[test]
    fn test_origin_tag_lookup() {
        let product = ProviderProduct {
            id: "prod_123".to_string(),
            name: "Oak Barrel".to_string(),
            description: None,
            active: true,
            metadata: HashMap::from([("origin".to_string(), "cms".to_string())]),
        };
        assert_eq!(product.origin_tag(), Some("cms"));
    }
}
