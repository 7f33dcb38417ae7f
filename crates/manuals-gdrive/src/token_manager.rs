//! Service-account OAuth token manager with in-memory caching.
//!
//! Signs a JWT assertion with the service-account key, exchanges it at the
//! key's token endpoint, and reuses the access token until shortly before
//! it expires.

use dashmap::DashMap;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::credentials::ServiceAccountKey;

/// Read-only access to Drive files.
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google caps it at one hour).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Cached token with expiration.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        chrono::Utc::now() >= self.expires_at - chrono::Duration::minutes(5)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Exchanges service-account keys for access tokens, caching per account.
pub struct TokenManager {
    http: reqwest::Client,
    scope: String,
    cache: DashMap<String, CachedToken>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            scope: DRIVE_READONLY_SCOPE.to_string(),
            cache: DashMap::new(),
        }
    }

    /// Get a valid access token for a service account, fetching a new one if
    /// the cached token is missing or about to expire.
    pub async fn get_valid_token(&self, key: &ServiceAccountKey) -> anyhow::Result<String> {
        if let Some(cached) = self.cache.get(&key.client_email) {
            if !cached.is_expired() {
                debug!("Token cache hit for {}", key.client_email);
                return Ok(cached.access_token.clone());
            }
            debug!("Token expired for {}, requesting a new one", key.client_email);
        }

        let assertion = self.sign_assertion(key)?;

        let resp = self
            .http
            .post(&key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "Token exchange failed for {}: {} {}",
                key.client_email,
                status,
                body
            );
        }

        let token_resp: TokenResponse = resp.json().await?;
        let expires_at = i64::try_from(token_resp.expires_in)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .and_then(|lifetime| chrono::Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Token endpoint returned an out-of-range expires_in: {}",
                    token_resp.expires_in
                )
            })?;

        self.cache.insert(
            key.client_email.clone(),
            CachedToken {
                access_token: token_resp.access_token.clone(),
                expires_at,
            },
        );

        info!(
            "Obtained access token for {}, expires at {}",
            key.client_email,
            expires_at.to_rfc3339()
        );

        Ok(token_resp.access_token)
    }

    fn sign_assertion(&self, key: &ServiceAccountKey) -> anyhow::Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: &self.scope,
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid service-account private key: {}", e))?;

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &signing_key,
        )?)
    }
}
