use async_trait::async_trait;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{require_session_cookie, SessionStore};
use crate::common::{SessionAttributes, SessionError};

/// Claims carried by a session cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub attributes: SessionAttributes,
    pub exp: i64, // Expiration timestamp
    pub iat: i64, // Issued at timestamp
    pub iss: String,
}

/// Session store that keeps attributes client side in an HS256-signed cookie
#[derive(Clone)]
pub struct SignedCookieStore {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: chrono::Duration,
}

impl SignedCookieStore {
    pub fn new(secret: &str, issuer: String, ttl: chrono::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl,
        }
    }

    /// Sign attributes into a cookie value
    pub fn issue(&self, attributes: &SessionAttributes) -> Result<String, SessionError> {
        let now = chrono::Utc::now();
        let exp = now + self.ttl;

        let claims = SessionClaims {
            attributes: attributes.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify a cookie value and return its attributes
    pub fn verify(&self, token: &str) -> Result<SessionAttributes, SessionError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims.attributes)
    }
}

#[async_trait]
impl SessionStore for SignedCookieStore {
    async fn get(
        &self,
        headers: &HeaderMap,
        session_name: &str,
    ) -> Result<SessionAttributes, SessionError> {
        let token = require_session_cookie(headers, session_name)?;
        self.verify(&token)
    }
}
