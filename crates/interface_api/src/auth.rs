//! Authentication and authorization
//!
//! Callers present bearer tokens issued by the identity provider. The API
//! only validates them: the token's display name becomes the owner of every
//! policy the caller lists or buys.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserName;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (stable user ID)
    pub sub: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Login name, used when no display name is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    /// Space-separated granted scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scp: Option<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Creates claims for `subject` valid for `expiration_secs`
    pub fn new(subject: impl Into<String>, expiration_secs: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiration_secs as i64);
        Self {
            sub: subject.into(),
            name: None,
            preferred_username: None,
            scp: None,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the granted scopes
    pub fn with_scopes(mut self, scopes: &[&str]) -> Self {
        self.scp = Some(scopes.join(" "));
        self
    }

    /// Name the caller is known by: `name`, else `preferred_username`, else `sub`
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.preferred_username.as_deref()]
            .into_iter()
            .flatten()
            .find(|n| !n.trim().is_empty())
            .unwrap_or(&self.sub)
    }

    /// The caller identity policies are stored under
    pub fn user_name(&self) -> Result<UserName, AuthError> {
        UserName::parse(self.display_name()).map_err(|_| AuthError::MissingIdentity)
    }

    /// Returns true if `scope` was granted
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scp
            .as_deref()
            .map(|granted| granted.split_whitespace().any(|s| s == scope))
            .unwrap_or(false)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token carries no usable identity")]
    MissingIdentity,
    #[error("Missing scope: {0}")]
    MissingScope(String),
}

/// Signs `claims` into a token
///
/// # Arguments
///
/// * `claims` - Claims to sign
/// * `secret` - JWT secret key
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks that the token grants `required_scope`, when one is configured
pub fn authorize(claims: &Claims, required_scope: Option<&str>) -> Result<(), AuthError> {
    match required_scope {
        Some(scope) if !claims.has_scope(scope) => Err(AuthError::MissingScope(scope.to_string())),
        _ => Ok(()),
    }
}
