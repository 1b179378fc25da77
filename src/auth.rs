//! Admin login and bearer token handling
//!
//! A single admin account configured from the environment. Tokens are
//! HS256 JWTs that expire after an hour.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TOKEN_LIFETIME_MINUTES: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Role allowed to use the admin endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    ContentEditor,
    Guest,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "admin" => Role::Admin,
            "content_editor" => Role::ContentEditor,
            _ => Role::Guest,
        }
    }

    pub fn can_edit_content(self) -> bool {
        matches!(self, Role::Admin | Role::ContentEditor)
    }
}

pub struct AuthService {
    admin_email: String,
    admin_password: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(secret: &str, admin_email: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
            admin_password: admin_password.into(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Check credentials and issue a token. The username is the admin email,
    /// compared case-insensitively.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !username.eq_ignore_ascii_case(&self.admin_email) || password != self.admin_password {
            tracing::warn!(username, "Rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }
        self.issue(username)
    }

    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            is_admin: true,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(TOKEN_LIFETIME_MINUTES)).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    /// Resolve the caller's role: a valid admin bearer token wins, then the
    /// `X-Role` header, then guest.
    pub fn resolve_role(&self, bearer: Option<&str>, role_header: Option<&str>) -> Role {
        if let Some(token) = bearer {
            match self.verify(token) {
                Ok(claims) if claims.is_admin => return Role::Admin,
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "Ignoring invalid bearer token"),
            }
        }
        role_header.map_or(Role::Guest, Role::parse)
    }
}
