use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::utils::crypto::{constant_time_eq, verify_password};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Single-administrator login backed by an argon2 hash from the environment.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    admin_username: String,
    admin_password_hash: String,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            admin_username: config.admin_username.clone(),
            admin_password_hash: config.admin_password_hash.clone(),
            session_ttl: Duration::hours(config.session_ttl_hours),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<(String, DateTime<Utc>)> {
        let name_ok = constant_time_eq(username, &self.admin_username);
        let password_ok = verify_password(password, &self.admin_password_hash).map_err(|e| {
            tracing::error!(error = %e, "ADMIN_PASSWORD_HASH is not a valid PHC string");
            Error::Internal("Invalid admin password hash".into())
        })?;

        if !(name_ok && password_ok) {
            tracing::warn!(username, "Rejected admin login");
            return Err(Error::Unauthorized("Invalid credentials".into()));
        }

        let expires_at = Utc::now() + self.session_ttl;
        let token = self.issue_token(username, expires_at)?;
        tracing::info!(username, "Admin logged in");
        Ok((token, expires_at))
    }

    pub fn issue_token(&self, subject: &str, expires_at: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            role: ADMIN_ROLE.to_string(),
            exp: expires_at.timestamp().max(0) as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| Error::Unauthorized("Invalid or expired token".into()))?;

        if data.claims.role != ADMIN_ROLE {
            return Err(Error::Unauthorized("Admin role required".into()));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::crypto::hash_password;

    fn service() -> AuthService {
        AuthService {
            jwt_secret: "test-secret".into(),
            admin_username: "admin".into(),
            admin_password_hash: hash_password("hunter2").unwrap(),
            session_ttl: Duration::hours(1),
        }
    }

    #[test]
    fn login_issues_a_verifiable_token() {
        let auth = service();
        let (token, expires_at) = auth.login("admin", "hunter2").unwrap();
        assert!(expires_at > Utc::now());
        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn wrong_credentials_are_unauthorized() {
        let auth = service();
        assert!(matches!(auth.login("admin", "nope"), Err(Error::Unauthorized(_))));
        assert!(matches!(auth.login("root", "hunter2"), Err(Error::Unauthorized(_))));
    }

    #[test]
    fn expired_or_foreign_tokens_are_rejected() {
        let auth = service();
        let expired = auth
            .issue_token("admin", Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(matches!(auth.verify(&expired), Err(Error::Unauthorized(_))));

        let mut other = service();
        other.jwt_secret = "another-secret".into();
        let foreign = other
            .issue_token("admin", Utc::now() + Duration::hours(1))
            .unwrap();
        assert!(matches!(auth.verify(&foreign), Err(Error::Unauthorized(_))));
    }
}
