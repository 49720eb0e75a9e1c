use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cookie carrying the dashboard session token.
pub const SESSION_COOKIE: &str = "no_session";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // auth user id
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::AuthError("Invalid session subject".to_string()))
    }
}

#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionTokenService {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_seconds);

        let claims = SessionClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = SessionTokenService::new("test-secret", 3600);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "ada@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "ada@x.com");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = SessionTokenService::new("secret-a", 3600);
        let verifier = SessionTokenService::new("secret-b", 3600);

        let token = issuer.issue(Uuid::new_v4(), "ada@x.com").unwrap();
        assert!(verifier.verify(&token).is_err());
    }
}
