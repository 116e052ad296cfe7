use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the authenticated username.
    pub sub: String,
    /// Issue timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed, time-bound identity tokens.
///
/// The signing secret and token lifetime are supplied at construction (from
/// `Config`), so neither issuing nor verification touches the environment.
/// Tokens are self-contained: verification needs only the secret, no store
/// lookup.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours,
        }
    }

    /// Produces a signed token embedding the username and an expiration.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::hours(self.ttl_hours))
            .ok_or_else(|| AppError::Internal("token expiration overflow".into()))?;

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiration and returns the decoded claims.
    /// Fails with `AppError::InvalidToken` if the token is malformed, its
    /// signature does not match, or it has expired. Absent tokens never reach
    /// this method; the caller decides that policy.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::InvalidToken(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trips_its_subject() {
        let service = TokenService::new("test_secret_for_gen_verify", 24);
        let token = service.issue("alice").unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_ne!(claims.sub, "bob");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_expiration() {
        let service = TokenService::new("test_secret_for_expiration", 24);

        // Encode claims that expired two hours ago with the same secret. The
        // default validation applies 60 seconds of leeway, so two hours is
        // comfortably past it.
        let expired = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;
        let claims = Claims {
            sub: "bob".to_string(),
            iat: expired,
            exp: expired,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        match service.verify(&expired_token) {
            Err(AppError::InvalidToken(msg)) => {
                assert!(
                    msg.contains("ExpiredSignature"),
                    "unexpected message for expired token: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = TokenService::new("secret_one", 24);
        let verifier = TokenService::new("a_completely_different_secret", 24);

        let token = issuer.issue("alice").unwrap();
        match verifier.verify(&token) {
            Err(AppError::InvalidToken(msg)) => {
                assert!(
                    msg.contains("InvalidSignature") || msg.contains("InvalidToken"),
                    "unexpected message for signature mismatch: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = TokenService::new("some_secret", 24);
        assert!(matches!(
            service.verify("not-a-jwt-at-all"),
            Err(AppError::InvalidToken(_))
        ));
    }
}
