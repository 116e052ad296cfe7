use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::User;
use crate::store::UserStore;

/// Registers users and exchanges credentials for bearer tokens.
///
/// Composed at startup from a credential store and a token service; no
/// dependency is resolved ambiently.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Creates a new user. Only a one-way hash of the password is stored.
    /// Fails with `AppError::DuplicateUser` if the username is already taken
    /// (case-sensitive exact match, enforced by the store insert).
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let password_hash = hash_password(password)?;
        self.users
            .insert(User {
                username: username.to_string(),
                password_hash,
            })
            .await
    }

    /// Verifies credentials and issues a fresh token on success.
    /// An unknown username and a wrong password both fail with the same
    /// `AppError::InvalidCredentials` message so the caller cannot tell them
    /// apart.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self.users.find_by_username(username).await?;
        match user {
            Some(user) if verify_password(password, &user.password_hash)? => {
                self.tokens.issue(&user.username)
            }
            _ => Err(AppError::InvalidCredentials("Invalid credentials".into())),
        }
    }
}
