use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user as held by the credential store.
///
/// Users are immutable after registration; there is no update or delete path.
/// Only the bcrypt hash of the password is ever stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}
