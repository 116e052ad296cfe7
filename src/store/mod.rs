//!
//! # Persistence Stores
//!
//! Store traits sit between the services and the persistence layer so the
//! services can be composed explicitly at startup and exercised in tests
//! without a running database. `postgres` holds the production
//! implementations backed by `sqlx`; `memory` holds hashmap-backed ones used
//! by the integration test suites.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskStatus, User};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

/// Persists username + password-hash pairs.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by exact, case-sensitive username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Inserts a new user. Fails with `AppError::DuplicateUser` if the
    /// username is already taken; uniqueness is enforced by the store itself,
    /// not by a prior lookup.
    async fn insert(&self, user: User) -> Result<(), AppError>;
}

/// Persists task records keyed by id, queryable by owner with optional
/// status filtering, pagination and creation-time ordering.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: Task) -> Result<(), AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// Replaces the stored record with the given task (matched by id).
    async fn replace(&self, task: Task) -> Result<(), AppError>;

    async fn remove(&self, id: Uuid) -> Result<(), AppError>;

    /// Returns one page of the owner's tasks, newest first, together with the
    /// total number of matching tasks. `page` is 0-based.
    async fn page_by_owner(
        &self,
        owner_id: &str,
        status: Option<TaskStatus>,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Task>, u64), AppError>;
}
