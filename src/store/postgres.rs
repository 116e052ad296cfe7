use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskStatus, User};
use crate::store::{TaskStore, UserStore};

// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Credential store backed by the `users` table (see `schema.sql`).
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: User) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    AppError::DuplicateUser("Username already exists".into())
                }
                _ => AppError::from(e),
            })?;
        Ok(())
    }
}

/// Task store backed by the `tasks` table.
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, task: Task) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO tasks (id, owner_id, title, description, status, due_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(task.id)
        .bind(&task.owner_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, owner_id, title, description, status, due_date, created_at, updated_at
             FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn replace(&self, task: Task) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tasks
             SET title = $1, description = $2, status = $3, due_date = $4, updated_at = $5
             WHERE id = $6",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.updated_at)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    async fn page_by_owner(
        &self,
        owner_id: &str,
        status: Option<TaskStatus>,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Task>, u64), AppError> {
        let mut count_sql = String::from("SELECT COUNT(*) FROM tasks WHERE owner_id = $1");
        let mut page_sql = String::from(
            "SELECT id, owner_id, title, description, status, due_date, created_at, updated_at
             FROM tasks WHERE owner_id = $1",
        );
        if status.is_some() {
            count_sql.push_str(" AND status = $2");
            page_sql.push_str(" AND status = $2");
        }
        page_sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner_id);
        if let Some(status) = status {
            count_query = count_query.bind(status);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        match status {
            Some(status) => {
                page_sql.push_str(" LIMIT $3 OFFSET $4");
                let tasks = sqlx::query_as::<_, Task>(&page_sql)
                    .bind(owner_id)
                    .bind(status)
                    .bind(size)
                    .bind(page.saturating_mul(size))
                    .fetch_all(&self.pool)
                    .await?;
                Ok((tasks, total as u64))
            }
            None => {
                page_sql.push_str(" LIMIT $2 OFFSET $3");
                let tasks = sqlx::query_as::<_, Task>(&page_sql)
                    .bind(owner_id)
                    .bind(size)
                    .bind(page.saturating_mul(size))
                    .fetch_all(&self.pool)
                    .await?;
                Ok((tasks, total as u64))
            }
        }
    }
}
