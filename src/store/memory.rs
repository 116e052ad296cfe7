use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskStatus, User};
use crate::store::{TaskStore, UserStore};

/// In-memory credential store. Used by the integration tests; the locks are
/// never held across await points.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> AppError {
        AppError::Internal("user store lock poisoned".into())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| Self::lock_poisoned())?;
        Ok(users.get(username).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), AppError> {
        let mut users = self.users.write().map_err(|_| Self::lock_poisoned())?;
        if users.contains_key(&user.username) {
            return Err(AppError::DuplicateUser("Username already exists".into()));
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }
}

/// In-memory task store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> AppError {
        AppError::Internal("task store lock poisoned".into())
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().map_err(|_| Self::lock_poisoned())?;
        tasks.insert(task.id, task);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().map_err(|_| Self::lock_poisoned())?;
        Ok(tasks.get(&id).cloned())
    }

    async fn replace(&self, task: Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().map_err(|_| Self::lock_poisoned())?;
        match tasks.get_mut(&task.id) {
            Some(stored) => {
                *stored = task;
                Ok(())
            }
            None => Err(AppError::NotFound("Task not found".into())),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().map_err(|_| Self::lock_poisoned())?;
        match tasks.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Task not found".into())),
        }
    }

    async fn page_by_owner(
        &self,
        owner_id: &str,
        status: Option<TaskStatus>,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Task>, u64), AppError> {
        let tasks = self.tasks.read().map_err(|_| Self::lock_poisoned())?;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();

        // Newest first; ties broken by id so the ordering is total and pages
        // never overlap.
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        // Saturate rather than overflow; an unaddressable offset is simply
        // past the end.
        let offset = usize::try_from(page.saturating_mul(size)).unwrap_or(usize::MAX);
        let slice = matching
            .into_iter()
            .skip(offset)
            .take(size as usize)
            .collect();
        Ok((slice, total))
    }
}
