//!
//! # Task Service
//!
//! Ownership-scoped CRUD over the task store. Every operation takes the
//! caller's identity explicitly; there is no ambient security context. The
//! service checks existence before ownership, so a missing task is always a
//! `NotFound` even when the caller never owned it, and a task owned by
//! someone else is a `Forbidden`.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ListQuery, Task, TaskPage, TaskRequest, TaskView};
use crate::store::TaskStore;

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Creates a task owned by the caller. `created_at` and `updated_at`
    /// start equal; the owner is always the caller, never taken from the
    /// request body.
    pub async fn create(&self, owner_id: &str, request: TaskRequest) -> Result<TaskView, AppError> {
        let task = Task::new(request, owner_id);
        self.store.insert(task.clone()).await?;
        Ok(task.into())
    }

    /// Returns one page of the caller's tasks, newest first, with navigation
    /// metadata derived from the total count and page size.
    pub async fn list(&self, owner_id: &str, query: ListQuery) -> Result<TaskPage, AppError> {
        if query.page < 0 {
            return Err(AppError::Validation("page must not be negative".into()));
        }
        if query.size < 1 || query.size > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        // The store offset is page * size; a page index large enough to
        // overflow it cannot address any task.
        if query.page.checked_mul(query.size).is_none() {
            return Err(AppError::Validation("page is out of range".into()));
        }

        let (tasks, total) = self
            .store
            .page_by_owner(owner_id, query.status, query.page, query.size)
            .await?;

        let total_pages = (total as i64 + query.size - 1) / query.size;
        Ok(TaskPage {
            tasks: tasks.into_iter().map(TaskView::from).collect(),
            total_tasks: total,
            current_page: query.page,
            total_pages,
            has_next: query.page < total_pages - 1,
            has_previous: query.page > 0,
        })
    }

    pub async fn get(&self, owner_id: &str, id: Uuid) -> Result<TaskView, AppError> {
        let task = self.find_owned(owner_id, id).await?;
        Ok(task.into())
    }

    /// Replaces title, description, status and due date wholesale and
    /// refreshes `updated_at`. `id`, `owner_id` and `created_at` are
    /// immutable.
    pub async fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        request: TaskRequest,
    ) -> Result<TaskView, AppError> {
        let mut task = self.find_owned(owner_id, id).await?;
        task.apply(request);
        self.store.replace(task.clone()).await?;
        Ok(task.into())
    }

    /// Removes the task permanently. No soft delete.
    pub async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), AppError> {
        let task = self.find_owned(owner_id, id).await?;
        self.store.remove(task.id).await
    }

    /// Shared lookup policy: `NotFound` if the id does not exist, `Forbidden`
    /// if it exists under a different owner. Existence is checked first.
    async fn find_owned(&self, owner_id: &str, id: Uuid) -> Result<Task, AppError> {
        let task = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        if task.owner_id != owner_id {
            return Err(AppError::Forbidden("Not your task".into()));
        }
        Ok(task)
    }
}
