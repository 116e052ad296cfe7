use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// This is a plain label: any status may be replaced by any other, there is
/// no enforced transition graph.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// Input structure for creating or updating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    /// The title of the task. Must be between 1 and 120 characters.
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    /// An optional description, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The status of the task.
    pub status: TaskStatus,

    /// Optional due date for the task (calendar date, no time component).
    pub due_date: Option<NaiveDate>,
}

/// Represents a task entity as stored in the task store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// Username of the user who owns the task. Immutable after creation.
    pub owner_id: String,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Optional due date for the task.
    pub due_date: Option<NaiveDate>,
    /// Timestamp of when the task was created. Immutable after creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from a `TaskRequest` and the creator's identity.
    /// Sets `created_at` and `updated_at` to the same instant and `id` to a
    /// fresh UUID.
    pub fn new(input: TaskRequest, owner_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            title: input.title,
            description: input.description,
            status: input.status,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an update request to this task: title, description, status and
    /// due date are replaced wholesale and `updated_at` is refreshed.
    /// `id`, `owner_id` and `created_at` are left untouched.
    pub fn apply(&mut self, input: TaskRequest) {
        self.title = input.title;
        self.description = input.description;
        self.status = input.status;
        self.due_date = input.due_date;
        self.updated_at = Utc::now();
    }
}

/// Wire representation of a single task, as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Wire representation of one page of tasks plus navigation metadata.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub tasks: Vec<TaskView>,
    pub total_tasks: u64,
    pub current_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Query parameters accepted by the task list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListQuery {
    /// Filter tasks by status.
    pub status: Option<TaskStatus>,
    /// 0-based page index.
    #[serde(default)]
    pub page: i64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}
