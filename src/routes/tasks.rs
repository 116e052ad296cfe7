use crate::{
    auth::Identity,
    error::AppError,
    models::{ListQuery, TaskRequest},
    tasks::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Task ids are opaque strings on the wire; one that does not parse as a
/// UUID cannot name any stored task, so it is reported as not found rather
/// than as a malformed request.
fn parse_task_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Task not found".into()))
}

/// Creates a new task for the authenticated user.
///
/// The owner of the task is always the authenticated identity; it cannot be
/// supplied in the body.
///
/// ## Responses:
/// - `200 OK`: the created task view.
/// - `400 Bad Request`: invalid body.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    identity: Identity,
    task_data: web::Json<TaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let view = tasks.create(&identity.0, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Lists the authenticated user's tasks, paginated and newest first.
///
/// ## Query Parameters:
/// - `status` (optional): filter by `TODO`, `IN_PROGRESS` or `DONE`.
/// - `page` (optional, default 0): 0-based page index.
/// - `size` (optional, default 10): page size, 1 to 100.
///
/// ## Responses:
/// - `200 OK`: a page of task views plus navigation metadata.
/// - `400 Bad Request`: unparseable or out-of-range paging parameters.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    tasks: web::Data<TaskService>,
    identity: Identity,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, AppError> {
    let page = tasks.list(&identity.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Retrieves a single task by id.
///
/// ## Responses:
/// - `200 OK`: the task view.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with that id exists (a malformed id names
///   no task and falls under this case too).
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    identity: Identity,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    let view = tasks.get(&identity.0, id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Updates a task: title, description, status and due date are replaced
/// wholesale. Same lookup policy as `get_task`.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    identity: Identity,
    task_id: web::Path<String>,
    task_data: web::Json<TaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let id = parse_task_id(&task_id)?;
    let view = tasks
        .update(&identity.0, id, task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Deletes a task permanently. Same lookup policy as `get_task`.
///
/// ## Responses:
/// - `200 OK`: empty body on success.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    identity: Identity,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;
    tasks.delete(&identity.0, id).await?;
    Ok(HttpResponse::Ok().finish())
}
