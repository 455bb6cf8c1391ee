use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{next_task_id, NewTaskRequest, UpdateTaskRequest},
    stats::user_task_stats,
    store::{fetch_user, fetch_user_tasks, UserStore},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Adds a task to the authenticated user's list.
///
/// The new task gets `taskID` = highest existing id + 1 (1 for an empty list).
///
/// ## Request Body:
/// `{title, priority, status, startTime, endTime}`, all required.
///
/// ## Responses:
/// - `201 Created`: `{message, task}` where `task` is the user's full task list.
/// - `400 Bad Request`: A field is missing or `priority` is outside 1..=5.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: The token's user no longer exists.
#[post("")]
pub async fn add_task(
    store: web::Data<dyn UserStore>,
    user: AuthenticatedUser,
    task_data: web::Json<NewTaskRequest>,
) -> Result<impl Responder, AppError> {
    let new_task = task_data.into_inner().into_new_task()?;

    let mut owner = fetch_user(store.get_ref(), user.id()).await?;
    let task = new_task.into_task(next_task_id(&owner.tasks));
    log::debug!("Adding task {} for user {}", task.task_id, owner.id);
    owner.tasks.push(task);
    store.save_tasks(owner.id, &owner.tasks).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Task added successfully",
        "task": owner.tasks
    })))
}

/// Lists all tasks of the authenticated user, in insertion order.
#[get("")]
pub async fn get_all_tasks(
    store: web::Data<dyn UserStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = fetch_user_tasks(store.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Changes the status of one task.
///
/// ## Request Body:
/// `{taskID, status}`.
///
/// ## Responses:
/// - `200 OK`: `{message, task}` with the updated task.
/// - `404 Not Found`: No task with that id, or the user no longer exists.
#[put("")]
pub async fn update_task(
    store: web::Data<dyn UserStore>,
    user: AuthenticatedUser,
    update: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let UpdateTaskRequest { task_id, status } = update.into_inner();
    let mut owner = fetch_user(store.get_ref(), user.id()).await?;

    let task = owner
        .tasks
        .iter_mut()
        .find(|t| t.task_id == task_id)
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    task.status = status;
    let task = task.clone();

    store.save_tasks(owner.id, &owner.tasks).await?;
    log::debug!("Task {} of user {} is now {:?}", task_id, owner.id, status);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated successfully",
        "task": task
    })))
}

/// Removes every task whose id equals the path segment.
///
/// An id that matches nothing (including a non-numeric one) leaves the list
/// unchanged and still reports success.
#[delete("/{task_id}")]
pub async fn delete_task(
    store: web::Data<dyn UserStore>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner().trim().parse::<i64>().ok();
    let mut owner = fetch_user(store.get_ref(), user.id()).await?;

    owner.tasks.retain(|t| Some(t.task_id) != task_id);
    store.save_tasks(owner.id, &owner.tasks).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}

/// Returns the [`TaskStats`](crate::stats::TaskStats) of the authenticated user's tasks.
#[get("/stats")]
pub async fn task_stats(
    store: web::Data<dyn UserStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let stats = user_task_stats(store.get_ref(), user.id(), Utc::now()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
