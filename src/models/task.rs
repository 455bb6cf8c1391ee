use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Lifecycle state of a task.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not done yet; contributes to `pendingStats`.
    Pending,
    /// Done; contributes to `avgCompletionTime`.
    Finished,
}

/// A task embedded in its owner's task list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the owner's list; never reused while a higher id exists.
    #[serde(rename = "taskID")]
    pub task_id: i64,
    pub title: String,
    /// Priority level in `1..=5`.
    pub priority: u8,
    pub status: TaskStatus,
    pub start_time: DateTime<Utc>,
    /// May precede `start_time`; the ordering is not validated.
    pub end_time: DateTime<Utc>,
}

/// Payload of `POST /api/tasks`.
///
/// Every field is optional at the deserialization layer so that a missing
/// field produces the "All fields are required" error instead of a serde one.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    pub title: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: Option<i64>,
    pub status: Option<TaskStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Payload of `PUT /api/tasks`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(rename = "taskID")]
    pub task_id: i64,
    pub status: TaskStatus,
}

/// A fully validated task that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub priority: u8,
    pub status: TaskStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewTaskRequest {
    /// Checks presence first, then the priority range.
    ///
    /// An empty title and a priority of 0 count as missing.
    pub fn into_new_task(self) -> Result<NewTask, AppError> {
        let complete = matches!(self.title.as_deref(), Some(title) if !title.is_empty())
            && matches!(self.priority, Some(priority) if priority != 0)
            && self.status.is_some()
            && self.start_time.is_some()
            && self.end_time.is_some();
        if !complete {
            return Err(AppError::BadRequest("All fields are required".into()));
        }

        self.validate().map_err(first_validation_message)?;

        match self {
            NewTaskRequest {
                title: Some(title),
                priority: Some(priority),
                status: Some(status),
                start_time: Some(start_time),
                end_time: Some(end_time),
            } => Ok(NewTask {
                title,
                priority: u8::try_from(priority).map_err(|_| {
                    AppError::ValidationError("Priority must be between 1 and 5".into())
                })?,
                status,
                start_time,
                end_time,
            }),
            _ => Err(AppError::BadRequest("All fields are required".into())),
        }
    }
}

/// Surfaces the custom rule message (if any) rather than the full error dump.
fn first_validation_message(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()));
    match message {
        Some(message) => AppError::ValidationError(message),
        None => AppError::from(errors),
    }
}

impl NewTask {
    pub fn into_task(self, task_id: i64) -> Task {
        Task {
            task_id,
            title: self.title,
            priority: self.priority,
            status: self.status,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Next id for a task appended to `tasks`: one past the highest id, or 1.
pub fn next_task_id(tasks: &[Task]) -> i64 {
    tasks.iter().map(|t| t.task_id).max().unwrap_or(0) + 1
}
