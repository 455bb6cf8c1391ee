//! Task statistics for a single user.
//!
//! [`compute_stats`] is a pure function over a snapshot of the task list and
//! a caller-supplied `now`, so the same input always yields the same summary.
//! [`user_task_stats`] adds the lookup through an injected [`UserStore`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskStatus};
use crate::store::{fetch_user_tasks, UserStore};

const MILLIS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// Aggregates over the pending tasks of one priority level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityStats {
    /// Sum of hours elapsed since each task's start (never negative per task).
    pub lapsed_time: f64,
    /// Sum of hours left until each task's end (never negative per task).
    pub balance_time: f64,
    pub count: u64,
}

/// Summary returned by `GET /api/tasks/stats`.
///
/// Percentages and the average are pre-formatted with two decimals. With no
/// tasks at all both percentages are `"NaN"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_tasks: usize,
    pub completed_percent: String,
    pub pending_percent: String,
    /// Keyed by priority; serialized as a JSON object with keys in ascending order.
    pub pending_stats: BTreeMap<u8, PriorityStats>,
    pub avg_completion_time: String,
}

/// Computes the statistics of `tasks` as seen at `now`.
///
/// `avgCompletionTime` divides by the number of finished tasks, or by 1 when
/// there are none, so an empty set yields `"0.00"`.
pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let total_tasks = tasks.len();
    let mut completed = 0usize;
    let mut pending = 0usize;
    let mut completion_hours = 0.0;
    let mut pending_stats: BTreeMap<u8, PriorityStats> = BTreeMap::new();

    for task in tasks {
        match task.status {
            TaskStatus::Finished => {
                completed += 1;
                completion_hours += hours_between(task.start_time, task.end_time);
            }
            TaskStatus::Pending => {
                pending += 1;
                let entry = pending_stats.entry(task.priority).or_default();
                entry.lapsed_time += hours_between(task.start_time, now).max(0.0);
                entry.balance_time += hours_between(now, task.end_time).max(0.0);
                entry.count += 1;
            }
        }
    }

    TaskStats {
        total_tasks,
        completed_percent: fixed2(percent(completed, total_tasks)),
        pending_percent: fixed2(percent(pending, total_tasks)),
        pending_stats,
        avg_completion_time: fixed2(completion_hours / completed.max(1) as f64),
    }
}

/// Fetches the user's tasks from `store` and computes their statistics.
pub async fn user_task_stats(
    store: &dyn UserStore,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<TaskStats, AppError> {
    let tasks = fetch_user_tasks(store, user_id).await?;
    let stats = compute_stats(&tasks, now);
    log::debug!(
        "Computed stats for user {} over {} tasks",
        user_id,
        stats.total_tasks
    );
    Ok(stats)
}

/// Signed hours from `from` to `to`. Both instants are truncated to whole
/// milliseconds before subtracting.
fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to.timestamp_millis() - from.timestamp_millis()) as f64 / MILLIS_PER_HOUR
}

/// `part / total * 100`; `NaN` when `total` is zero.
fn percent(part: usize, total: usize) -> f64 {
    part as f64 / total as f64 * 100.0
}

/// Two-decimal text that rounds an exact midpoint away from zero.
///
/// `{:.2}` already rounds the exact binary value, so only midpoints need
/// care. A midpoint of two decimals is exactly representable only as an odd
/// number of eighths (`x.125`, `x.375`, `x.625`, `x.875`).
fn fixed2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (value.abs() * 100.0 + 0.5).floor();
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{:.2}", sign, cents / 100.0);
    }
    format!("{:.2}", value)
}
