//! Data access for user records and their embedded task lists.
//!
//! Handlers never talk to the database directly: they receive a
//! `web::Data<dyn UserStore>` so the same code runs against PostgreSQL in
//! production and against [`MemoryUserStore`] in tests.

pub mod memory;
pub mod postgres;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, User};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Persistence operations needed by the API.
///
/// A user's task list is read and written as a whole; concurrent writers for
/// the same user are not coordinated and the last write wins.
pub trait UserStore: Send + Sync {
    /// Stores a new account. Fails if the email is already taken.
    fn insert_user(&self, user: NewUser) -> BoxFuture<'_, Result<User, AppError>>;

    fn find_user_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Option<User>, AppError>>;

    fn find_user_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<User>, AppError>>;

    /// Replaces the user's task list with `tasks`.
    fn save_tasks<'a>(
        &'a self,
        user_id: Uuid,
        tasks: &'a [Task],
    ) -> BoxFuture<'a, Result<(), AppError>>;
}

/// Loads a user, mapping absence to `AppError::NotFound("User not found")`.
pub async fn fetch_user(store: &dyn UserStore, user_id: Uuid) -> Result<User, AppError> {
    store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Loads only the task list of a user.
pub async fn fetch_user_tasks(store: &dyn UserStore, user_id: Uuid) -> Result<Vec<Task>, AppError> {
    fetch_user(store, user_id).await.map(|user| user.tasks)
}
