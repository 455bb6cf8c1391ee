use futures::future::BoxFuture;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::UserStore;
use crate::error::AppError;
use crate::models::{NewUser, Task, User};

const USER_COLUMNS: &str = "id, username, email, password_hash, tasks";

/// Row shape of the `users` table; `tasks` is a JSONB array.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    tasks: Json<Vec<Task>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            tasks: row.tasks.0,
        }
    }
}

/// `UserStore` backed by PostgreSQL. Each user is one row and its task list
/// is rewritten whole on every change.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UserStore for PgUserStore {
    fn insert_user(&self, user: NewUser) -> BoxFuture<'_, Result<User, AppError>> {
        Box::pin(async move {
            let user = user.into_user();
            let row = sqlx::query_as::<_, UserRow>(&format!(
                "INSERT INTO users (id, username, email, password_hash, tasks) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {}",
                USER_COLUMNS
            ))
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(Json(&user.tasks))
            .fetch_one(&self.pool)
            .await?;
            Ok(row.into())
        })
    }

    fn find_user_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Option<User>, AppError>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {} FROM users WHERE email = $1",
                USER_COLUMNS
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(User::from))
        })
    }

    fn find_user_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<User>, AppError>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {} FROM users WHERE id = $1",
                USER_COLUMNS
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(User::from))
        })
    }

    fn save_tasks<'a>(
        &'a self,
        user_id: Uuid,
        tasks: &'a [Task],
    ) -> BoxFuture<'a, Result<(), AppError>> {
        Box::pin(async move {
            let result = sqlx::query("UPDATE users SET tasks = $2 WHERE id = $1")
                .bind(user_id)
                .bind(Json(tasks))
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("User not found".into()));
            }
            Ok(())
        })
    }
}
