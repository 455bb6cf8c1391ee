use std::collections::HashMap;

use futures::future::BoxFuture;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserStore;
use crate::error::AppError;
use crate::models::{NewUser, Task, User};

/// Process-local store used by tests and local experiments.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes an account, returning whether it existed.
    pub async fn remove_user(&self, id: Uuid) -> bool {
        self.users.write().await.remove(&id).is_some()
    }
}

impl UserStore for MemoryUserStore {
    fn insert_user(&self, user: NewUser) -> BoxFuture<'_, Result<User, AppError>> {
        Box::pin(async move {
            let mut users = self.users.write().await;
            if users.values().any(|existing| existing.email == user.email) {
                return Err(AppError::DatabaseError(format!(
                    "email {} is already registered",
                    user.email
                )));
            }
            let user = user.into_user();
            users.insert(user.id, user.clone());
            Ok(user)
        })
    }

    fn find_user_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Option<User>, AppError>> {
        Box::pin(async move {
            let users = self.users.read().await;
            Ok(users.values().find(|user| user.email == email).cloned())
        })
    }

    fn find_user_by_id(&self, id: Uuid) -> BoxFuture<'_, Result<Option<User>, AppError>> {
        Box::pin(async move { Ok(self.users.read().await.get(&id).cloned()) })
    }

    fn save_tasks<'a>(
        &'a self,
        user_id: Uuid,
        tasks: &'a [Task],
    ) -> BoxFuture<'a, Result<(), AppError>> {
        Box::pin(async move {
            let mut users = self.users.write().await;
            let user = users
                .get_mut(&user_id)
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;
            user.tasks = tasks.to_vec();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use crate::store::{fetch_user, fetch_user_tasks};
    use chrono::Utc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "memory_user".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_insert_and_lookup() {
        let store = MemoryUserStore::new();
        let user = store.insert_user(new_user("a@example.com")).await.unwrap();

        let by_email = store.find_user_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let by_id = store.find_user_by_id(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some("a@example.com".to_string()));

        assert!(store.find_user_by_email("b@example.com").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();
        store.insert_user(new_user("dup@example.com")).await.unwrap();

        let err = store.insert_user(new_user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[actix_rt::test]
    async fn test_save_tasks_replaces_list() {
        let store = MemoryUserStore::new();
        let user = store.insert_user(new_user("tasks@example.com")).await.unwrap();
        let now = Utc::now();
        let task = Task {
            task_id: 1,
            title: "Stored".to_string(),
            priority: 2,
            status: TaskStatus::Pending,
            start_time: now,
            end_time: now,
        };

        store.save_tasks(user.id, &[task.clone()]).await.unwrap();
        assert_eq!(fetch_user_tasks(&store, user.id).await.unwrap(), vec![task]);

        store.save_tasks(user.id, &[]).await.unwrap();
        assert!(fetch_user_tasks(&store, user.id).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_missing_user() {
        let store = MemoryUserStore::new();
        let missing = Uuid::new_v4();

        match fetch_user(&store, missing).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "User not found"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(store.save_tasks(missing, &[]).await.is_err());
        assert!(!store.remove_user(missing).await);
    }
}
