use uuid::Uuid;

use super::task::Task;

/// A registered account together with its embedded task list.
///
/// Not `Serialize`: the password hash must never reach a response body.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub tasks: Vec<Task>,
}

/// Account data for a user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Assigns a fresh id and an empty task list.
    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            tasks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_without_tasks() {
        let new_user = NewUser {
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
        };

        let first = new_user.clone().into_user();
        let second = new_user.into_user();

        assert!(first.tasks.is_empty());
        assert_eq!(first.email, "test@example.com");
        assert_ne!(first.id, second.id);
    }
}
