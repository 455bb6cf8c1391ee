pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::Config;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, JwtKeys};

/// Everything the auth layer needs at request time, shared as app data.
#[derive(Clone)]
pub struct AuthSettings {
    pub keys: JwtKeys,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: &str, token_ttl_hours: i64, bcrypt_cost: u32) -> Self {
        Self {
            keys: JwtKeys::new(jwt_secret, token_ttl_hours),
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.token_ttl_hours,
            config.bcrypt_cost,
        )
    }
}

/// Payload of `POST /api/login`.
///
/// The email is not checked for syntax; an unknown address is a failed login.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Payload of `POST /api/register`.
///
/// Fields must be present and non-empty; their content is free-form.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body returned by register and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        // Syntax is left to the lookup, which simply finds no account.
        let odd_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(odd_email_login.validate().is_ok());

        let empty_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let free_form_register = RegisterRequest {
            username: "John Doe".to_string(),
            email: "john".to_string(),
            password: "pw".to_string(),
        };
        assert!(free_form_register.validate().is_ok());

        for (username, email, password) in [
            ("", "test@example.com", "password123"),
            ("test_user", "", "password123"),
            ("test_user", "test@example.com", ""),
        ] {
            let request = RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            };
            assert!(request.validate().is_err(), "{:?}", request);
        }
    }

    #[test]
    fn test_auth_settings_from_config() {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://test".to_string()),
            "JWT_SECRET" => Some("config_secret".to_string()),
            "BCRYPT_COST" => Some("4".to_string()),
            _ => None,
        })
        .unwrap();

        let settings = AuthSettings::from_config(&config);
        assert_eq!(settings.bcrypt_cost, 4);

        let user = crate::models::NewUser {
            username: "cfg_user".to_string(),
            email: "cfg@example.com".to_string(),
            password_hash: "hash".to_string(),
        }
        .into_user();
        let token = settings.keys.generate_token(&user).unwrap();
        let claims = JwtKeys::new("config_secret", 3).verify_token(&token).unwrap();
        assert_eq!(claims.id, user.id);
    }
}
