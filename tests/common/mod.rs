#![allow(dead_code)]

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App, Error};
use serde_json::json;
use tasktally::auth::{AuthResponse, AuthSettings};
use tasktally::routes::{self, health};
use tasktally::store::{MemoryUserStore, UserStore};

pub const TEST_SECRET: &str = "integration_test_secret";

/// Shared state behind one test application.
#[derive(Clone)]
pub struct TestContext {
    pub store: Arc<MemoryUserStore>,
    pub settings: web::Data<AuthSettings>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryUserStore::new()),
            // Minimum bcrypt cost keeps registration fast in tests.
            settings: web::Data::new(AuthSettings::new(TEST_SECRET, 3, 4)),
        }
    }

    /// The same app layout `main` serves, backed by the in-memory store.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn UserStore> = self.store.clone();
        App::new()
            .app_data(web::Data::from(store))
            .app_data(self.settings.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers a user and returns its bearer token.
pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
    >,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String, String> {
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let auth: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;
    Ok(auth.token)
}

/// Adds a task and returns the full task list from the response.
pub async fn add_task(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
    >,
    token: &str,
    payload: serde_json::Value,
) -> serde_json::Value {
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(token))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::CREATED,
        "failed to add task {}",
        payload
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["task"].clone()
}
