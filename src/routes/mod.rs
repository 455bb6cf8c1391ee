pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers the `/api` routes. Task routes require a bearer token.
///
/// Expects `web::Data<dyn UserStore>` and `web::Data<AuthSettings>` in the
/// app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(auth::register)
    .service(auth::login)
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::task_stats)
            .service(tasks::get_all_tasks)
            .service(tasks::add_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
