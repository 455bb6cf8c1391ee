use crate::{
    auth::{hash_password, verify_password, AuthResponse, AuthSettings, LoginRequest, RegisterRequest},
    error::AppError,
    models::NewUser,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates the account with an empty task list and returns a bearer token.
/// An email that is already registered is rejected with 400.
#[post("/register")]
pub async fn register(
    store: web::Data<dyn UserStore>,
    settings: web::Data<AuthSettings>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let RegisterRequest {
        username,
        email,
        password,
    } = register_data.into_inner();

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&password, settings.bcrypt_cost)?;
    let user = store
        .insert_user(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    let token = settings.keys.generate_token(&user)?;
    log::info!("Registered user {} <{}>", user.id, user.email);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".into(),
        token,
    }))
}

/// Login user
///
/// Exchanges email and password for a bearer token. Unknown emails and wrong
/// passwords get the same 401 response.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn UserStore>,
    settings: web::Data<AuthSettings>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = match store.find_user_by_email(&login_data.email).await? {
        Some(user) if verify_password(&login_data.password, &user.password_hash)? => user,
        _ => {
            log::warn!("Failed login attempt for {}", login_data.email);
            return Err(AppError::Unauthorized("Invalid email or password".into()));
        }
    };

    let token = settings.keys.generate_token(&user)?;
    log::info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".into(),
        token,
    }))
}
