use crate::{
    auth::{AuthService, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. Returns a plain-text confirmation; the client
/// logs in separately to obtain a token.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    auth.register(&register_data.username, &register_data.password)
        .await?;

    Ok(HttpResponse::Ok().body("User registered successfully!"))
}

/// Login user
///
/// Authenticates a user and returns the bearer token as a raw string body.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth
        .login(&login_data.username, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().body(token))
}
