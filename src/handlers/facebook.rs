//! Facebook OAuth HTTP Handlers

use actix_web::{post, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::oauth::{FacebookLoginRequest, FacebookSignupRequest};
use crate::services::oauth::FacebookService;

/// Facebook 로그인 핸들러
///
/// # Endpoint
/// `POST /facebook/login`
#[post("/login")]
pub async fn facebook_login(
    payload: web::Json<FacebookLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let facebook_service = FacebookService::instance();

    let tokens = facebook_service.login(&payload.facebook_auth_token).await?;

    Ok(HttpResponse::Ok().json(json!({
        "result": true,
        "auth_token": tokens.auth_token,
        "refresh_token": tokens.refresh_token,
        "exp_time": tokens.exp_time,
    })))
}

/// Facebook 가입 핸들러
///
/// # Endpoint
/// `POST /facebook/signup`
#[post("/signup")]
pub async fn facebook_signup(
    payload: web::Json<FacebookSignupRequest>,
) -> Result<HttpResponse, AppError> {
    let facebook_service = FacebookService::instance();

    let payload = payload.into_inner();
    facebook_service
        .signup(&payload.facebook_auth_token, payload.profile)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}
