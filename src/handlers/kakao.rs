//! Kakao OAuth HTTP Handlers
//!
//! Kakao 오픈 SDK가 클라이언트에 발급한 액세스 토큰을 받아
//! 서버 측 검증 후 로컬 세션으로 교환합니다.

use actix_web::{post, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::oauth::{KakaoLoginRequest, KakaoSignupRequest};
use crate::services::oauth::KakaoService;

/// Kakao 로그인 핸들러
///
/// # Endpoint
/// `POST /kakao/login`
#[post("/login")]
pub async fn kakao_login(payload: web::Json<KakaoLoginRequest>) -> Result<HttpResponse, AppError> {
    let kakao_service = KakaoService::instance();

    let tokens = kakao_service.login(&payload.kakao_auth_token).await?;

    Ok(HttpResponse::Ok().json(json!({
        "result": true,
        "auth_token": tokens.auth_token,
        "refresh_token": tokens.refresh_token,
        "exp_time": tokens.exp_time,
    })))
}

/// Kakao 가입 핸들러
///
/// # Endpoint
/// `POST /kakao/signup`
#[post("/signup")]
pub async fn kakao_signup(
    payload: web::Json<KakaoSignupRequest>,
) -> Result<HttpResponse, AppError> {
    let kakao_service = KakaoService::instance();

    let payload = payload.into_inner();
    kakao_service
        .signup(&payload.kakao_auth_token, payload.profile)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}
