//! Authentication HTTP Handlers
//!
//! 계정 수명주기와 세션 관리 엔드포인트 핸들러입니다.
//! 로그인 응답의 토큰 쌍은 이후 모든 보호 엔드포인트에서 사용되며,
//! Authorization 헤더에는 토큰 문자열이 그대로 담깁니다.

use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::config::Environment;
use crate::core::errors::AppError;
use crate::domain::dto::auth::{
    LoginRequest, RefreshTokenRequest, ResetPasswordRequest, SignupRequest,
    UpdateUserInfoRequest, UserInfoQuery,
};
use crate::domain::models::auth::CallerContext;
use crate::services::auth::{AccountService, TokenService};

/// 회원 가입 핸들러
///
/// # Endpoint
/// `POST /auth/signup`
#[post("/signup")]
pub async fn signup(payload: web::Json<SignupRequest>) -> Result<HttpResponse, AppError> {
    let account_service = AccountService::instance();

    // 테스트 환경에서는 비밀번호 정책 검사를 생략한다
    let validate_pwd = Environment::current() != Environment::Test;

    account_service
        .signup(payload.into_inner(), false, validate_pwd, None, None)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}

/// 로그인 핸들러
///
/// 영구 비밀번호 또는 유효한 임시 비밀번호로 인증하며, 임시 비밀번호
/// 경로로 인증된 경우 응답에 `used_tmp_pwd`가 포함됩니다.
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    let account_service = AccountService::instance();

    let outcome = account_service.login(&payload.email, &payload.pwd).await?;

    let mut response = json!({
        "auth_token": outcome.tokens.auth_token,
        "refresh_token": outcome.tokens.refresh_token,
        "exp_time": outcome.tokens.exp_time,
    });

    if outcome.used_tmp_pwd {
        response["used_tmp_pwd"] = json!(true);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/logout")]
pub async fn logout(caller: CallerContext) -> Result<HttpResponse, AppError> {
    let account_service = AccountService::instance();

    account_service.logout(caller.user_id()).await?;

    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}

/// 토큰 갱신 핸들러
///
/// Authorization 헤더의 인증 토큰은 만료되어 있어도 되지만 서명은
/// 유효해야 하며, 본문의 리프레시 토큰이 계정에 저장된 값과 일치해야
/// 새 쌍이 발급됩니다.
///
/// # Endpoint
/// `POST /auth/refresh_token`
#[post("/refresh_token")]
pub async fn refresh_token(
    req: HttpRequest,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let auth_token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token is not found.".to_string()))?;

    if payload.refresh_token.is_empty() {
        return Err(AppError::Unauthorized("Token is not found.".to_string()));
    }

    let token_service = TokenService::instance();
    let tokens = token_service
        .refresh(auth_token, &payload.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "auth_token": tokens.auth_token,
        "refresh_token": tokens.refresh_token,
        "exp_time": tokens.exp_time,
    })))
}

/// 사용자 정보 조회 핸들러
///
/// `user_id` 쿼리가 있으면 해당 사용자의 공개 정보만, 없으면 호출자
/// 본인의 전체 프로필을 반환합니다.
///
/// # Endpoint
/// `GET /auth/user_info`
#[get("/user_info")]
pub async fn get_user_info(
    caller: CallerContext,
    query: web::Query<UserInfoQuery>,
) -> Result<HttpResponse, AppError> {
    if let Some(user_id) = query.user_id.as_deref().filter(|id| !id.is_empty()) {
        let account_service = AccountService::instance();
        let info = account_service.public_user_info(user_id).await?;
        return Ok(HttpResponse::Ok().json(json!({ "user_info": info })));
    }

    Ok(HttpResponse::Ok().json(json!({ "user_info": caller.account.marshall() })))
}

/// 사용자 정보 수정 핸들러
///
/// 변경 주체는 항상 호출자 본인 계정입니다.
///
/// # Endpoint
/// `PUT /auth/user_info`
#[put("/user_info")]
pub async fn put_user_info(
    caller: CallerContext,
    payload: web::Json<UpdateUserInfoRequest>,
) -> Result<HttpResponse, AppError> {
    let account_service = AccountService::instance();

    let info = account_service
        .update_user_info(caller.user_id(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "user_info": info })))
}

/// 비밀번호 재설정 요청 핸들러
///
/// # Endpoint
/// `POST /auth/reset_password`
#[post("/reset_password")]
pub async fn reset_password(
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let account_service = AccountService::instance();

    account_service.reset_password(&payload.email).await?;

    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}

/// 토큰 유효성 확인 핸들러
///
/// 미들웨어를 통과했다는 사실 자체가 검증 결과입니다.
///
/// # Endpoint
/// `GET /auth/tokenvalidate`
#[get("/tokenvalidate")]
pub async fn tokenvalidate(_caller: CallerContext) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}
