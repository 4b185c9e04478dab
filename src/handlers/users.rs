//! 사용자 조회 HTTP Handlers

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::auth::UserExistsQuery;
use crate::services::auth::AccountService;

/// 이메일 가입 여부 확인 핸들러
///
/// 인증 없이 호출 가능하며 존재 여부만 반환합니다.
///
/// # Endpoint
/// `GET /user/exists?email=...`
#[get("/exists")]
pub async fn user_exists(query: web::Query<UserExistsQuery>) -> Result<HttpResponse, AppError> {
    let account_service = AccountService::instance();

    let exists = account_service.user_exists(&query.email).await?;

    Ok(HttpResponse::Ok().json(json!({ "exists": exists })))
}
