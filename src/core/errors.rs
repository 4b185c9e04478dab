//! # 애플리케이션 에러 처리 시스템
//!
//! 백엔드 전역에서 사용하는 통합 에러 타입을 정의합니다.
//! `thiserror`로 에러 타입을 선언하고 `actix_web::ResponseError`를 구현하여
//! 모든 에러가 일관된 HTTP 응답으로 자동 변환됩니다.
//!
//! ## 응답 형식
//!
//! 모든 에러 응답은 아래 JSON 형식을 따릅니다. 상태 코드는 에러 변형별로
//! 결정됩니다 (400/401/403/404/406/409/500).
//!
//! ```json
//! {
//!   "message": "Password is invalid."
//! }
//! ```
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn login(email: &str, pwd: &str) -> Result<IssuedTokens, AppError> {
//!     let account = user_repo.find_by_email(email).await?
//!         .ok_or_else(|| AppError::Forbidden(
//!             format!("{} is not signed up user.", email)))?;
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 클라이언트와의 계약에 해당하는 변형(BadRequest~Conflict, ServerError)은
/// 메시지를 그대로 응답 본문에 노출하고, 인프라 계층 변형(DatabaseError 등)은
/// 원인 설명을 접두어와 함께 포함합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값/정책 위반 (400 Bad Request)
    #[error("{0}")]
    BadRequest(String),

    /// 자격 증명 누락/무효/만료 (401 Unauthorized)
    #[error("{0}")]
    Unauthorized(String),

    /// 신원 충돌 또는 프로바이더 인가 거부 (403 Forbidden)
    #[error("{0}")]
    Forbidden(String),

    /// 리소스 없음 (404 Not Found)
    #[error("{0}")]
    NotFound(String),

    /// 시간 유효성 상실 — 만료된 임시 비밀번호 (406 Not Acceptable)
    #[error("{0}")]
    NotAcceptable(String),

    /// 중복 등록 (409 Conflict)
    #[error("{0}")]
    Conflict(String),

    /// MongoDB 연산 오류 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 외부 서비스(OAuth/섀도우/메일/블롭) 호출 오류 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 클라이언트 계약에 포함된 500 메시지 — 메일 발송 실패, 저장 일관성 검사 실패 등
    #[error("{0}")]
    ServerError(String),

    /// 예상하지 못한 내부 오류 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    /// 에러 변형을 HTTP 상태 코드와 `{"message": ...}` 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "message": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_bad_request_response() {
        let error = AppError::BadRequest("Password is invalid.".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_response() {
        let error = AppError::Unauthorized("Auth Token is not found. Try Again.".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_response() {
        let error = AppError::Forbidden("Email is not valid".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_not_acceptable_response() {
        let error = AppError::NotAcceptable("Expired Temporary Password".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_conflict_response() {
        let error = AppError::Conflict("Already Registered Device".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_server_error_passthrough_message() {
        // 계약에 포함된 500 메시지는 접두어 없이 그대로 노출되어야 한다
        let error = AppError::ServerError("Token does not deleted. Try Again.".to_string());
        assert_eq!(error.to_string(), "Token does not deleted. Try Again.");
        assert_eq!(
            error.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_infra_error_prefixed_message() {
        let error = AppError::DatabaseError("connection refused".to_string());
        assert_eq!(error.to_string(), "Database error: connection refused");
        assert_eq!(
            error.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
