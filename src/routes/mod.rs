//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증이 필요한 라우트는 [`AuthMiddleware`]로 감싸며, 미들웨어는
//! 핸들러 본문이 실행되기 전에 토큰 검증과 계정 조회를 마칩니다.
//!
//! # Route Groups
//!
//! ## Public
//! - `POST /auth/signup`, `POST /auth/login`, `POST /auth/refresh_token`,
//!   `POST /auth/reset_password`
//! - `GET /user/exists`
//! - `POST /kakao/login|signup`, `POST /facebook/login|signup`
//! - `GET /health`
//!
//! ## Protected (Authorization 헤더의 토큰 필요)
//! - `POST /auth/logout`, `GET|PUT /auth/user_info`, `GET /auth/tokenvalidate`
//! - `POST /devices/{id}/register`, `GET|POST /devices/{id}/state`
//! - `GET|POST /attachments`, `DELETE /attachments/{id}`

use actix_web::web;
use chrono;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_oauth_routes(cfg);
    configure_device_routes(cfg);
    configure_attachment_routes(cfg);
}

/// 인증/계정 라우트
///
/// 공개 라우트를 먼저 등록하고, 나머지 `/auth` 경로는 빈 접두사의
/// 중첩 스코프로 감싸 인증 미들웨어를 적용합니다. 스코프는 한 번
/// 진입하면 다음 서비스로 넘어가지 않으므로 같은 접두사의 형제
/// 스코프 대신 중첩 구조를 사용합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            // Public routes
            .service(handlers::auth::signup)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::reset_password)
            // Protected routes
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::logout)
                    .service(handlers::auth::get_user_info)
                    .service(handlers::auth::put_user_info)
                    .service(handlers::auth::tokenvalidate)
            )
    );
}

/// 사용자 조회 라우트 (공개)
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::user_exists)
    );
}

/// OAuth 프로바이더 라우트 (공개 — 프로바이더 토큰이 자격 증명)
fn configure_oauth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/kakao")
            .service(handlers::kakao::kakao_login)
            .service(handlers::kakao::kakao_signup)
    );

    cfg.service(
        web::scope("/facebook")
            .service(handlers::facebook::facebook_login)
            .service(handlers::facebook::facebook_signup)
    );
}

/// 디바이스 라우트 (보호 + 핸들러 내부의 소유권 게이트)
fn configure_device_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/devices")
            .wrap(AuthMiddleware::required())
            .service(handlers::devices::register_device)
            .service(handlers::devices::get_device_state)
            .service(handlers::devices::update_device_state)
    );
}

/// 첨부파일 라우트 (보호)
fn configure_attachment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attachments")
            .wrap(AuthMiddleware::required())
            .service(handlers::attachments::upload_attachment)
            .service(handlers::attachments::list_attachments)
            .service(handlers::attachments::delete_attachment)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "arom_account_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
