//! 미들웨어 모듈
//!
//! 요청 파이프라인의 신원 해석을 담당합니다. 인증 미들웨어는
//! Authorization 헤더의 토큰을 검증하고 계정을 조회하여
//! [`CallerContext`](crate::domain::models::auth::CallerContext)를
//! 요청 확장에 넣습니다. 핸들러 본문은 인증이 끝난 뒤에만 실행됩니다.
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/auth")
//!             .wrap(AuthMiddleware::required())
//!             .service(handlers::auth::logout)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
