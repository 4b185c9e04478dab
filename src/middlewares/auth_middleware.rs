//! 세션 토큰 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Authorization 헤더의 토큰을 검증하고
//! 호출자 계정을 해석합니다. 헤더 값 전체가 토큰이며 Bearer 접두사는
//! 사용하지 않습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 세션 토큰 인증 미들웨어
///
/// 감싼 스코프의 모든 요청은 핸들러 실행 전에 토큰 검증, 계정 조회,
/// 저장된 토큰과의 일치 확인을 통과해야 합니다.
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
