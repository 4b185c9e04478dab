//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::domain::models::auth::CallerContext;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::token_service::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match resolve_caller(&req).await {
                Ok(caller) => {
                    log::debug!("인증 성공: 사용자 ID {}", caller.user_id());

                    // 호출자 컨텍스트를 Request Extensions에 저장
                    req.extensions_mut().insert(caller);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("인증 실패: {}", err);

                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}

/// 요청에서 호출자를 해석합니다
///
/// Authorization 헤더 값 전체가 토큰입니다. 토큰 검증 후 주체 계정을
/// 조회하고, 제시된 토큰이 계정에 저장된 `auth_token`과 바이트 단위로
/// 일치해야만 통과합니다 — 새 토큰이 발급되는 순간 이전 토큰은 만료
/// 전이라도 어디서든 거부됩니다 (단일 활성 세션).
async fn resolve_caller(req: &ServiceRequest) -> Result<CallerContext, AppError> {
    let token_service = TokenService::instance();
    let user_repo = UserRepository::instance();

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("Auth Token is not found. Try Again.".to_string())
        })?;

    let user_id = token_service.validate(token)?;

    let account = user_repo
        .find_by_user_id(&user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("This user does not exist.".to_string()))?;

    if account.auth_token.as_deref() != Some(token) {
        return Err(AppError::Unauthorized(
            "Auth Token is invalid. Try Again.".to_string(),
        ));
    }

    Ok(CallerContext::new(account))
}
