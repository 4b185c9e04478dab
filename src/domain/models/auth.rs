//! 인증된 호출자 컨텍스트
//!
//! 인증 미들웨어가 토큰 검증과 계정 조회를 마친 뒤 요청 확장에 넣어 주는
//! 모델입니다. 핸들러는 변경 연산의 주체를 반드시 이 컨텍스트에서 가져와야
//! 하며, 요청 본문의 user_id 같은 클라이언트 제공 값으로 신원을 다시
//! 유도해서는 안 됩니다.

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::entities::users::user::UserAccount;

/// 토큰 검증을 통과한 호출자 정보
#[derive(Debug, Clone)]
pub struct CallerContext {
    /// 저장소에서 조회한 호출자 계정 (요청 시점 스냅샷)
    pub account: UserAccount,
    /// 인증 완료 표지
    pub authenticated: bool,
}

impl CallerContext {
    pub fn new(account: UserAccount) -> Self {
        Self {
            account,
            authenticated: true,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.account.user_id
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어로 감싼 라우트에서만 추출 가능합니다.
impl FromRequest for CallerContext {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CallerContext>() {
            Some(caller) => ready(Ok(caller.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Auth Token is not found. Try Again.",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_context_marks_authenticated() {
        let account = UserAccount::new("a@b.com".to_string(), "h".to_string());
        let caller = CallerContext::new(account.clone());

        assert!(caller.authenticated);
        assert_eq!(caller.user_id(), account.user_id);
    }
}
