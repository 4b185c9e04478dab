//! # Facebook OAuth 연동 서비스
//!
//! Graph API의 `debug_token` 엔드포인트로 클라이언트 토큰을 검증합니다.
//! 검증에는 앱 자격 증명(client_credentials)으로 발급받은 앱 토큰이
//! 필요하며, 토큰이 유효하더라도 이 서비스의 앱으로 발급된 것이
//! 아니면 거부합니다.

use std::sync::Arc;
use singleton_macro::service;

use crate::config::FacebookConfig;
use crate::core::errors::AppError;
use crate::domain::dto::auth::SignupRequest;
use crate::domain::models::oauth::{FacebookAppToken, FacebookDebugToken, ProviderVerdict};
use crate::domain::models::token::IssuedTokens;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::account_service::AccountService;
use crate::services::auth::token_service::TokenService;

/// Facebook OAuth 연동 서비스
#[service(name = "facebook")]
pub struct FacebookService {
    /// 계정 리포지토리 (자동 주입)
    user_repo: Arc<UserRepository>,
    /// 토큰 발급 서비스 (자동 주입)
    token_service: Arc<TokenService>,
    /// 가입 오케스트레이터 (자동 주입)
    account_service: Arc<AccountService>,
}

impl FacebookService {
    /// `debug_token` 호출 — 앱 토큰 발급 후 클라이언트 토큰 조회
    async fn debug_token(&self, fbauth_token: &str) -> Result<FacebookDebugToken, AppError> {
        let client = reqwest::Client::new();
        let server = FacebookConfig::api_server();

        let app_token_url = format!(
            "{}/oauth/access_token?client_id={}&client_secret={}&grant_type=client_credentials",
            server,
            urlencoding::encode(&FacebookConfig::app_id()),
            urlencoding::encode(&FacebookConfig::app_secret()),
        );

        let app_token = client
            .get(&app_token_url)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 앱 토큰 요청 실패: {}", e)))?
            .json::<FacebookAppToken>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 앱 토큰 파싱 실패: {}", e)))?;

        let url = format!(
            "{}/debug_token/?input_token={}&access_token={}",
            server,
            urlencoding::encode(fbauth_token),
            urlencoding::encode(&app_token.access_token),
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 검증 요청 실패: {}", e)))?;

        // 거부 응답도 본문의 error 필드로 판정하므로 상태 코드로 거르지 않는다
        response
            .json::<FacebookDebugToken>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 응답 파싱 실패: {}", e)))
    }

    /// 토큰 검증 후 판정 반환
    async fn verify_token(&self, fbauth_token: &str) -> Result<ProviderVerdict, AppError> {
        let debug = self.debug_token(fbauth_token).await?;
        Ok(debug.into_verdict(&FacebookConfig::app_id()))
    }

    /// Facebook 토큰으로 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::Forbidden` - 프로바이더 거부, 무효 토큰, 앱 불일치
    /// * `AppError::NotFound` - 토큰은 유효하지만 연동된 계정 없음
    pub async fn login(&self, fbauth_token: &str) -> Result<IssuedTokens, AppError> {
        let identity = match self.verify_token(fbauth_token).await? {
            ProviderVerdict::Verified(identity) => identity,
            ProviderVerdict::Rejected { reason } => {
                log::warn!("Facebook 토큰 거부: {}", reason);
                return Err(AppError::Forbidden("Authorization Failed".to_string()));
            }
        };

        let account = self
            .user_repo
            .find_by_facebook_id(&identity.external_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User Not Found".to_string()))?;

        self.token_service.issue(&account).await
    }

    /// Facebook 토큰으로 가입
    ///
    /// # Errors
    ///
    /// * `AppError::Forbidden` - 프로바이더 거부 또는 이미 연동된 Facebook 계정
    pub async fn signup(&self, fbauth_token: &str, profile: SignupRequest) -> Result<(), AppError> {
        let identity = match self.verify_token(fbauth_token).await? {
            ProviderVerdict::Verified(identity) => identity,
            ProviderVerdict::Rejected { reason } => {
                log::warn!("Facebook 토큰 거부: {}", reason);
                return Err(AppError::Forbidden("Authorization Failed".to_string()));
            }
        };

        if self
            .user_repo
            .find_by_facebook_id(&identity.external_id)
            .await?
            .is_some()
        {
            return Err(AppError::Forbidden(
                "Already existing facebook user".to_string(),
            ));
        }

        self.account_service
            .signup(profile, true, false, None, Some(identity.external_id))
            .await
    }
}
