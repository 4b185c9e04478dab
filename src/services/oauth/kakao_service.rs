//! # Kakao OAuth 연동 서비스
//!
//! Kakao 오픈 SDK가 발급한 액세스 토큰을 REST API로 검증하고,
//! 확인된 외부 신원을 로컬 계정과 연결합니다.
//!
//! Kakao는 검증 실패 시에도 본문에 `code` 필드를 담아 응답하므로
//! HTTP 상태 코드가 아니라 본문을 디코딩해 판정합니다. 판정은
//! [`ProviderVerdict`]로 명시화되어 서비스 로직은 원본 응답 형태를
//! 다루지 않습니다.

use std::sync::Arc;
use singleton_macro::service;

use crate::config::KakaoConfig;
use crate::core::errors::AppError;
use crate::domain::dto::auth::SignupRequest;
use crate::domain::models::oauth::{KakaoTokenInfo, KakaoUserInfo, ProviderVerdict};
use crate::domain::models::token::IssuedTokens;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::account_service::AccountService;
use crate::services::auth::token_service::TokenService;

/// Kakao OAuth 연동 서비스
#[service(name = "kakao")]
pub struct KakaoService {
    /// 계정 리포지토리 (자동 주입)
    user_repo: Arc<UserRepository>,
    /// 토큰 발급 서비스 (자동 주입)
    token_service: Arc<TokenService>,
    /// 가입 오케스트레이터 (자동 주입)
    account_service: Arc<AccountService>,
}

impl KakaoService {
    /// `/user/access_token_info` 호출 — 토큰 유효성 검증용 경량 조회
    async fn access_token_info(&self, kauth_token: &str) -> Result<KakaoTokenInfo, AppError> {
        let client = reqwest::Client::new();
        let url = format!("{}/user/access_token_info", KakaoConfig::api_server());

        let response = client
            .get(&url)
            .bearer_auth(kauth_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Kakao 토큰 검증 요청 실패: {}", e)))?;

        // 실패 응답도 본문에 code를 담아 오므로 상태 코드로 거르지 않는다
        response
            .json::<KakaoTokenInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Kakao 응답 파싱 실패: {}", e)))
    }

    /// `/user/me` 호출 — 가입 시 프로필 정보까지 조회
    async fn user_info(&self, kauth_token: &str) -> Result<KakaoUserInfo, AppError> {
        let client = reqwest::Client::new();
        let url = format!("{}/user/me", KakaoConfig::api_server());

        let response = client
            .get(&url)
            .bearer_auth(kauth_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Kakao 사용자 정보 요청 실패: {}", e)))?;

        response
            .json::<KakaoUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Kakao 응답 파싱 실패: {}", e)))
    }

    /// Kakao 토큰으로 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::Forbidden` - 프로바이더가 토큰을 거부함
    /// * `AppError::NotFound` - 토큰은 유효하지만 연동된 계정 없음
    pub async fn login(&self, kauth_token: &str) -> Result<IssuedTokens, AppError> {
        let identity = match self.access_token_info(kauth_token).await?.into_verdict() {
            ProviderVerdict::Verified(identity) => identity,
            ProviderVerdict::Rejected { reason } => {
                log::warn!("Kakao 토큰 거부: {}", reason);
                return Err(AppError::Forbidden("Authorization Failed".to_string()));
            }
        };

        let account = self
            .user_repo
            .find_by_kakao_id(&identity.external_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User Not Found".to_string()))?;

        self.token_service.issue(&account).await
    }

    /// Kakao 토큰으로 가입
    ///
    /// 비밀번호 없이 가입되며(`random_pwd=true, validate_pwd=false`),
    /// 확인된 외부 식별자가 계정에 연결됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Forbidden` - 프로바이더 거부 또는 이미 연동된 Kakao 계정
    pub async fn signup(&self, kauth_token: &str, profile: SignupRequest) -> Result<(), AppError> {
        let identity = match self.user_info(kauth_token).await?.into_verdict() {
            ProviderVerdict::Verified(identity) => identity,
            ProviderVerdict::Rejected { reason } => {
                log::warn!("Kakao 토큰 거부: {}", reason);
                return Err(AppError::Forbidden("Authorization Failed".to_string()));
            }
        };

        if self
            .user_repo
            .find_by_kakao_id(&identity.external_id)
            .await?
            .is_some()
        {
            return Err(AppError::Forbidden("Already existing kakao user".to_string()));
        }

        self.account_service
            .signup(profile, true, false, Some(identity.external_id), None)
            .await
    }
}
