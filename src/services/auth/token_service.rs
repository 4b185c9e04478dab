//! JWT 토큰 관리 서비스 구현
//!
//! 세션 토큰 쌍의 발급, 검증, 갱신(회전)을 담당합니다.
//!
//! 인증 토큰은 `{sub, iat, exp}` 클레임을 HS512로 서명하고(기본 6시간),
//! 리프레시 토큰은 `{sub, iat}`를 HS256으로 서명합니다. 리프레시 토큰의
//! 약한 알고리즘과 무만료 설계는 기존 클라이언트 호환을 위해 유지되는
//! 레거시이며, 실제 유효성은 계정에 저장된 값과의 바이트 단위 일치로
//! 판정됩니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;

use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::entities::users::user::UserAccount;
use crate::domain::models::token::{AuthTokenClaims, IssuedTokens, RefreshTokenClaims};
use crate::repositories::users::user_repo::UserRepository;

/// 인증 토큰을 생성합니다 — (토큰, 만료 시각)
pub fn encode_auth_token(
    user_id: &str,
    secret: &str,
    now: chrono::DateTime<Utc>,
) -> Result<(String, chrono::DateTime<Utc>), AppError> {
    let exp_time = now + Duration::hours(JwtConfig::auth_expiration_hours());

    let claims = AuthTokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: exp_time.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::InternalError(format!("인증 토큰 생성 실패: {}", e)))?;

    Ok((token, exp_time))
}

/// 리프레시 토큰을 생성합니다 (만료 클레임 없음)
pub fn encode_refresh_token(
    user_id: &str,
    secret: &str,
    now: chrono::DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::InternalError(format!("리프레시 토큰 생성 실패: {}", e)))
}

/// 인증 토큰의 클레임을 디코딩합니다
///
/// `allow_expired`가 true이면 만료 검사만 생략합니다. 서명 검증은
/// 어느 경로에서든 생략되지 않습니다.
pub fn decode_auth_claims(
    token: &str,
    secret: &str,
    allow_expired: bool,
) -> Result<AuthTokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS512);
    if allow_expired {
        validation.validate_exp = false;
    }

    decode::<AuthTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|token_data| token_data.claims)
}

/// JWT 토큰 관리 서비스
///
/// 발급은 계정 문서에 토큰 쌍을 기록한 뒤에야 완료로 취급됩니다.
/// 기록은 기존 쌍을 덮어쓰므로 발급이 곧 이전 세션의 무효화입니다.
#[service(name = "token")]
pub struct TokenService {
    /// 토큰 영속화를 담당하는 사용자 리포지토리 (자동 주입)
    user_repo: Arc<UserRepository>,
}

impl TokenService {
    /// 계정에 새 토큰 쌍 발급
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedTokens)` - 발급된 토큰 쌍과 RFC 3339 만료 시각
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 저장 대상 계정 소실
    /// * `AppError::DatabaseError` - 토큰 영속화 실패
    pub async fn issue(&self, account: &UserAccount) -> Result<IssuedTokens, AppError> {
        let secret = JwtConfig::secret();
        let now = Utc::now();

        let (auth_token, exp_time) = encode_auth_token(&account.user_id, &secret, now)?;
        let refresh_token = encode_refresh_token(&account.user_id, &secret, now)?;

        // 저장이 확인되어야 발급 완료다
        self.user_repo
            .save_tokens(&account.user_id, &auth_token, &refresh_token)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("토큰을 저장할 계정을 찾을 수 없습니다".to_string())
            })?;

        Ok(IssuedTokens {
            auth_token,
            refresh_token,
            exp_time: exp_time.to_rfc3339(),
        })
    }

    /// 인증 토큰 검증 후 주체(user_id) 반환
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthorized` - 만료("Auth Token was expired. ...") 또는
    ///   서명/형식 불량("Auth Token is invalid.")
    pub fn validate(&self, token: &str) -> Result<String, AppError> {
        decode_auth_claims(token, &JwtConfig::secret(), false)
            .map(|claims| claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized(
                    "Auth Token was expired. Try Again for refresh token.".to_string(),
                ),
                _ => AppError::Unauthorized("Auth Token is invalid.".to_string()),
            })
    }

    /// 만료를 무시하고 주체만 복원 (토큰 갱신 경로 전용)
    pub fn subject_ignoring_expiry(&self, token: &str) -> Result<String, AppError> {
        decode_auth_claims(token, &JwtConfig::secret(), true)
            .map(|claims| claims.sub)
            .map_err(|_| AppError::Unauthorized("Auth Token is invalid.".to_string()))
    }

    /// 토큰 쌍 갱신 (회전)
    ///
    /// 만료된 인증 토큰이라도 서명이 유효하면 주체를 복원하고, 제시된
    /// 리프레시 토큰이 계정에 저장된 값과 정확히 일치할 때만 새 쌍을
    /// 발급합니다. 발급 즉시 이전 쌍은 사용할 수 없게 됩니다.
    pub async fn refresh(
        &self,
        auth_token: &str,
        refresh_token: &str,
    ) -> Result<IssuedTokens, AppError> {
        let user_id = self.subject_ignoring_expiry(auth_token)?;

        let account = self
            .user_repo
            .find_by_user_id(&user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("This user does not exist.".to_string()))?;

        if account.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::Unauthorized("Refresh Token is invalid.".to_string()));
        }

        self.issue(&account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_auth_token_roundtrip() {
        let now = Utc::now();
        let (token, exp_time) = encode_auth_token("user-1", SECRET, now).unwrap();

        let claims = decode_auth_claims(&token, SECRET, false).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, exp_time.timestamp());
    }

    #[test]
    fn test_expired_token_fails_normal_decode_but_not_refresh_path() {
        // 만료 시각을 충분히 과거로 이동 (검증 leeway보다 크게)
        let past = Utc::now() - Duration::hours(12);
        let (token, _) = encode_auth_token("user-1", SECRET, past).unwrap();

        let err = decode_auth_claims(&token, SECRET, false).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));

        // 갱신 경로는 만료를 무시하고 주체를 복원한다
        let claims = decode_auth_claims(&token, SECRET, true).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn test_tampered_signature_rejected_on_both_paths() {
        let (token, _) = encode_auth_token("user-1", SECRET, Utc::now()).unwrap();

        assert!(decode_auth_claims(&token, "other-secret", false).is_err());
        assert!(decode_auth_claims(&token, "other-secret", true).is_err());
    }

    #[test]
    fn test_refresh_token_not_accepted_as_auth_token() {
        // 리프레시 토큰은 HS256으로 서명되므로 HS512 검증기가 거부해야 한다
        let refresh = encode_refresh_token("user-1", SECRET, Utc::now()).unwrap();

        assert!(decode_auth_claims(&refresh, SECRET, false).is_err());
        assert!(decode_auth_claims(&refresh, SECRET, true).is_err());
    }

    #[test]
    fn test_refresh_token_has_no_expiry_claim() {
        let refresh = encode_refresh_token("user-1", SECRET, Utc::now()).unwrap();

        // HS256 서명 검증만 수행하고 클레임 구조를 직접 확인한다
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = std::collections::HashSet::new();

        let data = decode::<serde_json::Value>(
            &refresh,
            &DecodingKey::from_secret(SECRET.as_ref()),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims["sub"], "user-1");
        assert!(data.claims.get("exp").is_none());
    }
}
