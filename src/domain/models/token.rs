//! JWT 토큰 클레임 및 발급 결과 모델
//!
//! 인증 토큰은 만료 클레임을 포함하고 HS512로, 리프레시 토큰은 만료 없이
//! HS256으로 서명됩니다. 리프레시 토큰의 유효성은 서명이 아니라 계정에
//! 저장된 값과의 바이트 단위 일치로 판정됩니다.

use serde::{Deserialize, Serialize};

/// 인증 토큰 클레임 (`{sub, iat, exp}`)
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthTokenClaims {
    /// 토큰 주체 (user_id)
    pub sub: String,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

/// 리프레시 토큰 클레임 (`{sub, iat}` — 만료 클레임 없음)
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// 토큰 주체 (user_id)
    pub sub: String,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
}

/// 발급된 토큰 쌍
///
/// 발급은 계정 문서에 두 토큰을 기록한 뒤에야 완료로 취급되며,
/// 기록 시점에 이전 쌍은 즉시 무효화됩니다.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedTokens {
    pub auth_token: String,
    pub refresh_token: String,
    /// 인증 토큰 만료 시각 (RFC 3339)
    pub exp_time: String,
}
