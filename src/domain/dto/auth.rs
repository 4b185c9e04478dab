//! 인증/계정 관련 요청·응답 DTO
//!
//! 가입/로그인 계열 요청은 필드 누락을 역직렬화 오류가 아니라
//! 도메인 정책 오류(400/403)로 처리해야 하므로 대부분 Option으로
//! 선언하고 서비스 계층에서 검증합니다.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// 회원 가입 요청
///
/// OAuth 가입 플로우에서도 동일한 프로필 필드가 사용됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub pwd: Option<String>,
    pub name: Option<String>,
    /// RFC 3339 형식의 생년월일
    pub birthday: Option<String>,
    /// male / female
    pub gender: Option<String>,
    /// office or home
    pub place: Option<String>,
    /// 디퓨저 설치 장소
    pub space: Option<String>,
    /// 사용 목적
    pub purpose: Option<String>,
    /// 선호 향 목록
    pub prefer_scents: Option<Vec<String>>,
}

/// 로그인 요청
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub pwd: String,
}

/// 토큰 갱신 요청 (인증 토큰은 Authorization 헤더로 전달)
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// 비밀번호 재설정(임시 비밀번호 메일 발송) 요청
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// 내 정보 수정 요청 — 전달된 필드만 갱신됩니다
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInfoRequest {
    pub pwd: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub gender: Option<String>,
    pub picture: Option<String>,
}

/// 사용자 정보 조회 쿼리 (`user_id` 지정 시 타인 프로필을 제한적으로 조회)
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoQuery {
    pub user_id: Option<String>,
}

/// 이메일 존재 여부 조회 쿼리
#[derive(Debug, Clone, Deserialize)]
pub struct UserExistsQuery {
    pub email: String,
}

/// 본인 프로필 응답 (민감 필드 제외)
#[derive(Debug, Clone, Serialize)]
pub struct UserInfoResponse {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub picture: Option<String>,
    pub devices: HashMap<String, String>,
    pub birthday: Option<String>,
}

/// 타인 프로필 응답 — 공개 가능한 최소 정보만 노출
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserInfo {
    pub name: Option<String>,
    pub picture: Option<String>,
}
