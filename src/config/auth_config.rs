//! # Authentication Configuration Module
//!
//! JWT 토큰, OAuth 프로바이더(Kakao/Facebook), 비밀번호 재설정 관련
//! 설정을 관리하는 모듈입니다.

use std::env;

/// JSON Web Token (JWT) 관련 설정
///
/// 인증 토큰은 HS512, 리프레시 토큰은 HS256으로 서명합니다.
/// 리프레시 토큰 쪽의 약한 알고리즘은 기존 클라이언트와의 호환을 위해
/// 유지되는 레거시 설계입니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 없으면 개발용 기본키를 사용하며 경고를 출력합니다.
    /// 프로덕션에서는 반드시 `JWT_SECRET`을 설정해야 합니다.
    ///
    /// ```bash
    /// # 안전한 키 생성
    /// openssl rand -base64 32
    /// export JWT_SECRET="..."
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 인증 토큰의 만료 시간을 시간 단위로 반환합니다.
    ///
    /// # 기본값
    ///
    /// 6시간. 리프레시 토큰에는 만료 클레임이 없습니다.
    pub fn auth_expiration_hours() -> i64 {
        env::var("AUTH_TOKEN_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .unwrap_or(6)
    }
}

/// Kakao OAuth 토큰 검증 설정
///
/// Kakao 오픈 SDK가 발급한 액세스 토큰을 REST API로 검증할 때 사용합니다.
pub struct KakaoConfig;

impl KakaoConfig {
    /// Kakao REST API 서버 주소
    pub fn api_server() -> String {
        env::var("KAKAO_API_SERVER")
            .unwrap_or_else(|_| "https://kapi.kakao.com/v1".to_string())
    }
}

/// Facebook OAuth 토큰 검증 설정
///
/// Graph API의 `debug_token` 엔드포인트로 토큰을 검증하며,
/// 토큰이 이 서비스의 앱으로 발급된 것인지 `app_id`로 확인합니다.
pub struct FacebookConfig;

impl FacebookConfig {
    /// Facebook Graph API 서버 주소
    pub fn api_server() -> String {
        env::var("FACEBOOK_API_SERVER")
            .unwrap_or_else(|_| "https://graph.facebook.com".to_string())
    }

    /// 이 서비스의 Facebook App ID
    ///
    /// # Panics
    ///
    /// `FACEBOOK_APP_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn app_id() -> String {
        env::var("FACEBOOK_APP_ID")
            .expect("FACEBOOK_APP_ID must be set")
    }

    /// 이 서비스의 Facebook App Secret
    ///
    /// 서버 사이드에서만 사용되는 민감한 값입니다. 로그에 출력하지 마세요.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_APP_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn app_secret() -> String {
        env::var("FACEBOOK_APP_SECRET")
            .expect("FACEBOOK_APP_SECRET must be set")
    }
}

/// 비밀번호 재설정(임시 비밀번호) 설정
pub struct PasswordResetConfig;

impl PasswordResetConfig {
    /// 임시 비밀번호 유효 기간 (분 단위, 기본 10분)
    pub fn expire_minutes() -> i64 {
        env::var("PASSWORD_RESET_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }

    /// 임시 비밀번호 생성용 단어 사전 파일 경로
    ///
    /// 사전은 프로세스 시작 시 한 번만 로드되어 읽기 전용으로 공유됩니다.
    pub fn words_path() -> String {
        env::var("PASSWORD_WORDS_PATH")
            .unwrap_or_else(|_| "words.txt".to_string())
    }
}
