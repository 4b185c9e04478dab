//! OAuth 로그인/가입 요청 DTO

use serde::Deserialize;

use crate::domain::dto::auth::SignupRequest;

/// Kakao 로그인 요청 (오픈 SDK가 발급한 액세스 토큰)
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoLoginRequest {
    pub kakao_auth_token: String,
}

/// Kakao 가입 요청 — 프로필 필드는 일반 가입과 동일
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoSignupRequest {
    pub kakao_auth_token: String,
    #[serde(flatten)]
    pub profile: SignupRequest,
}

/// Facebook 로그인 요청
#[derive(Debug, Clone, Deserialize)]
pub struct FacebookLoginRequest {
    pub facebook_auth_token: String,
}

/// Facebook 가입 요청
#[derive(Debug, Clone, Deserialize)]
pub struct FacebookSignupRequest {
    pub facebook_auth_token: String,
    #[serde(flatten)]
    pub profile: SignupRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kakao_signup_request_flattens_profile() {
        let json = r#"{
            "kakao_auth_token": "1idlfawfi",
            "email": "abc1@abcmart.com",
            "name": "tester",
            "prefer_scents": ["lavender", "lemon"]
        }"#;

        let req: KakaoSignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kakao_auth_token, "1idlfawfi");
        assert_eq!(req.profile.email.as_deref(), Some("abc1@abcmart.com"));
        assert_eq!(
            req.profile.prefer_scents.as_ref().unwrap(),
            &vec!["lavender".to_string(), "lemon".to_string()]
        );
    }
}
