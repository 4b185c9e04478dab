//! OAuth 프로바이더 응답 모델과 검증 판정
//!
//! 프로바이더(Kakao/Facebook)의 토큰 검증 응답을 경계에서 타입으로
//! 디코딩하고, 성공/거부를 명시적인 [`ProviderVerdict`]로 변환합니다.
//! 서비스 계층은 원본 응답의 딕셔너리 형태를 다루지 않습니다.

use serde::Deserialize;

/// 지원하는 OAuth 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Kakao,
    Facebook,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Kakao => "kakao",
            OAuthProvider::Facebook => "facebook",
        }
    }
}

/// 프로바이더가 확인해 준 외부 신원
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    pub provider: OAuthProvider,
    /// 프로바이더 쪽 사용자 식별자 (문자열로 정규화)
    pub external_id: String,
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
}

/// 프로바이더 토큰 검증 결과
#[derive(Debug, Clone)]
pub enum ProviderVerdict {
    /// 토큰이 유효하고 외부 신원이 확인됨
    Verified(ProviderIdentity),
    /// 프로바이더가 토큰을 거부함 (에러 코드, 무효 토큰, 앱 불일치)
    Rejected { reason: String },
}

impl ProviderVerdict {
    pub fn is_verified(&self) -> bool {
        matches!(self, ProviderVerdict::Verified(_))
    }
}

/// Kakao `/user/access_token_info` 응답
///
/// 실패 시 `{"code": -401, "msg": "..."}` 형태로 에러 코드가 내려온다.
#[derive(Debug, Deserialize)]
pub struct KakaoTokenInfo {
    pub id: Option<i64>,
    pub code: Option<i64>,
    pub msg: Option<String>,
}

impl KakaoTokenInfo {
    pub fn into_verdict(self) -> ProviderVerdict {
        if self.code.is_some() {
            return ProviderVerdict::Rejected {
                reason: self.msg.unwrap_or_else(|| "provider returned error code".to_string()),
            };
        }
        match self.id {
            Some(id) => ProviderVerdict::Verified(ProviderIdentity {
                provider: OAuthProvider::Kakao,
                external_id: id.to_string(),
                nickname: None,
                profile_image: None,
            }),
            None => ProviderVerdict::Rejected {
                reason: "provider response has no user id".to_string(),
            },
        }
    }
}

/// Kakao `/user/me` 응답의 프로필 부분
#[derive(Debug, Deserialize)]
pub struct KakaoProfile {
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
    pub thumbnail_image: Option<String>,
}

/// Kakao `/user/me` 응답
#[derive(Debug, Deserialize)]
pub struct KakaoUserInfo {
    pub id: Option<i64>,
    pub code: Option<i64>,
    pub msg: Option<String>,
    pub properties: Option<KakaoProfile>,
}

impl KakaoUserInfo {
    pub fn into_verdict(self) -> ProviderVerdict {
        if self.code.is_some() {
            return ProviderVerdict::Rejected {
                reason: self.msg.unwrap_or_else(|| "provider returned error code".to_string()),
            };
        }
        match self.id {
            Some(id) => {
                let (nickname, profile_image) = match self.properties {
                    Some(p) => (p.nickname, p.profile_image.or(p.thumbnail_image)),
                    None => (None, None),
                };
                ProviderVerdict::Verified(ProviderIdentity {
                    provider: OAuthProvider::Kakao,
                    external_id: id.to_string(),
                    nickname,
                    profile_image,
                })
            }
            None => ProviderVerdict::Rejected {
                reason: "provider response has no user id".to_string(),
            },
        }
    }
}

/// Facebook 앱 토큰 발급 응답 (client_credentials)
#[derive(Debug, Deserialize)]
pub struct FacebookAppToken {
    pub access_token: String,
}

/// Facebook `debug_token` 응답의 토큰 데이터 부분
#[derive(Debug, Deserialize)]
pub struct FacebookTokenData {
    pub app_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_valid: bool,
}

/// Facebook API 에러 본문
#[derive(Debug, Deserialize)]
pub struct FacebookApiError {
    pub message: Option<String>,
    pub code: Option<i64>,
}

/// Facebook `debug_token` 응답
#[derive(Debug, Deserialize)]
pub struct FacebookDebugToken {
    pub data: Option<FacebookTokenData>,
    pub error: Option<FacebookApiError>,
}

impl FacebookDebugToken {
    /// 검증 판정으로 변환
    ///
    /// 토큰이 유효해도 이 서비스의 앱으로 발급된 것이 아니면 거부합니다.
    pub fn into_verdict(self, expected_app_id: &str) -> ProviderVerdict {
        if let Some(error) = self.error {
            return ProviderVerdict::Rejected {
                reason: error
                    .message
                    .unwrap_or_else(|| "provider returned error".to_string()),
            };
        }

        let data = match self.data {
            Some(data) => data,
            None => {
                return ProviderVerdict::Rejected {
                    reason: "provider response has no token data".to_string(),
                }
            }
        };

        if !data.is_valid {
            return ProviderVerdict::Rejected {
                reason: "token is not valid".to_string(),
            };
        }

        if data.app_id.as_deref() != Some(expected_app_id) {
            return ProviderVerdict::Rejected {
                reason: "token was issued for another app".to_string(),
            };
        }

        match data.user_id {
            Some(user_id) => ProviderVerdict::Verified(ProviderIdentity {
                provider: OAuthProvider::Facebook,
                external_id: user_id,
                nickname: None,
                profile_image: None,
            }),
            None => ProviderVerdict::Rejected {
                reason: "provider response has no user id".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kakao_token_info_verified() {
        let info: KakaoTokenInfo = serde_json::from_str(r#"{"id": 3143, "expiresInMillis": 100}"#).unwrap();

        match info.into_verdict() {
            ProviderVerdict::Verified(identity) => {
                assert_eq!(identity.provider, OAuthProvider::Kakao);
                assert_eq!(identity.external_id, "3143");
            }
            ProviderVerdict::Rejected { reason } => panic!("unexpected rejection: {}", reason),
        }
    }

    #[test]
    fn test_kakao_token_info_rejected_on_error_code() {
        let info: KakaoTokenInfo =
            serde_json::from_str(r#"{"code": -401, "msg": "this access token does not exist"}"#)
                .unwrap();

        assert!(!info.into_verdict().is_verified());
    }

    #[test]
    fn test_kakao_user_info_carries_profile() {
        let json = r#"{
            "id": 123213,
            "properties": {
                "nickname": "tester",
                "profile_image": "http://img.example.com/p.png",
                "thumbnail_image": "http://img.example.com/t.png"
            }
        }"#;
        let info: KakaoUserInfo = serde_json::from_str(json).unwrap();

        match info.into_verdict() {
            ProviderVerdict::Verified(identity) => {
                assert_eq!(identity.external_id, "123213");
                assert_eq!(identity.nickname.as_deref(), Some("tester"));
                assert_eq!(
                    identity.profile_image.as_deref(),
                    Some("http://img.example.com/p.png")
                );
            }
            ProviderVerdict::Rejected { reason } => panic!("unexpected rejection: {}", reason),
        }
    }

    #[test]
    fn test_facebook_verdict_rejects_error_and_invalid_and_foreign_app() {
        let error: FacebookDebugToken =
            serde_json::from_str(r#"{"error": {"message": "bad token", "code": 190}}"#).unwrap();
        assert!(!error.into_verdict("my-app").is_verified());

        let invalid: FacebookDebugToken = serde_json::from_str(
            r#"{"data": {"app_id": "my-app", "user_id": "77", "is_valid": false}}"#,
        )
        .unwrap();
        assert!(!invalid.into_verdict("my-app").is_verified());

        let foreign: FacebookDebugToken = serde_json::from_str(
            r#"{"data": {"app_id": "other-app", "user_id": "77", "is_valid": true}}"#,
        )
        .unwrap();
        assert!(!foreign.into_verdict("my-app").is_verified());
    }

    #[test]
    fn test_facebook_verdict_verified() {
        let ok: FacebookDebugToken = serde_json::from_str(
            r#"{"data": {"app_id": "my-app", "user_id": "7788", "is_valid": true}}"#,
        )
        .unwrap();

        match ok.into_verdict("my-app") {
            ProviderVerdict::Verified(identity) => {
                assert_eq!(identity.provider, OAuthProvider::Facebook);
                assert_eq!(identity.external_id, "7788");
            }
            ProviderVerdict::Rejected { reason } => panic!("unexpected rejection: {}", reason),
        }
    }
}
