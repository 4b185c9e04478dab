//! User Account Entity Implementation
//!
//! 사용자 계정 엔티티의 핵심 구현체입니다.
//! 이메일/비밀번호 인증과 OAuth(Kakao/Facebook) 연동 계정을 하나의
//! 모델로 표현하며, 현재 유효한 세션 토큰 쌍과 소유 디바이스 목록을
//! 계정 문서 안에 함께 보관합니다.

use std::collections::HashMap;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::dto::auth::UserInfoResponse;

/// 사용자 계정 엔티티
///
/// `auth_token`의 존재 여부가 서버 측의 유일한 활성 세션 표지입니다.
/// 토큰 발급은 기존 쌍을 덮어쓰므로 계정당 세션은 항상 최대 하나입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 불변의 계정 식별자 (UUIDv4, unique)
    pub user_id: String,
    /// 소문자로 정규화된 이메일 (unique)
    pub email: String,
    /// Kakao 계정 연동 시 외부 식별자 (unique, sparse)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kakao_id: Option<String>,
    /// Facebook 계정 연동 시 외부 식별자 (unique, sparse)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    /// 영구 비밀번호의 bcrypt 해시
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// 현재 유효한 인증 토큰 (활성 세션 표지)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// 현재 유효한 리프레시 토큰
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// 구버전 클라이언트가 사용하던 토큰 필드. 로그아웃 시 함께 제거된다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// 임시 비밀번호의 bcrypt 해시 (재설정 플로우에서만 설정)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_password: Option<String>,
    /// 임시 비밀번호 만료 시각 (tmp_password와 함께 설정/해제)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_password_valid_period: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// 선호 향 목록
    #[serde(default)]
    pub prefer_scents: Vec<String>,
    /// 소유 디바이스 맵 (디바이스 ID → 표시 이름)
    #[serde(default)]
    pub devices: HashMap<String, String>,
    /// 가입 시각
    pub reg_date: DateTime,
}

impl UserAccount {
    /// 새 계정 생성
    ///
    /// `user_id`는 UUIDv4로 자동 생성되며 이후 변경되지 않습니다.
    /// 프로필 필드는 호출부에서 채웁니다.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: None,
            user_id: Uuid::new_v4().to_string(),
            email,
            kakao_id: None,
            facebook_id: None,
            password: Some(password_hash),
            auth_token: None,
            refresh_token: None,
            access_token: None,
            tmp_password: None,
            tmp_password_valid_period: None,
            name: None,
            birthday: None,
            gender: None,
            picture: None,
            place: None,
            space: None,
            purpose: None,
            prefer_scents: Vec::new(),
            devices: HashMap::new(),
            reg_date: DateTime::now(),
        }
    }

    /// 디바이스를 소유하고 있는지 확인
    pub fn has_device(&self, device_id: &str) -> bool {
        self.devices.contains_key(device_id)
    }

    /// 임시 비밀번호가 만료되었는지 확인
    ///
    /// 임시 비밀번호가 설정되지 않은 계정은 만료로 취급하지 않습니다.
    pub fn tmp_password_expired(&self) -> bool {
        match self.tmp_password_valid_period {
            Some(valid_until) => valid_until <= DateTime::now(),
            None => false,
        }
    }

    /// 클라이언트 노출용 프로필 정보로 변환
    ///
    /// 비밀번호 해시와 토큰 등 민감 필드는 제외됩니다.
    pub fn marshall(&self) -> UserInfoResponse {
        UserInfoResponse {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            gender: self.gender.clone(),
            picture: self.picture.clone(),
            devices: self.devices.clone(),
            birthday: self
                .birthday
                .and_then(|d| d.try_to_rfc3339_string().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults() {
        let account = UserAccount::new(
            "abc1@abcmart.com".to_string(),
            "$2b$04$hash".to_string(),
        );

        assert!(!account.user_id.is_empty());
        assert_eq!(account.email, "abc1@abcmart.com");
        assert!(account.auth_token.is_none());
        assert!(account.refresh_token.is_none());
        assert!(account.tmp_password.is_none());
        assert!(account.devices.is_empty());
    }

    #[test]
    fn test_user_id_is_unique_per_account() {
        let a = UserAccount::new("a@b.com".to_string(), "h".to_string());
        let b = UserAccount::new("a@b.com".to_string(), "h".to_string());
        assert_ne!(a.user_id, b.user_id);
    }

    #[test]
    fn test_has_device() {
        let mut account = UserAccount::new("a@b.com".to_string(), "h".to_string());
        account
            .devices
            .insert("device-1".to_string(), "거실 디퓨저".to_string());

        assert!(account.has_device("device-1"));
        assert!(!account.has_device("device-2"));
    }

    #[test]
    fn test_tmp_password_expiry() {
        let mut account = UserAccount::new("a@b.com".to_string(), "h".to_string());

        // 설정되지 않은 경우 만료 아님
        assert!(!account.tmp_password_expired());

        // 과거 시각이면 만료
        account.tmp_password_valid_period =
            Some(DateTime::from_millis(DateTime::now().timestamp_millis() - 60_000));
        assert!(account.tmp_password_expired());

        // 미래 시각이면 유효
        account.tmp_password_valid_period =
            Some(DateTime::from_millis(DateTime::now().timestamp_millis() + 60_000));
        assert!(!account.tmp_password_expired());
    }

    #[test]
    fn test_marshall_excludes_sensitive_fields() {
        let mut account = UserAccount::new("a@b.com".to_string(), "h".to_string());
        account.name = Some("Tester".to_string());
        account.auth_token = Some("token".to_string());

        let info = account.marshall();
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["name"], "Tester");
        assert!(json.get("password").is_none());
        assert!(json.get("auth_token").is_none());
    }
}
