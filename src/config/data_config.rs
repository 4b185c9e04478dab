//! # Data & Infrastructure Configuration Module
//!
//! 실행 환경, 서버 바인딩, 비밀번호 해싱 강도, 그리고 외부 인프라
//! (디바이스 섀도우 서비스, 메일 릴레이, 블롭 스토리지) 엔드포인트
//! 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수에서 현재 환경을 결정합니다.
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "production".to_string())
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost 팩터를 반환합니다.
    ///
    /// `BCRYPT_COST` 환경 변수(4~15)가 우선하며, 없으면 환경별 기본값을
    /// 사용합니다. 개발/테스트 환경은 빠른 해싱을, 프로덕션은 높은 보안
    /// 강도를 선택합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if cost >= 4 && cost <= 15 {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// 디바이스 섀도우 서비스 설정
///
/// 디바이스 상태(reported/desired)를 보관하는 외부 키-값 섀도우 서비스의
/// REST 엔드포인트입니다.
pub struct ShadowConfig;

impl ShadowConfig {
    pub fn api_server() -> String {
        env::var("SHADOW_API_SERVER")
            .unwrap_or_else(|_| "http://localhost:9700".to_string())
    }
}

/// 메일 릴레이 설정
pub struct MailConfig;

impl MailConfig {
    /// 메일 발송 릴레이의 REST 엔드포인트
    pub fn api_server() -> String {
        env::var("MAIL_API_SERVER")
            .unwrap_or_else(|_| "http://localhost:9800".to_string())
    }

    /// 발신자 및 문의 수신용 대표 이메일 주소
    pub fn contact_email() -> String {
        env::var("CONTACT_EMAIL")
            .unwrap_or_else(|_| "contact@example.com".to_string())
    }
}

/// 첨부파일 블롭 스토리지 설정
pub struct StorageConfig;

impl StorageConfig {
    /// S3 호환 스토리지의 루트 URL
    pub fn api_server() -> String {
        env::var("STORAGE_API_SERVER")
            .unwrap_or_else(|_| "https://s3.ap-northeast-2.amazonaws.com".to_string())
    }

    /// 첨부파일이 저장되는 버킷 이름
    pub fn attachment_bucket() -> String {
        env::var("ATTACHMENT_BUCKET")
            .unwrap_or_else(|_| "arom-attachments".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            4
        );
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Staging),
            10
        );
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Production),
            12
        );
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }
}
