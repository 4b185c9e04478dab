//! 비밀번호 수명주기 구현
//!
//! bcrypt 기반 해싱/검증, 가입 비밀번호 정책 검사, 그리고 비밀번호
//! 재설정용 임시 패스프레이즈 생성을 제공합니다.
//!
//! 임시 패스프레이즈 사전([`PassphraseDict`])은 프로세스 시작 시 한 번
//! 로드되어 읽기 전용으로 공유되며, 생성 연산에 참조로 전달됩니다.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::config::PasswordConfig;
use crate::core::errors::AppError;

/// 비밀번호 정책이 허용하는 특수문자 집합
const PWD_SYMBOLS: &str = "`-=\\[];',./~!@#$%^&*()_+|{}:\"<>?";

/// 비밀번호를 bcrypt로 해싱합니다
///
/// cost는 실행 환경에 따라 결정되며, 호출마다 새로운 솔트가 생성되므로
/// 같은 입력도 매번 다른 해시를 만듭니다.
pub fn hash_pwd(pwd: &str) -> Result<String, AppError> {
    bcrypt::hash(pwd, PasswordConfig::bcrypt_cost())
        .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
}

/// 비밀번호를 해시와 대조합니다
///
/// 해시가 없거나 빈 계정(OAuth 전용 등)은 항상 false이며,
/// 이 함수는 호출자에게 오류를 전파하지 않습니다.
pub fn verify_pwd(pwd: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(h) if !h.is_empty() => bcrypt::verify(pwd, h).unwrap_or(false),
        _ => false,
    }
}

/// 가입 비밀번호 정책 검사
///
/// 8자 이상, 영문자/숫자/특수문자 각 1개 이상을 포함해야 하며,
/// 허용 집합 밖의 문자가 섞이면 거부합니다.
pub fn is_secure_pwd(pwd: &str) -> bool {
    if pwd.chars().count() < 8 {
        return false;
    }

    let mut has_alpha = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in pwd.chars() {
        if c.is_ascii_alphabetic() {
            has_alpha = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PWD_SYMBOLS.contains(c) {
            has_symbol = true;
        } else {
            return false;
        }
    }

    has_alpha && has_digit && has_symbol
}

/// 서버 측 무작위 비밀번호 생성
///
/// OAuth 가입처럼 사용자가 비밀번호를 제공하지 않는 플로우에서 사용하며,
/// 생성된 값은 호출자에게 반환되지 않습니다.
pub fn generate_random_password() -> String {
    Uuid::new_v4().to_string()
}

/// 임시 패스프레이즈 사전
///
/// 단어 목록을 한 번만 읽어 들여 보관하는 읽기 전용 리소스입니다.
/// main에서 로드되어 `ServiceLocator::set()`으로 등록됩니다.
pub struct PassphraseDict {
    words: Vec<String>,
}

impl PassphraseDict {
    /// 파일에서 단어 사전을 로드합니다 (한 줄에 한 단어)
    pub fn load(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let words: Vec<String> = contents
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if words.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("word list {} is empty", path),
            ));
        }

        Ok(Self { words })
    }

    /// 메모리 상의 단어 목록으로 사전 구성 (테스트용)
    pub fn from_words(words: Vec<String>) -> Self {
        Self { words }
    }

    /// 사람이 기억하기 쉬운 임시 비밀번호를 생성합니다
    ///
    /// 단어 4개를 무작위로 고른 뒤 그중 하나를 0~999 숫자로 바꾸고
    /// 하이픈으로 연결합니다. (예: `citron-492-breeze-meadow`)
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();

        let mut parts: Vec<String> = (0..4)
            .map(|_| {
                self.words
                    .choose(&mut rng)
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();

        let digit_position = rng.gen_range(0..parts.len());
        parts[digit_position] = rng.gen_range(0..1000).to_string();

        parts.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_pwd("abc12345!").unwrap();

        assert!(verify_pwd("abc12345!", Some(&hash)));
        assert!(!verify_pwd("wrong", Some(&hash)));
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        let first = hash_pwd("abc12345!").unwrap();
        let second = hash_pwd("abc12345!").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_with_missing_hash_is_false() {
        assert!(!verify_pwd("whatever", None));
        assert!(!verify_pwd("whatever", Some("")));
    }

    #[test]
    fn test_password_policy_accepts_compliant() {
        assert!(is_secure_pwd("abc12345!"));
        assert!(is_secure_pwd("Aa1!Aa1!"));
        assert!(is_secure_pwd("pass-word9"));
    }

    #[test]
    fn test_password_policy_rejects_weak() {
        // 너무 짧음
        assert!(!is_secure_pwd("a1!"));
        // 숫자 없음
        assert!(!is_secure_pwd("abcdefg!"));
        // 특수문자 없음
        assert!(!is_secure_pwd("abcd1234"));
        // 영문자 없음
        assert!(!is_secure_pwd("12345678!"));
        // 허용되지 않은 문자 포함
        assert!(!is_secure_pwd("abc12345! "));
        assert!(!is_secure_pwd("한글비밀번호1!"));
    }

    #[test]
    fn test_passphrase_shape() {
        let dict = PassphraseDict::from_words(vec![
            "lavender".to_string(),
            "citron".to_string(),
            "breeze".to_string(),
            "meadow".to_string(),
        ]);

        let passphrase = dict.generate();
        let parts: Vec<&str> = passphrase.split('-').collect();

        assert_eq!(parts.len(), 4);

        // 정확히 한 자리만 숫자로 치환된다
        let numeric_parts = parts
            .iter()
            .filter(|p| p.chars().all(|c| c.is_ascii_digit()))
            .count();
        assert_eq!(numeric_parts, 1);
    }

    #[test]
    fn test_passphrase_words_come_from_dict() {
        let dict = PassphraseDict::from_words(vec!["only".to_string()]);

        let passphrase = dict.generate();
        for part in passphrase.split('-') {
            let is_number = part.chars().all(|c| c.is_ascii_digit());
            assert!(is_number || part == "only");
        }
    }
}
