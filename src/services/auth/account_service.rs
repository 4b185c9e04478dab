//! # 계정 관리 서비스 구현
//!
//! 가입, 로그인, 로그아웃, 비밀번호 재설정, 프로필 조회/수정 등
//! 계정 수명주기의 오케스트레이션을 담당합니다.
//!
//! ## 설계 메모
//!
//! - 이메일은 소문자 정규화된 값이 유일키입니다. 모든 진입점에서
//!   `normalize_email`을 거칩니다.
//! - 이메일/외부 식별자 중복 검사는 check-then-act이므로 동시 가입
//!   경쟁이 가능합니다. 저장소의 unique 인덱스가 최종 방어선입니다.
//! - 로그인은 영구 비밀번호와 유효한 임시 비밀번호를 모두 허용하며,
//!   임시 비밀번호 경로로 인증된 경우 응답에 `used_tmp_pwd`가 표시됩니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use mongodb::bson::{DateTime, Document};
use singleton_macro::service;

use crate::clients::mail::{MailClient, OutboundMail};
use crate::config::{MailConfig, PasswordResetConfig};
use crate::core::errors::AppError;
use crate::domain::dto::auth::{
    PublicUserInfo, SignupRequest, UpdateUserInfoRequest, UserInfoResponse,
};
use crate::domain::entities::users::user::UserAccount;
use crate::domain::models::token::IssuedTokens;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::password::{
    self, PassphraseDict,
};
use crate::services::auth::token_service::TokenService;
use crate::utils::string_utils::{clean_optional_string, is_valid_email, normalize_email};

/// 로그인 결과
///
/// `used_tmp_pwd`가 true이면 클라이언트는 비밀번호 변경을 유도해야 합니다.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub tokens: IssuedTokens,
    pub used_tmp_pwd: bool,
}

/// 계정 관리 비즈니스 로직 서비스
#[service(name = "account")]
pub struct AccountService {
    /// 계정 데이터 액세스 리포지토리 (자동 주입)
    user_repo: Arc<UserRepository>,
    /// 토큰 발급 서비스 (자동 주입)
    token_service: Arc<TokenService>,
    /// 메일 릴레이 클라이언트 (자동 주입)
    mail: Arc<MailClient>,
    /// 임시 패스프레이즈 사전 (시작 시 로드되어 읽기 전용으로 공유)
    dict: Arc<PassphraseDict>,
}

impl AccountService {
    /// 새 계정 가입
    ///
    /// OAuth 가입 플로우도 이 메서드를 사용하며, 그 경우
    /// `random_pwd=true, validate_pwd=false`로 호출되고 외부 식별자가
    /// 함께 저장됩니다.
    ///
    /// # 처리 순서
    ///
    /// 1. 이메일 존재/형식 검사 (형식 오류는 레거시 호환을 위해 403)
    /// 2. 비밀번호 결정 — 없으면 `random_pwd`일 때만 서버 측 생성
    /// 3. `validate_pwd`이면 비밀번호 정책 검사
    /// 4. 이메일 중복 검사 (대소문자 무시)
    /// 5. 저장 후 재조회로 영속 여부 확인
    ///
    /// # Errors
    ///
    /// * `AppError::BadRequest` - 이메일/비밀번호 누락, 정책 위반
    /// * `AppError::Forbidden` - 이메일 형식 오류, 이미 존재하는 이메일
    /// * `AppError::ServerError` - 저장 직후 재조회 실패
    pub async fn signup(
        &self,
        req: SignupRequest,
        random_pwd: bool,
        validate_pwd: bool,
        kakao_id: Option<String>,
        facebook_id: Option<String>,
    ) -> Result<(), AppError> {
        let email = match req.email.as_deref() {
            Some(e) if !e.trim().is_empty() => normalize_email(e),
            _ => return Err(AppError::BadRequest("Email is required".to_string())),
        };

        if !is_valid_email(&email) {
            return Err(AppError::Forbidden("Email is not valid".to_string()));
        }

        let pwd = match req.pwd.clone() {
            Some(pwd) => pwd,
            None => {
                if random_pwd {
                    password::generate_random_password()
                } else {
                    return Err(AppError::BadRequest("Password is requied".to_string()));
                }
            }
        };

        if validate_pwd && !password::is_secure_pwd(&pwd) {
            return Err(AppError::BadRequest("Password is not secure one".to_string()));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Forbidden(format!("{} already exists.", email)));
        }

        let mut account = UserAccount::new(email.clone(), password::hash_pwd(&pwd)?);
        account.kakao_id = kakao_id;
        account.facebook_id = facebook_id;
        account.name = clean_optional_string(req.name);
        account.gender = clean_optional_string(req.gender);
        account.place = clean_optional_string(req.place);
        account.space = clean_optional_string(req.space);
        account.purpose = clean_optional_string(req.purpose);
        account.prefer_scents = req.prefer_scents.unwrap_or_default();

        if let Some(birthday) = clean_optional_string(req.birthday) {
            account.birthday = Some(parse_birthday(&birthday)?);
        }

        self.user_repo.insert(account).await?;

        // 저장 직후 재조회로 영속 여부를 확인한다
        if self.user_repo.find_by_email(&email).await?.is_none() {
            return Err(AppError::ServerError(format!(
                "{} signup failed. Try again.", email
            )));
        }

        log::info!("가입 완료: {}", email);

        Ok(())
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 영구 비밀번호 또는 아직 유효한 임시 비밀번호를 허용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Forbidden` - 가입되지 않은 이메일
    /// * `AppError::BadRequest` - 어느 비밀번호와도 일치하지 않음
    /// * `AppError::NotAcceptable` - 임시 비밀번호만 일치했으나 만료됨
    pub async fn login(&self, email: &str, pwd: &str) -> Result<LoginOutcome, AppError> {
        let email = normalize_email(email);

        let account = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(format!("{} is not signed up user.", email))
            })?;

        let is_tmp = password::verify_pwd(pwd, account.tmp_password.as_deref());
        let is_perm = password::verify_pwd(pwd, account.password.as_deref());

        if !is_perm && !is_tmp {
            return Err(AppError::BadRequest("Password is invalid.".to_string()));
        }

        let used_tmp_pwd = is_tmp && !is_perm;
        if used_tmp_pwd && account.tmp_password_expired() {
            return Err(AppError::NotAcceptable("Expired Temporary Password".to_string()));
        }

        let tokens = self.token_service.issue(&account).await?;

        log::info!("로그인 성공: {} ({})", email, account.user_id);

        Ok(LoginOutcome {
            tokens,
            used_tmp_pwd,
        })
    }

    /// 로그아웃 — 세션 토큰 제거
    ///
    /// 제거 쓰기 이후의 문서를 다시 확인하여 토큰 필드가 남아 있으면
    /// 저장 실패로 취급합니다.
    pub async fn logout(&self, user_id: &str) -> Result<(), AppError> {
        let cleared = self
            .user_repo
            .clear_session_tokens(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("This user does not exist.".to_string()))?;

        if cleared.auth_token.is_some() || cleared.access_token.is_some() {
            return Err(AppError::ServerError(
                "Token does not deleted. Try Again.".to_string(),
            ));
        }

        Ok(())
    }

    /// 비밀번호 재설정 — 임시 비밀번호 메일 발송
    ///
    /// 메일 발송이 성공한 뒤에야 임시 비밀번호 해시와 만료 시각을
    /// 저장합니다. 발송 실패 시 계정 상태는 변하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 해당 이메일의 계정 없음
    /// * `AppError::ServerError` - 메일 발송 실패
    pub async fn reset_password(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);

        let account = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let tmp_password = self.dict.generate();

        let mail = OutboundMail {
            to: account.email.clone(),
            subject: "[아롬] 임시 비밀번호 발급".to_string(),
            html_body: reset_mail_body(account.name.as_deref(), &tmp_password),
            source: MailConfig::contact_email(),
        };

        self.mail
            .send(&mail)
            .await
            .map_err(|e| AppError::ServerError(format!("Email Server Error: {}", e)))?;

        let valid_until = DateTime::from_millis(
            (Utc::now() + Duration::minutes(PasswordResetConfig::expire_minutes()))
                .timestamp_millis(),
        );

        self.user_repo
            .set_temp_password(&account.user_id, &password::hash_pwd(&tmp_password)?, valid_until)
            .await?;

        log::info!("임시 비밀번호 발급: {}", email);

        Ok(())
    }

    /// 타인 프로필 조회 — 공개 가능한 최소 정보만
    pub async fn public_user_info(&self, user_id: &str) -> Result<PublicUserInfo, AppError> {
        let account = self
            .user_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist.".to_string()))?;

        Ok(PublicUserInfo {
            name: account.name,
            picture: account.picture,
        })
    }

    /// 내 정보 수정 — 전달된 필드만 갱신
    pub async fn update_user_info(
        &self,
        user_id: &str,
        req: UpdateUserInfoRequest,
    ) -> Result<UserInfoResponse, AppError> {
        let mut set_doc = Document::new();

        if let Some(pwd) = clean_optional_string(req.pwd) {
            set_doc.insert("password", password::hash_pwd(&pwd)?);
        }
        if let Some(name) = clean_optional_string(req.name) {
            set_doc.insert("name", name);
        }
        if let Some(birthday) = clean_optional_string(req.birthday) {
            set_doc.insert("birthday", parse_birthday(&birthday)?);
        }
        if let Some(gender) = clean_optional_string(req.gender) {
            set_doc.insert("gender", gender);
        }
        if let Some(picture) = clean_optional_string(req.picture) {
            set_doc.insert("picture", picture);
        }

        if set_doc.is_empty() {
            // 변경할 필드가 없으면 현재 프로필을 그대로 반환한다
            let account = self
                .user_repo
                .find_by_user_id(user_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("This user does not exist.".to_string()))?;
            return Ok(account.marshall());
        }

        let updated = self
            .user_repo
            .update_profile(user_id, set_doc)
            .await?
            .ok_or_else(|| AppError::Unauthorized("This user does not exist.".to_string()))?;

        Ok(updated.marshall())
    }

    /// 이메일 가입 여부 확인
    pub async fn user_exists(&self, email: &str) -> Result<bool, AppError> {
        let email = normalize_email(email);
        Ok(self.user_repo.find_by_email(&email).await?.is_some())
    }
}

/// RFC 3339 형식의 생년월일 문자열을 BSON DateTime으로 변환
fn parse_birthday(birthday: &str) -> Result<DateTime, AppError> {
    chrono::DateTime::parse_from_rfc3339(birthday)
        .map(|dt| DateTime::from_millis(dt.timestamp_millis()))
        .map_err(|_| AppError::BadRequest("Birthday is not valid".to_string()))
}

/// 임시 비밀번호 안내 메일 본문
fn reset_mail_body(name: Option<&str>, tmp_password: &str) -> String {
    format!(
        "<html><body>\
         <p>{} 님, 안녕하세요.</p>\
         <p>요청하신 임시 비밀번호는 <b>{}</b> 입니다.<br>\
         임시 비밀번호는 발급 후 {}분 동안만 유효하니, 로그인 후 \
         비밀번호를 변경해 주세요.</p>\
         </body></html>",
        name.unwrap_or(""),
        tmp_password,
        PasswordResetConfig::expire_minutes()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthday_accepts_rfc3339() {
        let parsed = parse_birthday("2017-12-31T23:59:59+09:00").unwrap();
        assert_eq!(
            parsed.timestamp_millis(),
            chrono::DateTime::parse_from_rfc3339("2017-12-31T23:59:59+09:00")
                .unwrap()
                .timestamp_millis()
        );
    }

    #[test]
    fn test_parse_birthday_rejects_garbage() {
        assert!(parse_birthday("31-12-2017").is_err());
        assert!(parse_birthday("yesterday").is_err());
    }

    #[test]
    fn test_reset_mail_body_contains_password_and_name() {
        let body = reset_mail_body(Some("홍길동"), "citron-492-breeze-meadow");

        assert!(body.contains("citron-492-breeze-meadow"));
        assert!(body.contains("홍길동"));
    }
}
