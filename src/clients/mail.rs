//! 메일 릴레이 클라이언트
//!
//! 추상화된 메일 발송 능력입니다. 발송 요청을 JSON으로 직렬화하여
//! 릴레이의 `/send` 엔드포인트에 전달하며, 템플릿 구성은 호출부의
//! 책임입니다.

use serde::Serialize;

use crate::config::MailConfig;
use crate::core::errors::AppError;

/// 발송할 메일 한 통
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    /// HTML 본문 (UTF-8)
    pub html_body: String,
    /// 발신자 주소
    pub source: String,
}

/// 메일 릴레이 HTTP 클라이언트
pub struct MailClient {
    http: reqwest::Client,
    base_url: String,
}

impl MailClient {
    pub fn new() -> Self {
        Self::with_base_url(MailConfig::api_server())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// 메일 한 통을 발송합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 릴레이 호출 실패 또는 비정상 상태 코드
    pub async fn send(&self, mail: &OutboundMail) -> Result<(), AppError> {
        let url = format!("{}/send", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(mail)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "메일 발송 실패 ({}): {}", status, error_text
            )));
        }

        Ok(())
    }
}

impl Default for MailClient {
    fn default() -> Self {
        Self::new()
    }
}
