//! 디바이스 섀도우 서비스 클라이언트
//!
//! 디바이스별 reported/desired 상태를 보관하는 외부 키-값 섀도우
//! 서비스의 REST API를 호출합니다. 부분 갱신(patch) 의미론을 가지며,
//! 전달한 키만 기존 상태에 병합됩니다.

use serde_json::Value;

use crate::config::ShadowConfig;
use crate::core::errors::AppError;
use crate::domain::models::shadow::ShadowDocument;

/// 섀도우 서비스 HTTP 클라이언트
pub struct ShadowClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShadowClient {
    pub fn new() -> Self {
        Self::with_base_url(ShadowConfig::api_server())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// 디바이스 섀도우 문서를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 호출 실패, 비정상 상태 코드, 파싱 실패
    pub async fn get_shadow(&self, device_id: &str) -> Result<ShadowDocument, AppError> {
        let url = format!("{}/things/{}/shadow", self.base_url, device_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("섀도우 조회 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "섀도우 조회 실패 ({}): {}", status, error_text
            )));
        }

        response
            .json::<ShadowDocument>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("섀도우 응답 파싱 실패: {}", e)))
    }

    /// 디바이스 섀도우를 부분 갱신합니다.
    ///
    /// `payload`는 `{"state": {"desired": {...}}}` 또는
    /// `{"state": {"reported": {...}}}` 형태의 패치 문서입니다.
    pub async fn update_shadow(&self, device_id: &str, payload: &Value) -> Result<(), AppError> {
        let url = format!("{}/things/{}/shadow", self.base_url, device_id);

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("섀도우 갱신 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "섀도우 갱신 실패 ({}): {}", status, error_text
            )));
        }

        Ok(())
    }
}

impl Default for ShadowClient {
    fn default() -> Self {
        Self::new()
    }
}
