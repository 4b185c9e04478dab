//! 블롭 스토리지 클라이언트
//!
//! S3 호환 스토리지에 객체를 저장/삭제합니다. 경로 방식
//! (`{root}/{bucket}/{key}`)으로 접근하며, 업로드된 객체는 공개 읽기로
//! 서비스됩니다.

use crate::config::StorageConfig;
use crate::core::errors::AppError;

/// 블롭 스토리지 HTTP 클라이언트
pub struct BlobClient {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl BlobClient {
    pub fn new() -> Self {
        Self::with_target(
            StorageConfig::api_server(),
            StorageConfig::attachment_bucket(),
        )
    }

    pub fn with_target(base_url: String, bucket: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            bucket,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, key)
    }

    /// 객체를 업로드합니다.
    pub async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AppError> {
        let response = self
            .http
            .put(self.object_url(key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("블롭 업로드 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "블롭 업로드 실패 ({}): {}", status, error_text
            )));
        }

        Ok(())
    }

    /// 객체를 삭제합니다.
    pub async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.object_url(key))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("블롭 삭제 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "블롭 삭제 실패 ({}): {}", status, error_text
            )));
        }

        Ok(())
    }
}

impl Default for BlobClient {
    fn default() -> Self {
        Self::new()
    }
}
