//! # 이미지 첨부파일 서비스
//!
//! 메타데이터(MongoDB)와 실제 바이트(블롭 스토어)의 2단계 저장을
//! 오케스트레이션합니다. 메타데이터를 먼저 저장해 블롭 키를 확보한 뒤
//! 업로드하며, 업로드 실패 시 고아 메타데이터는 최선 노력으로 정리합니다.

use std::sync::Arc;
use singleton_macro::service;

use crate::clients::blob::BlobClient;
use crate::core::errors::AppError;
use crate::domain::dto::attachments::AttachmentResponse;
use crate::domain::entities::attachments::attachment::ImageAttachment;
use crate::domain::models::auth::CallerContext;
use crate::repositories::attachments::attachment_repo::AttachmentRepository;

/// 이미지 첨부파일 서비스
#[service(name = "attachment")]
pub struct AttachmentService {
    /// 메타데이터 리포지토리 (자동 주입)
    attachment_repo: Arc<AttachmentRepository>,
    /// 블롭 스토리지 클라이언트 (자동 주입)
    blob: Arc<BlobClient>,
}

impl AttachmentService {
    /// 이미지 업로드
    ///
    /// # Errors
    ///
    /// * `AppError::BadRequest` - 이미지가 아닌 Content-Type
    /// * `AppError::ServerError` - 블롭 업로드 실패
    pub async fn upload(
        &self,
        caller: &CallerContext,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachmentResponse, AppError> {
        if !content_type.starts_with("image") {
            return Err(AppError::BadRequest("Invalid Image Type".to_string()));
        }

        let extension = filename.rsplit('.').next().unwrap_or("png").to_string();

        let attachment = self
            .attachment_repo
            .insert(ImageAttachment::new(
                caller.user_id().to_string(),
                extension,
                filename.to_string(),
            ))
            .await?;

        let key = attachment.blob_key().ok_or_else(|| {
            AppError::InternalError("저장된 첨부파일에 ID가 없습니다".to_string())
        })?;

        if let Err(e) = self.blob.put_object(&key, content_type, bytes).await {
            log::error!("블롭 업로드 실패: {}", e);
            // 고아 메타데이터 정리는 최선 노력으로만 수행한다
            if let Some(id) = attachment.id {
                let _ = self.attachment_repo.delete(&id.to_hex()).await;
            }
            return Err(AppError::ServerError("s3 upload error. try again".to_string()));
        }

        Ok(attachment.marshall())
    }

    /// 내 첨부파일 목록 조회 — (목록, 전체 개수)
    pub async fn list(
        &self,
        caller: &CallerContext,
        offset: u64,
        limit: i64,
    ) -> Result<(Vec<AttachmentResponse>, u64), AppError> {
        let (attachments, total) = self
            .attachment_repo
            .find_page_by_user(caller.user_id(), offset, limit)
            .await?;

        Ok((
            attachments.iter().map(|a| a.marshall()).collect(),
            total,
        ))
    }

    /// 첨부파일 삭제
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 존재하지 않는 첨부파일
    /// * `AppError::Forbidden` - 다른 사용자가 업로드한 첨부파일
    /// * `AppError::ServerError` - 블롭 삭제 실패
    pub async fn delete(
        &self,
        caller: &CallerContext,
        attachment_id: &str,
    ) -> Result<(), AppError> {
        let attachment = self
            .attachment_repo
            .find_by_id(attachment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Image Not Found".to_string()))?;

        if attachment.user_id != caller.user_id() {
            return Err(AppError::Forbidden(
                "Image Uploaded by another user".to_string(),
            ));
        }

        if let Some(key) = attachment.blob_key() {
            self.blob.delete_object(&key).await.map_err(|e| {
                log::error!("블롭 삭제 실패: {}", e);
                AppError::ServerError("s3 delete error. try again".to_string())
            })?;
        }

        self.attachment_repo.delete(attachment_id).await?;

        Ok(())
    }
}
