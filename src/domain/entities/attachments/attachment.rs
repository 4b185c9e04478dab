//! 이미지 첨부파일 엔티티
//!
//! 블롭 스토리지에 저장되는 이미지의 메타데이터를 표현합니다.
//! 실제 바이트는 외부 블롭 스토어에, 메타데이터는 MongoDB에 저장됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::domain::dto::attachments::AttachmentResponse;

/// 이미지 첨부파일 메타데이터
///
/// 블롭 키는 MongoDB가 부여한 ObjectId와 확장자의 조합이므로
/// 문서가 저장되기 전에는 키가 존재하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 업로드한 계정의 user_id
    pub user_id: String,
    /// 파일 확장자 (기본 png)
    pub extension: String,
    /// 업로드 당시의 원본 파일 이름
    pub original_name: String,
    pub reg_date: DateTime,
}

impl ImageAttachment {
    pub fn new(user_id: String, extension: String, original_name: String) -> Self {
        Self {
            id: None,
            user_id,
            extension,
            original_name,
            reg_date: DateTime::now(),
        }
    }

    /// 블롭 스토어에서 사용하는 객체 키 (`{object_id}.{extension}`)
    pub fn blob_key(&self) -> Option<String> {
        self.id.map(|id| format!("{}.{}", id.to_hex(), self.extension))
    }

    /// 공개 접근 URL
    pub fn url(&self) -> Option<String> {
        self.blob_key().map(|key| {
            format!(
                "{}/{}/{}",
                StorageConfig::api_server(),
                StorageConfig::attachment_bucket(),
                key
            )
        })
    }

    /// 클라이언트 노출용 응답으로 변환
    pub fn marshall(&self) -> AttachmentResponse {
        AttachmentResponse {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            original_name: self.original_name.clone(),
            url: self.url().unwrap_or_default(),
            reg_date: self.reg_date.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_key_requires_saved_document() {
        let mut attachment = ImageAttachment::new(
            "user-1".to_string(),
            "png".to_string(),
            "photo.png".to_string(),
        );
        assert!(attachment.blob_key().is_none());

        let oid = ObjectId::new();
        attachment.id = Some(oid);
        assert_eq!(
            attachment.blob_key().unwrap(),
            format!("{}.png", oid.to_hex())
        );
    }
}
