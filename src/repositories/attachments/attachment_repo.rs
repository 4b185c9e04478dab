//! 첨부파일 메타데이터 리포지토리
//!
//! 이미지 첨부파일의 메타데이터 CRUD를 담당합니다. 실제 바이트는
//! 블롭 스토어에 있으므로 조회 빈도가 낮아 캐싱하지 않습니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::attachments::attachment::ImageAttachment;

/// 첨부파일 메타데이터 리포지토리
#[repository(name = "attachment", collection = "attachments")]
pub struct AttachmentRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
    /// Redis 캐시 클라이언트 (자동 주입, 현재 미사용 캐시 슬롯)
    redis: Arc<RedisClient>,
}

impl AttachmentRepository {
    /// 메타데이터 저장 — 부여된 ObjectId가 블롭 키의 근거가 됩니다
    pub async fn insert(&self, mut attachment: ImageAttachment) -> Result<ImageAttachment, AppError> {
        let result = self.collection::<ImageAttachment>()
            .insert_one(&attachment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        attachment.id = result.inserted_id.as_object_id();

        Ok(attachment)
    }

    /// ID로 단건 조회
    ///
    /// 잘못된 ObjectId 형식은 존재하지 않는 문서와 동일하게 취급합니다.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ImageAttachment>, AppError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        self.collection::<ImageAttachment>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 단건 삭제
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(false),
        };

        let result = self.collection::<ImageAttachment>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    /// 소유자 기준 페이지 조회 — (목록, 전체 개수)
    pub async fn find_page_by_user(
        &self,
        user_id: &str,
        offset: u64,
        limit: i64,
    ) -> Result<(Vec<ImageAttachment>, u64), AppError> {
        let filter = doc! { "user_id": user_id };

        let total = self.collection::<ImageAttachment>()
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let cursor = self.collection::<ImageAttachment>()
            .find(filter)
            .sort(doc! { "reg_date": -1 })
            .skip(offset)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let attachments = cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((attachments, total))
    }

    /// 컬렉션 인덱스 생성
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_id_index = mongodb::IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(mongodb::options::IndexOptions::builder()
                .name("user_id_idx".to_string())
                .build())
            .build();

        self.collection::<ImageAttachment>()
            .create_indexes([user_id_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
