//! # 사용자 계정 리포지토리
//!
//! 계정 엔티티의 데이터 액세스 계층입니다. MongoDB를 주 저장소로 사용하고
//! Redis 읽기 캐시를 지원합니다.
//!
//! ## 캐싱 전략
//!
//! - 캐시 키: `user:{user_id}`, `user:email:{email}` (TTL 600초)
//! - 계정을 변경하는 모든 연산은 두 키를 함께 무효화합니다.
//!   토큰의 바이트 단위 일치로 활성 세션을 판정하므로, 무효화가 누락되면
//!   교체된 토큰이 TTL 동안 유효하게 보이는 문제가 생깁니다.
//!
//! ## 유일성
//!
//! `user_id`/`email`은 unique 인덱스, `kakao_id`/`facebook_id`는
//! unique+sparse 인덱스로 보호됩니다. 서비스 계층의 중복 검사는
//! check-then-act이므로 동시 가입 경쟁은 인덱스가 최종 방어선입니다.

use std::sync::Arc;
use mongodb::bson::{doc, Document, DateTime};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::users::user::UserAccount;

/// 계정 조회 캐시 TTL (초)
const ACCOUNT_CACHE_TTL_SECS: usize = 600;

/// 사용자 계정 데이터 액세스 리포지토리
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결 (자동 주입)
    db: Arc<Database>,
    /// Redis 캐시 클라이언트 (자동 주입)
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 이메일로 계정 조회 (캐시 우선)
    ///
    /// 이메일은 소문자 정규화된 상태로 전달되어야 합니다.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let cache_key = format!("user:email:{}", email);

        if let Ok(Some(cached)) = self.redis.get::<UserAccount>(&cache_key).await {
            return Ok(Some(cached));
        }

        let account = self.collection::<UserAccount>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref account) = account {
            let _ = self.redis
                .set_with_expiry(&cache_key, account, ACCOUNT_CACHE_TTL_SECS)
                .await;
        }

        Ok(account)
    }

    /// user_id로 계정 조회 (캐시 우선)
    ///
    /// 인증 미들웨어가 요청마다 호출하는 가장 빈번한 조회 경로입니다.
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<UserAccount>, AppError> {
        let cache_key = format!("user:{}", user_id);

        if let Ok(Some(cached)) = self.redis.get::<UserAccount>(&cache_key).await {
            return Ok(Some(cached));
        }

        let account = self.collection::<UserAccount>()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref account) = account {
            let _ = self.redis
                .set_with_expiry(&cache_key, account, ACCOUNT_CACHE_TTL_SECS)
                .await;
        }

        Ok(account)
    }

    /// Kakao 외부 식별자로 계정 조회
    pub async fn find_by_kakao_id(&self, kakao_id: &str) -> Result<Option<UserAccount>, AppError> {
        self.collection::<UserAccount>()
            .find_one(doc! { "kakao_id": kakao_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Facebook 외부 식별자로 계정 조회
    pub async fn find_by_facebook_id(&self, facebook_id: &str) -> Result<Option<UserAccount>, AppError> {
        self.collection::<UserAccount>()
            .find_one(doc! { "facebook_id": facebook_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 계정 저장
    ///
    /// 이메일/외부 식별자 중복 검사는 서비스 계층에서 선행되며,
    /// 동시 가입 경쟁은 unique 인덱스가 막습니다.
    pub async fn insert(&self, mut account: UserAccount) -> Result<UserAccount, AppError> {
        let result = self.collection::<UserAccount>()
            .insert_one(&account)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        account.id = result.inserted_id.as_object_id();

        Ok(account)
    }

    /// 프로필 필드 부분 갱신 (`$set`)
    pub async fn update_profile(
        &self,
        user_id: &str,
        set_doc: Document,
    ) -> Result<Option<UserAccount>, AppError> {
        self.apply_update(user_id, doc! { "$set": set_doc }).await
    }

    /// 세션 토큰 쌍 저장
    ///
    /// 기존 쌍을 덮어쓰므로 이 연산이 곧 이전 세션의 무효화입니다.
    pub async fn save_tokens(
        &self,
        user_id: &str,
        auth_token: &str,
        refresh_token: &str,
    ) -> Result<Option<UserAccount>, AppError> {
        self.apply_update(
            user_id,
            doc! { "$set": { "auth_token": auth_token, "refresh_token": refresh_token } },
        )
        .await
    }

    /// 로그아웃 — 인증 토큰과 레거시 access_token 제거
    ///
    /// 리프레시 토큰은 남겨 두어 만료 전 재로그인 없이 토큰 갱신이
    /// 가능하도록 하는 기존 정책을 유지합니다.
    pub async fn clear_session_tokens(
        &self,
        user_id: &str,
    ) -> Result<Option<UserAccount>, AppError> {
        self.apply_update(
            user_id,
            doc! { "$unset": { "auth_token": "", "access_token": "" } },
        )
        .await
    }

    /// 임시 비밀번호 해시와 만료 시각 저장
    pub async fn set_temp_password(
        &self,
        user_id: &str,
        tmp_password_hash: &str,
        valid_until: DateTime,
    ) -> Result<Option<UserAccount>, AppError> {
        self.apply_update(
            user_id,
            doc! { "$set": {
                "tmp_password": tmp_password_hash,
                "tmp_password_valid_period": valid_until,
            } },
        )
        .await
    }

    /// 디바이스 등록 — 표시 이름은 디바이스 ID로 초기화
    pub async fn register_device(
        &self,
        user_id: &str,
        device_id: &str,
    ) -> Result<Option<UserAccount>, AppError> {
        let mut set_doc = Document::new();
        set_doc.insert(format!("devices.{}", device_id), device_id);

        self.apply_update(user_id, doc! { "$set": set_doc }).await
    }

    /// 디바이스 표시 이름 변경
    pub async fn set_device_name(
        &self,
        user_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Option<UserAccount>, AppError> {
        let mut set_doc = Document::new();
        set_doc.insert(format!("devices.{}", device_id), name);

        self.apply_update(user_id, doc! { "$set": set_doc }).await
    }

    /// 갱신 연산 공통 경로
    ///
    /// 갱신 후 문서를 돌려받아(`ReturnDocument::After`) 캐시를 무효화합니다.
    async fn apply_update(
        &self,
        user_id: &str,
        update: Document,
    ) -> Result<Option<UserAccount>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<UserAccount>()
            .find_one_and_update(doc! { "user_id": user_id }, update)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref account) = updated {
            self.invalidate_account_cache(account).await;
        }

        Ok(updated)
    }

    /// 계정 관련 캐시 키 무효화 (실패는 무시)
    async fn invalidate_account_cache(&self, account: &UserAccount) {
        let _ = self.redis.del(&format!("user:{}", account.user_id)).await;
        let _ = self.redis.del(&format!("user:email:{}", account.email)).await;
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<UserAccount>();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        // 외부 식별자는 OAuth 연동 계정에만 존재하므로 sparse
        let kakao_index = IndexModel::builder()
            .keys(doc! { "kakao_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("kakao_id_unique".to_string())
                .build())
            .build();

        let facebook_index = IndexModel::builder()
            .keys(doc! { "facebook_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("facebook_id_unique".to_string())
                .build())
            .build();

        let reg_date_index = IndexModel::builder()
            .keys(doc! { "reg_date": -1 })
            .options(IndexOptions::builder()
                .name("reg_date_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([
                user_id_index,
                email_index,
                kakao_index,
                facebook_index,
                reg_date_index,
            ])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
