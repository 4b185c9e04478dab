//! # 디바이스 소유권 게이트 및 상태 프록시
//!
//! 외부 섀도우 서비스의 `reported.owner_id`를 소유권의 근거로 삼아
//! 디바이스 등록과 상태 조회/갱신을 인가합니다.
//!
//! 상태 연산은 핸들러 본문이 실행되기 전에 반드시
//! [`DeviceService::authorize_owner`]를 통과해야 하며, 이 계약은 각
//! 상태 메서드의 첫 문장에서 강제됩니다.
//!
//! 섀도우 통과 시 쓰기에는 밀리초 타임스탬프가 주입되고, 읽기에서는
//! 레거시 배열 형태의 owner_id가 문자열로 교정됩니다.

use std::sync::Arc;
use chrono::Utc;
use serde_json::{json, Map, Value};
use singleton_macro::service;

use crate::clients::shadow::ShadowClient;
use crate::core::errors::AppError;
use crate::domain::models::auth::CallerContext;
use crate::domain::models::shadow::normalized_owner;
use crate::repositories::users::user_repo::UserRepository;

/// 디바이스 소유권/상태 서비스
#[service(name = "device")]
pub struct DeviceService {
    /// 계정 리포지토리 (자동 주입)
    user_repo: Arc<UserRepository>,
    /// 섀도우 서비스 클라이언트 (자동 주입)
    shadow: Arc<ShadowClient>,
}

impl DeviceService {
    /// 섀도우에서 소유자를 읽고, 레거시 배열 표기를 발견하면 교정합니다
    async fn owner_of(&self, device_id: &str) -> Result<Option<String>, AppError> {
        let doc = self.shadow.get_shadow(device_id).await?;
        let (owner, needs_correction) = normalized_owner(&doc.state.reported);

        if needs_correction {
            if let Some(ref owner) = owner {
                log::info!("섀도우 owner_id 배열 표기 교정: {}", device_id);
                let patch = json!({ "state": { "reported": { "owner_id": owner } } });
                self.shadow.update_shadow(device_id, &patch).await?;
            }
        }

        Ok(owner)
    }

    /// 소유권 검사
    ///
    /// 섀도우의 소유자와 호출자의 user_id가 일치하고, 디바이스가
    /// 호출자의 디바이스 맵에 등록되어 있어야 통과합니다.
    pub async fn authorize_owner(
        &self,
        caller: &CallerContext,
        device_id: &str,
    ) -> Result<(), AppError> {
        let owner = self.owner_of(device_id).await?;

        let account = &caller.account;
        if owner.as_deref() == Some(account.user_id.as_str()) && account.has_device(device_id) {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "This user is not owner of this device.".to_string(),
            ))
        }
    }

    /// 디바이스 등록 (소유권 주장)
    ///
    /// 섀도우의 `reported.owner_id`가 호출자와 일치할 때만 호출자의
    /// 디바이스 맵에 추가되며, 표시 이름은 디바이스 ID로 초기화됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Conflict` - 이미 등록된 디바이스
    /// * `AppError::Unauthorized` - 섀도우 소유자가 호출자가 아님
    pub async fn register(
        &self,
        caller: &CallerContext,
        device_id: &str,
    ) -> Result<Value, AppError> {
        let doc = self.shadow.get_shadow(device_id).await?;

        if caller.account.has_device(device_id) {
            return Err(AppError::Conflict("Already Registered Device".to_string()));
        }

        let owner = doc.state.reported.get("owner_id").and_then(|v| v.as_str());
        if owner != Some(caller.user_id()) {
            return Err(AppError::Unauthorized(
                "This user is not owner of this device.".to_string(),
            ));
        }

        self.user_repo
            .register_device(caller.user_id(), device_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("This user does not exist.".to_string()))?;

        log::info!("디바이스 등록: {} ← {}", device_id, caller.user_id());

        serde_json::to_value(&doc.state)
            .map_err(|e| AppError::InternalError(format!("섀도우 직렬화 실패: {}", e)))
    }

    /// 현재 상태 조회 (소유자 전용)
    ///
    /// 조회 시점의 상태를 반환하면서 desired에 조회 타임스탬프를
    /// 주입합니다. 응답에는 호출자가 지정한 표시 이름이 포함됩니다.
    pub async fn current_state(
        &self,
        caller: &CallerContext,
        device_id: &str,
    ) -> Result<Value, AppError> {
        self.authorize_owner(caller, device_id).await?;

        let doc = self.shadow.get_shadow(device_id).await?;

        let patch = json!({
            "state": { "desired": { "timestamp": Utc::now().timestamp_millis() } }
        });
        self.shadow.update_shadow(device_id, &patch).await?;

        let mut state = serde_json::to_value(&doc.state)
            .map_err(|e| AppError::InternalError(format!("섀도우 직렬화 실패: {}", e)))?;
        state["name"] = json!(caller.account.devices.get(device_id));

        Ok(state)
    }

    /// 상태 갱신 (소유자 전용)
    ///
    /// 요청 본문의 `state` 객체가 desired 상태로 전달됩니다.
    /// `name` 키는 섀도우로 보내지 않고 호출자 계정의 디바이스
    /// 표시 이름으로 저장합니다.
    pub async fn update_state(
        &self,
        caller: &CallerContext,
        device_id: &str,
        mut desired: Map<String, Value>,
    ) -> Result<Value, AppError> {
        self.authorize_owner(caller, device_id).await?;

        desired.insert(
            "timestamp".to_string(),
            json!(Utc::now().timestamp_millis()),
        );

        let mut display_name = caller.account.devices.get(device_id).cloned();
        if let Some(name_value) = desired.remove("name") {
            if let Some(name) = name_value.as_str() {
                self.user_repo
                    .set_device_name(caller.user_id(), device_id, name)
                    .await?;
                display_name = Some(name.to_string());
            }
        }

        let patch = json!({ "state": { "desired": desired } });
        self.shadow.update_shadow(device_id, &patch).await?;

        let doc = self.shadow.get_shadow(device_id).await?;
        let mut state = serde_json::to_value(&doc.state)
            .map_err(|e| AppError::InternalError(format!("섀도우 직렬화 실패: {}", e)))?;
        state["name"] = json!(display_name);

        Ok(state)
    }
}
