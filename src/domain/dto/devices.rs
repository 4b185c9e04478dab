//! 디바이스 상태 요청 DTO

use serde::Deserialize;
use serde_json::{Map, Value};

/// 디바이스 상태 갱신 요청
///
/// `state` 객체가 섀도우의 desired 상태로 전달됩니다.
/// `name` 키는 섀도우로 전달되지 않고 호출자 계정의 디바이스
/// 표시 이름으로 저장됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStateRequest {
    pub state: Map<String, Value>,
}
