//! 디바이스 섀도우 문서 모델
//!
//! 외부 섀도우 서비스가 보관하는 디바이스 상태 문서의 타입입니다.
//! `reported`는 디바이스가 보고한 상태, `desired`는 서버/앱이 지정한
//! 목표 상태이며, `reported.owner_id`가 소유권 판정의 기준입니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 섀도우 상태 (reported / desired)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShadowState {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub reported: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub desired: Map<String, Value>,
}

/// 섀도우 서비스가 반환하는 문서 (`{"state": {...}}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowDocument {
    pub state: ShadowState,
}

/// `reported.owner_id`를 정규화하여 읽습니다.
///
/// 과거 데이터 마이그레이션 산물로 owner_id가 단일 원소 배열로 저장된
/// 섀도우가 남아 있습니다. 배열이면 첫 원소를 소유자로 취급하고,
/// 두 번째 반환값으로 섀도우 교정 쓰기가 필요함을 알립니다.
/// (레거시 호환 동작이며 신규 섀도우는 항상 문자열로 기록됩니다.)
pub fn normalized_owner(reported: &Map<String, Value>) -> (Option<String>, bool) {
    match reported.get("owner_id") {
        Some(Value::String(owner)) => (Some(owner.clone()), false),
        Some(Value::Array(items)) => (
            items
                .first()
                .and_then(|v| v.as_str().map(|s| s.to_string())),
            true,
        ),
        _ => (None, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reported(value: Value) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("owner_id".to_string(), value);
        map
    }

    #[test]
    fn test_normalized_owner_plain_string() {
        let (owner, corrected) = normalized_owner(&reported(json!("user-1")));
        assert_eq!(owner.as_deref(), Some("user-1"));
        assert!(!corrected);
    }

    #[test]
    fn test_normalized_owner_legacy_array() {
        let (owner, corrected) = normalized_owner(&reported(json!(["user-1"])));
        assert_eq!(owner.as_deref(), Some("user-1"));
        assert!(corrected);
    }

    #[test]
    fn test_normalized_owner_missing() {
        let (owner, corrected) = normalized_owner(&Map::new());
        assert!(owner.is_none());
        assert!(!corrected);
    }

    #[test]
    fn test_shadow_document_roundtrip() {
        let json = r#"{
            "state": {
                "reported": {"light": 0, "power": false, "owner_id": "user-1"},
                "desired": {"power": true, "timestamp": 12312321}
            }
        }"#;

        let doc: ShadowDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.state.reported["owner_id"], "user-1");
        assert_eq!(doc.state.desired["power"], true);
    }
}
