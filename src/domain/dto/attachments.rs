//! 첨부파일 요청·응답 DTO

use serde::{Deserialize, Serialize};

/// 업로드 쿼리 — 원본 파일 이름
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentUploadQuery {
    pub filename: String,
}

/// 목록 조회 페이징 쿼리
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// 첨부파일 단건 응답
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub id: String,
    pub original_name: String,
    pub url: String,
    pub reg_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 20);
    }
}
