//! 첨부파일 HTTP Handlers
//!
//! 이미지 바이트는 요청 본문으로, 원본 파일 이름은 `filename` 쿼리로,
//! 형식은 Content-Type 헤더로 전달받습니다.

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::attachments::{AttachmentUploadQuery, PageQuery};
use crate::domain::models::auth::CallerContext;
use crate::services::attachments::AttachmentService;

/// 이미지 업로드 핸들러
///
/// # Endpoint
/// `POST /attachments?filename=photo.png` (본문: 이미지 바이트)
#[post("")]
pub async fn upload_attachment(
    caller: CallerContext,
    req: HttpRequest,
    query: web::Query<AttachmentUploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
        .to_string();

    let attachment_service = AttachmentService::instance();

    let response = attachment_service
        .upload(&caller, &query.filename, &content_type, body.to_vec())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 내 첨부파일 목록 조회 핸들러
///
/// # Endpoint
/// `GET /attachments?offset=0&limit=20`
#[get("")]
pub async fn list_attachments(
    caller: CallerContext,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let attachment_service = AttachmentService::instance();

    let (attachments, total_size) = attachment_service
        .list(&caller, query.offset, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "attachments": attachments,
        "limit": query.limit,
        "total_size": total_size,
    })))
}

/// 첨부파일 삭제 핸들러
///
/// # Endpoint
/// `DELETE /attachments/{attachment_id}`
#[delete("/{attachment_id}")]
pub async fn delete_attachment(
    caller: CallerContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attachment_id = path.into_inner();
    let attachment_service = AttachmentService::instance();

    attachment_service.delete(&caller, &attachment_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "result": true })))
}
