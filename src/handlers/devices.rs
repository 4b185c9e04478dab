//! 디바이스 HTTP Handlers
//!
//! 디바이스 등록과 섀도우 상태 프록시 엔드포인트입니다.
//! 상태 엔드포인트는 핸들러 본문이 서비스에 진입하자마자 소유권
//! 검사를 통과해야 하며, 실패 시 어떤 섀도우 변경도 일어나지 않습니다.

use actix_web::{get, post, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::devices::DeviceStateRequest;
use crate::domain::models::auth::CallerContext;
use crate::services::devices::DeviceService;

/// 디바이스 등록 핸들러 (소유권 주장)
///
/// # Endpoint
/// `POST /devices/{device_id}/register`
#[post("/{device_id}/register")]
pub async fn register_device(
    caller: CallerContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let device_service = DeviceService::instance();

    let state = device_service.register(&caller, &device_id).await?;

    Ok(HttpResponse::Ok().json(state))
}

/// 디바이스 현재 상태 조회 핸들러
///
/// # Endpoint
/// `GET /devices/{device_id}/state`
#[get("/{device_id}/state")]
pub async fn get_device_state(
    caller: CallerContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let device_service = DeviceService::instance();

    let state = device_service.current_state(&caller, &device_id).await?;

    Ok(HttpResponse::Ok().json(state))
}

/// 디바이스 상태 갱신 핸들러
///
/// # Endpoint
/// `POST /devices/{device_id}/state`
#[post("/{device_id}/state")]
pub async fn update_device_state(
    caller: CallerContext,
    path: web::Path<String>,
    payload: web::Json<DeviceStateRequest>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let device_service = DeviceService::instance();

    let state = device_service
        .update_state(&caller, &device_id, payload.into_inner().state)
        .await?;

    Ok(HttpResponse::Ok().json(state))
}
