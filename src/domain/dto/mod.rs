//! HTTP 요청/응답 DTO 모듈

pub mod attachments;
pub mod auth;
pub mod devices;
pub mod oauth;
