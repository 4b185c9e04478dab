//! 비즈니스 로직 서비스 모듈
//!
//! 각 서비스는 `#[service]` 매크로로 싱글톤 관리되며, 리포지토리와
//! 외부 클라이언트가 자동 주입됩니다.

pub mod attachments;
pub mod auth;
pub mod devices;
pub mod oauth;
