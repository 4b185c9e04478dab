//! 외부 협력 서비스 클라이언트 모듈
//!
//! 디바이스 섀도우 서비스, 메일 릴레이, 블롭 스토리지에 대한 HTTP
//! 클라이언트를 제공합니다. 세 클라이언트 모두 main에서 생성되어
//! `ServiceLocator::set()`으로 등록되고 서비스 계층에 주입됩니다.

pub mod blob;
pub mod mail;
pub mod shadow;

pub use blob::BlobClient;
pub use mail::{MailClient, OutboundMail};
pub use shadow::ShadowClient;
