//! 디바이스 서비스 모듈

pub mod device_service;

pub use device_service::DeviceService;
