//! 사용자 계정 리포지토리 모듈

pub mod user_repo;

pub use user_repo::UserRepository;
