//! 인증 서비스 모듈
//!
//! 비밀번호 수명주기(영구 + 임시), JWT 토큰 발급/검증/갱신,
//! 가입/로그인 오케스트레이션을 담당합니다.

pub mod account_service;
pub mod password;
pub mod token_service;

pub use account_service::AccountService;
pub use password::PassphraseDict;
pub use token_service::TokenService;
