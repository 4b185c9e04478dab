//! 아롬 계정/디바이스 페어링 백엔드
//!
//! Rust 기반의 사용자 계정 및 디바이스 페어링 서비스입니다.
//! 이메일/비밀번호와 OAuth(Kakao/Facebook) 가입·로그인, JWT 세션 관리,
//! 임시 비밀번호 기반 재설정, 프로필 저장, 이미지 첨부파일, 그리고
//! 외부 디바이스 섀도우 서비스 위의 소유권 제어를 제공합니다.
//!
//! # Features
//!
//! - **계정 관리**: 가입, 로그인/로그아웃, 프로필 조회/수정, 비밀번호 재설정
//! - **JWT 세션**: 인증/리프레시 토큰 쌍, 계정당 단일 활성 세션
//! - **OAuth**: Kakao/Facebook 토큰 검증 기반 소셜 로그인·가입
//! - **디바이스 페어링**: 섀도우 소유권 검사와 상태 프록시
//! - **첨부파일**: 블롭 스토어 기반 이미지 업로드/삭제
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB + Redis**: 영구 저장과 조회 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Middlewares    │ ← 토큰 검증 + 호출자 해석
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (계정/토큰/OAuth/디바이스)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Repos + Clients │ ← MongoDB/Redis, 섀도우/메일/블롭
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use arom_account_backend::services::auth::{AccountService, TokenService};
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let account_service = AccountService::instance();
//! let token_service = TokenService::instance();
//!
//! // 로그인 및 토큰 발급
//! let outcome = account_service.login("abc1@abcmart.com", "abc12345!").await?;
//! println!("auth token: {}", outcome.tokens.auth_token);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod clients;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
