//! Redis 캐시 클라이언트
//!
//! 멀티플렉스 비동기 연결 위에서 JSON 직렬화 기반의 get/set/del
//! 연산을 제공합니다. 캐시 연산 실패는 호출부에서 무시 가능한
//! 성능 최적화 실패로 취급됩니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 캐시 클라이언트 래퍼
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 새 Redis 연결을 생성하고 PING으로 가용성을 확인합니다.
    ///
    /// ## 환경 변수
    /// - `REDIS_URL`: Redis 접속 URL (기본값: "redis://localhost:6379")
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        println!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 키에 저장된 JSON 값을 역직렬화하여 반환합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 값을 JSON으로 직렬화하여 저장합니다 (만료 없음).
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set(key, json).await
    }

    /// 값을 JSON으로 직렬화하여 TTL과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    /// 키를 삭제합니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 여러 키를 한 번에 삭제합니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    /// 패턴에 매칭되는 키 목록을 조회합니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }
}

impl Default for RedisClient {
    fn default() -> Self {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)
            .expect("Failed to create Redis client with default configuration");

        Self { client }
    }
}
