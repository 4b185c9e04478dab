//! # Service Registry — 싱글톤 의존성 주입 시스템
//!
//! 서비스/리포지토리 컴포넌트를 싱글톤으로 관리하는 DI 컨테이너입니다.
//! `#[service]` / `#[repository]` 매크로가 생성하는 등록 정보를
//! `inventory` 크레이트로 컴파일 타임에 수집하고, `ServiceLocator`가
//! 런타임에 지연 초기화와 의존성 해결을 담당합니다.
//!
//! ## 동작 개요
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service] 매크로 → ServiceRegistration 생성
//!    ├─ #[repository] 매크로 → RepositoryRegistration 생성
//!    └─ inventory::collect! → 전역 레지스트리에 등록
//!
//! 2. 런타임 초기화
//!    ├─ Database, RedisClient, ShadowClient 등 인프라 컴포넌트를
//!    │  main에서 ServiceLocator::set()으로 직접 등록
//!    └─ ServiceLocator::initialize_all() → 전체 인스턴스 생성
//!
//! 3. 의존성 주입
//!    ├─ Arc<T> 필드 감지 → ServiceLocator::get::<T>() 호출
//!    ├─ 캐시 확인 → 등록된 생성자 호출 → 캐싱 후 반환
//!    └─ 순환 참조는 패닉으로 조기 발견
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// `#[service]` 매크로가 적용된 구조체가 자동으로 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 검색 키로 사용되는 서비스 이름
    fn name(&self) -> &str;

    /// 서비스 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 적용된 구조체가 자동으로 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리 검색 키로 사용되는 리포지토리 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 데이터 액세스 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 메타데이터
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 메타데이터
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (검색 키)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

// 컴파일 타임에 모든 등록 정보를 수집한다
inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<ServiceRegistration>() {
        let clean_name = extract_clean_name_static(registration.name);
        cache.insert(clean_name, registration);
    }

    print_cache_initialized("Service", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<RepositoryRegistration>() {
        let clean_name = extract_clean_name_static(registration.name);
        cache.insert(clean_name, registration);
    }

    print_cache_initialized("Repository", cache.len());
    cache
});

/// 등록 이름에서 접미사를 제거하여 정규화합니다
///
/// 매크로가 생성하는 등록 이름은 `user_service`, `user_repository` 형태이므로
/// `user`로 정규화하여 타입 이름과 매칭합니다.
fn extract_clean_name_static(name: &str) -> String {
    if name.ends_with("_service") {
        name[..name.len() - 8].to_string()
    } else if name.ends_with("_repository") {
        name[..name.len() - 11].to_string()
    } else {
        name.to_string()
    }
}

/// 싱글톤 의존성 주입 컨테이너
///
/// 각 타입당 정확히 하나의 인스턴스만 생성하며, `RwLock` 기반으로
/// 동시 접근에 안전합니다. 초기화 중인 타입을 추적하여 순환 참조를
/// 데드락 대신 패닉으로 드러냅니다.
pub struct ServiceLocator {
    /// 생성된 인스턴스 캐시 (`TypeId` → 인스턴스)
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 초기화 중인 타입들 (순환 참조 방지용)
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    /// 전역 Lazy static에서만 호출됩니다.
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 1. 인스턴스 캐시 확인 (O(1))
    /// 2. 순환 참조 검사 — 초기화 중인 타입이면 패닉
    /// 3. 타입 이름 분석 — `*Repository` / `*Service` 접미사로 카테고리 결정
    /// 4. 레지스트리에서 등록 정보 조회 후 생성자 호출
    /// 5. 생성된 인스턴스 캐싱 후 반환
    ///
    /// # Panics
    ///
    /// * 순환 참조 감지 시
    /// * 등록되지 않은 타입 요청 시
    /// * 등록된 타입과 요청 타입이 불일치할 때
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        // 이미 생성된 인스턴스 확인
        {
            let instances = LOCATOR.instances.read().unwrap();
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }
        }

        // 현재 초기화 중인지 확인 (순환 참조 방지)
        {
            let initializing = LOCATOR.initializing.read().unwrap();
            if initializing.contains(&type_id) {
                eprintln!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }
        // 초기화 중임을 표시
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.insert(type_id);
        }

        // 인스턴스 생성 시도
        let result = std::panic::catch_unwind(|| {
            let mut instances = LOCATOR.instances.write().unwrap();

            // 더블 체크
            if let Some(instance) = instances.get(&type_id) {
                return instance.clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }

            // 타입 이름에서 실제 타입 이름 추출
            let clean_type_name = Self::extract_clean_type_name(type_name);

            // 리포지토리 찾기 (캐시 사용으로 O(1) 조회)
            if clean_type_name.contains("Repository") {
                // "UserRepository" -> "user"
                let entity_name = clean_type_name
                    .strip_suffix("Repository")
                    .unwrap_or(&clean_type_name)
                    .to_lowercase();

                if let Some(registration) = REPOSITORY_NAME_CACHE.get(&entity_name) {
                    let boxed_instance = (registration.constructor)();

                    if let Ok(arc_instance) = boxed_instance.downcast::<Arc<T>>() {
                        let instance = (*arc_instance).clone();
                        instances.insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);
                        return instance;
                    } else {
                        panic!("Type mismatch for repository: {}", registration.name);
                    }
                } else {
                    panic!("No repository found for entity: {}", entity_name);
                }
            }

            // 서비스 찾기 (캐시 사용으로 O(1) 조회)
            if clean_type_name.contains("Service") {
                // "TokenService" -> "token"
                let entity_name = clean_type_name
                    .strip_suffix("Service")
                    .unwrap_or(&clean_type_name)
                    .to_lowercase();

                if let Some(registration) = SERVICE_NAME_CACHE.get(&entity_name) {
                    let boxed_instance = (registration.constructor)();

                    if let Ok(arc_instance) = boxed_instance.downcast::<Arc<T>>() {
                        let instance = (*arc_instance).clone();
                        instances.insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);
                        return instance;
                    } else {
                        panic!("Type mismatch for service: {}", registration.name);
                    }
                } else {
                    panic!("No service found for entity: {}", entity_name);
                }
            }

            // 매칭 실패 - 에러 처리
            panic!("Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()", type_name);
        });

        // 초기화 완료 표시
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.remove(&type_id);
        }

        match result {
            Ok(instance) => instance,
            Err(e) => {
                // 초기화 실패 시에도 초기화 중 플래그 제거
                let mut initializing = LOCATOR.initializing.write().unwrap();
                initializing.remove(&type_id);

                eprintln!("ERROR: Failed to create instance for {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    /// 타입 이름에서 실제 타입 이름을 추출합니다.
    ///
    /// `std::any::type_name::<T>()`는 전체 모듈 경로를 포함하므로
    /// (예: `arom_account_backend::services::auth::TokenService`)
    /// 마지막 세그먼트만 추출하여 매칭에 사용합니다.
    fn extract_clean_type_name(type_name: &str) -> String {
        if let Some(pos) = type_name.rfind("::") {
            type_name[pos + 2..].to_string()
        } else {
            type_name.to_string()
        }
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// 매크로로 관리되지 않는 인프라 컴포넌트(Database, RedisClient,
    /// ShadowClient, MailClient, BlobClient, PassphraseDict 등)를
    /// main에서 수동으로 등록할 때 사용합니다. 애플리케이션 컴포넌트보다
    /// 먼저 등록되어야 의존성 해결이 가능합니다.
    ///
    /// ```rust,ignore
    /// let database = Arc::new(Database::new().await?);
    /// ServiceLocator::set(database);
    /// ServiceLocator::initialize_all().await?;
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let clean_name = Self::extract_clean_type_name(type_name);

        println!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 서비스와 리포지토리를 초기화합니다.
    ///
    /// 애플리케이션 시작 시 호출되어 전체 컴포넌트 인스턴스를 미리
    /// 생성합니다. 리포지토리(데이터 계층)를 먼저, 서비스(비즈니스 계층)를
    /// 나중에 초기화합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        // 1단계: 리포지토리 인스턴스 생성
        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        // 2단계: 서비스 인스턴스 생성
        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
