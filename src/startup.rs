//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use chrono::Utc;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthServiceImpl, CategoryServiceImpl, ProductServiceImpl, StoreServiceImpl, UserServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::{
    CategoryRepository, ProductRepository, StoreRepository, TokenBlacklistRepository,
    UserRepository,
};
use crate::infrastructure::database;
use crate::infrastructure::memory::MemoryDatabase;
use crate::infrastructure::repositories::{
    PgCategoryRepository, PgProductRepository, PgStoreRepository, PgTokenBlacklistRepository,
    PgUserRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::password::PasswordManager;
use crate::shared::snowflake::SnowflakeGenerator;

/// Repository handles behind the active storage backend
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub token_blacklist: Arc<dyn TokenBlacklistRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            stores: Arc::new(PgStoreRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            token_blacklist: Arc::new(PgTokenBlacklistRepository::new(pool)),
        }
    }

    /// Every repository served by one shared in-memory database.
    pub fn memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            users: db.clone(),
            stores: db.clone(),
            categories: db.clone(),
            products: db.clone(),
            token_blacklist: db,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    /// Present only on the Postgres backend; used by readiness checks.
    pub db: Option<PgPool>,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub passwords: PasswordManager,
    pub settings: Arc<Settings>,
}

pub type AppAuthService = AuthServiceImpl<dyn UserRepository, dyn TokenBlacklistRepository>;
pub type AppUserService = UserServiceImpl<dyn UserRepository>;
pub type AppStoreService = StoreServiceImpl<dyn StoreRepository>;
pub type AppCategoryService = CategoryServiceImpl<dyn StoreRepository, dyn CategoryRepository>;
pub type AppProductService =
    ProductServiceImpl<dyn StoreRepository, dyn CategoryRepository, dyn ProductRepository>;

impl AppState {
    pub fn new(settings: Settings, repos: Repositories, db: Option<PgPool>) -> Result<Self> {
        let passwords = PasswordManager::new(&settings.password)?;
        let snowflake = Arc::new(SnowflakeGenerator::new(settings.snowflake.machine_id));

        Ok(Self {
            repos,
            db,
            snowflake,
            passwords,
            settings: Arc::new(settings),
        })
    }

    pub fn auth_service(&self) -> AppAuthService {
        AuthServiceImpl::new(
            self.repos.users.clone(),
            self.repos.token_blacklist.clone(),
            self.passwords.clone(),
            self.settings.jwt.clone(),
        )
    }

    pub fn user_service(&self) -> AppUserService {
        UserServiceImpl::new(
            self.repos.users.clone(),
            self.passwords.clone(),
            self.snowflake.clone(),
        )
    }

    pub fn store_service(&self) -> AppStoreService {
        StoreServiceImpl::new(self.repos.stores.clone(), self.snowflake.clone())
    }

    pub fn category_service(&self) -> AppCategoryService {
        CategoryServiceImpl::new(
            self.repos.stores.clone(),
            self.repos.categories.clone(),
            self.snowflake.clone(),
        )
    }

    pub fn product_service(&self) -> AppProductService {
        ProductServiceImpl::new(
            self.repos.stores.clone(),
            self.repos.categories.clone(),
            self.repos.products.clone(),
            self.snowflake.clone(),
        )
    }
}

/// Full router with CORS and request tracing applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let (repos, db) = match settings.storage.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }

                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                (Repositories::memory(Arc::new(MemoryDatabase::new())), None)
            }
        };

        let purged = repos.token_blacklist.purge_expired(Utc::now()).await?;
        if purged > 0 {
            tracing::info!(purged, "Expired blacklist entries removed");
        }

        let addr = settings.server.socket_addr()?;
        let state = AppState::new(settings, repos, db)?;
        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
