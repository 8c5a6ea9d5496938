//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CategoryRepository, PostRepository};
use quill_infra::{InMemoryCategoryRepository, InMemoryPostRepository};

use crate::config::AppConfig;
use crate::flash::FlashCookie;
use crate::views::Templates;

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    InMemory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::InMemory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub templates: Arc<Templates>,
    pub flash: FlashCookie,
    pub store: StoreKind,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, tera::Error> {
        let templates = Arc::new(Templates::new()?);

        if let Some(state) = Self::connect_postgres(config, templates.clone()).await {
            tracing::info!("Application state initialized (postgres)");
            return Ok(state);
        }

        tracing::info!("Application state initialized (memory)");
        Ok(Self::in_memory(templates, config.flash.clone()))
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(templates: Arc<Templates>, flash: FlashCookie) -> Self {
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(categories.clone()));

        Self {
            categories,
            posts,
            templates,
            flash,
            store: StoreKind::InMemory,
        }
    }
}

#[cfg(feature = "postgres")]
impl AppState {
    async fn connect_postgres(config: &AppConfig, templates: Arc<Templates>) -> Option<Self> {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return None;
        };

        let conn = match quill_infra::database::connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return None;
            }
        };

        if config.auto_migrate {
            run_migrations(&conn).await;
        }

        Some(Self {
            categories: Arc::new(quill_infra::PostgresCategoryRepository::new(conn.clone())),
            posts: Arc::new(quill_infra::PostgresPostRepository::new(conn)),
            templates,
            flash: config.flash.clone(),
            store: StoreKind::Postgres,
        })
    }
}

#[cfg(not(feature = "postgres"))]
impl AppState {
    async fn connect_postgres(_config: &AppConfig, _templates: Arc<Templates>) -> Option<Self> {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        None
    }
}

#[cfg(feature = "postgres")]
async fn run_migrations(conn: &quill_infra::database::DbConn) {
    use migration::MigratorTrait;

    match migration::Migrator::up(conn, None).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::error!("Failed to apply migrations: {}", e),
    }
}
