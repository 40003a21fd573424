use crate::modules::grade::{
    repository::GradeStore,
    store::{DynamoStore, MemoryStore, PgStore},
};
pub use crate::utils::database;
use async_trait::async_trait;
use std::env;
use std::sync::Arc;

pub const DEFAULT_TABLE: &str = "StudentGrades";
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Debug, PartialEq)]
pub enum StoreBackend {
    DynamoDb,
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from(raw_backend: String) -> Self {
        match raw_backend.as_ref() {
            "postgres" => Self::Postgres,
            "memory" => Self::Memory,
            _ => Self::DynamoDb,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub port: u32,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub store: Arc<dyn GradeStore>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u32,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub table: String,
    pub region: String,
    pub database_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let backend = env::var("GRADE_STORE").unwrap_or_else(|_| "dynamodb".to_string());
        let table = env::var("GRADES_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());
        let region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let database_url = env::var("DATABASE_URL").ok();

        Self {
            app: AppConfig { host, port },
            store: StoreConfig {
                backend: StoreBackend::from(backend),
                table,
                region,
                database_url,
            },
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContextError {
    #[error("DATABASE_URL not set")]
    MissingDatabaseUrl,
    #[error("Error connecting to database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, ContextError>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, ContextError> {
        let store: Arc<dyn GradeStore> = match self.store.backend {
            StoreBackend::DynamoDb => {
                tracing::info!(
                    "Using DynamoDB table {} in {}",
                    self.store.table,
                    self.store.region
                );
                Arc::new(DynamoStore::connect(self.store.region, self.store.table).await)
            }
            StoreBackend::Postgres => {
                let database_url = self
                    .store
                    .database_url
                    .ok_or(ContextError::MissingDatabaseUrl)?;
                let db_conn = database::connect(&database_url).await?;
                database::migrate(&db_conn).await?;
                tracing::info!("Using Postgres grade store");
                Arc::new(PgStore::new(db_conn))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory grade store; grades are lost on restart");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                port: self.app.port,
            },
            store,
        })
    }
}
