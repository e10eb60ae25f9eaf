//! Configuration module
//!
//! Settings for the HTTP service, the database pool, attachment storage and
//! the episode editing policy. Values come from the environment (a `.env`
//! file is honoured when present).

use std::env;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_EDITING_TIME_SECS: u64 = 1800;
const MAX_ATTACHMENT_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct PcastConfig {
    pub server_port: u16,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    /// How long after creation an author may still edit their own episode
    pub max_editing_time: Duration,
    /// Site-wide attachment ceiling, used when a course sets no limit
    pub max_attachment_bytes: u64,
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    /// Path prefix of the module's pages, used to build redirects
    pub view_base_path: String,
}

impl PcastConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(SERVER_PORT);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .unwrap_or(MAX_CONNECTIONS);

        let db_timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(CONNECTION_TIMEOUT_SECS);

        let max_editing_time_secs = env::var("MAX_EDITING_TIME_SECS")
            .unwrap_or_else(|_| MAX_EDITING_TIME_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_EDITING_TIME_SECS);

        let max_attachment_bytes = env::var("MAX_ATTACHMENT_BYTES")
            .unwrap_or_else(|_| MAX_ATTACHMENT_BYTES.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_ATTACHMENT_BYTES);

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StorageBackend>()?;

        let local_storage_path =
            env::var("LOCAL_STORAGE_PATH").unwrap_or_else(|_| "./data/files".to_string());

        let local_storage_base_url = env::var("LOCAL_STORAGE_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/pluginfile.php", server_port));

        let view_base_path =
            env::var("VIEW_BASE_PATH").unwrap_or_else(|_| "/mod/pcast".to_string());

        Ok(Self {
            server_port,
            environment,
            database_url,
            db_max_connections,
            db_timeout_seconds,
            jwt_secret,
            max_editing_time: Duration::from_secs(max_editing_time_secs),
            max_attachment_bytes,
            storage_backend,
            local_storage_path,
            local_storage_base_url,
            view_base_path,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.max_editing_time.is_zero() {
            return Err(anyhow::anyhow!(
                "MAX_EDITING_TIME_SECS must be greater than zero"
            ));
        }

        if self.max_attachment_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_ATTACHMENT_BYTES must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

impl Default for PcastConfig {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            database_url: "postgresql://localhost/pcast".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            jwt_secret: String::new(),
            max_editing_time: Duration::from_secs(MAX_EDITING_TIME_SECS),
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            storage_backend: StorageBackend::Local,
            local_storage_path: "./data/files".to_string(),
            local_storage_base_url: format!("http://localhost:{}/pluginfile.php", SERVER_PORT),
            view_base_path: "/mod/pcast".to_string(),
        }
    }
}
