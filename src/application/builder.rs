use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api::middleware::auth::JwtKeys;
use crate::api::router::AppState;
use crate::application::ports::{CompanyRepository, JobRepository};
use crate::config::Config;
use crate::infrastructure::persistence::{PostgresCompanyRepository, PostgresJobRepository};

type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    job_repo: Option<Arc<dyn JobRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            company_repo: None,
            job_repo: None,
        }
    }

    /// Initialize database connection pool with retry logic
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        info!("Connecting to database");

        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize the Postgres repositories
    pub fn with_repositories(mut self) -> Result<Self, BuildError> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;

        self.company_repo = Some(Arc::new(PostgresCompanyRepository::new(pool.clone())));
        self.job_repo = Some(Arc::new(PostgresJobRepository::new(pool.clone())));

        info!("Infrastructure layer initialized");
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let pool = self.pool.ok_or("Database pool not initialized")?;
        let company_repo = self
            .company_repo
            .ok_or("Company repository not initialized")?;
        let job_repo = self.job_repo.ok_or("Job repository not initialized")?;

        let state = AppState::new(
            company_repo,
            job_repo,
            JwtKeys::new(&self.config.secret_key),
        )
        .with_pool(Arc::new(pool));

        info!("Application layer initialized");
        Ok(state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
