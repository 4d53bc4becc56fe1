//! Storage Config

use clap::Args;

/// Where carts, line items and the catalog are kept.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StorageBackend {
    /// `PostgreSQL` via `DATABASE_URL`.
    Postgres,

    /// Process-local tables, lost on restart.
    Memory,
}

/// Storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Storage backend (postgres, memory)
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Postgres)]
    pub storage_backend: StorageBackend,

    /// `PostgreSQL` connection string, required for the postgres backend
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Apply pending migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value_t = false)]
    pub run_migrations: bool,
}
