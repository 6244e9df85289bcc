//! Infrastructure layer: persistence adapters and configuration.

pub mod config;
pub mod repository;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use repository::{
    InMemoryInventoryRepository, InventoryRepository, PostgresInventoryRepository, RepositoryError,
};
