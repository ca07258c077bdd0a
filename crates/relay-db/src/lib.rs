//! # relay-db
//!
//! Persistence for private messages.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Schema bootstrap for the `private_messages` table
//! - `PgMessageStore`, the PostgreSQL implementation of `relay_core::MessageStore`
//! - `MemoryMessageStore`, an in-process store for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_common::AppConfig;
//! use relay_db::{create_pool, ensure_schema, DatabaseConfig, PgMessageStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = AppConfig::from_env()?;
//!     let config = DatabaseConfig::from(&app.database);
//!     let pool = create_pool(&config).await?;
//!     ensure_schema(&pool).await?;
//!     let store = PgMessageStore::new(pool);
//!     Ok(())
//! }
//! ```

pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{MemoryMessageStore, PgMessageStore};
pub use schema::ensure_schema;
