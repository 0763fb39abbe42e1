//! PostgreSQL adapters built on Diesel, `diesel-async` and a bb8 pool.
//!
//! Row structs and the schema stay private; repositories translate rows into
//! domain values and Diesel errors into port errors.
//!
//! ```ignore
//! use notes_backend::outbound::persistence::{DbPool, DieselNoteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/notes")).await?;
//! let notes = DieselNoteRepository::new(pool);
//! ```

mod diesel_note_repository;
mod diesel_user_account_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_note_repository::DieselNoteRepository;
pub use diesel_user_account_repository::DieselUserAccountRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
