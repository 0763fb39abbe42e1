//! Outbound adapters implementing the domain's repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: mutex-guarded repositories for development and tests
//!
//! Adapters only translate between domain values and storage rows.

pub mod memory;
pub mod persistence;
