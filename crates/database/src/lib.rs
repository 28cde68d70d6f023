//! # Finboard Database Crate
//!
//! This crate is the persistence layer for companies and their yearly financial
//! statements. It is the system's "permanent archive."
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** This crate encapsulates all database-specific logic behind the
//!   `RecordStore` trait. The layers above never see SQL.
//! - **Constraints Live in the Store:** Unique company names, one record per company and
//!   fiscal year, and cascading deletes are enforced by the schema, and by the in-memory
//!   store in the same way. Violations surface as `DbError::Conflict`.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and the Postgres backend
//!   uses a connection pool (`PgPool`) for concurrent access.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: Applies the embedded migrations so the schema is up-to-date.
//! - `RecordStore`: The storage trait the access layer is written against.
//! - `DbRepository`: The Postgres implementation of `RecordStore`.
//! - `InMemoryRepository`: A process-local implementation for tests and local runs.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use repository::DbRepository;
pub use store::RecordStore;
