//! # Finboard Ledger Crate
//!
//! The access layer between the HTTP surface and storage. It owns the write rules for
//! financial records: validation, previous-year lookup, derivation and upsert.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Service:** Combines the pure `analytics` engine with any `RecordStore`
//!   implementation. It has no knowledge of HTTP.
//! - **Derived Fields Are Never Trusted:** Margins and YoY changes are recomputed on every
//!   write; values supplied by the caller are dropped during normalization.
//! - **Store-Enforced Uniqueness:** The lookup before an insert is unprotected. A losing
//!   concurrent insert surfaces as `LedgerError::Conflict` instead of a duplicate row.
//!
//! ## Public API
//!
//! - `Ledger`: company operations, record submit/update/delete, reads and the dashboard.
//! - `LedgerError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod service;

pub use error::LedgerError;
pub use service::{Ledger, DEFAULT_PAGE_SIZE};
