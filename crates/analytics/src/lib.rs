//! # Finboard Analytics Engine
//!
//! This crate derives the financial metrics shown on company dashboards: margins,
//! return ratios, book value per share and year-over-year changes.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage or HTTP.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. It takes
//!   financial statements as input and produces derived fields or a `DashboardReport` as
//!   output, so it is safe to share across concurrent requests.
//! - **Suppress, Don't Fail:** A missing or zero denominator leaves the derived value unset.
//!   On write, decimal overflow is an error and rejects the whole derivation. On read, an
//!   overflowing value is left unset and the rest of the dashboard is still produced.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: `derive_on_write` for persisted fields, `derive_on_read` for dashboards.
//! - `DashboardReport`, `FinancialMetric`, `YoyChanges`: the dashboard output structures.
//! - `percent_change`, `ratio`: the guarded formulas shared by both paths.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{percent_change, ratio, AnalyticsEngine};
pub use error::AnalyticsError;
pub use report::{DashboardReport, FinancialMetric, YoyChanges};
