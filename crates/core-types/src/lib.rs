pub mod error;
pub mod fiscal_year;
pub mod input;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use fiscal_year::{FiscalYear, MAX_FISCAL_YEAR, MIN_FISCAL_YEAR};
pub use input::{FinancialInput, FinancialSubmission};
pub use structs::{Company, DerivedFields, FinancialRecord, RecordFields};
