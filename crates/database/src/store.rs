use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Company, FinancialRecord, RecordFields};

/// The persistence boundary for companies and their financial records.
///
/// Implementations must enforce the same constraints as the SQL schema: unique company
/// names, at most one record per `(company_id, fiscal_year)` (violations surface as
/// `DbError::Conflict`), and cascading record deletion when a company is removed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_company(&self, name: &str, created_by: Option<i64>) -> Result<Company, DbError>;

    async fn list_companies(&self, skip: i64, limit: i64) -> Result<Vec<Company>, DbError>;

    async fn get_company(&self, company_id: i64) -> Result<Option<Company>, DbError>;

    /// Deletes a company and all of its records. Returns `false` if it did not exist.
    async fn delete_company(&self, company_id: i64) -> Result<bool, DbError>;

    async fn find_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
    ) -> Result<Option<FinancialRecord>, DbError>;

    /// All records of a company in insertion order.
    async fn list_records(&self, company_id: i64) -> Result<Vec<FinancialRecord>, DbError>;

    async fn insert_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
        fields: &RecordFields,
    ) -> Result<FinancialRecord, DbError>;

    /// Replaces every non-key column of an existing record in place.
    async fn update_record(
        &self,
        record_id: i64,
        fields: &RecordFields,
    ) -> Result<FinancialRecord, DbError>;

    /// Returns `false` if no record matched.
    async fn delete_record(&self, company_id: i64, fiscal_year: &str) -> Result<bool, DbError>;
}
