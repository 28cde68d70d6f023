use crate::error::LedgerError;
use analytics::{AnalyticsEngine, DashboardReport};
use core_types::{
    Company, CoreError, FinancialInput, FinancialRecord, FinancialSubmission, RecordFields,
};
use database::{DbError, RecordStore};
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// The access layer: every read and write of companies and financial records goes
/// through here, so derived fields are always recomputed from validated input.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn RecordStore>,
    engine: AnalyticsEngine,
}

impl Ledger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            engine: AnalyticsEngine::new(),
        }
    }

    // ==========================================================================
    // Companies
    // ==========================================================================

    pub async fn create_company(&self, name: &str, caller: i64) -> Result<Company, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            let reason = "must not be empty".to_string();
            return Err(CoreError::InvalidInput("name".to_string(), reason).into());
        }

        let company = self
            .store
            .create_company(name, Some(caller))
            .await
            .map_err(|e| match e {
                DbError::Conflict(_) => {
                    LedgerError::Conflict(format!("Company '{name}' already exists"))
                }
                other => other.into(),
            })?;

        tracing::info!(company_id = company.id, caller, "Company created.");
        Ok(company)
    }

    pub async fn list_companies(&self, skip: u32, limit: u32) -> Result<Vec<Company>, LedgerError> {
        Ok(self
            .store
            .list_companies(i64::from(skip), i64::from(limit))
            .await?)
    }

    pub async fn get_company(&self, company_id: i64) -> Result<Company, LedgerError> {
        self.store
            .get_company(company_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound("Company".to_string()))
    }

    /// Removes a company together with all of its financial records.
    pub async fn delete_company(&self, company_id: i64, caller: i64) -> Result<(), LedgerError> {
        if !self.store.delete_company(company_id).await? {
            return Err(LedgerError::NotFound("Company".to_string()));
        }
        tracing::info!(company_id, caller, "Company deleted.");
        Ok(())
    }

    // ==========================================================================
    // Financial records
    // ==========================================================================

    /// Creates the record for the submitted fiscal year, or replaces it if one exists.
    ///
    /// Submitting the same year twice leaves a single record holding the latest values.
    /// If a concurrent submit inserts the same year between the lookup and the insert,
    /// this call fails with `LedgerError::Conflict`.
    pub async fn submit(
        &self,
        company_id: i64,
        submission: FinancialSubmission,
        caller: i64,
    ) -> Result<FinancialRecord, LedgerError> {
        let input = submission.normalize()?;
        self.get_company(company_id).await?;

        let fields = self.derive_fields(company_id, &input).await?;
        let label = input.fiscal_year.as_str();

        let record = match self.store.find_record(company_id, label).await? {
            Some(existing) => self.store.update_record(existing.id, &fields).await?,
            None => self
                .store
                .insert_record(company_id, label, &fields)
                .await
                .map_err(|e| match e {
                    DbError::Conflict(_) => LedgerError::Conflict(format!(
                        "Financial data for fiscal year {label} already exists"
                    )),
                    DbError::NotFound => LedgerError::NotFound("Company".to_string()),
                    other => other.into(),
                })?,
        };

        tracing::info!(
            company_id,
            fiscal_year = label,
            caller,
            record_id = record.id,
            "Financial data saved."
        );
        Ok(record)
    }

    /// Replaces an existing record. The path's fiscal year is authoritative; any
    /// `fiscal_year` in the submission is ignored.
    pub async fn update(
        &self,
        company_id: i64,
        fiscal_year: &str,
        mut submission: FinancialSubmission,
        caller: i64,
    ) -> Result<FinancialRecord, LedgerError> {
        self.get_company(company_id).await?;
        let existing = self.get_record(company_id, fiscal_year).await?;

        submission.fiscal_year = Some(existing.fiscal_year.clone());
        let input = submission.normalize()?;
        let fields = self.derive_fields(company_id, &input).await?;

        let record = self.store.update_record(existing.id, &fields).await?;
        tracing::info!(company_id, fiscal_year, caller, "Financial data updated.");
        Ok(record)
    }

    pub async fn delete_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
        caller: i64,
    ) -> Result<(), LedgerError> {
        if !self.store.delete_record(company_id, fiscal_year).await? {
            return Err(LedgerError::NotFound("Financial data".to_string()));
        }
        tracing::info!(company_id, fiscal_year, caller, "Financial data deleted.");
        Ok(())
    }

    pub async fn list_records(&self, company_id: i64) -> Result<Vec<FinancialRecord>, LedgerError> {
        self.get_company(company_id).await?;
        Ok(self.store.list_records(company_id).await?)
    }

    pub async fn get_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
    ) -> Result<FinancialRecord, LedgerError> {
        self.store
            .find_record(company_id, fiscal_year)
            .await?
            .ok_or_else(|| LedgerError::NotFound("Financial data".to_string()))
    }

    pub async fn dashboard(&self, company_id: i64) -> Result<DashboardReport, LedgerError> {
        let company = self.get_company(company_id).await?;
        let records = self.store.list_records(company_id).await?;
        Ok(self.engine.derive_on_read(&company.name, &records))
    }

    /// Builds the full column set, consulting the record for the literal previous year.
    async fn derive_fields(
        &self,
        company_id: i64,
        input: &FinancialInput,
    ) -> Result<RecordFields, LedgerError> {
        let previous = self
            .store
            .find_record(company_id, &input.fiscal_year.previous_label())
            .await?;
        let derived = self.engine.derive_on_write(input, previous.as_ref())?;
        Ok(RecordFields::from_input(input, derived))
    }
}
