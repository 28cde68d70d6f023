use crate::store::RecordStore;
use crate::DbError;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Company, FinancialRecord, RecordFields};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    next_company_id: i64,
    next_record_id: i64,
    companies: BTreeMap<i64, Company>,
    records: BTreeMap<i64, FinancialRecord>,
}

/// A process-local `RecordStore` with the same constraint semantics as the Postgres schema.
///
/// Used by tests and by local runs that have no database at hand. Every operation holds
/// a single lock for its whole duration, so each call is atomic.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRepository {
    async fn create_company(
        &self,
        name: &str,
        created_by: Option<i64>,
    ) -> Result<Company, DbError> {
        let mut state = self.state.lock().await;
        if state.companies.values().any(|c| c.name == name) {
            return Err(DbError::Conflict("uix_company_name".to_string()));
        }
        state.next_company_id += 1;
        let company = Company {
            id: state.next_company_id,
            name: name.to_string(),
            created_by,
            created_at: Utc::now(),
        };
        state.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn list_companies(&self, skip: i64, limit: i64) -> Result<Vec<Company>, DbError> {
        let state = self.state.lock().await;
        Ok(state
            .companies
            .values()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get_company(&self, company_id: i64) -> Result<Option<Company>, DbError> {
        Ok(self.state.lock().await.companies.get(&company_id).cloned())
    }

    async fn delete_company(&self, company_id: i64) -> Result<bool, DbError> {
        let mut state = self.state.lock().await;
        if state.companies.remove(&company_id).is_none() {
            return Ok(false);
        }
        state.records.retain(|_, r| r.company_id != company_id);
        Ok(true)
    }

    async fn find_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
    ) -> Result<Option<FinancialRecord>, DbError> {
        let state = self.state.lock().await;
        Ok(state
            .records
            .values()
            .find(|r| r.company_id == company_id && r.fiscal_year == fiscal_year)
            .cloned())
    }

    async fn list_records(&self, company_id: i64) -> Result<Vec<FinancialRecord>, DbError> {
        let state = self.state.lock().await;
        Ok(state
            .records
            .values()
            .filter(|r| r.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn insert_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
        fields: &RecordFields,
    ) -> Result<FinancialRecord, DbError> {
        let mut state = self.state.lock().await;
        if !state.companies.contains_key(&company_id) {
            return Err(DbError::NotFound);
        }
        if state
            .records
            .values()
            .any(|r| r.company_id == company_id && r.fiscal_year == fiscal_year)
        {
            return Err(DbError::Conflict("uix_company_fiscal_year".to_string()));
        }
        state.next_record_id += 1;
        let record = FinancialRecord {
            id: state.next_record_id,
            company_id,
            fiscal_year: fiscal_year.to_string(),
            fields: fields.clone(),
        };
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        record_id: i64,
        fields: &RecordFields,
    ) -> Result<FinancialRecord, DbError> {
        let mut state = self.state.lock().await;
        let record = state.records.get_mut(&record_id).ok_or(DbError::NotFound)?;
        record.fields = fields.clone();
        Ok(record.clone())
    }

    async fn delete_record(&self, company_id: i64, fiscal_year: &str) -> Result<bool, DbError> {
        let mut state = self.state.lock().await;
        let id = state
            .records
            .values()
            .find(|r| r.company_id == company_id && r.fiscal_year == fiscal_year)
            .map(|r| r.id);
        Ok(match id {
            Some(id) => state.records.remove(&id).is_some(),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::DerivedFields;
    use rust_decimal_macros::dec;

    fn fields(revenue: rust_decimal::Decimal) -> RecordFields {
        RecordFields {
            prepared_by: None,
            notes: None,
            total_revenue: revenue,
            gross_profit: dec!(40),
            operating_profit: dec!(20),
            net_profit: dec!(10),
            number_of_shares: dec!(100),
            eps: dec!(0.1),
            price_high: dec!(2),
            price_low: dec!(1),
            earning_power: None,
            free_cash_flow: dec!(5),
            return_on_equity: None,
            return_on_assets: None,
            return_on_invested_capital: None,
            book_value: None,
            book_value_per_share: None,
            current_ratio: None,
            total_assets: None,
            total_liabilities: None,
            shareholders_equity: None,
            current_assets: None,
            current_liabilities: None,
            dividends_per_share: dec!(0),
            dividend_rate: dec!(0),
            derived: DerivedFields::default(),
        }
    }

    #[tokio::test]
    async fn duplicate_company_name_is_a_conflict() {
        let store = InMemoryRepository::new();
        store.create_company("Acme", Some(7)).await.unwrap();
        let err = store.create_company("Acme", None).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_companies_pages_by_id() {
        let store = InMemoryRepository::new();
        for name in ["A", "B", "C"] {
            store.create_company(name, None).await.unwrap();
        }
        let page = store.list_companies(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "B");
    }

    #[tokio::test]
    async fn record_key_is_unique_per_company() {
        let store = InMemoryRepository::new();
        let a = store.create_company("A", None).await.unwrap();
        let b = store.create_company("B", None).await.unwrap();

        store.insert_record(a.id, "2023", &fields(dec!(100))).await.unwrap();
        store.insert_record(b.id, "2023", &fields(dec!(100))).await.unwrap();
        let err = store
            .insert_record(a.id, "2023", &fields(dec!(200)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[tokio::test]
    async fn insert_for_missing_company_is_not_found() {
        let store = InMemoryRepository::new();
        let err = store
            .insert_record(42, "2023", &fields(dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[tokio::test]
    async fn update_replaces_fields_in_place() {
        let store = InMemoryRepository::new();
        let c = store.create_company("A", None).await.unwrap();
        let rec = store.insert_record(c.id, "2023", &fields(dec!(100))).await.unwrap();

        let updated = store.update_record(rec.id, &fields(dec!(250))).await.unwrap();
        assert_eq!(updated.id, rec.id);
        assert_eq!(updated.fiscal_year, "2023");
        assert_eq!(updated.fields.total_revenue, dec!(250));

        assert!(matches!(
            store.update_record(999, &fields(dec!(1))).await,
            Err(DbError::NotFound)
        ));
    }

    #[tokio::test]
    async fn deleting_a_company_cascades_to_records() {
        let store = InMemoryRepository::new();
        let c = store.create_company("A", None).await.unwrap();
        store.insert_record(c.id, "2022", &fields(dec!(100))).await.unwrap();
        store.insert_record(c.id, "2023", &fields(dec!(120))).await.unwrap();

        assert!(store.delete_company(c.id).await.unwrap());
        assert!(store.list_records(c.id).await.unwrap().is_empty());
        assert!(!store.delete_company(c.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_record_reports_whether_it_existed() {
        let store = InMemoryRepository::new();
        let c = store.create_company("A", None).await.unwrap();
        store.insert_record(c.id, "2023", &fields(dec!(100))).await.unwrap();

        assert!(store.delete_record(c.id, "2023").await.unwrap());
        assert!(!store.delete_record(c.id, "2023").await.unwrap());
        assert!(store.find_record(c.id, "2023").await.unwrap().is_none());
    }
}
