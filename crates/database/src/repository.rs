use crate::store::RecordStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Company, FinancialRecord, RecordFields};
use sqlx::postgres::{PgArguments, PgPool, Postgres};
use sqlx::query::QueryAs;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

const COMPANY_COLUMNS: &str = "id, name, created_by, created_at";

const INSERT_RECORD_SQL: &str = r#"
    INSERT INTO financial_data (
        company_id, fiscal_year, prepared_by, notes,
        total_revenue, gross_profit, operating_profit, net_profit, number_of_shares,
        eps, price_high, price_low, earning_power, free_cash_flow,
        return_on_equity, return_on_assets, return_on_invested_capital,
        book_value, book_value_per_share, current_ratio,
        total_assets, total_liabilities, shareholders_equity, current_assets, current_liabilities,
        dividends_per_share, dividend_rate,
        gross_profit_margin, operating_profit_margin, net_profit_margin,
        revenue_yoy_change, gross_profit_yoy_change, operating_profit_yoy_change,
        net_profit_yoy_change, free_cash_flow_yoy_change, book_value_yoy_change
    ) VALUES (
        $1, $2, $3, $4,
        $5, $6, $7, $8, $9,
        $10, $11, $12, $13, $14,
        $15, $16, $17,
        $18, $19, $20,
        $21, $22, $23, $24, $25,
        $26, $27,
        $28, $29, $30,
        $31, $32, $33,
        $34, $35, $36
    )
    RETURNING *
"#;

const UPDATE_RECORD_SQL: &str = r#"
    UPDATE financial_data SET
        prepared_by = $2, notes = $3,
        total_revenue = $4, gross_profit = $5, operating_profit = $6, net_profit = $7,
        number_of_shares = $8, eps = $9, price_high = $10, price_low = $11,
        earning_power = $12, free_cash_flow = $13,
        return_on_equity = $14, return_on_assets = $15, return_on_invested_capital = $16,
        book_value = $17, book_value_per_share = $18, current_ratio = $19,
        total_assets = $20, total_liabilities = $21, shareholders_equity = $22,
        current_assets = $23, current_liabilities = $24,
        dividends_per_share = $25, dividend_rate = $26,
        gross_profit_margin = $27, operating_profit_margin = $28, net_profit_margin = $29,
        revenue_yoy_change = $30, gross_profit_yoy_change = $31,
        operating_profit_yoy_change = $32, net_profit_yoy_change = $33,
        free_cash_flow_yoy_change = $34, book_value_yoy_change = $35
    WHERE id = $1
    RETURNING *
"#;

type RecordQuery<'q> = QueryAs<'q, Postgres, FinancialRecord, PgArguments>;

/// Binds every non-key column in the order used by the insert and update statements.
fn bind_fields<'q>(query: RecordQuery<'q>, f: &'q RecordFields) -> RecordQuery<'q> {
    let d = &f.derived;
    query
        .bind(f.prepared_by.as_deref())
        .bind(f.notes.as_deref())
        .bind(f.total_revenue)
        .bind(f.gross_profit)
        .bind(f.operating_profit)
        .bind(f.net_profit)
        .bind(f.number_of_shares)
        .bind(f.eps)
        .bind(f.price_high)
        .bind(f.price_low)
        .bind(f.earning_power)
        .bind(f.free_cash_flow)
        .bind(f.return_on_equity)
        .bind(f.return_on_assets)
        .bind(f.return_on_invested_capital)
        .bind(f.book_value)
        .bind(f.book_value_per_share)
        .bind(f.current_ratio)
        .bind(f.total_assets)
        .bind(f.total_liabilities)
        .bind(f.shareholders_equity)
        .bind(f.current_assets)
        .bind(f.current_liabilities)
        .bind(f.dividends_per_share)
        .bind(f.dividend_rate)
        .bind(d.gross_profit_margin)
        .bind(d.operating_profit_margin)
        .bind(d.net_profit_margin)
        .bind(d.revenue_yoy_change)
        .bind(d.gross_profit_yoy_change)
        .bind(d.operating_profit_yoy_change)
        .bind(d.net_profit_yoy_change)
        .bind(d.free_cash_flow_yoy_change)
        .bind(d.book_value_yoy_change)
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for DbRepository {
    async fn create_company(
        &self,
        name: &str,
        created_by: Option<i64>,
    ) -> Result<Company, DbError> {
        let sql = format!(
            "INSERT INTO companies (name, created_by) VALUES ($1, $2) RETURNING {COMPANY_COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&sql)
            .bind(name)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from_sqlx)
    }

    /// Fetches a page of companies ordered by id.
    async fn list_companies(&self, skip: i64, limit: i64) -> Result<Vec<Company>, DbError> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY id LIMIT $1 OFFSET $2");
        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    async fn get_company(&self, company_id: i64) -> Result<Option<Company>, DbError> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    /// Financial records go with it through `ON DELETE CASCADE`.
    async fn delete_company(&self, company_id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
    ) -> Result<Option<FinancialRecord>, DbError> {
        let record = sqlx::query_as::<_, FinancialRecord>(
            "SELECT * FROM financial_data WHERE company_id = $1 AND fiscal_year = $2",
        )
        .bind(company_id)
        .bind(fiscal_year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_records(&self, company_id: i64) -> Result<Vec<FinancialRecord>, DbError> {
        let records = sqlx::query_as::<_, FinancialRecord>(
            "SELECT * FROM financial_data WHERE company_id = $1 ORDER BY id ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Inserts a new record. A concurrent insert for the same key loses with `DbError::Conflict`.
    async fn insert_record(
        &self,
        company_id: i64,
        fiscal_year: &str,
        fields: &RecordFields,
    ) -> Result<FinancialRecord, DbError> {
        let query = sqlx::query_as::<_, FinancialRecord>(INSERT_RECORD_SQL)
            .bind(company_id)
            .bind(fiscal_year);

        bind_fields(query, fields)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from_sqlx)
    }

    async fn update_record(
        &self,
        record_id: i64,
        fields: &RecordFields,
    ) -> Result<FinancialRecord, DbError> {
        let query = sqlx::query_as::<_, FinancialRecord>(UPDATE_RECORD_SQL).bind(record_id);

        bind_fields(query, fields)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from_sqlx)?
            .ok_or(DbError::NotFound)
    }

    async fn delete_record(&self, company_id: i64, fiscal_year: &str) -> Result<bool, DbError> {
        let result =
            sqlx::query("DELETE FROM financial_data WHERE company_id = $1 AND fiscal_year = $2")
                .bind(company_id)
                .bind(fiscal_year)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
