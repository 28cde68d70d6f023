use crate::input::FinancialInput;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a row from the `companies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// The caller that created the company, if known.
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// The fields computed by the metrics engine at write time and persisted with a record.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct DerivedFields {
    pub gross_profit_margin: Option<Decimal>,
    pub operating_profit_margin: Option<Decimal>,
    pub net_profit_margin: Option<Decimal>,
    pub revenue_yoy_change: Option<Decimal>,
    pub gross_profit_yoy_change: Option<Decimal>,
    pub operating_profit_yoy_change: Option<Decimal>,
    pub net_profit_yoy_change: Option<Decimal>,
    pub free_cash_flow_yoy_change: Option<Decimal>,
    pub book_value_yoy_change: Option<Decimal>,
}

/// Every column of a `financial_data` row except its keys.
///
/// This is the whitelist of updatable fields: an update replaces the whole struct,
/// never individual columns picked from the request.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RecordFields {
    pub prepared_by: Option<String>,
    pub notes: Option<String>,

    // I. Income accounts
    pub total_revenue: Decimal,
    pub gross_profit: Decimal,
    pub operating_profit: Decimal,
    pub net_profit: Decimal,
    pub number_of_shares: Decimal,
    pub eps: Decimal,
    pub price_high: Decimal,
    pub price_low: Decimal,
    pub earning_power: Option<Decimal>,
    pub free_cash_flow: Decimal,

    // II. Asset accounts (ratios may be supplied or derived at read time)
    pub return_on_equity: Option<Decimal>,
    pub return_on_assets: Option<Decimal>,
    pub return_on_invested_capital: Option<Decimal>,
    pub book_value: Option<Decimal>,
    pub book_value_per_share: Option<Decimal>,
    pub current_ratio: Option<Decimal>,

    // III. Balance sheet inputs
    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    pub shareholders_equity: Option<Decimal>,
    pub current_assets: Option<Decimal>,
    pub current_liabilities: Option<Decimal>,

    // IV. Dividends
    pub dividends_per_share: Decimal,
    pub dividend_rate: Decimal,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub derived: DerivedFields,
}

impl RecordFields {
    /// Builds the full column set from a normalized input and its derived values.
    pub fn from_input(input: &FinancialInput, derived: DerivedFields) -> Self {
        Self {
            prepared_by: input.prepared_by.clone(),
            notes: input.notes.clone(),
            total_revenue: input.total_revenue,
            gross_profit: input.gross_profit,
            operating_profit: input.operating_profit,
            net_profit: input.net_profit,
            number_of_shares: input.number_of_shares,
            eps: input.eps,
            price_high: input.price_high,
            price_low: input.price_low,
            earning_power: input.earning_power,
            free_cash_flow: input.free_cash_flow,
            return_on_equity: input.return_on_equity,
            return_on_assets: input.return_on_assets,
            return_on_invested_capital: input.return_on_invested_capital,
            book_value: input.book_value,
            book_value_per_share: input.book_value_per_share,
            current_ratio: input.current_ratio,
            total_assets: input.total_assets,
            total_liabilities: input.total_liabilities,
            shareholders_equity: input.shareholders_equity,
            current_assets: input.current_assets,
            current_liabilities: input.current_liabilities,
            dividends_per_share: input.dividends_per_share,
            dividend_rate: input.dividend_rate,
            derived,
        }
    }
}

/// Represents a row from the `financial_data` table: one company's statement for one fiscal year.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: i64,
    pub company_id: i64,
    pub fiscal_year: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: RecordFields,
}
