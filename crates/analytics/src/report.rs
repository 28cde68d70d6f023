use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Year-over-year percentage changes for one fiscal year, keyed by metric.
///
/// Each entry is either the value stored on the record or, when nothing was stored,
/// the change against the preceding year in the dashboard sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YoyChanges {
    pub revenue: Option<Decimal>,
    pub gross_profit: Option<Decimal>,
    pub operating_profit: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub free_cash_flow: Option<Decimal>,
    pub book_value: Option<Decimal>,
    pub roa: Option<Decimal>,
    pub roe: Option<Decimal>,
}

/// A presentation-ready snapshot of one fiscal year for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetric {
    pub year: String,

    // I. Income accounts
    pub revenue: Decimal,
    pub revenue_yoy_change: Option<Decimal>,
    pub gross_profit: Decimal,
    pub gross_profit_margin: Option<Decimal>,
    pub gross_profit_yoy_change: Option<Decimal>,
    pub operating_profit: Decimal,
    pub operating_profit_margin: Option<Decimal>,
    pub operating_profit_yoy_change: Option<Decimal>,
    pub net_profit: Decimal,
    pub net_profit_margin: Option<Decimal>,
    pub net_profit_yoy_change: Option<Decimal>,
    pub free_cash_flow: Decimal,
    pub free_cash_flow_yoy_change: Option<Decimal>,
    pub number_of_shares: Decimal,

    // II. Asset accounts
    pub return_on_equity: Option<Decimal>,
    pub return_on_assets: Option<Decimal>,
    pub return_on_invested_capital: Option<Decimal>,
    pub book_value: Option<Decimal>,
    pub book_value_per_share: Option<Decimal>,
    pub book_value_yoy_change: Option<Decimal>,
    pub current_ratio: Option<Decimal>,

    // III. Per-share and dividends
    pub eps: Decimal,
    pub price_high: Decimal,
    pub price_low: Decimal,
    pub earning_power: Option<Decimal>,
    pub dividends_per_share: Decimal,
    pub dividend_rate: Decimal,

    pub yoy: YoyChanges,
}

/// The dashboard view of a company: one metric snapshot per fiscal year, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub company: String,
    pub metrics: Vec<FinancialMetric>,
}
