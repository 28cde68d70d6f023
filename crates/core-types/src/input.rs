use crate::error::CoreError;
use crate::fiscal_year::FiscalYear;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The financial statement payload as it arrives on the wire.
///
/// Every field is optional here so that missing values and the legacy field names
/// (`net_income`, `eps_high`, `eps_low`) can be resolved in one place by [`normalize`].
/// Unknown fields, including any caller-supplied margins or YoY changes, are ignored.
///
/// [`normalize`]: FinancialSubmission::normalize
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialSubmission {
    pub fiscal_year: Option<String>,
    pub prepared_by: Option<String>,
    pub notes: Option<String>,

    pub total_revenue: Option<Decimal>,
    pub gross_profit: Option<Decimal>,
    pub operating_profit: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub number_of_shares: Option<Decimal>,
    pub eps: Option<Decimal>,
    pub price_high: Option<Decimal>,
    pub price_low: Option<Decimal>,
    pub earning_power: Option<Decimal>,
    pub free_cash_flow: Option<Decimal>,

    pub return_on_equity: Option<Decimal>,
    pub return_on_assets: Option<Decimal>,
    pub return_on_invested_capital: Option<Decimal>,
    pub book_value: Option<Decimal>,
    pub book_value_per_share: Option<Decimal>,
    pub current_ratio: Option<Decimal>,

    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    pub shareholders_equity: Option<Decimal>,
    pub current_assets: Option<Decimal>,
    pub current_liabilities: Option<Decimal>,

    pub dividends_per_share: Option<Decimal>,
    pub dividend_rate: Option<Decimal>,

    // Legacy names, folded into their canonical fields during normalization.
    pub net_income: Option<Decimal>,
    pub eps_high: Option<Decimal>,
    pub eps_low: Option<Decimal>,
}

/// A validated, normalized financial statement ready for derivation and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialInput {
    pub fiscal_year: FiscalYear,
    pub prepared_by: Option<String>,
    pub notes: Option<String>,

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

    pub return_on_equity: Option<Decimal>,
    pub return_on_assets: Option<Decimal>,
    pub return_on_invested_capital: Option<Decimal>,
    pub book_value: Option<Decimal>,
    pub book_value_per_share: Option<Decimal>,
    pub current_ratio: Option<Decimal>,

    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    pub shareholders_equity: Option<Decimal>,
    pub current_assets: Option<Decimal>,
    pub current_liabilities: Option<Decimal>,

    pub dividends_per_share: Decimal,
    pub dividend_rate: Decimal,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::MissingField(field.to_string()))
}

fn positive(value: Decimal, field: &str) -> Result<Decimal, CoreError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(CoreError::invalid(field, "must be greater than 0"))
    }
}

impl FinancialSubmission {
    /// Resolves legacy names, checks required fields and validates ranges.
    ///
    /// A canonical field always wins over its legacy alias when both are present.
    pub fn normalize(self) -> Result<FinancialInput, CoreError> {
        let fiscal_year = FiscalYear::parse(&required(self.fiscal_year, "fiscal_year")?)?;

        let total_revenue =
            positive(required(self.total_revenue, "total_revenue")?, "total_revenue")?;
        let number_of_shares = positive(
            required(self.number_of_shares, "number_of_shares")?,
            "number_of_shares",
        )?;

        Ok(FinancialInput {
            fiscal_year,
            prepared_by: self.prepared_by,
            notes: self.notes,
            total_revenue,
            gross_profit: required(self.gross_profit, "gross_profit")?,
            operating_profit: required(self.operating_profit, "operating_profit")?,
            net_profit: required(self.net_profit.or(self.net_income), "net_profit")?,
            number_of_shares,
            eps: required(self.eps, "eps")?,
            price_high: required(self.price_high.or(self.eps_high), "price_high")?,
            price_low: required(self.price_low.or(self.eps_low), "price_low")?,
            earning_power: self.earning_power,
            free_cash_flow: required(self.free_cash_flow, "free_cash_flow")?,
            return_on_equity: self.return_on_equity,
            return_on_assets: self.return_on_assets,
            return_on_invested_capital: self.return_on_invested_capital,
            book_value: self.book_value,
            book_value_per_share: self.book_value_per_share,
            current_ratio: self.current_ratio,
            total_assets: self.total_assets,
            total_liabilities: self.total_liabilities,
            shareholders_equity: self.shareholders_equity,
            current_assets: self.current_assets,
            current_liabilities: self.current_liabilities,
            dividends_per_share: required(self.dividends_per_share, "dividends_per_share")?,
            dividend_rate: required(self.dividend_rate, "dividend_rate")?,
        })
    }
}
