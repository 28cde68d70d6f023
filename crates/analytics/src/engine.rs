use crate::error::AnalyticsError;
use crate::report::{DashboardReport, FinancialMetric, YoyChanges};
use core_types::{DerivedFields, FinancialInput, FinancialRecord};
use rust_decimal::Decimal;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A stateless calculator for deriving margins, ratios and year-over-year changes
/// from financial statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the fields persisted alongside a record at write time.
    ///
    /// # Arguments
    ///
    /// * `input` - The normalized statement being written.
    /// * `previous` - The record for the literal previous fiscal year (`year - 1`) of the
    ///   same company, if one exists. Earlier years are never consulted.
    ///
    /// # Returns
    ///
    /// All derived fields, or an `AnalyticsError` if any calculation overflows. No partial
    /// result is ever returned.
    pub fn derive_on_write(
        &self,
        input: &FinancialInput,
        previous: Option<&FinancialRecord>,
    ) -> Result<DerivedFields, AnalyticsError> {
        let mut derived = DerivedFields::default();

        if input.total_revenue > Decimal::ZERO {
            derived.gross_profit_margin =
                ratio(input.gross_profit, input.total_revenue, "gross_profit_margin")?;
            derived.operating_profit_margin =
                ratio(input.operating_profit, input.total_revenue, "operating_profit_margin")?;
            derived.net_profit_margin =
                ratio(input.net_profit, input.total_revenue, "net_profit_margin")?;
        }

        if let Some(previous) = previous {
            let prev = &previous.fields;
            derived.revenue_yoy_change =
                percent_change(input.total_revenue, Some(prev.total_revenue), "revenue")?;
            derived.gross_profit_yoy_change =
                percent_change(input.gross_profit, Some(prev.gross_profit), "gross_profit")?;
            derived.operating_profit_yoy_change = percent_change(
                input.operating_profit,
                Some(prev.operating_profit),
                "operating_profit",
            )?;
            derived.net_profit_yoy_change =
                percent_change(input.net_profit, Some(prev.net_profit), "net_profit")?;
            derived.free_cash_flow_yoy_change =
                percent_change(input.free_cash_flow, Some(prev.free_cash_flow), "free_cash_flow")?;

            if let Some(book_value) = input.book_value {
                derived.book_value_yoy_change =
                    percent_change(book_value, prev.book_value, "book_value")?;
            }
        }

        Ok(derived)
    }

    /// Builds the dashboard view of a company's full history.
    ///
    /// Records are ordered by comparing `fiscal_year` as strings, so the sequence is only
    /// chronological while every label has the same number of digits. Each snapshot is
    /// compared against the element before it in that order, whatever its year.
    ///
    /// Reading never fails: a value whose calculation overflows is left unset and a
    /// warning is logged, while the rest of the dashboard is still produced.
    pub fn derive_on_read(&self, company: &str, records: &[FinancialRecord]) -> DashboardReport {
        let mut ordered: Vec<&FinancialRecord> = records.iter().collect();
        ordered.sort_by(|a, b| a.fiscal_year.cmp(&b.fiscal_year));

        let mut metrics = Vec::with_capacity(ordered.len());
        let mut previous: Option<&FinancialRecord> = None;

        for record in ordered {
            metrics.push(self.snapshot(record, previous));
            previous = Some(record);
        }

        DashboardReport {
            company: company.to_string(),
            metrics,
        }
    }

    /// Calculates one dashboard snapshot, preferring stored values over derived ones.
    fn snapshot(
        &self,
        record: &FinancialRecord,
        previous: Option<&FinancialRecord>,
    ) -> FinancialMetric {
        let f = &record.fields;
        let stored = &f.derived;
        let year = record.fiscal_year.as_str();

        // --- Margins ---
        let gross_profit_margin = stored_or(stored.gross_profit_margin, || {
            lenient(year, ratio(f.gross_profit, f.total_revenue, "gross_profit_margin"))
        });
        let operating_profit_margin = stored_or(stored.operating_profit_margin, || {
            lenient(year, ratio(f.operating_profit, f.total_revenue, "operating_profit_margin"))
        });
        let net_profit_margin = stored_or(stored.net_profit_margin, || {
            lenient(year, ratio(f.net_profit, f.total_revenue, "net_profit_margin"))
        });

        // --- Ratios ---
        // A zero net profit leaves ROE and ROA unset rather than reporting 0.
        let return_on_equity = stored_or(f.return_on_equity, || {
            match (non_zero(Some(f.net_profit)), non_zero(f.shareholders_equity)) {
                (Some(net), Some(equity)) => lenient(year, ratio(net, equity, "return_on_equity")),
                _ => None,
            }
        });
        let return_on_assets = stored_or(f.return_on_assets, || {
            match (non_zero(Some(f.net_profit)), non_zero(f.total_assets)) {
                (Some(net), Some(assets)) => lenient(year, ratio(net, assets, "return_on_assets")),
                _ => None,
            }
        });
        let book_value_per_share = stored_or(f.book_value_per_share, || {
            non_zero(f.shareholders_equity).and_then(|equity| {
                lenient(year, ratio(equity, f.number_of_shares, "book_value_per_share"))
            })
        });

        // --- Year-over-year ---
        let mut yoy = YoyChanges {
            revenue: stored.revenue_yoy_change,
            gross_profit: stored.gross_profit_yoy_change,
            operating_profit: stored.operating_profit_yoy_change,
            net_profit: stored.net_profit_yoy_change,
            free_cash_flow: stored.free_cash_flow_yoy_change,
            book_value: stored.book_value_yoy_change,
            roa: None,
            roe: None,
        };

        if let Some(previous) = previous {
            let prev = &previous.fields;
            let change = |current: Decimal, before: Option<Decimal>, metric: &str| {
                lenient(year, percent_change(current, before, metric))
            };

            if yoy.revenue.is_none() {
                yoy.revenue = change(f.total_revenue, Some(prev.total_revenue), "revenue");
            }
            if yoy.gross_profit.is_none() {
                yoy.gross_profit = change(f.gross_profit, Some(prev.gross_profit), "gross_profit");
            }
            if yoy.operating_profit.is_none() {
                yoy.operating_profit =
                    change(f.operating_profit, Some(prev.operating_profit), "operating_profit");
            }
            if yoy.net_profit.is_none() {
                yoy.net_profit = change(f.net_profit, Some(prev.net_profit), "net_profit");
            }
            if yoy.free_cash_flow.is_none() {
                yoy.free_cash_flow =
                    change(f.free_cash_flow, Some(prev.free_cash_flow), "free_cash_flow");
            }
            if yoy.book_value.is_none() {
                if let Some(book_value) = f.book_value {
                    yoy.book_value = change(book_value, prev.book_value, "book_value");
                }
            }

            // Ratio changes compare against what the previous record stored, not what a
            // read would derive for it.
            if let Some(roa) = return_on_assets {
                yoy.roa = change(roa, prev.return_on_assets, "roa");
            }
            if let Some(roe) = return_on_equity {
                yoy.roe = change(roe, prev.return_on_equity, "roe");
            }
        }

        FinancialMetric {
            year: record.fiscal_year.clone(),
            revenue: f.total_revenue,
            revenue_yoy_change: stored.revenue_yoy_change,
            gross_profit: f.gross_profit,
            gross_profit_margin,
            gross_profit_yoy_change: stored.gross_profit_yoy_change,
            operating_profit: f.operating_profit,
            operating_profit_margin,
            operating_profit_yoy_change: stored.operating_profit_yoy_change,
            net_profit: f.net_profit,
            net_profit_margin,
            net_profit_yoy_change: stored.net_profit_yoy_change,
            free_cash_flow: f.free_cash_flow,
            free_cash_flow_yoy_change: stored.free_cash_flow_yoy_change,
            number_of_shares: f.number_of_shares,
            return_on_equity,
            return_on_assets,
            return_on_invested_capital: f.return_on_invested_capital,
            book_value: f.book_value,
            book_value_per_share,
            book_value_yoy_change: stored.book_value_yoy_change,
            current_ratio: f.current_ratio,
            eps: f.eps,
            price_high: f.price_high,
            price_low: f.price_low,
            earning_power: f.earning_power,
            dividends_per_share: f.dividends_per_share,
            dividend_rate: f.dividend_rate,
            yoy,
        }
    }
}

/// The percentage change from `previous` to `current`, rounded to two decimal places.
///
/// Returns `None` when `previous` is absent or zero.
pub fn percent_change(
    current: Decimal,
    previous: Option<Decimal>,
    metric: &str,
) -> Result<Option<Decimal>, AnalyticsError> {
    let Some(previous) = non_zero(previous) else {
        return Ok(None);
    };

    let change = current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous.abs()))
        .and_then(|fraction| fraction.checked_mul(ONE_HUNDRED))
        .ok_or_else(|| AnalyticsError::Overflow(metric.to_string()))?;

    Ok(Some(change.round_dp(2)))
}

/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
    metric: &str,
) -> Result<Option<Decimal>, AnalyticsError> {
    if denominator.is_zero() {
        return Ok(None);
    }
    numerator
        .checked_div(denominator)
        .map(Some)
        .ok_or_else(|| AnalyticsError::Overflow(metric.to_string()))
}

fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

fn stored_or(stored: Option<Decimal>, derive: impl FnOnce() -> Option<Decimal>) -> Option<Decimal> {
    stored.or_else(derive)
}

/// Turns a read-time overflow into an unset value.
fn lenient(year: &str, result: Result<Option<Decimal>, AnalyticsError>) -> Option<Decimal> {
    result.unwrap_or_else(|err| {
        tracing::warn!(fiscal_year = year, error = %err, "Dashboard value left unset.");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{FinancialSubmission, RecordFields};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn input(year: &str, revenue: Decimal) -> FinancialInput {
        FinancialSubmission {
            fiscal_year: Some(year.to_string()),
            total_revenue: Some(revenue),
            gross_profit: Some(dec!(500000)),
            operating_profit: Some(dec!(300000)),
            net_profit: Some(dec!(200000)),
            number_of_shares: Some(dec!(1000000)),
            eps: Some(dec!(0.2)),
            price_high: Some(dec!(12)),
            price_low: Some(dec!(8)),
            free_cash_flow: Some(dec!(150000)),
            dividends_per_share: Some(dec!(0.05)),
            dividend_rate: Some(dec!(2.5)),
            ..Default::default()
        }
        .normalize()
        .unwrap()
    }

    // Records are built directly so that labels outside the accepted input range
    // (such as "9") can be stored and sorted.
    fn record(id: i64, year: &str, revenue: Decimal) -> FinancialRecord {
        let input = input("2023", revenue);
        FinancialRecord {
            id,
            company_id: 1,
            fiscal_year: year.to_string(),
            fields: RecordFields::from_input(&input, DerivedFields::default()),
        }
    }

    #[test]
    fn margins_are_fractions_of_revenue() {
        let engine = AnalyticsEngine::new();
        let derived = engine.derive_on_write(&input("2023", dec!(1000000)), None).unwrap();

        assert_eq!(derived.gross_profit_margin, Some(dec!(0.5)));
        assert_eq!(derived.operating_profit_margin, Some(dec!(0.3)));
        assert_eq!(derived.net_profit_margin, Some(dec!(0.2)));
        assert_eq!(derived.revenue_yoy_change, None);
    }

    #[test]
    fn revenue_growth_against_previous_year() {
        let engine = AnalyticsEngine::new();
        let previous = record(1, "2022", dec!(800000));
        let derived = engine
            .derive_on_write(&input("2023", dec!(1000000)), Some(&previous))
            .unwrap();

        assert_eq!(derived.revenue_yoy_change, Some(dec!(25.0)));
        assert_eq!(derived.gross_profit_yoy_change, Some(dec!(0)));
        // Neither year reported a book value.
        assert_eq!(derived.book_value_yoy_change, None);
    }

    #[test]
    fn zero_previous_value_suppresses_change() {
        let engine = AnalyticsEngine::new();
        let mut previous = record(1, "2022", dec!(800000));
        previous.fields.free_cash_flow = Decimal::ZERO;

        let derived = engine
            .derive_on_write(&input("2023", dec!(1000000)), Some(&previous))
            .unwrap();
        assert_eq!(derived.free_cash_flow_yoy_change, None);
        assert!(derived.net_profit_yoy_change.is_some());
    }

    #[test]
    fn negative_previous_value_uses_absolute_denominator() {
        assert_eq!(
            percent_change(dec!(50), Some(dec!(-100)), "net_profit").unwrap(),
            Some(dec!(150))
        );
        assert_eq!(
            percent_change(dec!(-150), Some(dec!(-100)), "net_profit").unwrap(),
            Some(dec!(-50))
        );
    }

    #[test]
    fn book_value_change_requires_both_years() {
        let engine = AnalyticsEngine::new();
        let mut current = input("2023", dec!(1000000));
        current.book_value = Some(dec!(1100));

        let previous = record(1, "2022", dec!(800000));
        let derived = engine.derive_on_write(&current, Some(&previous)).unwrap();
        assert_eq!(derived.book_value_yoy_change, None);

        let mut previous = previous;
        previous.fields.book_value = Some(dec!(1000));
        let derived = engine.derive_on_write(&current, Some(&previous)).unwrap();
        assert_eq!(derived.book_value_yoy_change, Some(dec!(10)));
    }

    #[test]
    fn overflow_rejects_the_whole_derivation() {
        let engine = AnalyticsEngine::new();
        let mut current = input("2023", dec!(1000000));
        current.total_revenue = Decimal::MAX;

        let mut previous = record(1, "2022", dec!(800000));
        previous.fields.total_revenue = dec!(0.0000000001);

        assert_eq!(
            engine.derive_on_write(&current, Some(&previous)),
            Err(AnalyticsError::Overflow("revenue".to_string()))
        );
    }

    #[test]
    fn dashboard_orders_years_as_strings() {
        let engine = AnalyticsEngine::new();
        let records = vec![
            record(1, "2021", dec!(120)),
            record(2, "2019", dec!(100)),
            record(3, "2020", dec!(110)),
        ];

        let report = engine.derive_on_read("Acme", &records);
        let years: Vec<&str> = report.metrics.iter().map(|m| m.year.as_str()).collect();
        assert_eq!(years, ["2019", "2020", "2021"]);
        assert_eq!(report.company, "Acme");
    }

    #[test]
    fn short_labels_sort_after_longer_ones() {
        let engine = AnalyticsEngine::new();
        let records = vec![record(1, "9", dec!(100)), record(2, "10", dec!(200))];

        let report = engine.derive_on_read("Acme", &records);
        assert_eq!(report.metrics[0].year, "10");
        assert_eq!(report.metrics[1].year, "9");
        // "9" is compared against "10", its predecessor in string order.
        assert_eq!(report.metrics[1].yoy.revenue, Some(dec!(-50)));
    }

    #[test]
    fn dashboard_compares_against_sequence_predecessor() {
        let engine = AnalyticsEngine::new();
        // 2020 is missing: 2021 is compared with 2019 on the read path.
        let records = vec![record(1, "2019", dec!(100)), record(2, "2021", dec!(150))];

        let report = engine.derive_on_read("Acme", &records);
        assert_eq!(report.metrics[0].yoy, YoyChanges::default());
        assert_eq!(report.metrics[1].yoy.revenue, Some(dec!(50)));
        // The flat column mirrors what was stored, which is nothing here.
        assert_eq!(report.metrics[1].revenue_yoy_change, None);
    }

    #[test]
    fn stored_yoy_is_never_overwritten_on_read() {
        let engine = AnalyticsEngine::new();
        let mut current = record(2, "2020", dec!(150));
        current.fields.derived.revenue_yoy_change = Some(dec!(7.5));
        let records = vec![record(1, "2019", dec!(100)), current];

        let report = engine.derive_on_read("Acme", &records);
        assert_eq!(report.metrics[1].yoy.revenue, Some(dec!(7.5)));
        assert_eq!(report.metrics[1].revenue_yoy_change, Some(dec!(7.5)));
    }

    #[test]
    fn read_path_derives_missing_ratios() {
        let engine = AnalyticsEngine::new();
        let mut current = record(1, "2023", dec!(1000000));
        current.fields.shareholders_equity = Some(dec!(1250000));
        current.fields.total_assets = Some(dec!(2000000));

        let report = engine.derive_on_read("Acme", &[current]);
        let metric = &report.metrics[0];
        assert_eq!(metric.return_on_equity, Some(dec!(0.16)));
        assert_eq!(metric.return_on_assets, Some(dec!(0.1)));
        assert_eq!(metric.book_value_per_share, Some(dec!(1.25)));
        assert_eq!(metric.gross_profit_margin, Some(dec!(0.5)));
    }

    #[test]
    fn read_path_keeps_supplied_ratios() {
        let engine = AnalyticsEngine::new();
        let mut current = record(1, "2023", dec!(1000000));
        current.fields.shareholders_equity = Some(dec!(1250000));
        current.fields.return_on_equity = Some(dec!(0.2));
        current.fields.book_value_per_share = Some(dec!(3));

        let metric = &engine.derive_on_read("Acme", &[current]).metrics[0];
        assert_eq!(metric.return_on_equity, Some(dec!(0.2)));
        assert_eq!(metric.book_value_per_share, Some(dec!(3)));
    }

    #[test]
    fn zero_equity_or_net_profit_suppresses_ratios() {
        let engine = AnalyticsEngine::new();
        let mut zero_equity = record(1, "2022", dec!(1000000));
        zero_equity.fields.shareholders_equity = Some(Decimal::ZERO);

        let mut zero_profit = record(2, "2023", dec!(1000000));
        zero_profit.fields.net_profit = Decimal::ZERO;
        zero_profit.fields.total_assets = Some(dec!(500));
        zero_profit.fields.shareholders_equity = Some(dec!(500));

        let report = engine.derive_on_read("Acme", &[zero_equity, zero_profit]);
        assert_eq!(report.metrics[0].return_on_equity, None);
        assert_eq!(report.metrics[0].book_value_per_share, None);
        assert_eq!(report.metrics[1].return_on_equity, None);
        assert_eq!(report.metrics[1].return_on_assets, None);
        assert_eq!(report.metrics[1].book_value_per_share, Some(dec!(0.0005)));
    }

    #[test]
    fn ratio_changes_use_previous_stored_ratios() {
        let engine = AnalyticsEngine::new();
        let mut previous = record(1, "2022", dec!(1000000));
        previous.fields.return_on_assets = Some(dec!(0.08));
        // Derivable, but not stored: no ROE change can be reported.
        previous.fields.shareholders_equity = Some(dec!(1000000));

        let mut current = record(2, "2023", dec!(1000000));
        current.fields.total_assets = Some(dec!(2000000));
        current.fields.shareholders_equity = Some(dec!(1000000));

        let report = engine.derive_on_read("Acme", &[previous, current]);
        let yoy = &report.metrics[1].yoy;
        assert_eq!(yoy.roa, Some(dec!(25)));
        assert_eq!(yoy.roe, None);
    }

    #[test]
    fn empty_history_yields_empty_dashboard() {
        let report = AnalyticsEngine::new().derive_on_read("Acme", &[]);
        assert!(report.metrics.is_empty());
    }

    #[test]
    fn dashboard_serializes_numbers_and_yoy_mapping() {
        let records = vec![record(1, "2022", dec!(800000)), record(2, "2023", dec!(1000000))];
        let report = AnalyticsEngine::new().derive_on_read("Acme", &records);

        let value = serde_json::to_value(&report).unwrap();
        let latest = &value["metrics"][1];
        assert_eq!(latest["year"], "2023");
        assert_eq!(latest["yoy"]["revenue"].as_f64(), Some(25.0));
        assert!(latest["yoy"]["roe"].is_null());
        assert!(latest["revenue_yoy_change"].is_null());
    }

    #[test]
    fn overflowing_read_value_is_left_unset() {
        let engine = AnalyticsEngine::new();
        let mut tiny = record(1, "2022", dec!(1000000));
        tiny.fields.total_revenue = dec!(0.01);
        let mut huge = record(2, "2023", dec!(1000000));
        huge.fields.total_revenue = Decimal::from_i128_with_scale(10i128.pow(27), 0);

        let report = engine.derive_on_read("Acme", &[huge, tiny]);
        assert_eq!(report.metrics.len(), 2);
        let latest = &report.metrics[1];
        assert_eq!(latest.year, "2023");
        assert_eq!(latest.yoy.revenue, None);
        // Unaffected values in the same snapshot are still reported.
        assert_eq!(latest.yoy.gross_profit, Some(dec!(0)));
    }

    #[test]
    fn book_value_change_uses_sequence_predecessor_on_read() {
        let engine = AnalyticsEngine::new();
        let mut first = record(1, "2019", dec!(100));
        first.fields.book_value = Some(dec!(400));
        let mut second = record(2, "2021", dec!(100));
        second.fields.book_value = Some(dec!(500));
        let mut third = record(3, "2022", dec!(100));
        third.fields.book_value = Some(dec!(550));

        let report = engine.derive_on_read("Acme", &[first, second, third]);
        assert_eq!(report.metrics[1].yoy.book_value, Some(dec!(25)));
        assert_eq!(report.metrics[2].yoy.book_value, Some(dec!(10)));
        assert_eq!(report.metrics[1].book_value_yoy_change, None);
    }

    #[test]
    fn book_value_change_needs_previous_book_value_on_read() {
        let engine = AnalyticsEngine::new();
        let previous = record(1, "2022", dec!(100));
        let mut current = record(2, "2023", dec!(100));
        current.fields.book_value = Some(dec!(500));

        let report = engine.derive_on_read("Acme", &[previous, current]);
        assert_eq!(report.metrics[1].yoy.book_value, None);
    }

    #[test]
    fn roe_change_against_previous_stored_roe() {
        let engine = AnalyticsEngine::new();
        let mut previous = record(1, "2022", dec!(1000000));
        previous.fields.return_on_equity = Some(dec!(0.1));

        // Derived on read: 200000 / 1000000 = 0.2.
        let mut current = record(2, "2023", dec!(1000000));
        current.fields.shareholders_equity = Some(dec!(1000000));

        let report = engine.derive_on_read("Acme", &[previous, current]);
        assert_eq!(report.metrics[1].return_on_equity, Some(dec!(0.2)));
        assert_eq!(report.metrics[1].yoy.roe, Some(dec!(100)));
        assert_eq!(report.metrics[1].yoy.roa, None);
    }

    #[test]
    fn stored_margin_wins_over_recomputation() {
        let engine = AnalyticsEngine::new();
        let mut current = record(1, "2023", dec!(1000000));
        current.fields.derived.gross_profit_margin = Some(dec!(0.42));

        let metric = &engine.derive_on_read("Acme", &[current]).metrics[0];
        assert_eq!(metric.gross_profit_margin, Some(dec!(0.42)));
        assert_eq!(metric.operating_profit_margin, Some(dec!(0.3)));
    }

    #[test]
    fn zero_previous_value_suppresses_change_on_read() {
        let engine = AnalyticsEngine::new();
        let mut previous = record(1, "2022", dec!(800000));
        previous.fields.free_cash_flow = Decimal::ZERO;
        let current = record(2, "2023", dec!(1000000));

        let report = engine.derive_on_read("Acme", &[previous, current]);
        let yoy = &report.metrics[1].yoy;
        assert_eq!(yoy.free_cash_flow, None);
        assert_eq!(yoy.revenue, Some(dec!(25)));
    }

    fn amount() -> impl Strategy<Value = Decimal> {
        (-1_000_000_000_000i64..1_000_000_000_000, 0u32..4).prop_map(|(m, s)| Decimal::new(m, s))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_margin_matches_formula(
            revenue in (1i64..1_000_000_000_000).prop_map(|m| Decimal::new(m, 2)),
            gross in amount(),
        ) {
            let mut statement = input("2023", dec!(1));
            statement.total_revenue = revenue;
            statement.gross_profit = gross;

            let derived = AnalyticsEngine::new().derive_on_write(&statement, None).unwrap();
            prop_assert_eq!(derived.gross_profit_margin, Some(gross / revenue));
        }

        #[test]
        fn prop_percent_change_matches_formula(current in amount(), previous in amount()) {
            let change = percent_change(current, Some(previous), "metric").unwrap();
            if previous.is_zero() {
                prop_assert_eq!(change, None);
            } else {
                let expected = ((current - previous) / previous.abs() * dec!(100)).round_dp(2);
                prop_assert_eq!(change, Some(expected));
            }
        }
    }
}
