use crate::error::CoreError;
use std::fmt;

pub const MIN_FISCAL_YEAR: i32 = 1900;
pub const MAX_FISCAL_YEAR: i32 = 2100;

/// A validated fiscal year label.
///
/// Records are keyed by the label string, not by the parsed integer, so two labels that
/// parse to the same year but differ textually are distinct keys. Surrounding whitespace
/// is stripped at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FiscalYear {
    label: String,
    year: i32,
}

impl FiscalYear {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let label = raw.trim();
        let year: i32 = label
            .parse()
            .map_err(|_| CoreError::invalid("fiscal_year", "Fiscal year must be a valid year"))?;

        if !(MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&year) {
            return Err(CoreError::invalid(
                "fiscal_year",
                format!("Year must be between {MIN_FISCAL_YEAR} and {MAX_FISCAL_YEAR}"),
            ));
        }

        Ok(Self {
            label: label.to_string(),
            year,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The key of the literal previous year (`year - 1`), used for write-time YoY lookups.
    pub fn previous_label(&self) -> String {
        (self.year - 1).to_string()
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
