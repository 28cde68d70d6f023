use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Calculation error: arithmetic overflow in metric '{0}'")]
    Overflow(String),
}
