use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Volume '{value}' for vendor {vendor_number}, brand {brand} is not a number")]
    InvalidVolume {
        vendor_number: i64,
        brand: i64,
        value: String,
    },

    #[error("Calculation error: arithmetic overflow in metric '{0}'")]
    Overflow(String),
}
