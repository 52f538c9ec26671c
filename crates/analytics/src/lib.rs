//! # Inventory Analytics
//!
//! Turns the raw vendor summary into the cleaned, enriched relation that gets
//! persisted.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of the store. It depends only
//!   on `core-types`.
//! - **Stateless Calculation:** `MetricEnricher` takes summary rows and returns
//!   new rows; its input is never modified.
//! - **No silent garbage:** A value that cannot be coerced is an error, and a
//!   ratio with a zero denominator is `None`, never an infinity or NaN.
//!
//! ## Public API
//!
//! - `MetricEnricher`: Cleans rows and derives GrossProfit, ProfitMargin,
//!   StockTurnover and SalesToPurchaseRatio.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricEnricher;
pub use error::AnalyticsError;
