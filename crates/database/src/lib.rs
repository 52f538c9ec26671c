//! # Inventory Database Crate
//!
//! This crate is the application-specific interface to the SQLite store that
//! holds both the raw CSV tables and the derived vendor summary.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the workspace deals in
//!   `Table`s and summary rows, never in queries.
//! - **Replace, never append:** Every write drops and recreates its table
//!   inside a single transaction, so a failed write leaves the previous
//!   contents intact and a repeated write never duplicates rows.
//! - **Single writer:** The pool holds exactly one connection; the batch runs
//!   sequentially over it.
//!
//! ## Public API
//!
//! - `connect`: Opens the pool, creating the database file if missing.
//! - `DbRepository`: Table replacement, the vendor summary aggregation, and
//!   persistence/read-back of the enriched summary.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{DbRepository, SOURCE_TABLES};
