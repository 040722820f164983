//! Python bindings (feature `pyo3`)
//!
//! Exposes a ledger to a Python presentation layer. Money crosses the
//! boundary as integer cents, dates as `YYYY-MM-DD` strings.

pub mod treasury;
pub mod types;
