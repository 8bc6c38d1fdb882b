//! Fetches transactions and budgets from the FinWise and YNAB APIs and
//! normalizes them into typed records for downstream consumption.

pub mod error;
pub mod finwise;
pub mod ynab;
