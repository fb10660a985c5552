//! Imports transactions from CSV bank statements.

mod csv;
mod endpoint;

pub use endpoint::{ImportPayload, import_transactions_endpoint};
