//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the types used to create and update it
//! - The JSON payload and its validation rules
//! - Route handlers for listing, creating, updating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod payload;
mod references;

pub use core::{
    INSTALLMENT_OUT_OF_RANGE, INSTALLMENTS_REQUIRED, NewTransaction, Transaction, TransactionId,
    TransactionMode, TransactionType, TransactionUpdate, UnknownVariant,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
pub use payload::TransactionPayload;
pub(crate) use references::{References, check_references};
