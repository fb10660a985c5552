//! Transaction categories.
//!
//! This module contains the `Category` model, its validation rules and the
//! route handlers for managing categories.

mod core;
mod endpoints;

pub use core::{Category, CategoryId, CategoryPayload, CategoryUpdate, NewCategory};
pub use endpoints::{
    create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
    get_category_endpoint, update_category_endpoint,
};
