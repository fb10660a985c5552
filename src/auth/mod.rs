//! Identifies the user account a request acts on.

mod middleware;

pub use middleware::{USER_ID_HEADER, UserId, user_guard};
