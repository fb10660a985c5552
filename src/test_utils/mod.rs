#![allow(missing_docs)]

mod server;

pub(crate) use server::{TestApp, get_test_app};
