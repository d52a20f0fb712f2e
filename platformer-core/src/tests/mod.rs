//! Shared helpers for the integration tests

pub mod test_helpers;
