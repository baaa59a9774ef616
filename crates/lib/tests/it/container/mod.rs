//! Container integration tests
//!
//! This module tests the typed Container primitives, iteration helpers and
//! structured import/export.

mod primitive_tests;
mod structured_tests;
