//! Naming strategy integration tests
//!
//! This module tests the built-in naming strategies against the reference
//! subjects and checks that custom strategies plug into dispatch.
