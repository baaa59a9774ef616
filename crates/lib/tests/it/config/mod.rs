//! Configuration integration tests
//!
//! This module tests the configuration tiers, shared configuration handles
//! and macro registration. Global-tier tests run against test-local
//! configurable types so they never disturb each other.

mod helpers;
