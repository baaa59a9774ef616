/*! Integration tests for fluentarray.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - naming: Tests for the built-in naming strategies
 * - config: Tests for configuration tiers, shared configs and macros
 * - container: Tests for the Container primitives and structured import/export
 * - dispatch: Tests for name-driven dispatch and child builders
 * - codec: Tests for the versioned serialized form
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("fluentarray=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod config;
mod container;
mod naming;
