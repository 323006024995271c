//! Shared helpers for the jobsh integration tests.
//!
//! - [`builders`]: configs and scripted line sources
//! - [`capture`]: an in-memory console
//! - [`fake_launcher`]: a launcher that records commands instead of forking

pub mod builders;
pub mod capture;
pub mod fake_launcher;

use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// How long an assembled shell may run in a test before it counts as hung.
pub const SHELL_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialise tracing for tests.
///
/// Logs go through `with_test_writer()`, so they only show up for failing
/// tests unless run with `-- --nocapture`. Filter with `JOBSH_LOG`, e.g.
/// `JOBSH_LOG=jobsh=trace cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("JOBSH_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test if it takes longer than [`SHELL_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(SHELL_TIMEOUT, f)
        .await
        .expect("shell did not finish in time")
}
