//! Tracing subscriber setup for embedding processes.
//!
//! The message macros route through `tracing` whenever `TASKDESK_DEBUG` or
//! `RUST_LOG` is set; a host process that wants that output rendered calls
//! [`init`] once at startup. Library code never installs a subscriber on its
//! own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a formatted `tracing` subscriber honoring `RUST_LOG`.
///
/// Defaults to `info` for this crate when `RUST_LOG` is unset. Calling it
/// twice is a no-op; the first subscriber wins.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "taskdesk=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
