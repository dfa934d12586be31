//! Structured logging utilities for proxymock.
//!
//! Every interesting step of a mock's life is reported through a small helper
//! here so field names stay consistent. Nothing is printed unless the test
//! binary installs a subscriber, for instance via [`init_tracing`].

use crate::config::LoggingConfig;
use crate::contract::MemberId;
use crate::runtime::value::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable forcing JSON output.
pub const JSON_ENV: &str = "PROXYMOCK_LOG_JSON";

/// Install a subscriber for proxymock events.
///
/// Human-readable output goes through the test harness' captured writer;
/// JSON lines go to stderr. `RUST_LOG` wins over the configured level.
/// Returns `false` when a global subscriber was already installed, which is
/// expected when many tests call this.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let fallback_filter = format!("proxymock={}", config.level);
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| fallback_filter.clone().into())
    };

    let use_json = config.json || std::env::var(JSON_ENV).is_ok();

    if use_json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(filter())
            .with(json_layer)
            .try_init()
            .is_ok()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(filter())
            .with(fmt_layer)
            .try_init()
            .is_ok()
    }
}

/// Log contract introspection.
pub fn log_proxy_synthesized(contract: &str, members: usize) {
    tracing::debug!(contract, members, "Proxy factory synthesized");
}

/// Log setup registration.
pub fn log_setup_registered(member: &MemberId, predicates: usize) {
    tracing::debug!(member = %member, predicates, "Setup registered");
}

/// Log a forwarded call and which setup, if any, answered it.
pub fn log_dispatch(member: &MemberId, args: &Args, setup: Option<usize>) {
    match setup {
        Some(index) => tracing::trace!(member = %member, args = ?args, setup = index, "Call dispatched"),
        None => tracing::trace!(member = %member, args = ?args, "Call dispatched"),
    }
}

/// Log a call that fell through to the neutral value.
pub fn log_unmatched_call(member: &MemberId, candidates: usize, warn: bool) {
    if warn {
        tracing::warn!(member = %member, candidates, "No setup matched; returning neutral value");
    } else {
        tracing::debug!(member = %member, candidates, "No setup matched; returning neutral value");
    }
}

/// Log a history report written to disk.
pub fn log_history_exported(path: &str, calls: usize) {
    tracing::info!(path, calls, "Call history exported");
}
