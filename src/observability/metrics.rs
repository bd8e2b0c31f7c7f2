//! Metrics collection.
//!
//! # Metrics
//! - `fragment_queue_builds_total` (counter): queue builds by pass (eager, conditional)
//! - `fragment_queue_entries_total` (counter): entries queued by pass and entry kind
//! - `fragment_assets_skipped_total` (counter): assets left out of a queue by reason
//! - `fragment_config_updates_total` (counter): configuration updates by outcome
//!
//! # Design Decisions
//! - Facade only: the host installs a recorder, otherwise updates are no-ops
//! - Labels are static strings

use ::metrics::counter;

/// Record one finished queue build.
pub fn record_queue_built(pass: &'static str, dependencies: usize, assets: usize) {
    counter!("fragment_queue_builds_total", "pass" => pass).increment(1);
    counter!("fragment_queue_entries_total", "pass" => pass, "kind" => "dependency")
        .increment(dependencies as u64);
    counter!("fragment_queue_entries_total", "pass" => pass, "kind" => "asset")
        .increment(assets as u64);
}

/// Record an asset excluded from a queue.
pub fn record_asset_skipped(reason: &'static str) {
    counter!("fragment_assets_skipped_total", "reason" => reason).increment(1);
}

/// Record a configuration update attempt.
pub fn record_config_update(accepted: bool) {
    let outcome = if accepted { "accepted" } else { "rejected" };
    counter!("fragment_config_updates_total", "outcome" => outcome).increment(1);
}
