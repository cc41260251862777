//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by cause (navigate, external)
//! - `router_route_matches_total` (counter): match results (matched, not_found)
//! - `router_loader_completions_total` (counter): loader outcomes (resolved, errored, superseded)
//! - `router_loading` (gauge): 1 while the current navigation's loader is pending
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no exporter is installed here
//! - Labels are static strings

use crate::navigation::loader::LoadOutcome;
use crate::navigation::state::NavigationCause;

pub fn record_navigation(cause: NavigationCause) {
    metrics::counter!("router_navigations_total", "cause" => cause.as_str()).increment(1);
}

pub fn record_route_match(matched: bool) {
    let outcome = if matched { "matched" } else { "not_found" };
    metrics::counter!("router_route_matches_total", "outcome" => outcome).increment(1);
}

pub fn record_loader_outcome(outcome: LoadOutcome) {
    metrics::counter!("router_loader_completions_total", "outcome" => outcome.as_str())
        .increment(1);
}

pub fn record_loading(is_loading: bool) {
    metrics::gauge!("router_loading").set(if is_loading { 1.0 } else { 0.0 });
}
