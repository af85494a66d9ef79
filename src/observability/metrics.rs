//! Metrics collection.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//!   (`ok`, `not_found`, `embed_failed`)
//! - `router_embed_sessions_created_total` (counter): sessions created
//! - `router_embed_failures_total` (counter): refused instantiations
//! - `router_embed_sessions_live` (gauge): currently live sessions

use metrics::{counter, gauge};

/// Count one resolved navigation by outcome.
pub fn record_navigation(outcome: &'static str) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

/// Count one created embed session.
pub fn record_session_created() {
    counter!("router_embed_sessions_created_total").increment(1);
}

/// Count one refused embed instantiation.
pub fn record_embed_failure() {
    counter!("router_embed_failures_total").increment(1);
}

/// Track the number of live embed sessions.
pub fn record_sessions_live(count: usize) {
    gauge!("router_embed_sessions_live").set(count as f64);
}
