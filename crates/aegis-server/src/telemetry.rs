// crates/aegis-server/src/telemetry.rs
// ============================================================================
// Module: Server Telemetry
// Description: Observability hooks for the Aegis HTTP API.
// Purpose: Provide request counters and latency observations without hard
//          dependencies on any metrics backend.
// Dependencies: axum
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for API request counters and
//! latency observations. It is intentionally dependency-light so deployments
//! can plug in Prometheus or OpenTelemetry without redesign. Labels are
//! limited to method, matched route, and status; request bodies never reach
//! the sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// One API request observation.
///
/// # Invariants
/// - `route` is the matched route pattern, never the raw URI, so label
///   cardinality stays bounded.
#[derive(Debug, Clone)]
pub struct RequestMetricEvent {
    /// HTTP method label.
    pub method: String,
    /// Matched route pattern, e.g. `/api/emergency-contacts/{id}`.
    pub route: String,
    /// Response status code.
    pub status: u16,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for API requests and latencies.
pub trait RequestMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: RequestMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: RequestMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl RequestMetrics for NoopMetrics {
    fn record_request(&self, _event: RequestMetricEvent) {}

    fn record_latency(&self, _event: RequestMetricEvent, _latency: Duration) {}
}
