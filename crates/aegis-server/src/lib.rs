// crates/aegis-server/src/lib.rs
// ============================================================================
// Module: aegis-server
// Description: HTTP JSON API for the Aegis personal-safety service.
// Purpose: Serve contact, alert, and settings CRUD plus the emergency
//          trigger workflow over axum.
// Dependencies: aegis-core, aegis-config, aegis-notify, axum, tokio
// ============================================================================

//! ## Overview
//!
//! This crate binds the Aegis safety store and trigger engine to an HTTP
//! surface. Handlers share state through an `Arc`, every failure maps
//! through the [`ApiError`] taxonomy, and a dependency-light
//! [`RequestMetrics`] hook observes each request. Inputs are untrusted and
//! validated at this boundary.

/// HTTP error taxonomy.
pub mod error;
/// Router, state, and handlers.
pub mod server;
/// Request metrics hooks.
pub mod telemetry;

pub use error::ApiError;
pub use error::FieldError;
pub use server::AegisServer;
pub use server::ServerError;
pub use server::ServerState;
pub use telemetry::NoopMetrics;
pub use telemetry::RequestMetricEvent;
pub use telemetry::RequestMetrics;
