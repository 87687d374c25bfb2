// crates/aegis-core/src/runtime/mod.rs
// ============================================================================
// Module: Aegis Runtime
// Description: Workflow orchestration over the safety store and delivery.
// Purpose: Group the runtime submodules that drive the alerting sequence.
// Dependencies: crate submodules
// ============================================================================

//! ## Overview
//! The runtime layer hosts the emergency trigger workflow: the best-effort,
//! non-durable broadcast that records an alert and notifies the primary
//! contact through the delivery interface.

pub mod trigger;
