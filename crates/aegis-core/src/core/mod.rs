// crates/aegis-core/src/core/mod.rs
// ============================================================================
// Module: Aegis Core Data Model
// Description: Canonical entity types for contacts, alerts, and settings.
// Purpose: Group the data-model submodules used across the workspace.
// Dependencies: crate submodules
// ============================================================================

//! ## Overview
//! The data model mirrors the wire shapes of the Aegis HTTP API. Entities are
//! owned by the safety store; callers receive clones and mutate only through
//! store operations.

pub mod alert;
pub mod contact;
pub mod identifiers;
pub mod phone;
pub mod settings;
pub mod time;
