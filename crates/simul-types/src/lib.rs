//! Shared type definitions for the Simul economy simulation.
//!
//! This crate is the single source of truth for the values that cross the
//! engine boundary: identifiers, queued actions, and read-model snapshots.
//! Types defined here flow downstream to `TypeScript` via `ts-rs` for UI
//! clients.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential identifiers for countries and regions
//! - [`actions`] -- The closed set of deferred commands
//! - [`geometry`] -- Map points and region outlines
//! - [`views`] -- Serializable read-model snapshots

pub mod actions;
pub mod geometry;
pub mod ids;
pub mod views;

// Re-export all public types at crate root for convenience.
pub use actions::Action;
pub use geometry::{Point, Polygon};
pub use ids::{CountryId, RegionId};
pub use views::{CountryView, RegionView, SimulationView, WorldSnapshot};
