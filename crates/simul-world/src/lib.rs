//! Countries, regions, and the pending action queue for the Simul simulation.
//!
//! This crate is the entity store. It owns every country and region of a
//! simulated world, keeps the ownership and diplomatic relationships
//! between them consistent on both sides, and buffers the actions that
//! external callers submit between ticks.
//!
//! # Modules
//!
//! - [`action_queue`] -- FIFO buffer of deferred actions.
//! - [`country`] -- [`Country`] state: tax rates, treasury, relations.
//! - [`error`] -- Error types for entity-store operations.
//! - [`region`] -- [`Region`] state: productivity and economic stocks.
//! - [`starting_world`] -- Default two-country starting map.
//! - [`world`] -- [`World`], the aggregate root and arena of all entities.

pub mod action_queue;
pub mod country;
pub mod error;
pub mod region;
pub mod starting_world;
pub mod world;

// Re-export primary types at crate root.
pub use action_queue::ActionQueue;
pub use country::Country;
pub use error::WorldError;
pub use region::Region;
pub use starting_world::{StartingIds, create_starting_world};
pub use world::World;
