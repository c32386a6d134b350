//! Rule engine, growth model, and service facade for the Simul simulation.
//!
//! This crate advances a [`World`](simul_world::World) through discrete
//! ticks. Each tick applies an ordered list of economic rules to every
//! country and region, then executes the actions queued since the last
//! tick.
//!
//! # Modules
//!
//! - [`catalog`] -- The six economic rules and simulator assembly.
//! - [`config`] -- Configuration loading from `simul-config.yaml` into
//!   strongly-typed structs.
//! - [`growth`] -- Bounded population growth and clamping helpers.
//! - [`randomizer`] -- [`Randomizer`] trait with pass-through and gaussian
//!   implementations.
//! - [`rule`] -- [`Rule`] shapes and the per-application context.
//! - [`service`] -- [`WorldService`] read model and command facade.
//! - [`simulator`] -- [`Simulator`], the tick loop.
//!
//! [`Randomizer`]: randomizer::Randomizer
//! [`Rule`]: rule::Rule
//! [`WorldService`]: service::WorldService
//! [`Simulator`]: simulator::Simulator

pub mod catalog;
pub mod config;
pub mod growth;
pub mod randomizer;
pub mod rule;
pub mod service;
pub mod simulator;
