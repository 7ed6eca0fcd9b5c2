//! Belief Diffusion Simulation Library
//!
//! Agent-based model of how scientific evidence, media framing, and
//! propaganda jointly shape belief about a binary phenomenon across a
//! heterogeneous population of scientists, journalists, propagandists,
//! citizens, and policymakers.

pub mod agents;
pub mod belief;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod output;
pub mod registry;
pub mod scheduler;
mod setup;
pub mod world;

pub use agents::{Agent, AgentId, Role};
pub use config::Config;
pub use error::SimError;
pub use world::World;

/// The single seeded random number generator threaded through every
/// stochastic operation in a replicate.
pub type SimRng = rand::rngs::SmallRng;
