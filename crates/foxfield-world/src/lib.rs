//! World simulation engine.
//!
//! This module implements the bounded 2D grid where foxes and rabbits
//! live, breed, hunt, and die.

pub mod animal;
pub mod field;
pub mod simulation;
pub mod species;
pub mod stats;

pub use animal::{Animal, TickContext};
pub use field::Field;
pub use simulation::{Simulation, SimulationResult};
pub use stats::FieldStats;
