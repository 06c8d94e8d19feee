//! Core types and utilities for the Foxfield predator-prey simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod rng;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use rng::{shuffle, RandomSource, ScriptedRandom, SeededRandom};
