//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Species;
use serde::{Deserialize, Serialize};

/// Lifecycle parameters for a single species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesParams {
    /// Age at which an individual dies of old age
    pub max_age: u32,
    /// Minimum age at which an individual can breed
    pub breeding_age: u32,
    /// Maximum number of offspring per breeding event
    pub max_litter_size: u32,
    /// Probability of breeding on a given tick (0.0 to 1.0)
    pub breeding_probability: f64,
    /// Probability that a cell is seeded with this species (0.0 to 1.0)
    pub creation_probability: f64,
}

impl SpeciesParams {
    /// Classic rabbit parameters
    pub fn rabbit() -> Self {
        Self {
            max_age: 40,
            breeding_age: 5,
            max_litter_size: 4,
            breeding_probability: 0.12,
            creation_probability: 0.08,
        }
    }

    /// Classic fox parameters
    pub fn fox() -> Self {
        Self {
            max_age: 150,
            breeding_age: 15,
            max_litter_size: 2,
            breeding_probability: 0.08,
            creation_probability: 0.02,
        }
    }

    /// Validate the parameter set. Called once at construction, not per tick.
    pub fn validate(&self, species: Species) -> Result<()> {
        if self.max_age == 0 {
            return Err(Error::Validation(format!(
                "{species}: max_age must be positive"
            )));
        }
        if self.max_litter_size == 0 {
            return Err(Error::Validation(format!(
                "{species}: max_litter_size must be positive"
            )));
        }
        if self.breeding_age > self.max_age {
            return Err(Error::Validation(format!(
                "{species}: breeding_age {} exceeds max_age {}",
                self.breeding_age, self.max_age
            )));
        }
        if !(0.0..=1.0).contains(&self.breeding_probability) {
            return Err(Error::Validation(format!(
                "{species}: breeding_probability {} outside [0, 1]",
                self.breeding_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.creation_probability) {
            return Err(Error::Validation(format!(
                "{species}: creation_probability {} outside [0, 1]",
                self.creation_probability
            )));
        }
        Ok(())
    }
}

/// Field dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of rows in the field
    pub height: i32,
    /// Number of columns in the field
    pub width: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            height: 80,
            width: 120,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.height <= 0 || self.width <= 0 {
            return Err(Error::Validation(format!(
                "field dimensions must be positive, got {}x{}",
                self.height, self.width
            )));
        }
        Ok(())
    }
}

/// Full simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of ticks to run the simulation
    pub num_ticks: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Field configuration
    pub field: FieldConfig,
    /// Rabbit lifecycle parameters
    pub rabbit: SpeciesParams,
    /// Fox lifecycle parameters
    pub fox: SpeciesParams,
    /// Food value a fox gains from eating one rabbit; also its
    /// starting food level.
    pub prey_food_value: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_ticks: 1000,
            seed: 0,
            field: FieldConfig::default(),
            rabbit: SpeciesParams::rabbit(),
            fox: SpeciesParams::fox(),
            prey_food_value: 9,
        }
    }
}

impl SimulationConfig {
    /// Lifecycle parameters for the given species
    pub fn params(&self, species: Species) -> &SpeciesParams {
        match species {
            Species::Rabbit => &self.rabbit,
            Species::Fox => &self.fox,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.rabbit.validate(Species::Rabbit)?;
        self.fox.validate(Species::Fox)?;
        if self.prey_food_value == 0 {
            return Err(Error::Validation(
                "prey_food_value must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.field.width, 120);
        assert_eq!(config.field.height, 80);
        assert_eq!(config.params(Species::Rabbit).max_age, 40);
        assert_eq!(config.params(Species::Fox).breeding_age, 15);
    }

    #[test]
    fn test_zero_litter_size_rejected() {
        let mut config = SimulationConfig::default();
        config.rabbit.max_litter_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut params = SpeciesParams::fox();
        params.breeding_probability = 1.5;
        assert!(params.validate(Species::Fox).is_err());

        let mut params = SpeciesParams::fox();
        params.breeding_probability = -0.1;
        assert!(params.validate(Species::Fox).is_err());
    }

    #[test]
    fn test_breeding_age_past_max_age_rejected() {
        let mut params = SpeciesParams::rabbit();
        params.breeding_age = params.max_age + 1;
        assert!(params.validate(Species::Rabbit).is_err());
    }

    #[test]
    fn test_non_positive_field_rejected() {
        let config = FieldConfig {
            height: 0,
            width: 10,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_ticks, config.num_ticks);
        assert_eq!(back.rabbit.max_age, config.rabbit.max_age);
        assert_eq!(back.prey_food_value, config.prey_food_value);
    }
}
