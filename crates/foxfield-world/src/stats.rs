//! Population counts over the field.

use crate::animal::Animal;
use foxfield_core::Species;
use std::collections::HashMap;
use std::fmt;

/// Per-species living counts for one instant of the simulation
#[derive(Debug, Clone, Default)]
pub struct FieldStats {
    counts: HashMap<Species, usize>,
}

impl FieldStats {
    pub fn from_animals<'a>(animals: impl Iterator<Item = &'a Animal>) -> Self {
        let mut counts = HashMap::new();
        for animal in animals.filter(|a| a.is_alive()) {
            *counts.entry(animal.species()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, species: Species) -> usize {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The ecosystem is viable while more than one species survives
    pub fn is_viable(&self) -> bool {
        self.counts.values().filter(|&&count| count > 0).count() > 1
    }
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for species in Species::all() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", species, self.count(species))?;
            first = false;
        }
        Ok(())
    }
}
