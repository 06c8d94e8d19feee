//! Animal lifecycle state machine.
//!
//! All mutation goes through the lifecycle operations here; there are no
//! public setters, so the alive/location coupling and age monotonicity
//! cannot be violated from outside.

use crate::field::Field;
use crate::species;
use foxfield_core::{
    AnimalId, Error, Location, RandomSource, Result, SimulationConfig, Species, SpeciesParams,
};
use std::collections::HashMap;

/// Mutable world state handed to a living animal for one tick.
///
/// The acting animal is taken out of `animals` for the duration of its
/// turn, so species behavior may freely mutate other individuals (e.g.
/// a fox killing the rabbit it eats) through the map.
pub struct TickContext<'a> {
    pub field: &'a mut Field,
    pub animals: &'a mut HashMap<AnimalId, Animal>,
    pub config: &'a SimulationConfig,
    pub rng: &'a mut dyn RandomSource,
}

/// An individual animal occupying at most one cell of the field.
///
/// Invariants:
/// - dead implies unlocated;
/// - located implies the field records this animal at that cell;
/// - age only ever advances, by exactly one per `increment_age`.
#[derive(Debug)]
pub struct Animal {
    id: AnimalId,
    species: Species,
    age: u32,
    alive: bool,
    location: Option<Location>,
    /// Ticks until starvation; meaningful for predators only.
    food_level: u32,
}

impl Animal {
    /// Create an animal and register it into the field at `location`.
    ///
    /// Age starts at 0, or uniform in `[0, max_age)` when `random_age` is
    /// requested. A fox starts with a full stomach, or a uniformly random
    /// one under `random_age`. Fails when the cell is occupied or out of
    /// bounds.
    pub fn new(
        species: Species,
        config: &SimulationConfig,
        random_age: bool,
        field: &mut Field,
        location: Location,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        let id = AnimalId::new();
        field.place(id, location)?;

        let params = config.params(species);
        let age = if random_age {
            rng.next_int(params.max_age)
        } else {
            0
        };
        let food_level = match species {
            Species::Fox if random_age => rng.next_int(config.prey_food_value),
            Species::Fox => config.prey_food_value,
            Species::Rabbit => 0,
        };

        Ok(Self {
            id,
            species,
            age,
            alive: true,
            location: Some(location),
            food_level,
        })
    }

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn food_level(&self) -> u32 {
        self.food_level
    }

    /// Advance age by one tick. Passing the species maximum kills the
    /// animal as a side effect; no separate check is needed elsewhere.
    pub fn increment_age(&mut self, params: &SpeciesParams, field: &mut Field) {
        self.age += 1;
        if self.age > params.max_age {
            self.kill(field);
        }
    }

    /// Burn one tick of food; starves at zero. Predators only.
    pub fn increment_hunger(&mut self, field: &mut Field) {
        self.food_level = self.food_level.saturating_sub(1);
        if self.food_level == 0 {
            self.kill(field);
        }
    }

    /// Reset the food level after a successful hunt
    pub fn feed(&mut self, food_value: u32) {
        self.food_level = food_value;
    }

    /// Whether this animal has reached breeding age. Pure; independent of
    /// random draws and defined regardless of `alive`.
    pub fn can_breed(&self, params: &SpeciesParams) -> bool {
        self.age >= params.breeding_age
    }

    /// Number of births this tick: zero below breeding age (no draws
    /// consumed), otherwise zero or a litter of `1..=max_litter_size`
    /// depending on one probability draw. Reports a count only; the
    /// caller constructs and places any offspring.
    pub fn breed(&self, params: &SpeciesParams, rng: &mut dyn RandomSource) -> u32 {
        if self.can_breed(params) && rng.next_double() <= params.breeding_probability {
            rng.next_int(params.max_litter_size) + 1
        } else {
            0
        }
    }

    /// Move to `new_location`, clearing the old cell first so the animal
    /// never occupies two cells at once. The destination must be free.
    pub fn relocate(&mut self, field: &mut Field, new_location: Location) -> Result<()> {
        let Some(old_location) = self.location else {
            return Err(Error::InvalidState(format!(
                "cannot relocate unplaced animal {}",
                self.id
            )));
        };
        if !field.in_bounds(new_location) {
            return Err(Error::OutOfBounds(new_location));
        }
        if new_location != old_location && field.occupant_at(new_location).is_some() {
            return Err(Error::Occupied(new_location));
        }
        field.clear(old_location);
        field.place(self.id, new_location)?;
        self.location = Some(new_location);
        Ok(())
    }

    /// Transition to dead and deregister from the field. Explicitly a
    /// no-op on an already-dead animal.
    pub fn kill(&mut self, field: &mut Field) {
        if !self.alive {
            return;
        }
        self.alive = false;
        if let Some(location) = self.location.take() {
            field.clear(location);
        }
    }

    /// Run one tick of species behavior: aging, breeding (offspring are
    /// appended to `newborns`), movement, and species rules such as
    /// predation and starvation. Must be called at most once per tick
    /// per living animal.
    pub fn act(&mut self, ctx: &mut TickContext<'_>, newborns: &mut Vec<Animal>) -> Result<()> {
        match self.species {
            Species::Rabbit => species::rabbit_act(self, ctx, newborns),
            Species::Fox => species::fox_act(self, ctx, newborns),
        }
    }

    /// Location of a living animal; error when the invariant is broken
    pub(crate) fn located(&self) -> Result<Location> {
        self.location.ok_or_else(|| {
            Error::InvalidState(format!("living animal {} has no location", self.id))
        })
    }
}
