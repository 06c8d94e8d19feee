//! Simulation driver: one synchronous pass over the population per tick.

use crate::animal::{Animal, TickContext};
use crate::field::Field;
use crate::stats::FieldStats;
use foxfield_core::{
    AnimalId, Location, RandomSource, Result, SeededRandom, SimulationConfig, Species,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

pub struct Simulation {
    config: SimulationConfig,
    field: Field,
    animals: HashMap<AnimalId, Animal>,
    /// Ids in insertion order. HashMap iteration order is not
    /// reproducible; acting in roster order keeps a run deterministic
    /// for a fixed seed.
    roster: Vec<AnimalId>,
    rng: SeededRandom,
    tick: u64,
    births: u64,
    deaths: u64,
}

impl Simulation {
    /// Validate the config and seed the field with an initial population.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = SeededRandom::from_seed(config.seed);
        let mut field = Field::new(&config.field);
        let mut animals = HashMap::new();
        let mut roster = Vec::new();

        // Fresh probability draw per species check, foxes first, so each
        // species sees exactly its configured creation probability.
        for row in 0..field.height() {
            for col in 0..field.width() {
                let species = if rng.next_double() <= config.fox.creation_probability {
                    Some(Species::Fox)
                } else if rng.next_double() <= config.rabbit.creation_probability {
                    Some(Species::Rabbit)
                } else {
                    None
                };
                if let Some(species) = species {
                    let animal = Animal::new(
                        species,
                        &config,
                        true,
                        &mut field,
                        Location::new(row, col),
                        &mut rng,
                    )?;
                    roster.push(animal.id());
                    animals.insert(animal.id(), animal);
                }
            }
        }

        let sim = Self {
            config,
            field,
            animals,
            roster,
            rng,
            tick: 0,
            births: 0,
            deaths: 0,
        };
        info!(
            tick = 0,
            population = sim.animals.len(),
            "Field populated: {}",
            sim.stats()
        );
        Ok(sim)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats::from_animals(self.animals.values())
    }

    /// Run until `num_ticks` or until the ecosystem is no longer viable
    pub fn run(&mut self) -> Result<SimulationResult> {
        info!("Starting simulation for {} ticks", self.config.num_ticks);

        while self.tick < self.config.num_ticks {
            self.step()?;

            if self.tick % 100 == 0 {
                let stats = self.stats();
                info!(
                    event = "population_snapshot",
                    tick = self.tick,
                    rabbits = stats.count(Species::Rabbit),
                    foxes = stats.count(Species::Fox),
                    births = self.births,
                    deaths = self.deaths,
                    "Population snapshot"
                );
            }

            if !self.stats().is_viable() {
                info!(
                    event = "ecosystem_collapse",
                    tick = self.tick,
                    "Ecosystem no longer viable: {}",
                    self.stats()
                );
                break;
            }
        }

        let stats = self.stats();
        info!(
            event = "run_summary",
            ticks_run = self.tick,
            births = self.births,
            deaths = self.deaths,
            final_population = stats.total(),
            "Run complete: {}",
            stats
        );

        Ok(SimulationResult {
            ticks_run: self.tick,
            births: self.births,
            deaths: self.deaths,
            final_population: Species::all()
                .into_iter()
                .map(|species| (species, stats.count(species)))
                .collect(),
        })
    }

    /// One tick: every animal alive at the start of the tick acts exactly
    /// once, in roster order. Each actor is taken out of the map for its
    /// turn so its behavior can mutate other animals (predation) through
    /// the map. Newborns are merged in afterwards and first act on the
    /// next tick; the dead are dropped as they are reached.
    pub fn step(&mut self) -> Result<()> {
        let snapshot = self.roster.clone();
        let mut newborns: Vec<Animal> = Vec::new();

        for id in snapshot {
            // Already dropped on an earlier tick
            let Some(mut animal) = self.animals.remove(&id) else {
                continue;
            };
            if animal.is_alive() {
                let mut ctx = TickContext {
                    field: &mut self.field,
                    animals: &mut self.animals,
                    config: &self.config,
                    rng: &mut self.rng,
                };
                animal.act(&mut ctx, &mut newborns)?;
            }
            if animal.is_alive() {
                self.animals.insert(id, animal);
            } else {
                self.deaths += 1;
                debug!(
                    event = "animal_death",
                    animal_id = %animal.id(),
                    species = %animal.species(),
                    age = animal.age(),
                    tick = self.tick,
                    "Animal died"
                );
            }
        }

        self.remove_dead();

        self.births += newborns.len() as u64;
        for young in newborns {
            self.roster.push(young.id());
            self.animals.insert(young.id(), young);
        }
        self.roster.retain(|id| self.animals.contains_key(id));

        self.tick += 1;
        Ok(())
    }

    /// Drop animals killed by a predator after their own turn; the act
    /// loop only removes an animal that is already dead when reached.
    fn remove_dead(&mut self) {
        let dead: Vec<AnimalId> = self
            .animals
            .iter()
            .filter(|(_, animal)| !animal.is_alive())
            .map(|(id, _)| *id)
            .collect();
        for id in dead {
            if let Some(animal) = self.animals.remove(&id) {
                self.deaths += 1;
                debug!(
                    event = "animal_death",
                    animal_id = %animal.id(),
                    species = %animal.species(),
                    age = animal.age(),
                    tick = self.tick,
                    "Animal died"
                );
            }
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ticks_run: u64,
    pub births: u64,
    pub deaths: u64,
    pub final_population: Vec<(Species, usize)>,
}
