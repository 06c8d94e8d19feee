//! Per-species tick behavior.
//!
//! Rabbits age, breed into free neighboring cells, and move; foxes
//! additionally hunger and hunt adjacent rabbits. An animal that finds
//! no cell to move into dies of overcrowding.

use crate::animal::{Animal, TickContext};
use foxfield_core::{Location, Result, Species};

pub(crate) fn rabbit_act(
    rabbit: &mut Animal,
    ctx: &mut TickContext<'_>,
    newborns: &mut Vec<Animal>,
) -> Result<()> {
    let params = ctx.config.params(Species::Rabbit);
    rabbit.increment_age(params, ctx.field);
    if !rabbit.is_alive() {
        return Ok(());
    }

    give_birth(rabbit, ctx, newborns)?;

    let location = rabbit.located()?;
    match ctx.field.free_adjacent_location(location, ctx.rng) {
        Some(dest) => rabbit.relocate(ctx.field, dest)?,
        None => rabbit.kill(ctx.field), // overcrowding
    }
    Ok(())
}

pub(crate) fn fox_act(
    fox: &mut Animal,
    ctx: &mut TickContext<'_>,
    newborns: &mut Vec<Animal>,
) -> Result<()> {
    let params = ctx.config.params(Species::Fox);
    fox.increment_age(params, ctx.field);
    if fox.is_alive() {
        fox.increment_hunger(ctx.field);
    }
    if !fox.is_alive() {
        return Ok(());
    }

    give_birth(fox, ctx, newborns)?;

    let location = fox.located()?;
    let dest = match find_food(fox, location, ctx) {
        Some(prey_cell) => Some(prey_cell),
        None => ctx.field.free_adjacent_location(location, ctx.rng),
    };
    match dest {
        Some(dest) => fox.relocate(ctx.field, dest)?,
        None => fox.kill(ctx.field), // overcrowding
    }
    Ok(())
}

/// Scan adjacent cells for a living rabbit; eat the first one found.
/// Eating kills the prey (freeing its cell) and returns that cell for
/// the fox to move into.
fn find_food(fox: &mut Animal, location: Location, ctx: &mut TickContext<'_>) -> Option<Location> {
    let spots = ctx.field.adjacent_locations(location, ctx.rng);
    for spot in spots {
        let Some(occupant_id) = ctx.field.occupant_at(spot) else {
            continue;
        };
        let TickContext {
            field,
            animals,
            config,
            ..
        } = ctx;
        if let Some(prey) = animals.get_mut(&occupant_id) {
            if prey.species() == Species::Rabbit && prey.is_alive() {
                prey.kill(field);
                fox.feed(config.prey_food_value);
                return Some(spot);
            }
        }
    }
    None
}

/// Breed and place any offspring into free adjacent cells. Litters
/// larger than the available free cells are truncated.
fn give_birth(
    parent: &mut Animal,
    ctx: &mut TickContext<'_>,
    newborns: &mut Vec<Animal>,
) -> Result<()> {
    let params = ctx.config.params(parent.species());
    let location = parent.located()?;
    let mut free = ctx.field.free_adjacent_locations(location, ctx.rng);
    let births = parent.breed(params, ctx.rng);

    for _ in 0..births {
        let Some(spot) = free.pop() else {
            break;
        };
        let young = Animal::new(
            parent.species(),
            ctx.config,
            false,
            ctx.field,
            spot,
            ctx.rng,
        )?;
        newborns.push(young);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use foxfield_core::{AnimalId, FieldConfig, ScriptedRandom, SimulationConfig};
    use std::collections::HashMap;

    fn field_5x5() -> Field {
        Field::new(&FieldConfig {
            height: 5,
            width: 5,
        })
    }

    fn spawn(
        species: Species,
        config: &SimulationConfig,
        field: &mut Field,
        location: Location,
    ) -> Animal {
        let mut rng = ScriptedRandom::default();
        Animal::new(species, config, false, field, location, &mut rng).unwrap()
    }

    #[test]
    fn test_rabbit_moves_to_free_adjacent_cell() {
        let config = SimulationConfig::default();
        let mut field = field_5x5();
        let start = Location::new(2, 2);
        let mut rabbit = spawn(Species::Rabbit, &config, &mut field, start);

        let mut animals = HashMap::new();
        let mut rng = ScriptedRandom::default();
        let mut ctx = TickContext {
            field: &mut field,
            animals: &mut animals,
            config: &config,
            rng: &mut rng,
        };
        let mut newborns = Vec::new();
        rabbit.act(&mut ctx, &mut newborns).unwrap();

        assert!(rabbit.is_alive());
        assert_eq!(rabbit.age(), 1);
        let new_loc = rabbit.location().unwrap();
        assert_ne!(new_loc, start);
        assert!(field.is_free(start));
        assert_eq!(field.occupant_at(new_loc), Some(rabbit.id()));
        assert!(newborns.is_empty()); // age 1 is below breeding age
    }

    #[test]
    fn test_rabbit_dies_of_overcrowding() {
        let config = SimulationConfig::default();
        let mut field = field_5x5();
        let center = Location::new(2, 2);
        let mut rabbit = spawn(Species::Rabbit, &config, &mut field, center);

        let mut rng = ScriptedRandom::default();
        for neighbor in field.clone().adjacent_locations(center, &mut rng) {
            field.place(AnimalId::new(), neighbor).unwrap();
        }

        let mut animals = HashMap::new();
        let mut ctx = TickContext {
            field: &mut field,
            animals: &mut animals,
            config: &config,
            rng: &mut rng,
        };
        let mut newborns = Vec::new();
        rabbit.act(&mut ctx, &mut newborns).unwrap();

        assert!(!rabbit.is_alive());
        assert!(field.is_free(center));
    }

    #[test]
    fn test_rabbit_breeds_into_free_cells() {
        let mut config = SimulationConfig::default();
        config.rabbit.breeding_age = 0;
        config.rabbit.breeding_probability = 1.0;
        config.rabbit.max_litter_size = 4;
        let mut field = field_5x5();
        let mut rabbit = spawn(Species::Rabbit, &config, &mut field, Location::new(2, 2));

        // Shuffle draws all come back 0; the breeding draws are
        // double 0.0 (success) then int 2 -> litter of 3.
        let mut rng = ScriptedRandom::new(
            [0, 0, 0, 0, 0, 0, 0, 2],
            [0.0],
        );
        let mut animals = HashMap::new();
        let mut ctx = TickContext {
            field: &mut field,
            animals: &mut animals,
            config: &config,
            rng: &mut rng,
        };
        let mut newborns = Vec::new();
        rabbit.act(&mut ctx, &mut newborns).unwrap();

        assert_eq!(newborns.len(), 3);
        for young in &newborns {
            assert_eq!(young.species(), Species::Rabbit);
            assert_eq!(young.age(), 0);
            let loc = young.location().unwrap();
            assert_eq!(field.occupant_at(loc), Some(young.id()));
        }
    }

    #[test]
    fn test_fox_eats_adjacent_rabbit_and_takes_its_cell() {
        let config = SimulationConfig::default();
        let mut field = field_5x5();
        let fox_loc = Location::new(2, 2);
        let prey_loc = Location::new(2, 3);
        let mut fox = spawn(Species::Fox, &config, &mut field, fox_loc);
        let prey = spawn(Species::Rabbit, &config, &mut field, prey_loc);
        let prey_id = prey.id();

        let mut animals = HashMap::new();
        animals.insert(prey_id, prey);

        let mut rng = ScriptedRandom::default();
        let mut ctx = TickContext {
            field: &mut field,
            animals: &mut animals,
            config: &config,
            rng: &mut rng,
        };
        let mut newborns = Vec::new();
        fox.act(&mut ctx, &mut newborns).unwrap();

        let prey = &animals[&prey_id];
        assert!(!prey.is_alive());
        assert_eq!(prey.location(), None);
        assert!(fox.is_alive());
        assert_eq!(fox.location(), Some(prey_loc));
        assert_eq!(field.occupant_at(prey_loc), Some(fox.id()));
        assert!(field.is_free(fox_loc));
        // Stomach refilled after the hunger tick
        assert_eq!(fox.food_level(), config.prey_food_value);
    }

    #[test]
    fn test_fox_starves_when_food_runs_out() {
        let mut config = SimulationConfig::default();
        config.prey_food_value = 1;
        let mut field = field_5x5();
        let loc = Location::new(2, 2);
        let mut fox = spawn(Species::Fox, &config, &mut field, loc);
        assert_eq!(fox.food_level(), 1);

        let mut animals = HashMap::new();
        let mut rng = ScriptedRandom::default();
        let mut ctx = TickContext {
            field: &mut field,
            animals: &mut animals,
            config: &config,
            rng: &mut rng,
        };
        let mut newborns = Vec::new();
        fox.act(&mut ctx, &mut newborns).unwrap();

        assert!(!fox.is_alive());
        assert!(field.is_free(loc));
    }

    #[test]
    fn test_fox_ignores_other_foxes_when_hunting() {
        let config = SimulationConfig::default();
        let mut field = field_5x5();
        let mut fox = spawn(Species::Fox, &config, &mut field, Location::new(2, 2));
        let other = spawn(Species::Fox, &config, &mut field, Location::new(2, 3));
        let other_id = other.id();

        let mut animals = HashMap::new();
        animals.insert(other_id, other);

        let mut rng = ScriptedRandom::default();
        let mut ctx = TickContext {
            field: &mut field,
            animals: &mut animals,
            config: &config,
            rng: &mut rng,
        };
        let mut newborns = Vec::new();
        fox.act(&mut ctx, &mut newborns).unwrap();

        assert!(animals[&other_id].is_alive());
        assert_ne!(fox.location(), Some(Location::new(2, 3)));
    }
}
