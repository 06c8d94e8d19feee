//! Occupancy grid for the world.

use foxfield_core::{shuffle, AnimalId, Error, FieldConfig, Location, RandomSource, Result};

/// A bounded 2D grid mapping each cell to at most one occupant.
///
/// The field is the sole owner of occupancy state; an animal's own
/// `location` must always agree with the record here, which the
/// lifecycle operations maintain by clearing before placing.
#[derive(Debug, Clone)]
pub struct Field {
    height: i32,
    width: i32,
    occupants: Vec<Option<AnimalId>>,
}

impl Field {
    pub fn new(config: &FieldConfig) -> Self {
        let size = (config.height * config.width) as usize;
        Self {
            height: config.height,
            width: config.width,
            occupants: vec![None; size],
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        (0..self.height).contains(&location.row) && (0..self.width).contains(&location.col)
    }

    fn index(&self, location: Location) -> usize {
        (location.row * self.width + location.col) as usize
    }

    /// Occupant recorded at a location, if any. Out-of-bounds reads as empty.
    pub fn occupant_at(&self, location: Location) -> Option<AnimalId> {
        if !self.in_bounds(location) {
            return None;
        }
        self.occupants[self.index(location)]
    }

    /// True when the location is in bounds and has no occupant
    pub fn is_free(&self, location: Location) -> bool {
        self.in_bounds(location) && self.occupants[self.index(location)].is_none()
    }

    /// Register `id` as the sole occupant of `location`.
    ///
    /// Placing onto an occupied cell is an error rather than a silent
    /// overwrite, so a stale occupant can never be orphaned.
    pub fn place(&mut self, id: AnimalId, location: Location) -> Result<()> {
        if !self.in_bounds(location) {
            return Err(Error::OutOfBounds(location));
        }
        let index = self.index(location);
        if self.occupants[index].is_some() {
            return Err(Error::Occupied(location));
        }
        self.occupants[index] = Some(id);
        Ok(())
    }

    /// Remove any occupancy record at `location`; no-op when already empty
    /// or out of bounds.
    pub fn clear(&mut self, location: Location) {
        if self.in_bounds(location) {
            let index = self.index(location);
            self.occupants[index] = None;
        }
    }

    /// The up-to-8 in-bounds neighbors of a location, shuffled so that
    /// movement and breeding show no directional bias.
    pub fn adjacent_locations(
        &self,
        location: Location,
        rng: &mut dyn RandomSource,
    ) -> Vec<Location> {
        let mut neighbors = Vec::with_capacity(8);
        for drow in -1..=1 {
            for dcol in -1..=1 {
                if drow == 0 && dcol == 0 {
                    continue;
                }
                let neighbor = location.offset(drow, dcol);
                if self.in_bounds(neighbor) {
                    neighbors.push(neighbor);
                }
            }
        }
        shuffle(rng, &mut neighbors);
        neighbors
    }

    /// Adjacent locations with no occupant, shuffled
    pub fn free_adjacent_locations(
        &self,
        location: Location,
        rng: &mut dyn RandomSource,
    ) -> Vec<Location> {
        self.adjacent_locations(location, rng)
            .into_iter()
            .filter(|loc| self.is_free(*loc))
            .collect()
    }

    /// One free adjacent location, if any exists
    pub fn free_adjacent_location(
        &self,
        location: Location,
        rng: &mut dyn RandomSource,
    ) -> Option<Location> {
        self.free_adjacent_locations(location, rng).into_iter().next()
    }

    /// Number of occupied cells
    pub fn occupant_count(&self) -> usize {
        self.occupants.iter().filter(|cell| cell.is_some()).count()
    }
}
