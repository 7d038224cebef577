//! Demo simulation step.
//!
//! [`DemoSimulation`] stands in for a real simulation: each step rewrites
//! a handful of random tiles and nudges every unit one tile in a random
//! direction. It is seeded, so a given seed replays the same mutations.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use worldview_core::{SimulationStep, StepCallback, StepSummary};
use worldview_types::{CELL_EDGE, CellCoord, TileCoord};
use worldview_world::{MemoryWorld, WorldAccess, WorldError};

/// Tile tokens a mutation picks from.
const TILE_POOL: &[&str] = &[
    "StoneWall",
    "StoneFloor1",
    "StoneFloor2",
    "OpenSpace",
    "SoilFloor1",
    "GrassLightFloor1",
    "Shrub",
    "StoneBoulder",
];

/// Seeded random tile and unit mutations.
pub struct DemoSimulation {
    rng: StdRng,
    step: u64,
    mutations_per_step: u32,
}

impl DemoSimulation {
    /// Create a simulation with the given seed and per-step mutation count.
    pub fn new(seed: u64, mutations_per_step: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            step: 0,
            mutations_per_step,
        }
    }

    /// Rewrite one random tile, returning its cell if the tile type changed.
    fn mutate_tile(
        &mut self,
        world: &mut MemoryWorld,
        cells: &[CellCoord],
    ) -> Result<Option<CellCoord>, WorldError> {
        let Some(&cell) = cells.get(self.rng.random_range(0..cells.len())) else {
            return Ok(None);
        };
        let origin = cell.origin();
        let pos = TileCoord::new(
            origin.x.saturating_add(self.rng.random_range(0..CELL_EDGE)),
            origin.y.saturating_add(self.rng.random_range(0..CELL_EDGE)),
            origin.z,
        );
        let token = TILE_POOL
            .get(self.rng.random_range(0..TILE_POOL.len()))
            .copied()
            .unwrap_or("OpenSpace");

        let before = tiletype_at(world, pos);
        world.set_tile(pos, token)?;
        Ok((tiletype_at(world, pos) != before).then_some(cell))
    }

    /// Move every unit by at most one tile, staying inside the map.
    fn wander_units(&mut self, world: &mut MemoryWorld) {
        let Some(map) = world.map() else {
            return;
        };
        let max_x = map.size_x.saturating_mul(CELL_EDGE).saturating_sub(1);
        let max_y = map.size_y.saturating_mul(CELL_EDGE).saturating_sub(1);
        for unit in world.units_mut() {
            let dx = self.rng.random_range(-1..=1);
            let dy = self.rng.random_range(-1..=1);
            unit.pos = TileCoord::new(
                unit.pos.x.saturating_add(dx).clamp(0, max_x),
                unit.pos.y.saturating_add(dy).clamp(0, max_y),
                unit.pos.z,
            );
        }
    }
}

fn tiletype_at(world: &MemoryWorld, pos: TileCoord) -> Option<u16> {
    let (x, y) = pos.local();
    world.block(pos.cell()).and_then(|b| b.tiletype(x, y))
}

impl SimulationStep<MemoryWorld> for DemoSimulation {
    fn step(&mut self, world: &mut MemoryWorld) -> Result<StepSummary, WorldError> {
        self.step = self.step.saturating_add(1);

        let cells = world.block_coords();
        let mut changed = BTreeSet::new();
        if !cells.is_empty() {
            for _ in 0..self.mutations_per_step {
                if let Some(cell) = self.mutate_tile(world, &cells)? {
                    changed.insert(cell);
                }
            }
        }
        self.wander_units(world);

        Ok(StepSummary {
            step: self.step,
            changed_cells: u32::try_from(changed.len()).unwrap_or(u32::MAX),
        })
    }
}

/// Step callback that logs a progress line every `every` steps.
pub struct ProgressLog {
    every: u64,
    changed_since_last: u64,
}

impl ProgressLog {
    /// Log once per `every` steps (at least 1).
    pub const fn new(every: u64) -> Self {
        Self {
            every: if every == 0 { 1 } else { every },
            changed_since_last: 0,
        }
    }
}

impl StepCallback for ProgressLog {
    fn on_step(&mut self, summary: &StepSummary) {
        self.changed_since_last = self
            .changed_since_last
            .saturating_add(u64::from(summary.changed_cells));
        if summary.step.checked_rem(self.every) == Some(0) {
            info!(
                step = summary.step,
                changed_cells = self.changed_since_last,
                "Simulation progress"
            );
            self.changed_since_last = 0;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use worldview_world::{DemoParams, create_demo_world};

    use super::*;

    fn demo() -> MemoryWorld {
        create_demo_world(&DemoParams::default()).unwrap()
    }

    #[test]
    fn steps_are_numbered_from_one() {
        let mut world = demo();
        let mut sim = DemoSimulation::new(1, 4);
        assert_eq!(sim.step(&mut world).unwrap().step, 1);
        assert_eq!(sim.step(&mut world).unwrap().step, 2);
    }

    #[test]
    fn same_seed_replays_same_mutations() {
        let mut a = demo();
        let mut b = demo();
        let mut sim_a = DemoSimulation::new(42, 16);
        let mut sim_b = DemoSimulation::new(42, 16);
        for _ in 0..5 {
            let sa = sim_a.step(&mut a).unwrap();
            let sb = sim_b.step(&mut b).unwrap();
            assert_eq!(sa, sb);
        }
        for coord in a.block_coords() {
            let ta = a.block(coord).unwrap().tiletypes().to_vec();
            let tb = b.block(coord).unwrap().tiletypes().to_vec();
            assert_eq!(ta, tb);
        }
    }

    #[test]
    fn changed_cells_never_exceed_mutations() {
        let mut world = demo();
        let mut sim = DemoSimulation::new(3, 5);
        for _ in 0..20 {
            assert!(sim.step(&mut world).unwrap().changed_cells <= 5);
        }
    }

    #[test]
    fn units_stay_inside_the_map() {
        let mut world = demo();
        let mut sim = DemoSimulation::new(9, 0);
        for _ in 0..200 {
            sim.step(&mut world).unwrap();
        }
        let map = world.map().unwrap();
        let (max_x, max_y) = (map.size_x * CELL_EDGE, map.size_y * CELL_EDGE);
        assert!(
            world
                .units()
                .iter()
                .all(|u| (0..max_x).contains(&u.pos.x) && (0..max_y).contains(&u.pos.y))
        );
    }

    #[test]
    fn empty_world_steps_without_changes() {
        let mut world = MemoryWorld::new();
        let mut sim = DemoSimulation::new(1, 8);
        let summary = sim.step(&mut world).unwrap();
        assert_eq!(summary.changed_cells, 0);
    }
}
