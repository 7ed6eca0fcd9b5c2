//! World
//!
//! Assembles the grid, registry, scheduler, and population, and drives one
//! step at a time. Execution is strictly sequential: within a step, agents
//! activate one at a time in the scheduler's randomized order, each seeing
//! the already-updated beliefs of agents activated earlier in the same step.
//! All randomness flows through one seeded generator.

use rand::SeedableRng;

use crate::agents::{self, Agent, Role};
use crate::config::Config;
use crate::error::SimError;
use crate::events::EventBuffer;
use crate::grid::{Kernel, SpatialGrid};
use crate::output::snapshot::{SnapshotCollector, SnapshotRow};
use crate::registry::PopulationRegistry;
use crate::scheduler::Scheduler;
use crate::setup;
use crate::SimRng;

pub struct World {
    pub(crate) config: Config,
    pub(crate) agents: Vec<Agent>,
    pub(crate) grid: SpatialGrid,
    pub(crate) registry: PopulationRegistry,
    pub(crate) scheduler: Scheduler,
    pub(crate) rng: SimRng,
    pub(crate) events: EventBuffer,
    collector: SnapshotCollector,
}

impl World {
    /// Construct a world for one replicate. Validates the configuration,
    /// seeds the replicate's RNG, and spawns the full population.
    pub fn new(config: &Config, seed: u64, replicate: u32) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = SimRng::seed_from_u64(seed);
        let kernel = Kernel {
            moore: config.grid.moore,
            include_center: config.grid.include_center,
        };
        let mut grid = SpatialGrid::new(config.grid.width, config.grid.height, kernel);
        let agents = setup::spawn_population(config, &mut rng, &mut grid)?;
        let registry = PopulationRegistry::new(&agents);
        let scheduler = Scheduler::new(agents.len());

        Ok(Self {
            config: config.clone(),
            agents,
            grid,
            registry,
            scheduler,
            rng,
            events: EventBuffer::new(),
            collector: SnapshotCollector::new(replicate),
        })
    }

    /// Advance the model by one step: bump the step counter, snapshot every
    /// agent's state, then activate each agent exactly once in a fresh
    /// random order.
    pub fn step(&mut self) -> Result<(), SimError> {
        let step = self.scheduler.begin_step();
        self.collector.collect(step, &self.agents);

        let order = self.scheduler.activation_order(&mut self.rng);
        for idx in order {
            match self.agents[idx].role {
                Role::Scientist => agents::scientist::step(self, idx)?,
                Role::Journalist => agents::journalist::step(self, idx)?,
                Role::Propagandist => agents::propagandist::step(self, idx)?,
                Role::Citizen => agents::citizen::step(self, idx)?,
                Role::Policymaker => agents::policymaker::step(self, idx)?,
            }
        }
        Ok(())
    }

    /// Number of completed steps.
    pub fn current_step(&self) -> u64 {
        self.scheduler.steps()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Take the events buffered since the last drain. Called by the driver
    /// at step boundaries.
    pub fn drain_events(&mut self) -> EventBuffer {
        std::mem::take(&mut self.events)
    }

    /// Buffered snapshot rows for this replicate so far.
    pub fn snapshots(&self) -> &[SnapshotRow] {
        self.collector.rows()
    }

    /// Take all buffered snapshot rows. Called by the driver when the
    /// replicate finishes.
    pub fn take_snapshots(&mut self) -> Vec<SnapshotRow> {
        self.collector.take_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.population.scientists = 5;
        config.population.journalists = 3;
        config.population.propagandists = 2;
        config.population.citizens = 8;
        config.population.policymakers = 3;
        config.grid.width = 4;
        config.grid.height = 4;
        config
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = small_config();
        config.population.journalists = 0;
        assert!(World::new(&config, 42, 0).is_err());
    }

    #[test]
    fn test_snapshot_rows_once_per_agent_per_step() {
        let config = small_config();
        let mut world = World::new(&config, 42, 0).unwrap();
        world.step().unwrap();
        world.step().unwrap();

        let rows = world.snapshots();
        assert_eq!(rows.len(), 2 * config.total_agents() as usize);
        assert!(rows[..config.total_agents() as usize]
            .iter()
            .all(|r| r.step == 1));

        // Each agent appears exactly once per step
        let mut first_step_ids: Vec<u64> = rows
            .iter()
            .filter(|r| r.step == 1)
            .map(|r| r.agent_id)
            .collect();
        first_step_ids.sort_unstable();
        first_step_ids.dedup();
        assert_eq!(first_step_ids.len(), config.total_agents() as usize);
    }

    #[test]
    fn test_no_record_is_a_self_loop() {
        let mut world = World::new(&small_config(), 42, 0).unwrap();
        for _ in 0..10 {
            world.step().unwrap();
        }
        let events = world.drain_events();
        for record in events
            .scientist_interactions
            .iter()
            .chain(&events.citizen_interactions)
            .chain(&events.policymaker_interactions)
        {
            assert_ne!(record.self_id, record.other_id);
        }
        for record in &events.journalist_consults {
            assert_ne!(record.self_id, record.other_id);
        }
    }

    #[test]
    fn test_drain_empties_buffer() {
        let mut world = World::new(&small_config(), 42, 0).unwrap();
        world.step().unwrap();
        let events = world.drain_events();
        assert!(!events.is_empty());
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_step_counter_tracks_steps() {
        let mut world = World::new(&small_config(), 42, 0).unwrap();
        assert_eq!(world.current_step(), 0);
        world.step().unwrap();
        world.step().unwrap();
        assert_eq!(world.current_step(), 2);
    }
}
