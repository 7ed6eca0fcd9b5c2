//! Scheduler
//!
//! Advances the global step counter and draws a fresh uniform activation
//! permutation each step, so every agent is activated exactly once per step
//! in randomized order. All ordering derives from the world's seeded RNG.

use rand::seq::SliceRandom;

use crate::SimRng;

#[derive(Debug, Clone)]
pub struct Scheduler {
    population: usize,
    steps: u64,
}

impl Scheduler {
    pub fn new(population: usize) -> Self {
        Self {
            population,
            steps: 0,
        }
    }

    /// Number of completed or in-progress steps. Zero before the first step.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Begin a new step: increment the counter and return it.
    pub fn begin_step(&mut self) -> u64 {
        self.steps += 1;
        self.steps
    }

    /// Draw a uniform random permutation of all agent indices. Each index
    /// appears exactly once.
    pub fn activation_order(&self, rng: &mut SimRng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.population).collect();
        order.shuffle(rng);
        order
    }
}
