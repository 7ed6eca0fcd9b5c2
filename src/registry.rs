//! Population Registry
//!
//! Per-role agent indices, built once at world construction. Agents are
//! never born or destroyed mid-run, so the index never needs maintenance and
//! "all agents of role X" is a constant-time lookup instead of a population
//! scan.

use std::collections::HashMap;

use crate::agents::{Agent, Role};

#[derive(Debug, Clone, Default)]
pub struct PopulationRegistry {
    by_role: HashMap<Role, Vec<usize>>,
}

impl PopulationRegistry {
    /// Index a population by role. Indices refer to positions in the
    /// world's agent vector.
    pub fn new(agents: &[Agent]) -> Self {
        let mut by_role: HashMap<Role, Vec<usize>> = HashMap::new();
        for (index, agent) in agents.iter().enumerate() {
            by_role.entry(agent.role).or_default().push(index);
        }
        Self { by_role }
    }

    /// All agent indices of the given role, in creation order.
    pub fn indices(&self, role: Role) -> &[usize] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of agents of the given role.
    pub fn count(&self, role: Role) -> usize {
        self.indices(role).len()
    }
}
