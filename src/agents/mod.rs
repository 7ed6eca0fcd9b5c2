//! Agents
//!
//! The closed set of five roles, role-partitioned agent identity, and the
//! agent record itself. Role pipelines live in the submodules.

pub mod citizen;
pub mod journalist;
pub mod policymaker;
pub mod propagandist;
pub mod scientist;

use serde::{Deserialize, Serialize};

use crate::belief::BeliefState;

/// The five roles in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Scientist,
    Journalist,
    Propagandist,
    Citizen,
    Policymaker,
}

impl Role {
    /// All roles, in the order populations are created.
    pub const ALL: [Role; 5] = [
        Role::Scientist,
        Role::Journalist,
        Role::Propagandist,
        Role::Citizen,
        Role::Policymaker,
    ];

    /// Base of this role's disjoint id range. Global id uniqueness follows
    /// from partitioning the id space per role.
    pub fn id_base(&self) -> u64 {
        match self {
            Role::Scientist => 10_000_000,
            Role::Journalist => 20_000_000,
            Role::Propagandist => 30_000_000,
            Role::Citizen => 40_000_000,
            Role::Policymaker => 50_000_000,
        }
    }
}

/// Globally unique, role-tagged agent identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AgentId(pub u64);

impl AgentId {
    pub fn new(role: Role, index: u32) -> Self {
        Self(role.id_base() + index as u64)
    }
}

/// One member of the population. Created at world construction, never
/// destroyed.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub role: Role,
    /// Grid cell the agent stands on
    pub pos: (u32, u32),
    pub state: BeliefState,
    /// Bernoulli trials per research batch, fixed at creation
    /// (scientists only)
    pub study_sample_size: Option<u32>,
}
