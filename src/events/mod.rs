//! Event System
//!
//! Interaction, consultation, and travel records, plus the step-scoped
//! buffer the role pipelines write into. The buffer is drained into the
//! external sinks at step boundaries; the core never touches files while
//! agents are active.

pub mod logger;

use serde::{Deserialize, Serialize};

pub use logger::{EventSink, JsonlWriter};

/// One belief-exchange interaction between two agents of the same role.
/// Emitted by scientists, citizens, and policymakers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub self_id: u64,
    pub other_id: u64,
    /// Signed difference, own belief minus the partner's
    pub belief_difference: f64,
    /// Whether the difference was below the role's credibility threshold
    pub updated: bool,
    pub step: u64,
}

/// A journalist consulting a scientist or propagandist while writing a
/// story. Carries no belief delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultRecord {
    pub self_id: u64,
    pub other_id: u64,
    pub step: u64,
}

/// A grid relocation by a role that moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRecord {
    pub agent_id: u64,
    pub x: u32,
    pub y: u32,
    pub step: u64,
}

/// Buffered event channel, filled during a step and drained afterwards.
/// Records are routed per role so each sink file stays homogeneous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBuffer {
    pub scientist_interactions: Vec<InteractionRecord>,
    pub citizen_interactions: Vec<InteractionRecord>,
    pub policymaker_interactions: Vec<InteractionRecord>,
    pub journalist_consults: Vec<ConsultRecord>,
    pub citizen_travel: Vec<TravelRecord>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of buffered records across all channels.
    pub fn len(&self) -> usize {
        self.scientist_interactions.len()
            + self.citizen_interactions.len()
            + self.policymaker_interactions.len()
            + self.journalist_consults.len()
            + self.citizen_travel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.scientist_interactions.clear();
        self.citizen_interactions.clear();
        self.policymaker_interactions.clear();
        self.journalist_consults.clear();
        self.citizen_travel.clear();
    }
}
