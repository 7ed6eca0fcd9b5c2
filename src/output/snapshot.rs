//! Snapshot Collection
//!
//! One row per agent per step, taken at the top of each step before any
//! agent activates. Rows are uniform across roles; fields a role never uses
//! serialize as null, so downstream analysis sees one rectangular table.

use serde::{Deserialize, Serialize};

use crate::agents::{Agent, Role};
use crate::belief::BetaParams;

/// One agent's belief state at the top of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub replicate: u32,
    pub step: u64,
    pub agent_id: u64,
    pub role: Role,
    pub prior: Option<BetaParams>,
    pub prior_mean: Option<f64>,
    pub posterior: Option<BetaParams>,
    pub posterior_mean: Option<f64>,
    pub story: Option<f64>,
    pub belief: f64,
    pub belief_after_talk: Option<f64>,
    pub belief_after_talk_media: Option<f64>,
    pub belief_after_talk_media_propaganda: Option<f64>,
    pub beliefs_encountered: Option<Vec<f64>>,
}

impl SnapshotRow {
    fn from_agent(replicate: u32, step: u64, agent: &Agent) -> Self {
        let state = &agent.state;
        Self {
            replicate,
            step,
            agent_id: agent.id.0,
            role: agent.role,
            prior: state.prior,
            prior_mean: state.prior.map(|p| p.mean()),
            posterior: state.posterior,
            posterior_mean: state.posterior.map(|p| p.mean()),
            story: state.story,
            belief: state.belief,
            belief_after_talk: state.belief_after_talk,
            belief_after_talk_media: state.belief_after_talk_media,
            belief_after_talk_media_propaganda: state.belief_after_talk_media_propaganda,
            beliefs_encountered: state.beliefs_encountered.clone(),
        }
    }
}

/// Buffers snapshot rows for one replicate. The driver drains the rows into
/// the snapshot sink when the replicate finishes.
#[derive(Debug, Clone)]
pub struct SnapshotCollector {
    replicate: u32,
    rows: Vec<SnapshotRow>,
}

impl SnapshotCollector {
    pub fn new(replicate: u32) -> Self {
        Self {
            replicate,
            rows: Vec::new(),
        }
    }

    /// Record every agent's state for the given step.
    pub fn collect(&mut self, step: u64, agents: &[Agent]) {
        self.rows.reserve(agents.len());
        for agent in agents {
            self.rows
                .push(SnapshotRow::from_agent(self.replicate, step, agent));
        }
    }

    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    pub fn take_rows(&mut self) -> Vec<SnapshotRow> {
        std::mem::take(&mut self.rows)
    }
}
