//! Belief State
//!
//! Beta distribution parameters for the Bayesian scientists, the shared
//! per-agent belief state, and the weighted mixing helpers used by the
//! citizen/policymaker pipelines.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Shape parameters of a Beta distribution. Both must stay strictly
/// positive at all times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    /// Create a parameter pair, rejecting non-positive shapes.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, SimError> {
        if alpha > 0.0 && beta > 0.0 {
            Ok(Self { alpha, beta })
        } else {
            Err(SimError::InvariantViolation(format!(
                "non-positive beta parameters: alpha={alpha}, beta={beta}"
            )))
        }
    }

    /// Closed-form mean of the distribution, alpha / (alpha + beta).
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Conjugate Beta-Bernoulli update: add successes to alpha and
    /// failures to beta. Counts are non-negative, so positivity holds.
    pub fn observe(&self, successes: u64, failures: u64) -> Self {
        Self {
            alpha: self.alpha + successes as f64,
            beta: self.beta + failures as f64,
        }
    }

    /// Pool this prior with a peer's posterior by summing shape
    /// parameters pairwise. A non-positive result is a fatal corruption.
    pub fn pooled_with(&self, peer: &BetaParams) -> Result<Self, SimError> {
        Self::new(self.alpha + peer.alpha, self.beta + peer.beta)
    }
}

/// Role-dependent belief state. Every agent carries the full struct so
/// snapshot rows stay uniform across roles; fields irrelevant to a role
/// hold `None` for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeliefState {
    /// Current working belief in [0, 1] (every role)
    pub belief: f64,
    /// Beta prior carried into the current step (scientists only)
    pub prior: Option<BetaParams>,
    /// Beta posterior after evidence and pooling (scientists only)
    pub posterior: Option<BetaParams>,
    /// Peer-pooled belief, tracked separately from the posterior
    /// (scientists only)
    pub discussed_belief: Option<BetaParams>,
    /// Belief value broadcast to consumers (journalists, propagandists)
    pub story: Option<f64>,
    /// Belief recorded after the interaction stage (citizens, policymakers)
    pub belief_after_talk: Option<f64>,
    /// Belief recorded after the media stage (citizens, policymakers)
    pub belief_after_talk_media: Option<f64>,
    /// Belief recorded after the propaganda stage (citizens, policymakers)
    pub belief_after_talk_media_propaganda: Option<f64>,
    /// Append-only log of belief values this agent was exposed to.
    /// `None` for propagandists, who only broadcast.
    pub beliefs_encountered: Option<Vec<f64>>,
}

impl BeliefState {
    /// Append an encountered belief value, if this role keeps the log.
    pub fn push_encountered(&mut self, value: f64) {
        if let Some(log) = &mut self.beliefs_encountered {
            log.push(value);
        }
    }

    /// Posterior parameters, required for scientist pipelines.
    pub fn posterior(&self) -> Result<BetaParams, SimError> {
        self.posterior
            .ok_or_else(|| SimError::InvariantViolation("scientist has no posterior".into()))
    }

    /// Peer-pooled belief parameters, required for scientist pipelines.
    pub fn discussed(&self) -> Result<BetaParams, SimError> {
        self.discussed_belief
            .ok_or_else(|| SimError::InvariantViolation("scientist has no discussed belief".into()))
    }

    /// Prior parameters, required for scientist pipelines.
    pub fn prior(&self) -> Result<BetaParams, SimError> {
        self.prior
            .ok_or_else(|| SimError::InvariantViolation("scientist has no prior".into()))
    }

    /// Broadcast story value, required when consuming media or propaganda.
    pub fn story(&self) -> Result<f64, SimError> {
        self.story
            .ok_or_else(|| SimError::InvariantViolation("agent has no story to broadcast".into()))
    }
}

/// Weighted average of two values, normalized by the weight sum.
pub fn weighted_pair(a: f64, weight_a: f64, b: f64, weight_b: f64) -> f64 {
    (weight_a * a + weight_b * b) / (weight_a + weight_b)
}

/// Guard for belief-like scalars. Out-of-range results indicate corrupted
/// arithmetic and must halt the simulation rather than be clamped.
pub fn ensure_unit_interval(value: f64, context: &str) -> Result<f64, SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::InvariantViolation(format!(
            "{context} out of range: {value}"
        )))
    }
}
