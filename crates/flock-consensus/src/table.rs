//! The owned N×2 position-estimate table.

use flock_graph::AgentId;
use nalgebra::{DMatrix, Vector2};

/// One agent's view of where every agent in the group is.
///
/// The owner's row is always the latest direct measurement; other rows are
/// the most recently received broadcast, or zero until first receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTable {
    owner: AgentId,
    rows: Vec<Vector2<f64>>,
}

impl PositionTable {
    /// An all-zero table for a group of `agents`, owned by `owner`.
    pub fn new(agents: usize, owner: AgentId) -> Self {
        Self {
            owner,
            rows: vec![Vector2::zeros(); agents],
        }
    }

    /// The agent that owns this table.
    pub fn owner(&self) -> AgentId {
        self.owner
    }

    /// Number of agents tracked.
    pub fn agents(&self) -> usize {
        self.rows.len()
    }

    /// Overwrite the owner's row with a direct measurement.
    pub fn set_self(&mut self, position: Vector2<f64>) {
        let owner = self.owner;
        self.rows[owner] = position;
    }

    /// Record a broadcast position for another agent.
    ///
    /// The owner's row is measurement-only; a payload claiming to be from
    /// the owner is dropped rather than applied.
    pub fn record(&mut self, sender: AgentId, position: Vector2<f64>) {
        if sender != self.owner && sender < self.rows.len() {
            self.rows[sender] = position;
        }
    }

    /// Current estimate for one agent.
    pub fn position(&self, agent: AgentId) -> Vector2<f64> {
        self.rows[agent]
    }

    /// The table as an N×2 coordinate matrix for the control law.
    pub fn as_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows.len(), 2, |row, col| self.rows[row][col])
    }
}
