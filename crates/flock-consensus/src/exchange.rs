//! Message exchange: inbox refresh and outgoing broadcast queue.

use std::collections::VecDeque;

use flock_graph::AgentId;
use nalgebra::Vector2;
use thiserror::Error;

use crate::table::PositionTable;

/// One position broadcast, one per directed neighbor link per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Message {
    /// The broadcasting agent.
    pub sender: AgentId,
    /// Its measured planar position at send time.
    pub position: Vector2<f64>,
}

/// A malformed proximity neighbor set reported by the external layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NeighborSetError {
    /// The set names the broadcasting agent itself.
    #[error("neighbor set for agent {agent} contains the agent itself")]
    SelfReference { agent: AgentId },

    /// The set names the same neighbor twice.
    #[error("neighbor set for agent {agent} lists {neighbor} more than once")]
    Duplicate { agent: AgentId, neighbor: AgentId },
}

/// Per-agent consensus state: the position table plus the outgoing queue.
///
/// The neighbor set is supplied externally each tick (proximity-based, may
/// change); the aggregator validates it but never stores it. The queue is
/// drained by the transport layer after the broadcast phase.
#[derive(Debug, Clone)]
pub struct Aggregator {
    table: PositionTable,
    outbox: VecDeque<(AgentId, Message)>,
}

impl Aggregator {
    /// Aggregator for `owner` in a group of `agents`.
    pub fn new(agents: usize, owner: AgentId) -> Self {
        Self {
            table: PositionTable::new(agents, owner),
            outbox: VecDeque::new(),
        }
    }

    /// The current position-estimate table.
    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Set the owner's row and apply every received broadcast.
    ///
    /// Agents that sent nothing this tick keep their previous rows.
    pub fn refresh(&mut self, self_position: Vector2<f64>, incoming: &[Message]) {
        self.table.set_self(self_position);
        for message in incoming {
            self.table.record(message.sender, message.position);
        }
    }

    /// Queue one identical position broadcast per neighbor.
    ///
    /// Rejects neighbor sets that reference the owner or repeat an entry;
    /// nothing is queued on rejection.
    pub fn broadcast(
        &mut self,
        self_position: Vector2<f64>,
        neighbors: &[AgentId],
    ) -> Result<(), NeighborSetError> {
        let owner = self.table.owner();
        for (i, &neighbor) in neighbors.iter().enumerate() {
            if neighbor == owner {
                return Err(NeighborSetError::SelfReference { agent: owner });
            }
            if neighbors[..i].contains(&neighbor) {
                return Err(NeighborSetError::Duplicate {
                    agent: owner,
                    neighbor,
                });
            }
        }
        let message = Message {
            sender: owner,
            position: self_position,
        };
        for &neighbor in neighbors {
            self.outbox.push_back((neighbor, message));
        }
        Ok(())
    }

    /// Drain queued `(target, message)` pairs for the transport to deliver.
    pub fn drain_outbox(&mut self) -> impl Iterator<Item = (AgentId, Message)> + '_ {
        self.outbox.drain(..)
    }
}
