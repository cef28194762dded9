//! Formation topology: a validated, immutable edge list over N agents.
//!
//! The topology is the control-law adjacency. It is distinct from the
//! proximity-based message-routing neighbor set, which the transport layer
//! reports tick by tick and which may vary; the topology never changes
//! after construction.

use thiserror::Error;

/// Index of an agent within the group, in `0..n`.
pub type AgentId = usize;

/// An ordered pair of agents joined by a formation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Tail endpoint (incidence -1).
    pub tail: AgentId,
    /// Head endpoint (incidence +1).
    pub head: AgentId,
}

impl Edge {
    /// Create a new edge.
    pub const fn new(tail: AgentId, head: AgentId) -> Self {
        Self { tail, head }
    }
}

/// Errors raised while validating an edge list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// An edge endpoint does not name an agent in `0..n`.
    #[error("edge {index} references agent {agent}, outside 0..{agents}")]
    EndpointOutOfRange {
        index: usize,
        agent: AgentId,
        agents: usize,
    },

    /// An edge joins an agent to itself.
    #[error("edge {index} is a self-loop on agent {agent}")]
    SelfLoop { index: usize, agent: AgentId },

    /// The group must contain at least one agent.
    #[error("topology requires at least one agent")]
    Empty,
}

/// A fixed formation graph: N agents and a validated edge list.
///
/// Construction is the only fallible step. Once a `Topology` exists, the
/// incidence matrix, Laplacian and every downstream control computation
/// are total functions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    agents: usize,
    edges: Vec<Edge>,
}

impl Topology {
    /// Validate an edge list over `agents` vertices.
    pub fn new(agents: usize, edges: Vec<Edge>) -> Result<Self, TopologyError> {
        if agents == 0 {
            return Err(TopologyError::Empty);
        }
        for (index, edge) in edges.iter().enumerate() {
            for agent in [edge.tail, edge.head] {
                if agent >= agents {
                    return Err(TopologyError::EndpointOutOfRange {
                        index,
                        agent,
                        agents,
                    });
                }
            }
            if edge.tail == edge.head {
                return Err(TopologyError::SelfLoop {
                    index,
                    agent: edge.tail,
                });
            }
        }
        Ok(Self { agents, edges })
    }

    /// The complete graph on `agents` vertices, every pair joined once.
    pub fn complete(agents: usize) -> Result<Self, TopologyError> {
        let mut edges = Vec::new();
        for i in 0..agents {
            for j in (i + 1)..agents {
                edges.push(Edge::new(i, j));
            }
        }
        Self::new(agents, edges)
    }

    /// The 6-agent, 9-edge reference topology.
    pub fn reference() -> Self {
        let pairs = [
            (0, 1),
            (0, 2),
            (1, 2),
            (1, 3),
            (2, 3),
            (3, 4),
            (2, 4),
            (4, 5),
            (3, 5),
        ];
        let edges = pairs.iter().map(|&(t, h)| Edge::new(t, h)).collect();
        Self::new(6, edges).expect("reference topology is well formed")
    }

    /// Number of agents N.
    pub fn agents(&self) -> usize {
        self.agents
    }

    /// Number of edges E.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The validated edge list.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Degree of an agent in the undirected graph.
    pub fn degree(&self, agent: AgentId) -> usize {
        self.edges
            .iter()
            .filter(|e| e.tail == agent || e.head == agent)
            .count()
    }
}
