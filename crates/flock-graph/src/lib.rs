//! Flock Formation Graph
//!
//! Graph algebra underlying distance-rigid formation control.
//!
//! # Mathematical Foundation
//!
//! A formation is described by a fixed undirected graph over N agents with
//! E edges. Two matrices derived from that graph drive the control law:
//!
//! - the **incidence matrix** (N×E): column e carries -1 at the edge's tail
//!   row and +1 at its head row, expressing edge-wise quantities as linear
//!   functions of vertex quantities;
//! - the **Laplacian** (N×N): degree on the diagonal, minus adjacency off
//!   it; symmetric with zero row sums in undirected mode.
//!
//! # Target Distances
//!
//! A [`FormationShape`] assigns each agent a planar point. Multiplying the
//! transposed incidence matrix by the shape gives the edge displacement
//! vectors; their squared norms are the per-edge target squared distances
//! the controller tries to restore.
//!
//! The graph is fixed at construction and validated once; every operation
//! after [`Topology::new`] succeeds is total.

mod matrices;
mod shape;
mod topology;

pub use matrices::{incidence, laplacian};
pub use shape::{desired_squared_distances, FormationShape};
pub use topology::{AgentId, Edge, Topology, TopologyError};

/// Number of agents in the reference configuration.
pub const REFERENCE_AGENTS: usize = 6;

/// Number of edges in the reference topology.
pub const REFERENCE_EDGES: usize = 9;
