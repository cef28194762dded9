//! Incidence matrix and Laplacian construction.
//!
//! Both are pure functions of a validated [`Topology`]; dimensions are
//! fixed at construction, so the caller can build them once and reuse them
//! for the lifetime of the group.

use nalgebra::DMatrix;

use crate::topology::Topology;

/// Build the N×E incidence matrix.
///
/// Column e has exactly one -1 (at the edge's tail row) and one +1 (at its
/// head row); every other entry is zero.
pub fn incidence(topology: &Topology) -> DMatrix<f64> {
    let n = topology.agents();
    let mut matrix = DMatrix::zeros(n, topology.edge_count());
    for (e, edge) in topology.edges().iter().enumerate() {
        matrix[(edge.tail, e)] = -1.0;
        matrix[(edge.head, e)] = 1.0;
    }
    matrix
}

/// Build the N×N graph Laplacian, `L = D - A`.
///
/// Undirected mode puts the degree on the diagonal and -1 wherever an edge
/// joins a pair; the result is symmetric with zero row sums. Directed mode
/// counts in-degree on the diagonal and subtracts the directed adjacency
/// (head row, tail column).
pub fn laplacian(topology: &Topology, directed: bool) -> DMatrix<f64> {
    let n = topology.agents();
    let mut matrix = DMatrix::zeros(n, n);
    for edge in topology.edges() {
        if directed {
            matrix[(edge.head, edge.tail)] -= 1.0;
            matrix[(edge.head, edge.head)] += 1.0;
        } else {
            matrix[(edge.tail, edge.head)] -= 1.0;
            matrix[(edge.head, edge.tail)] -= 1.0;
            matrix[(edge.tail, edge.tail)] += 1.0;
            matrix[(edge.head, edge.head)] += 1.0;
        }
    }
    matrix
}
