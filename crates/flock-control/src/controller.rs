//! The nonlinear distance-rigidity control law.

use flock_consensus::PositionTable;
use flock_graph::{incidence, AgentId, Topology};
use nalgebra::{DMatrix, DVector, Vector2};

use crate::config::ControlConfig;
use crate::obstacle::repulsion;

/// Output of one control evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStep {
    /// Desired planar acceleration for the evaluating agent.
    pub acceleration: Vector2<f64>,
    /// Σ G, the summed per-edge squared-distance error. The scheduler uses
    /// its magnitude as the formation-settled signal.
    pub distance_error_sum: f64,
    /// Whether the active waypoint is reached on both axes.
    pub waypoint_reached: bool,
}

/// The distance Jacobian R (E×2N).
///
/// Row e for edge (i, j) carries `2(xi−xj), 2(yi−yj)` in agent i's column
/// pair and the negated values in agent j's, linearizing squared edge
/// lengths with respect to all agent positions.
pub fn distance_jacobian(positions: &DMatrix<f64>, topology: &Topology) -> DMatrix<f64> {
    let mut jacobian = DMatrix::zeros(topology.edge_count(), 2 * positions.nrows());
    for (e, edge) in topology.edges().iter().enumerate() {
        let dx = positions[(edge.tail, 0)] - positions[(edge.head, 0)];
        let dy = positions[(edge.tail, 1)] - positions[(edge.head, 1)];
        jacobian[(e, 2 * edge.tail)] = 2.0 * dx;
        jacobian[(e, 2 * edge.tail + 1)] = 2.0 * dy;
        jacobian[(e, 2 * edge.head)] = -2.0 * dx;
        jacobian[(e, 2 * edge.head + 1)] = -2.0 * dy;
    }
    jacobian
}

/// Per-agent formation controller.
///
/// Owns the immutable graph data (topology plus its incidence matrix) and
/// the gain set; the mutable inputs — position table, active target
/// distances, active waypoint — are passed per evaluation.
#[derive(Debug, Clone)]
pub struct FormationController {
    topology: Topology,
    incidence: DMatrix<f64>,
    config: ControlConfig,
}

impl FormationController {
    /// Build a controller for a validated topology.
    pub fn new(topology: Topology, config: ControlConfig) -> Self {
        let incidence = incidence(&topology);
        Self {
            topology,
            incidence,
            config,
        }
    }

    /// The control-law topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The cached N×E incidence matrix.
    pub fn incidence(&self) -> &DMatrix<f64> {
        &self.incidence
    }

    /// Actual per-edge squared distances from the live position table.
    ///
    /// Same edge formula as the target distances, applied to estimates
    /// instead of a static shape.
    pub fn actual_squared_distances(&self, table: &PositionTable) -> DVector<f64> {
        let displacements = self.incidence.transpose() * table.as_matrix();
        DVector::from_iterator(
            displacements.nrows(),
            displacements
                .row_iter()
                .map(|row| row[0] * row[0] + row[1] * row[1]),
        )
    }

    /// Evaluate the control law for `agent`.
    ///
    /// `desired_sq` is the active formation's target squared-distance
    /// vector; `waypoint` the active target point; `obstacles` the
    /// repulsion sources, or `None` when the term is disabled. Rows of the
    /// table that never received a broadcast are zero and merely degrade
    /// the command; the evaluation itself is total.
    pub fn step(
        &self,
        agent: AgentId,
        table: &PositionTable,
        desired_sq: &DVector<f64>,
        waypoint: Vector2<f64>,
        obstacles: Option<&[Vector2<f64>]>,
    ) -> ControlStep {
        let gains = &self.config.gains;
        let positions = table.as_matrix();
        let self_position = table.position(agent);

        // G = desired − actual, one entry per edge.
        let error = desired_sq - self.actual_squared_distances(table);
        let jacobian = distance_jacobian(&positions, &self.topology);

        // K2 · (Rᵀ G), own row of the N×2 reshape.
        let gradient_flat = jacobian.transpose() * &error;
        let mut acceleration = gains.distance
            * Vector2::new(gradient_flat[2 * agent], gradient_flat[2 * agent + 1]);

        // Waypoint pull, dropped once both axes are inside the threshold.
        let difference = waypoint - self_position;
        let waypoint_reached = difference.x.abs() < self.config.reach_threshold
            && difference.y.abs() < self.config.reach_threshold;
        if !waypoint_reached {
            acceleration += gains.waypoint * difference;
        }

        if let Some(sources) = obstacles {
            let push = repulsion(
                self_position,
                sources,
                self.config.obstacle_cutoff_sq,
                gains.variance,
            );
            acceleration += (gains.obstacle / gains.variance) * push;
        }

        ControlStep {
            acceleration,
            distance_error_sum: error.sum(),
            waypoint_reached,
        }
    }
}
