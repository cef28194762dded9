//! Formation shapes and per-edge target squared distances.
//!
//! A shape fixes one planar point per agent, defining the target geometry
//! up to rigid motion. The controller never tracks the shape's absolute
//! coordinates; only the squared edge lengths derived here matter.

use nalgebra::{DMatrix, DVector, Vector2};

use crate::topology::AgentId;

/// An ordered sequence of N planar points, one per agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormationShape {
    points: Vec<Vector2<f64>>,
}

impl FormationShape {
    /// Build a shape from explicit points.
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        Self { points }
    }

    /// The 6-agent two-column template scaled by `scale`.
    ///
    /// With `scale = 1` this is the reference "square": columns at x = 0,
    /// 0.5 and 1, rows at y = 0 and 1.
    pub fn square(scale: f64) -> Self {
        Self::template(scale)
    }

    /// The reference "line": the same template compressed by `spacing`.
    ///
    /// The original system drives the square into this shape in its single
    /// scripted formation change (spacing 0.5).
    pub fn line(spacing: f64) -> Self {
        Self::template(spacing)
    }

    fn template(scale: f64) -> Self {
        let unit = [
            [0.0, 0.0],
            [0.0, 1.0],
            [0.5, 0.0],
            [0.5, 1.0],
            [1.0, 0.0],
            [1.0, 1.0],
        ];
        Self {
            points: unit
                .iter()
                .map(|[x, y]| Vector2::new(x * scale, y * scale))
                .collect(),
        }
    }

    /// Number of agents the shape places.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the shape places no agents.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Target point for one agent.
    pub fn point(&self, agent: AgentId) -> Vector2<f64> {
        self.points[agent]
    }

    /// The shape as an N×2 coordinate matrix.
    pub fn as_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.points.len(), 2, |row, col| self.points[row][col])
    }
}

/// Per-edge target squared distances for a shape.
///
/// Computes `Z = incidenceᵀ · shape` (E×2 edge displacements) and returns
/// the row-wise sum of squared components as a length-E vector.
pub fn desired_squared_distances(shape: &FormationShape, incidence: &DMatrix<f64>) -> DVector<f64> {
    let displacements = incidence.transpose() * shape.as_matrix();
    DVector::from_iterator(
        displacements.nrows(),
        displacements
            .row_iter()
            .map(|row| row[0] * row[0] + row[1] * row[1]),
    )
}
