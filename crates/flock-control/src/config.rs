//! Control-law configuration.

/// Gains of the nonlinear control law.
///
/// The reference system scales every gain by the control timestep, so the
/// constructors take `dt` explicitly. `damping` exists in the reference
/// parameter set but is zero there; it is carried for completeness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    /// Distance-rigidity gradient gain (K2).
    pub distance: f64,
    /// Waypoint-tracking gain (K3).
    pub waypoint: f64,
    /// Obstacle-repulsion gain (OK).
    pub obstacle: f64,
    /// Velocity damping gain (D).
    pub damping: f64,
    /// Variance of the repulsion Gaussian.
    pub variance: f64,
}

impl Gains {
    /// The reference gain set for a control timestep `dt`.
    pub fn reference(dt: f64) -> Self {
        Self {
            distance: 10.0 / dt,
            waypoint: 10.0 / dt,
            obstacle: 5.0 / dt,
            damping: 0.0 / dt,
            variance: 0.04,
        }
    }
}

/// Full controller configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Control-law gains.
    pub gains: Gains,
    /// Per-axis distance under which a waypoint counts as reached.
    pub reach_threshold: f64,
    /// Bound on |Σ G| under which the formation counts as settled.
    pub completion_epsilon: f64,
    /// Squared radius beyond which repulsion sources are ignored.
    pub obstacle_cutoff_sq: f64,
}

impl ControlConfig {
    /// The reference configuration for a control timestep `dt`.
    pub fn reference(dt: f64) -> Self {
        Self {
            gains: Gains::reference(dt),
            reach_threshold: 0.5,
            completion_epsilon: 0.01,
            obstacle_cutoff_sq: 0.5,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::reference(0.1)
    }
}
