//! Construction-time agent configuration.

use flock_control::ControlConfig;
use flock_graph::{FormationShape, Topology};
use nalgebra::Vector2;

/// Where the repulsion term takes its point sources from, if anywhere.
///
/// The reference implementation computes the term against the other
/// agents' estimated positions but also carries a static obstacle field;
/// which (if either) feeds the law is a configuration choice here rather
/// than a hard-coded one.
#[derive(Debug, Clone, PartialEq)]
pub enum AvoidanceSources {
    /// No repulsion term.
    Disabled,
    /// Repel from a fixed set of obstacle points.
    Static(Vec<Vector2<f64>>),
    /// Repel from the other agents' current position estimates.
    OtherAgents,
}

/// Everything an agent needs at construction. No runtime surface exists
/// beyond this.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Fixed control-law topology.
    pub topology: Topology,
    /// Formation-shape sequence, advanced by the phase scheduler.
    pub shapes: Vec<FormationShape>,
    /// Waypoint sequence.
    pub waypoints: Vec<Vector2<f64>>,
    /// Gains and thresholds of the control law.
    pub control: ControlConfig,
    /// Qualifying ticks required before a phase transition commits.
    pub dwell_ticks: u32,
    /// Repulsion sources.
    pub avoidance: AvoidanceSources,
    /// Control timestep Δt used to integrate acceleration into velocity.
    pub dt: f64,
}

impl AgentConfig {
    /// The reference mission: 6 agents, 9 edges, square-to-line formation
    /// change, four waypoints, obstacle term disabled.
    pub fn reference(dt: f64) -> Self {
        Self {
            topology: Topology::reference(),
            shapes: vec![FormationShape::square(1.0), FormationShape::line(0.5)],
            waypoints: vec![
                Vector2::new(1.5, 0.0),
                Vector2::new(2.5, 3.0),
                Vector2::new(4.0, 3.0),
                Vector2::new(2.5, 4.0),
            ],
            control: ControlConfig::reference(dt),
            dwell_ticks: (1.0 / dt).round() as u32,
            avoidance: AvoidanceSources::Disabled,
            dt,
        }
    }

    /// The reference static obstacle field (a corridor of 14 points).
    pub fn reference_obstacles() -> Vec<Vector2<f64>> {
        [
            [0.0, 0.0],
            [0.0, 1.0],
            [0.0, 2.0],
            [0.0, -1.0],
            [0.0, -2.0],
            [1.0, 2.0],
            [2.0, 2.0],
            [1.0, -2.0],
            [2.0, -2.0],
            [3.0, 0.0],
            [3.0, -1.0],
            [3.0, 1.0],
            [3.0, 2.0],
            [3.0, -2.0],
        ]
        .iter()
        .map(|&[x, y]| Vector2::new(x, y))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_mission_is_consistent() {
        let config = AgentConfig::reference(0.1);
        assert_eq!(config.shapes.len(), 2);
        assert_eq!(config.waypoints.len(), 4);
        assert_eq!(config.dwell_ticks, 10);
        for shape in &config.shapes {
            assert_eq!(shape.len(), config.topology.agents());
        }
    }

    #[test]
    fn reference_obstacles_count() {
        assert_eq!(AgentConfig::reference_obstacles().len(), 14);
    }
}
