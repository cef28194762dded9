//! Flock Formation Control
//!
//! The per-agent control law that drives the group toward a target shape:
//!
//! - a **distance-rigidity gradient** pulls topology-edge lengths toward
//!   the active formation's target squared distances;
//! - a **waypoint term** pulls the agent toward the active target point
//!   until it is reached;
//! - an optional **repulsion term** pushes away from nearby point sources.
//!
//! A small scheduler advances through the configured formation/waypoint
//! sequence once the shape has settled, with a dwell timer to keep a
//! single noisy tick from committing a transition. A drive mapper turns
//! the integrated velocity into left/right wheel speeds.
//!
//! Everything here is pure computation over the caller's position table;
//! the law never blocks or errors on missing neighbor data, it simply
//! produces a degraded command until broadcasts arrive.

mod config;
mod controller;
mod drive;
mod obstacle;
mod phase;

pub use config::{ControlConfig, Gains};
pub use controller::{distance_jacobian, ControlStep, FormationController};
pub use drive::{to_wheel_speeds, WheelCommand, VELOCITY_NOISE_FLOOR};
pub use obstacle::repulsion;
pub use phase::{PhaseScheduler, PhaseState, ScheduleConfig};
