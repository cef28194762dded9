//! Traits for the external simulation/actuation layer.
//!
//! The core consumes these; it never implements them outside tests. The
//! proximity neighbor set reported by [`Transport::neighbors`] is a
//! different adjacency than the fixed control-law topology and may change
//! tick to tick.

use flock_consensus::Message;
use flock_graph::AgentId;
use nalgebra::Vector3;

/// Pose source, read once per agent per tick.
pub trait PoseSensor {
    /// Measured 3-D position and yaw heading of an agent.
    fn pose(&self, agent: AgentId) -> (Vector3<f64>, f64);
}

/// Wheel-velocity sink; fire-and-forget.
pub trait WheelActuator {
    fn set_wheel_velocities(&mut self, agent: AgentId, left: f64, right: f64);
}

/// Message transport between agents.
///
/// Delivery is proximity-gated by the external layer; the core only sees
/// whatever arrives.
pub trait Transport {
    /// Deliver a message from one agent to another.
    fn send(&mut self, from: AgentId, to: AgentId, message: Message);

    /// Take every message delivered to an agent since its last receive.
    fn receive(&mut self, agent: AgentId) -> Vec<Message>;

    /// Agents currently within communication range of `agent`.
    fn neighbors(&self, agent: AgentId) -> Vec<AgentId>;
}
