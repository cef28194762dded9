//! One agent: exclusive owner of its consensus, phase and control state.

use flock_consensus::{Aggregator, NeighborSetError};
use flock_control::{
    to_wheel_speeds, ControlStep, FormationController, PhaseScheduler, PhaseState, ScheduleConfig,
};
use flock_graph::{desired_squared_distances, AgentId};
use nalgebra::{DVector, Vector2};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{AgentConfig, AvoidanceSources};
use crate::interfaces::{PoseSensor, Transport, WheelActuator};

/// Errors surfaced by agent construction and the broadcast phase.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The configured id does not belong to the topology's group.
    #[error("agent id {id} outside group of {agents}")]
    UnknownAgent { id: AgentId, agents: usize },

    /// The formation sequence must contain at least one shape.
    #[error("formation sequence is empty")]
    EmptyShapes,

    /// A shape must place every agent in the group.
    #[error("shape {index} places {placed} agents, topology has {agents}")]
    ShapeSizeMismatch {
        index: usize,
        placed: usize,
        agents: usize,
    },

    /// The waypoint sequence must contain at least one target.
    #[error("waypoint sequence is empty")]
    EmptyWaypoints,

    /// The control timestep must be positive.
    #[error("non-positive control timestep {dt}")]
    NonPositiveTimestep { dt: f64 },

    /// The external layer reported an impossible neighbor set.
    #[error(transparent)]
    NeighborSet(#[from] NeighborSetError),
}

/// A single formation-flying agent.
///
/// All mutable state — position table, outgoing queue, phase, active
/// target distances — is owned here exclusively. Other agents' positions
/// enter only through [`Transport`] payloads.
#[derive(Debug)]
pub struct Agent {
    id: AgentId,
    config: AgentConfig,
    controller: FormationController,
    aggregator: Aggregator,
    scheduler: PhaseScheduler,
    desired_sq: DVector<f64>,
    position: Vector2<f64>,
    heading: f64,
}

impl Agent {
    /// Validate the configuration and build the agent's control stack.
    pub fn new(id: AgentId, config: AgentConfig) -> Result<Self, AgentError> {
        let agents = config.topology.agents();
        if id >= agents {
            return Err(AgentError::UnknownAgent { id, agents });
        }
        if config.shapes.is_empty() {
            return Err(AgentError::EmptyShapes);
        }
        for (index, shape) in config.shapes.iter().enumerate() {
            if shape.len() != agents {
                return Err(AgentError::ShapeSizeMismatch {
                    index,
                    placed: shape.len(),
                    agents,
                });
            }
        }
        if config.waypoints.is_empty() {
            return Err(AgentError::EmptyWaypoints);
        }
        if config.dt <= 0.0 {
            return Err(AgentError::NonPositiveTimestep { dt: config.dt });
        }

        let controller = FormationController::new(config.topology.clone(), config.control);
        let desired_sq = desired_squared_distances(&config.shapes[0], controller.incidence());
        let scheduler = PhaseScheduler::new(
            ScheduleConfig {
                formations: config.shapes.len(),
                waypoints: config.waypoints.len(),
                dwell_ticks: config.dwell_ticks,
            },
            config.control.completion_epsilon,
        );

        Ok(Self {
            id,
            controller,
            aggregator: Aggregator::new(agents, id),
            scheduler,
            desired_sq,
            position: Vector2::zeros(),
            heading: 0.0,
            config,
        })
    }

    /// This agent's id.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's current phase.
    pub fn phase(&self) -> PhaseState {
        self.scheduler.state()
    }

    /// Latest measured planar position.
    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    /// The agent's current position-estimate table.
    pub fn position_table(&self) -> &flock_consensus::PositionTable {
        self.aggregator.table()
    }

    /// Tick phase one: measure the pose and broadcast it.
    ///
    /// Queues one position message per current proximity neighbor and
    /// pushes the queue into the transport. Must run for every agent
    /// before any agent computes.
    pub fn sense_and_broadcast(
        &mut self,
        sensor: &impl PoseSensor,
        transport: &mut impl Transport,
    ) -> Result<(), AgentError> {
        let (position, heading) = sensor.pose(self.id);
        self.position = position.xy();
        self.heading = heading;

        let neighbors = transport.neighbors(self.id);
        self.aggregator.broadcast(self.position, &neighbors)?;
        for (target, message) in self.aggregator.drain_outbox() {
            transport.send(self.id, target, message);
        }
        debug!(agent = self.id, neighbors = neighbors.len(), "broadcast");
        Ok(())
    }

    /// Tick phase two: consume the inbox, run the control law, drive.
    ///
    /// Missing broadcasts are not a fault; stale or zero table rows simply
    /// degrade the command until data arrives.
    pub fn compute_and_actuate(
        &mut self,
        transport: &mut impl Transport,
        actuator: &mut impl WheelActuator,
    ) {
        let incoming = transport.receive(self.id);
        self.aggregator.refresh(self.position, &incoming);

        let step = self.evaluate();
        if self.scheduler.tick(step.distance_error_sum, step.waypoint_reached) {
            let formation = self.scheduler.state().formation;
            self.desired_sq = desired_squared_distances(
                &self.config.shapes[formation],
                self.controller.incidence(),
            );
            info!(agent = self.id, formation, "formation change");
        }

        let velocity = self.config.dt * step.acceleration;
        let command = to_wheel_speeds(velocity, self.heading);
        actuator.set_wheel_velocities(self.id, command.left, command.right);
    }

    fn evaluate(&self) -> ControlStep {
        let phase = self.scheduler.state();
        let waypoint = self.config.waypoints[phase.waypoint];

        let agent_sources;
        let obstacles = match &self.config.avoidance {
            AvoidanceSources::Disabled => None,
            AvoidanceSources::Static(points) => Some(points.as_slice()),
            AvoidanceSources::OtherAgents => {
                // The own row contributes a zero displacement, so the full
                // table is used as the source set.
                let table = self.aggregator.table();
                agent_sources = (0..table.agents())
                    .map(|a| table.position(a))
                    .collect::<Vec<_>>();
                Some(agent_sources.as_slice())
            }
        };

        self.controller.step(
            self.id,
            self.aggregator.table(),
            &self.desired_sq,
            waypoint,
            obstacles,
        )
    }
}
