//! Sequential tick driver enforcing the broadcast-before-compute barrier.

use tracing::debug;

use crate::agent::{Agent, AgentError};
use crate::config::AgentConfig;
use crate::interfaces::{PoseSensor, Transport, WheelActuator};

/// Drives a group of agents one synchronous tick at a time.
///
/// Sequential execution stands in for the barrier a parallel scheduler
/// would need: every agent's broadcast is flushed into the transport
/// before any agent consumes its inbox, so each tick all agents see
/// exactly the previous phase's data and runs are reproducible.
pub struct TickDriver {
    agents: Vec<Agent>,
    ticks: u64,
}

impl TickDriver {
    /// Driver over an explicit set of agents.
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents, ticks: 0 }
    }

    /// Build one agent per topology slot from a shared configuration.
    pub fn homogeneous(config: AgentConfig) -> Result<Self, AgentError> {
        let agents = (0..config.topology.agents())
            .map(|id| Agent::new(id, config.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(agents))
    }

    /// The driven agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Execute one synchronous tick.
    ///
    /// Phase one runs every agent's sense-and-broadcast; only after all
    /// sends are in the transport does phase two run every agent's
    /// compute-and-actuate.
    pub fn tick<W, T>(&mut self, world: &mut W, transport: &mut T) -> Result<(), AgentError>
    where
        W: PoseSensor + WheelActuator,
        T: Transport,
    {
        for agent in &mut self.agents {
            agent.sense_and_broadcast(&*world, transport)?;
        }
        for agent in &mut self.agents {
            agent.compute_and_actuate(transport, world);
        }
        self.ticks += 1;
        debug!(tick = self.ticks, agents = self.agents.len(), "tick complete");
        Ok(())
    }

    /// Execute `count` ticks.
    pub fn run<W, T>(&mut self, world: &mut W, transport: &mut T, count: u64) -> Result<(), AgentError>
    where
        W: PoseSensor + WheelActuator,
        T: Transport,
    {
        for _ in 0..count {
            self.tick(world, transport)?;
        }
        Ok(())
    }
}
