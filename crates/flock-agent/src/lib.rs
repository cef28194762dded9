//! Flock Agent
//!
//! The per-agent tick loop: each of N identical agents reads its measured
//! pose, broadcasts it to its current proximity neighbors, consumes the
//! tick's incoming broadcasts, evaluates the formation control law,
//! integrates the desired acceleration into a velocity and commands its
//! wheels. The surrounding simulation supplies poses, actuation and the
//! message transport through the traits in [`interfaces`].
//!
//! # Tick-Phase Ordering
//!
//! Reproducibility hinges on one rule: every broadcast of a tick must be
//! delivered before any agent computes. [`TickDriver`] enforces it
//! sequentially — all agents run [`Agent::sense_and_broadcast`], the
//! queued messages are flushed into the transport, and only then does each
//! agent run [`Agent::compute_and_actuate`]. Without the split, some
//! agents would read neighbor data one tick stale and others zero-tick
//! stale.
//!
//! Each agent exclusively owns its position table, phase state and message
//! queues; neighbor positions cross agent boundaries only as message
//! payloads.

mod agent;
mod config;
mod driver;
pub mod interfaces;

pub use agent::{Agent, AgentError};
pub use config::{AgentConfig, AvoidanceSources};
pub use driver::TickDriver;
