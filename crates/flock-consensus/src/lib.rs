//! Flock Position Consensus
//!
//! Each agent keeps its own estimate of where every member of the group is.
//! The estimate converges through message exchange, not shared memory:
//!
//! 1. Every tick, an agent broadcasts its freshly measured position to its
//!    current proximity neighbors.
//! 2. Incoming messages overwrite the corresponding table rows.
//! 3. Rows for agents that stayed silent keep their last value.
//!
//! # Stale Reads Are Steady State
//!
//! A missing message is not a fault. Formation control tolerates lagged
//! neighbor data, so the defined recovery for a silent agent is to keep
//! acting on its last known position (zero until first receipt). Nothing
//! here blocks, retries or errors on absence.
//!
//! # Self-Row Invariant
//!
//! The owning agent's row always holds its latest direct measurement and
//! is never overwritten from a message payload.

mod exchange;
mod table;

pub use exchange::{Aggregator, Message, NeighborSetError};
pub use table::PositionTable;
