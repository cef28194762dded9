//! Phase scheduling: formation/waypoint progression with dwell hysteresis.

use tracing::debug;

/// The scheduler's position in the configured sequence.
///
/// Indices only ever advance; there is no path back to an earlier
/// formation or waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseState {
    /// Index of the active formation shape.
    pub formation: usize,
    /// Index of the active waypoint.
    pub waypoint: usize,
    /// Consecutive qualifying ticks accumulated toward a transition.
    pub dwell: u32,
}

impl PhaseState {
    /// The initial phase: first formation, first waypoint, no dwell.
    pub const INITIAL: Self = Self {
        formation: 0,
        waypoint: 0,
        dwell: 0,
    };
}

/// Static sequence bounds and the anti-chatter threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Number of formation shapes in the sequence.
    pub formations: usize,
    /// Number of waypoints in the sequence.
    pub waypoints: usize,
    /// Qualifying ticks that must accumulate before a transition commits.
    pub dwell_ticks: u32,
}

/// Pure transition function.
///
/// The caller folds the completion condition (waypoint reached and |Σ G|
/// inside the epsilon) into `qualifying`.
/// Qualifying ticks accumulate dwell; any other tick resets it. Once dwell
/// passes the threshold and a later formation exists, the transition
/// commits: both indices advance (waypoint clamped to its sequence) and
/// dwell resets. At the last formation the state holds indefinitely.
pub fn next_phase(state: PhaseState, qualifying: bool, config: &ScheduleConfig) -> PhaseState {
    let terminal = state.formation + 1 >= config.formations;
    if terminal || !qualifying {
        return PhaseState {
            dwell: 0,
            ..state
        };
    }
    let dwell = state.dwell + 1;
    if dwell < config.dwell_ticks {
        return PhaseState { dwell, ..state };
    }
    PhaseState {
        formation: state.formation + 1,
        waypoint: (state.waypoint + 1).min(config.waypoints.saturating_sub(1)),
        dwell: 0,
    }
}

/// Stateful wrapper around [`next_phase`].
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    state: PhaseState,
    config: ScheduleConfig,
    completion_epsilon: f64,
}

impl PhaseScheduler {
    /// Scheduler starting at formation 0, waypoint 0.
    pub fn new(config: ScheduleConfig, completion_epsilon: f64) -> Self {
        Self {
            state: PhaseState::INITIAL,
            config,
            completion_epsilon,
        }
    }

    /// The current phase.
    pub fn state(&self) -> PhaseState {
        self.state
    }

    /// Whether no further transition is defined.
    pub fn is_terminal(&self) -> bool {
        self.state.formation + 1 >= self.config.formations
    }

    /// Advance one tick; returns `true` when a transition committed and
    /// the caller must recompute target distances for the new formation.
    pub fn tick(&mut self, distance_error_sum: f64, waypoint_reached: bool) -> bool {
        let qualifying =
            waypoint_reached && distance_error_sum.abs() < self.completion_epsilon;
        let next = next_phase(self.state, qualifying, &self.config);
        let advanced = next.formation != self.state.formation;
        if advanced {
            debug!(
                formation = next.formation,
                waypoint = next.waypoint,
                "phase transition committed"
            );
        }
        self.state = next;
        advanced
    }
}
