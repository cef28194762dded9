//! Full-group integration: in-memory switchboard, kinematic drive world.

use flock_agent::interfaces::{PoseSensor, Transport, WheelActuator};
use flock_agent::{AgentConfig, AvoidanceSources, TickDriver};
use flock_consensus::Message;
use flock_control::Gains;
use flock_graph::AgentId;
use nalgebra::{Vector2, Vector3};

const DT: f64 = 0.1;

/// Gains scaled down from the reference set so the crude kinematic test
/// world stays well behaved without the physics layer's damping.
fn mild_gains() -> Gains {
    Gains {
        distance: 1.0,
        waypoint: 1.0,
        obstacle: 0.5,
        damping: 0.0,
        variance: 0.04,
    }
}

/// Approximate differential-drive kinematics standing in for the physics
/// layer: forward speed is the wheel mean, turn rate the wheel difference.
struct DriveWorld {
    positions: Vec<Vector2<f64>>,
    headings: Vec<f64>,
    commands: Vec<(f64, f64)>,
}

impl DriveWorld {
    fn new(positions: Vec<Vector2<f64>>) -> Self {
        let count = positions.len();
        Self {
            positions,
            headings: vec![0.0; count],
            commands: vec![(0.0, 0.0); count],
        }
    }

    /// Integrate the last wheel commands forward by one step.
    fn integrate(&mut self) {
        for agent in 0..self.positions.len() {
            let (left, right) = self.commands[agent];
            let forward = 0.5 * (left + right);
            let turn = right - left;
            let heading = self.headings[agent];
            self.positions[agent] += DT * forward * Vector2::new(heading.cos(), heading.sin());
            self.headings[agent] += DT * turn;
        }
    }
}

impl PoseSensor for DriveWorld {
    fn pose(&self, agent: AgentId) -> (Vector3<f64>, f64) {
        let p = self.positions[agent];
        (Vector3::new(p.x, p.y, 0.0), self.headings[agent])
    }
}

impl WheelActuator for DriveWorld {
    fn set_wheel_velocities(&mut self, agent: AgentId, left: f64, right: f64) {
        self.commands[agent] = (left, right);
    }
}

/// In-memory transport with a proximity rule over a position snapshot.
struct Switchboard {
    inboxes: Vec<Vec<Message>>,
    snapshot: Vec<Vector2<f64>>,
    range: f64,
}

impl Switchboard {
    fn new(count: usize, range: f64) -> Self {
        Self {
            inboxes: vec![Vec::new(); count],
            snapshot: vec![Vector2::zeros(); count],
            range,
        }
    }

    /// Refresh the proximity snapshot from the world, as the external
    /// layer would between ticks.
    fn observe(&mut self, world: &DriveWorld) {
        self.snapshot.clone_from(&world.positions);
    }
}

impl Transport for Switchboard {
    fn send(&mut self, _from: AgentId, to: AgentId, message: Message) {
        self.inboxes[to].push(message);
    }

    fn receive(&mut self, agent: AgentId) -> Vec<Message> {
        std::mem::take(&mut self.inboxes[agent])
    }

    fn neighbors(&self, agent: AgentId) -> Vec<AgentId> {
        (0..self.snapshot.len())
            .filter(|&other| {
                other != agent && (self.snapshot[other] - self.snapshot[agent]).norm() <= self.range
            })
            .collect()
    }
}

fn spread_out_start(count: usize) -> Vec<Vector2<f64>> {
    (0..count)
        .map(|i| Vector2::new(i as f64 * 0.4, (i % 2) as f64 * 0.6))
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn run_mission(ticks: u64, range: f64, avoidance: AvoidanceSources) -> DriveWorld {
    init_tracing();
    let mut config = AgentConfig::reference(DT);
    config.control.gains = mild_gains();
    config.avoidance = avoidance;
    let count = config.topology.agents();

    let mut driver = TickDriver::homogeneous(config).expect("reference config is valid");
    let mut world = DriveWorld::new(spread_out_start(count));
    let mut switchboard = Switchboard::new(count, range);

    for _ in 0..ticks {
        switchboard.observe(&world);
        driver
            .tick(&mut world, &mut switchboard)
            .expect("proximity neighbor sets are well formed");
        world.integrate();
    }
    assert_eq!(driver.ticks(), ticks);
    world
}

#[test]
fn broadcasts_land_before_compute() {
    let config = AgentConfig::reference(DT);
    let count = config.topology.agents();
    let mut driver = TickDriver::homogeneous(config).expect("reference config is valid");
    let mut world = DriveWorld::new(spread_out_start(count));
    let mut switchboard = Switchboard::new(count, 100.0);

    switchboard.observe(&world);
    driver.tick(&mut world, &mut switchboard).unwrap();

    // Full connectivity: after one tick every agent's table already holds
    // every peer's tick-one measured position, not a stale zero.
    for agent in driver.agents() {
        let table = agent.position_table();
        for other in 0..count {
            assert_eq!(table.position(other), world.positions[other]);
        }
    }
}

#[test]
fn isolated_agents_still_produce_finite_commands() {
    // Zero communication range: every table stays at its stale zeros, the
    // law degrades but neither errors nor emits non-finite output.
    let world = run_mission(20, 0.0, AvoidanceSources::Disabled);
    for &(left, right) in &world.commands {
        assert!(left.is_finite());
        assert!(right.is_finite());
    }
}

#[test]
fn mission_is_deterministic() {
    let a = run_mission(60, 2.0, AvoidanceSources::Disabled);
    let b = run_mission(60, 2.0, AvoidanceSources::Disabled);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.headings, b.headings);
    assert_eq!(a.commands, b.commands);
}

#[test]
fn obstacle_mode_changes_the_trajectory() {
    let plain = run_mission(30, 2.0, AvoidanceSources::Disabled);
    let avoiding = run_mission(
        30,
        2.0,
        AvoidanceSources::Static(AgentConfig::reference_obstacles()),
    );
    let agent_avoiding = run_mission(30, 2.0, AvoidanceSources::OtherAgents);

    for world in [&avoiding, &agent_avoiding] {
        for &(left, right) in &world.commands {
            assert!(left.is_finite());
            assert!(right.is_finite());
        }
    }
    // The repulsion term is live, not inert: the static field sits right
    // on the start area, so trajectories diverge immediately.
    assert_ne!(plain.positions, avoiding.positions);
}

#[test]
fn phases_start_unadvanced_and_monotone() {
    let mut config = AgentConfig::reference(DT);
    config.control.gains = mild_gains();
    let count = config.topology.agents();
    let mut driver = TickDriver::homogeneous(config).expect("reference config is valid");
    let mut world = DriveWorld::new(spread_out_start(count));
    let mut switchboard = Switchboard::new(count, 2.0);

    let mut last = vec![(0usize, 0usize); count];
    for _ in 0..40 {
        switchboard.observe(&world);
        driver.tick(&mut world, &mut switchboard).unwrap();
        world.integrate();
        for (agent, last_phase) in driver.agents().iter().zip(last.iter_mut()) {
            let phase = agent.phase();
            assert!(phase.formation >= last_phase.0);
            assert!(phase.waypoint >= last_phase.1);
            *last_phase = (phase.formation, phase.waypoint);
        }
    }
}
