//! Simulation engine — the core of the motion simulation.
//!
//! `SimulationEngine` owns the hecs ECS world and the clock, processes
//! fleet commands, runs all systems, and produces `FleetSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use flotilla_core::commands::FleetCommand;
use flotilla_core::components::{Attitude, Helm, KinematicProfile, ShipId};
use flotilla_core::events::HelmEvent;
use flotilla_core::state::FleetSnapshot;
use flotilla_core::types::{SimTime, Velocity};

use crate::clock::SimClock;
use crate::navigator::Navigator;
use crate::scenario::{Scenario, ScenarioError, ScheduledOrder};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time-scale multiplier (1.0 = normal).
    pub time_scale: f64,
    /// Fleet and timed orders to run.
    pub scenario: Scenario,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            scenario: crate::scenario::patrol_exercise(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    clock: SimClock,
    command_queue: VecDeque<FleetCommand>,
    helm_events: Vec<HelmEvent>,
    schedule: VecDeque<ScheduledOrder>,
    ship_count: u32,
}

impl SimulationEngine {
    /// Create a new simulation engine. The scenario is validated first;
    /// an invalid one is refused before any world state is built.
    pub fn new(config: SimConfig) -> Result<Self, ScenarioError> {
        config.scenario.validate()?;

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ship_count = world_setup::setup_fleet(&mut world, &mut rng, &config.scenario);

        let mut orders = config.scenario.orders;
        orders.sort_by_key(|o| o.at_tick);

        Ok(Self {
            world,
            time: SimTime::default(),
            clock: SimClock::new(config.time_scale),
            command_queue: VecDeque::new(),
            helm_events: Vec::new(),
            schedule: orders.into(),
            ship_count,
        })
    }

    /// Queue a fleet command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: FleetCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FleetCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot.
    ///
    /// Clock transitions (and their velocity rescales) land here at the
    /// tick boundary, before this tick's thrust computation — the regulator
    /// never measures a velocity that was rescaled mid-step.
    pub fn tick(&mut self) -> FleetSnapshot {
        self.dispatch_scheduled_orders();
        self.process_commands();

        if !self.clock.is_paused() {
            let multiplier = self.clock.multiplier();
            systems::helm::run(&mut self.world, multiplier, 1, &mut self.helm_events);
            systems::propulsion::run(&mut self.world, multiplier, &mut self.helm_events);
            systems::movement::run(&mut self.world);
            self.time.advance(multiplier);
        }

        let events = std::mem::take(&mut self.helm_events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.clock, events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the simulation clock (multiplier and pause flag).
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Number of hulls in the fleet.
    pub fn ship_count(&self) -> u32 {
        self.ship_count
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn an extra hull with an explicit profile (for tests needing
    /// controlled kinematics).
    #[cfg(test)]
    pub fn spawn_test_ship(&mut self, profile: KinematicProfile) -> u32 {
        use flotilla_core::components::Hull;
        use flotilla_core::enums::ShipClass;
        use flotilla_core::types::{Heading, Position};

        let id = self.ship_count;
        let facing = Heading::NORTH;
        self.world.spawn((
            Hull,
            ShipId(id),
            ShipClass::Frigate,
            Position::default(),
            Velocity::ZERO,
            Attitude { facing },
            profile,
            Helm::new(facing),
        ));
        self.ship_count += 1;
        id
    }

    /// Get a mutable reference to the ECS world (for tests that force
    /// hull state).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Move scheduled orders whose tick has arrived into the command
    /// queue.
    fn dispatch_scheduled_orders(&mut self) {
        while self
            .schedule
            .front()
            .is_some_and(|order| order.at_tick <= self.time.tick)
        {
            if let Some(order) = self.schedule.pop_front() {
                self.command_queue.push_back(order.command);
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single fleet command.
    fn handle_command(&mut self, command: FleetCommand) {
        match command {
            FleetCommand::SetCourse { ship, heading } => {
                self.with_navigator(ship, |nav| {
                    nav.change_heading(heading);
                    None
                });
            }
            FleetCommand::SetSpeed { ship, speed_kn } => {
                self.with_navigator(ship, |nav| nav.change_speed(speed_kn));
            }
            FleetCommand::AllStop { ship } => {
                self.with_navigator(ship, |nav| nav.all_stop());
            }
            FleetCommand::Pause => {
                if let Some(event) = self.clock.set_paused(true) {
                    systems::clock_adaptation::run(&mut self.world, event);
                }
            }
            FleetCommand::Resume => {
                if let Some(event) = self.clock.set_paused(false) {
                    systems::clock_adaptation::run(&mut self.world, event);
                }
            }
            FleetCommand::SetTimeScale { scale } => {
                if let Some(event) = self.clock.set_multiplier(scale) {
                    systems::clock_adaptation::run(&mut self.world, event);
                }
            }
        }
    }

    /// Run a navigator operation against one ship, pushing any resulting
    /// helm event. Orders for unknown ships are warned and dropped.
    fn with_navigator<F>(&mut self, ship: u32, op: F)
    where
        F: FnOnce(&mut Navigator<'_>) -> Option<HelmEvent>,
    {
        let mut op = Some(op);
        for (_entity, (id, profile, helm, attitude, velocity)) in self.world.query_mut::<(
            &ShipId,
            &mut KinematicProfile,
            &mut Helm,
            &mut Attitude,
            &mut Velocity,
        )>() {
            if id.0 != ship {
                continue;
            }
            let mut nav = Navigator {
                ship: *id,
                profile,
                helm,
                attitude,
                velocity,
            };
            if let Some(op) = op.take() {
                if let Some(event) = op(&mut nav) {
                    self.helm_events.push(event);
                }
            }
            break;
        }
        if op.is_some() {
            warn!(ship, "order for unknown ship ignored");
        }
    }
}
