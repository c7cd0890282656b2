//! Session engine: the core of the game.
//!
//! `SessionEngine` owns the hecs ECS world, processes queued commands,
//! runs all systems, and produces `SessionSnapshot`s. Completely
//! headless (no platform dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use broadside_core::commands::{PointingSample, SessionCommand};
use broadside_core::components::Ship;
use broadside_core::config::{ConfigError, SessionConfig};
use broadside_core::enums::{EndReason, SessionPhase, ShipClass, ShipPhase, SpawnMode};
use broadside_core::events::SessionEvent;
use broadside_core::state::SessionSnapshot;
use broadside_core::types::SessionTime;
use broadside_gaze::{GazeConfig, GazeTracker, TargetingEvent};
use broadside_stats::StatsTracker;

use crate::hearts::Hearts;
use crate::systems;
use crate::systems::scheduler::AdaptiveScheduler;
use crate::systems::timeline::SpawnTimeline;

/// The session engine. Owns the ECS world and all session state.
///
/// Everything a session needs (stats aggregator, scheduler, hearts,
/// gaze tracker) is constructed here and passed around explicitly.
pub struct SessionEngine {
    world: World,
    time: SessionTime,
    phase: SessionPhase,
    config: SessionConfig,
    gaze_config: GazeConfig,
    rng: ChaCha8Rng,
    next_ship_number: u32,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SessionEvent>,

    scheduler: AdaptiveScheduler,
    timeline: SpawnTimeline,
    gaze: GazeTracker,
    stats: StatsTracker,
    hearts: Hearts,

    /// Latest pointing sample; decays to `Unavailable` every tick.
    pointing: PointingSample,
    /// Trigger presses queued since the last tick.
    pending_triggers: u32,
}

impl SessionEngine {
    /// Create a new session engine. Configuration is validated here,
    /// before the first tick; a bad lane table or timer bound never
    /// reaches the simulation.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let timeline = match config.mode {
            SpawnMode::Scripted => {
                let timeline = SpawnTimeline::standard_session();
                if let Some(max_lane) = timeline.max_lane() {
                    if max_lane >= config.lanes.lane_count() {
                        return Err(ConfigError::TimelineLaneOutOfRange {
                            lane: max_lane,
                            lane_count: config.lanes.lane_count(),
                        });
                    }
                }
                timeline
            }
            SpawnMode::Adaptive => SpawnTimeline::empty(),
        };

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let scheduler = AdaptiveScheduler::new(&config, &mut rng);
        let gaze_config = GazeConfig::from_session(&config);
        let hearts = Hearts::new(config.heart_count);

        Ok(Self {
            world: World::new(),
            time: SessionTime::default(),
            phase: SessionPhase::default(),
            gaze_config,
            rng,
            next_ship_number: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            scheduler,
            timeline,
            gaze: GazeTracker::new(),
            stats: StatsTracker::new(),
            hearts,
            pointing: PointingSample::Unavailable,
            pending_triggers: 0,
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SessionSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            self.run_systems();
            self.time.advance();
            self.check_end_conditions();
        }

        // Per-tick inputs decay: the providers re-send them each tick.
        self.pointing = PointingSample::Unavailable;
        self.pending_triggers = 0;

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.config.mode,
            self.config.firing_mode,
            self.hearts.slots(),
            &self.stats,
            events,
            self.gaze.locked_ship(),
        )
    }

    /// Get the current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Get the current session time.
    pub fn time(&self) -> SessionTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the stats aggregator.
    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Spawn a ship directly, bypassing the spawn drivers (for tests
    /// that need a known ship in a known lane).
    #[cfg(test)]
    pub fn spawn_test_ship(&mut self, lane: usize, class: ShipClass) -> u32 {
        use broadside_core::components::SpawnInstruction;
        use broadside_core::enums::SizeClass;

        let instruction = SpawnInstruction {
            time_offset_secs: self.time.elapsed_secs,
            lane,
            class,
            size: SizeClass::Small,
            speed: self.scheduler.ship_speed(),
        };
        let ship_number = self.next_ship_number;
        crate::spawn::spawn_ship(
            &mut self.world,
            &instruction,
            &self.config.lanes,
            ship_number,
            self.time.elapsed_secs,
            &mut self.events,
        )
        .expect("test spawn uses a configured lane");
        self.next_ship_number += 1;
        ship_number
    }

    #[cfg(test)]
    pub fn hearts(&self) -> &Hearts {
        &self.hearts
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &AdaptiveScheduler {
        &self.scheduler
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartSession => {
                if matches!(self.phase, SessionPhase::Menu | SessionPhase::Ended) {
                    self.start_session();
                }
            }
            SessionCommand::EndSession => {
                if matches!(self.phase, SessionPhase::Active | SessionPhase::Paused) {
                    self.end_session(EndReason::Aborted);
                }
            }
            SessionCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                }
            }
            SessionCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                }
            }
            SessionCommand::PointAt { sample } => {
                self.pointing = sample;
            }
            SessionCommand::TriggerPressed => {
                self.pending_triggers += 1;
            }
            SessionCommand::ReportHit { ship_number } => {
                if self.phase == SessionPhase::Active {
                    self.resolve_hit(ship_number);
                }
            }
            SessionCommand::ReportSinkComplete { ship_number } => {
                if self.phase == SessionPhase::Active {
                    self.resolve_sink_complete(ship_number);
                }
            }
        }
    }

    /// Reset all per-session state and go Active.
    fn start_session(&mut self) {
        self.world = World::new();
        self.time = SessionTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.next_ship_number = 0;
        self.scheduler = AdaptiveScheduler::new(&self.config, &mut self.rng);
        self.timeline = match self.config.mode {
            SpawnMode::Scripted => SpawnTimeline::standard_session(),
            SpawnMode::Adaptive => SpawnTimeline::empty(),
        };
        self.gaze.reset();
        self.stats.reset_all(0.0);
        self.hearts = Hearts::new(self.config.heart_count);
        self.despawn_buffer.clear();
        self.events.clear();
        self.phase = SessionPhase::Active;
        log::info!(
            "session started: mode={:?} seed={}",
            self.config.mode,
            self.config.seed
        );
    }

    /// Stop issuing spawn/targeting ticks and snapshot the final
    /// metrics. Surviving ships are left in place; their teardown is
    /// the presentation layer's job.
    fn end_session(&mut self, reason: EndReason) {
        self.phase = SessionPhase::Ended;
        self.stats.mark_session_over();
        self.timeline.cancel();
        self.gaze.reset();
        self.events.push(SessionEvent::SessionEnded { reason });
        log::info!("session ended: {reason:?}");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let dt = self.time.dt();

        // 1. Spawn driver
        match self.config.mode {
            SpawnMode::Adaptive => systems::scheduler::run(
                &mut self.world,
                &mut self.rng,
                &mut self.scheduler,
                &self.config.lanes,
                now,
                dt,
                self.stats.total_lives_lost(),
                &mut self.next_ship_number,
                &mut self.events,
            ),
            SpawnMode::Scripted => systems::timeline::run(
                &mut self.world,
                &mut self.timeline,
                &self.config.lanes,
                now,
                &mut self.next_ship_number,
                &mut self.events,
            ),
        }

        // 2. Targeting (pointing sample + queued trigger presses)
        self.run_targeting(dt);

        // 3. Movement + escapes
        systems::movement::run(&mut self.world, &mut self.stats, &mut self.events);

        // 4. Heart slots follow the aggregator's loss counter
        self.hearts
            .sync(self.stats.total_lives_lost(), &mut self.events);

        // 5. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Feed the targeting machine this tick's pointing sample and any
    /// queued trigger presses, then reconcile the highlight indicator.
    fn run_targeting(&mut self, dt: f64) {
        let previously_locked = self.gaze.locked_ship();

        let sample = self.validated_sample();
        if let Some(event) = self
            .gaze
            .observe(sample, self.config.firing_mode, &self.gaze_config, dt)
        {
            self.emit_targeting_event(event);
        }

        for _ in 0..self.pending_triggers {
            if let Some(event) = self
                .gaze
                .trigger_pressed(self.config.firing_mode, &self.gaze_config)
            {
                self.emit_targeting_event(event);
            }
        }
        self.pending_triggers = 0;

        let locked = self.gaze.locked_ship();
        if previously_locked != locked {
            if let Some(old) = previously_locked {
                self.events.push(SessionEvent::ShipHighlighted {
                    ship_number: old,
                    active: false,
                });
            }
            if let Some(new) = locked {
                self.events.push(SessionEvent::ShipHighlighted {
                    ship_number: new,
                    active: true,
                });
            }
        }
    }

    /// Downgrade samples that point at ships which are no longer valid
    /// targets (sinking, removed, or gone) to `Clear`, so the machine
    /// never holds a lock on a dead target.
    fn validated_sample(&mut self) -> PointingSample {
        match self.pointing {
            PointingSample::Ship { ship_number, .. } => {
                let targetable = self
                    .world
                    .query_mut::<&Ship>()
                    .into_iter()
                    .any(|(_, ship)| {
                        ship.ship_number == ship_number && ship.phase == ShipPhase::Traveling
                    });
                if targetable {
                    self.pointing
                } else {
                    PointingSample::Clear
                }
            }
            other => other,
        }
    }

    /// Turn a targeting event into outbound collaborator events.
    fn emit_targeting_event(&mut self, event: TargetingEvent) {
        match event {
            TargetingEvent::FireAtShip {
                ship_number,
                solution,
            } => {
                self.events.push(SessionEvent::CannonFired {
                    origin: solution.origin.into(),
                    direction: solution.direction.into(),
                    force: solution.force,
                    target_ship: Some(ship_number),
                });
            }
            TargetingEvent::ActivateButton {
                button_id,
                solution,
            } => {
                self.events.push(SessionEvent::CannonFired {
                    origin: solution.origin.into(),
                    direction: solution.direction.into(),
                    force: solution.force,
                    target_ship: None,
                });
                self.events.push(SessionEvent::ButtonActivated { button_id });
            }
        }
    }

    /// The fire-resolution collaborator reported a cannonball strike.
    /// Only traveling ships sink; anything else is a stale report.
    fn resolve_hit(&mut self, ship_number: u32) {
        let now = self.time.elapsed_secs;

        let mut sunk: Option<(ShipClass, f64)> = None;
        for (_entity, ship) in self.world.query_mut::<&mut Ship>() {
            if ship.ship_number == ship_number {
                if ship.phase == ShipPhase::Traveling {
                    ship.phase = ShipPhase::Sinking;
                    sunk = Some((ship.class, ship.spawned_at_secs));
                }
                break;
            }
        }
        let Some((class, spawned_at)) = sunk else {
            return;
        };

        self.events
            .push(SessionEvent::ShipSunk { ship_number, class });

        let restored = self.stats.register_elimination(class, spawned_at, now);
        if restored {
            self.hearts
                .restore_one(self.stats.total_lives_lost(), &mut self.events);
        }
    }

    /// The animation collaborator finished a sink: Sinking → Removed.
    fn resolve_sink_complete(&mut self, ship_number: u32) {
        for (_entity, ship) in self.world.query_mut::<&mut Ship>() {
            if ship.ship_number == ship_number {
                if ship.phase == ShipPhase::Sinking {
                    ship.phase = ShipPhase::Removed;
                }
                break;
            }
        }
    }

    /// Session end conditions: Adaptive runs until the hearts are
    /// gone; Scripted runs out the clock.
    fn check_end_conditions(&mut self) {
        match self.config.mode {
            SpawnMode::Adaptive => {
                if self.hearts.exhausted() {
                    self.end_session(EndReason::LivesExhausted);
                }
            }
            SpawnMode::Scripted => {
                if self.time.elapsed_secs >= self.config.session_duration_secs {
                    self.end_session(EndReason::TimeExpired);
                }
            }
        }
    }
}
