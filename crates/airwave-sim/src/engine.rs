//! The simulation engine: owns the ECS world, the command queue and the
//! seeded RNG, and advances everything one fixed tick at a time.
//!
//! Tick order is fixed: queued commands, traffic, flight kinematics,
//! airport management, separation scan, cleanup, snapshot. Two engines
//! built from the same `SimConfig` and fed the same commands produce
//! identical snapshot streams.

use std::collections::VecDeque;
use std::mem;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use airwave_core::commands::ControllerCommand;
use airwave_core::components::{
    AirportState, FlightId, FlightKinematics, FlightPlan, FlightState, ManualControl, Score,
    TaxiProgress, TaxiStage,
};
use airwave_core::constants::DT;
use airwave_core::enums::{AircraftStatus, AlertLevel, AltitudeState, Difficulty, DifficultySettings};
use airwave_core::errors::{CommandError, WorldConfigError};
use airwave_core::events::{Alert, AudioEvent};
use airwave_core::state::SimSnapshot;
use airwave_core::types::{Position, SimTime, Velocity};
use airwave_core::waypoint::{DisplayScale, Waypoint};

use airwave_routing::RouteError;

use crate::names::NameRegistry;
use crate::scoring::{self, ScoreState};
use crate::sync::{self, AircraftSync};
use crate::systems;
use crate::systems::traffic::{TrafficConfig, TrafficSchedule};
use crate::world::{self, WorldMap};

/// Engine construction parameters.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub scale: DisplayScale,
    pub traffic: TrafficConfig,
}

pub struct SimEngine {
    world: World,
    time: SimTime,
    difficulty: Difficulty,
    settings: DifficultySettings,
    rng: ChaCha8Rng,
    names: NameRegistry,
    map: WorldMap,
    traffic: TrafficSchedule,
    command_queue: VecDeque<ControllerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    alerts: Vec<Alert>,
    score: ScoreState,
}

impl SimEngine {
    /// Engine over the default sector.
    pub fn new(config: SimConfig) -> Self {
        let (map, airports) = world::default_world(config.scale);
        match Self::with_world(config, map, airports) {
            Ok(engine) => engine,
            // The default sector satisfies the shape requirements by
            // construction; see the world tests.
            Err(err) => unreachable!("default world rejected: {err}"),
        }
    }

    /// Engine over custom geometry, validated before anything flies.
    pub fn with_world(
        config: SimConfig,
        map: WorldMap,
        airports: Vec<AirportState>,
    ) -> Result<Self, WorldConfigError> {
        if map.exits.is_empty() {
            return Err(WorldConfigError::NoExits);
        }
        let mut ecs = World::new();
        for ap in airports {
            world::validate_airport(&ap)?;
            ecs.spawn((ap,));
        }
        Ok(Self {
            world: ecs,
            time: SimTime::default(),
            difficulty: config.difficulty,
            settings: config.difficulty.settings(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            names: NameRegistry::new(),
            map,
            traffic: TrafficSchedule::new(config.traffic),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            alerts: Vec::new(),
            score: ScoreState::default(),
        })
    }

    /// Advance one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();
        systems::traffic::run(
            &mut self.world,
            &mut self.traffic,
            &mut self.names,
            &mut self.rng,
            &self.settings,
            &self.map,
            self.time.tick,
            &mut self.alerts,
        );
        systems::flight::run(&mut self.world, &mut self.audio_events, &mut self.score);
        systems::airport::run(&mut self.world, &self.map, &mut self.rng, &mut self.audio_events);
        systems::separation::run(
            &mut self.world,
            &self.settings,
            &mut self.audio_events,
            &mut self.alerts,
            &mut self.score,
            self.time.tick,
        );
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        self.time.advance();

        let audio_events = mem::take(&mut self.audio_events);
        let alerts = mem::take(&mut self.alerts);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.difficulty,
            audio_events,
            alerts,
            &self.score,
        )
    }

    /// Queue a controller command for the next tick boundary.
    pub fn queue_command(&mut self, command: ControllerCommand) {
        self.command_queue.push_back(command);
    }

    /// Spawn a flight from an origin waypoint toward a destination.
    /// Returns the assigned callsign; a planning failure spawns nothing.
    pub fn spawn_flight(
        &mut self,
        origin: &Waypoint,
        origin_name: &str,
        destination: Waypoint,
        destination_name: &str,
    ) -> Result<String, RouteError> {
        let (_, callsign) = world::spawn_aircraft(
            &mut self.world,
            &mut self.names,
            &mut self.rng,
            &self.settings,
            &self.map,
            origin,
            origin_name,
            destination,
            destination_name,
        )?;
        Ok(callsign)
    }

    /// Destination waypoint for routing a flight to the named airport.
    pub fn airport_fix(&self, name: &str) -> Option<Waypoint> {
        self.world
            .query::<&AirportState>()
            .iter()
            .find(|(_, ap)| ap.name == name)
            .map(|(_, ap)| world::airport_fix(ap))
    }

    /// Apply a replicated aircraft from a network peer.
    pub fn apply_remote(&mut self, sync: AircraftSync) -> Entity {
        self.names.claim(&sync.callsign);
        sync::apply(&mut self.world, sync)
    }

    /// Export every aircraft for replication, sorted by callsign.
    pub fn export_aircraft(&self) -> Vec<AircraftSync> {
        sync::export(&self.world)
    }

    pub fn find_aircraft(&self, callsign: &str) -> Option<Entity> {
        self.world
            .query::<&FlightId>()
            .iter()
            .find(|(_, id)| id.callsign == callsign)
            .map(|(entity, _)| entity)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    pub fn settings(&self) -> DifficultySettings {
        self.settings
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                tracing::warn!(error = %err, "controller command rejected");
                self.alerts.push(Alert {
                    level: AlertLevel::Warning,
                    message: err.to_string(),
                    tick: self.time.tick,
                });
            }
        }
    }

    fn handle_command(&mut self, command: ControllerCommand) -> Result<(), CommandError> {
        match command {
            ControllerCommand::ToggleManualControl { callsign } => self.toggle_manual(callsign),
            ControllerCommand::TurnLeft { callsign } => self.manual_turn(&callsign, -1.0),
            ControllerCommand::TurnRight { callsign } => self.manual_turn(&callsign, 1.0),
            ControllerCommand::SetBearing { callsign, bearing } => {
                self.set_bearing(callsign, bearing)
            }
            ControllerCommand::ClimbToHigh { callsign } => {
                self.set_altitude_state(callsign, AltitudeState::Climbing)
            }
            ControllerCommand::DescendToLow { callsign } => {
                self.set_altitude_state(callsign, AltitudeState::Falling)
            }
            ControllerCommand::DirectTo { callsign, stage } => self.direct_to(callsign, stage),
            ControllerCommand::ClearLanding { callsign } => self.clear_landing(callsign),
            ControllerCommand::ClearTakeoff { callsign } => self.clear_takeoff(callsign),
        }
    }

    fn aircraft_entity(&self, callsign: &str) -> Result<Entity, CommandError> {
        self.find_aircraft(callsign)
            .ok_or_else(|| CommandError::UnknownCallsign(callsign.to_string()))
    }

    fn flight_status(&self, entity: Entity, callsign: &str) -> Result<AircraftStatus, CommandError> {
        self.world
            .get::<&FlightState>(entity)
            .map(|state| state.status)
            .map_err(|_| CommandError::UnknownCallsign(callsign.to_string()))
    }

    fn require_normal(&self, entity: Entity, callsign: &str) -> Result<(), CommandError> {
        let status = self.flight_status(entity, callsign)?;
        if status != AircraftStatus::Normal {
            return Err(CommandError::InvalidState {
                callsign: callsign.to_string(),
                status,
            });
        }
        Ok(())
    }

    fn toggle_manual(&mut self, callsign: String) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(&callsign)?;
        self.require_normal(entity, &callsign)?;

        let released = {
            let Ok(mut manual) = self.world.get::<&mut ManualControl>(entity) else {
                return Err(CommandError::UnknownCallsign(callsign));
            };
            manual.active = !manual.active;
            if manual.active {
                false
            } else {
                manual.bearing_target = None;
                true
            }
        };
        // Releasing resets course back to the current route stage.
        if released {
            if let Ok(mut plan) = self.world.get::<&mut FlightPlan>(entity) {
                if plan.current_stage < plan.route.len() {
                    plan.current_target = plan.route[plan.current_stage].position;
                }
            }
        }
        tracing::debug!(callsign = %callsign, released, "manual control toggled");
        Ok(())
    }

    fn require_manual(&self, entity: Entity, callsign: &str) -> Result<(), CommandError> {
        let active = self
            .world
            .get::<&ManualControl>(entity)
            .map(|manual| manual.active)
            .map_err(|_| CommandError::UnknownCallsign(callsign.to_string()))?;
        if !active {
            return Err(CommandError::NotManual(callsign.to_string()));
        }
        Ok(())
    }

    fn manual_turn(&mut self, callsign: &str, sign: f64) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(callsign)?;
        self.require_manual(entity, callsign)?;
        let step = self
            .world
            .get::<&FlightKinematics>(entity)
            .map(|kin| kin.turn_speed * DT)
            .map_err(|_| CommandError::UnknownCallsign(callsign.to_string()))?;
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
            *vel = vel.rotated(sign * step);
        }
        Ok(())
    }

    fn set_bearing(&mut self, callsign: String, bearing: f64) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(&callsign)?;
        self.require_manual(entity, &callsign)?;
        if let Ok(mut manual) = self.world.get::<&mut ManualControl>(entity) {
            manual.bearing_target = Some(bearing.rem_euclid(std::f64::consts::TAU));
        }
        Ok(())
    }

    fn set_altitude_state(
        &mut self,
        callsign: String,
        altitude: AltitudeState,
    ) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(&callsign)?;
        self.require_normal(entity, &callsign)?;
        if let Ok(mut state) = self.world.get::<&mut FlightState>(entity) {
            state.altitude = Some(altitude);
        }
        Ok(())
    }

    fn direct_to(&mut self, callsign: String, stage: usize) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(&callsign)?;
        self.require_normal(entity, &callsign)?;
        {
            let Ok(plan) = self.world.get::<&FlightPlan>(entity) else {
                return Err(CommandError::UnknownCallsign(callsign));
            };
            if stage >= plan.route.len() {
                return Err(CommandError::StageOutOfRange {
                    callsign,
                    stage,
                    len: plan.route.len(),
                });
            }
        }

        if let Ok(mut score) = self.world.get::<&mut Score>(entity) {
            let penalty = scoring::route_alteration_penalty(score.points);
            scoring::apply_penalty(&mut score, penalty);
        }
        if let Ok(mut manual) = self.world.get::<&mut ManualControl>(entity) {
            manual.active = false;
            manual.bearing_target = None;
        }
        if let Ok(mut plan) = self.world.get::<&mut FlightPlan>(entity) {
            plan.current_stage = stage;
            plan.current_target = plan.route[stage].position;
        }
        tracing::debug!(callsign = %callsign, stage, "direct-to");
        Ok(())
    }

    fn find_airport(&self, name: &str) -> Option<Entity> {
        self.world
            .query::<&AirportState>()
            .iter()
            .find(|(_, ap)| ap.name == name)
            .map(|(entity, _)| entity)
    }

    fn clear_landing(&mut self, callsign: String) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(&callsign)?;
        let status = self.flight_status(entity, &callsign)?;
        if status != AircraftStatus::Waiting {
            return Err(CommandError::InvalidState { callsign, status });
        }
        let (airport_name, entry_index) = {
            let Ok(taxi) = self.world.get::<&TaxiProgress>(entity) else {
                return Err(CommandError::InvalidState { callsign, status });
            };
            match taxi.stage {
                TaxiStage::Holding { entry_index } => (taxi.airport.clone(), entry_index),
                _ => return Err(CommandError::InvalidState { callsign, status }),
            }
        };
        let airport_entity = self
            .find_airport(&airport_name)
            .ok_or_else(|| CommandError::UnknownAirport(airport_name.clone()))?;

        let denied = {
            let Ok(mut ap) = self.world.get::<&mut AirportState>(airport_entity) else {
                return Err(CommandError::UnknownAirport(airport_name));
            };
            if ap.capacity == 0 {
                Some("no parking capacity")
            } else if ap.landing_runway_busy {
                Some("landing runway busy")
            } else {
                ap.capacity -= 1;
                ap.landing_runway_busy = true;
                None
            }
        };
        match denied {
            Some(reason) => {
                tracing::debug!(callsign = %callsign, airport = %airport_name, reason, "landing denied");
                self.audio_events.push(AudioEvent::ClearanceDenied {
                    callsign,
                    airport: airport_name,
                    reason: reason.to_string(),
                });
            }
            None => {
                if let Ok(mut state) = self.world.get::<&mut FlightState>(entity) {
                    state.status = AircraftStatus::Landing;
                }
                if let Ok(mut taxi) = self.world.get::<&mut TaxiProgress>(entity) {
                    taxi.stage = TaxiStage::Inbound { entry_index };
                }
                tracing::info!(callsign = %callsign, airport = %airport_name, "cleared to land");
                self.audio_events.push(AudioEvent::ClearanceGranted {
                    callsign,
                    airport: airport_name,
                });
            }
        }
        Ok(())
    }

    fn clear_takeoff(&mut self, callsign: String) -> Result<(), CommandError> {
        let entity = self.aircraft_entity(&callsign)?;
        let status = self.flight_status(entity, &callsign)?;
        if status != AircraftStatus::Parked {
            return Err(CommandError::InvalidState { callsign, status });
        }
        let (airport_name, bay) = {
            let Ok(taxi) = self.world.get::<&TaxiProgress>(entity) else {
                return Err(CommandError::InvalidState { callsign, status });
            };
            match taxi.stage {
                TaxiStage::Parked { bay } => (taxi.airport.clone(), bay),
                _ => return Err(CommandError::InvalidState { callsign, status }),
            }
        };
        let airport_entity = self
            .find_airport(&airport_name)
            .ok_or_else(|| CommandError::UnknownAirport(airport_name.clone()))?;

        let granted = {
            let Ok(mut ap) = self.world.get::<&mut AirportState>(airport_entity) else {
                return Err(CommandError::UnknownAirport(airport_name));
            };
            if ap.takeoff_runway_busy {
                None
            } else {
                ap.takeoff_runway_busy = true;
                ap.bays[bay] = false;
                Some((ap.takeoff_points[0].position, ap.taxi_speed))
            }
        };
        match granted {
            None => {
                tracing::debug!(callsign = %callsign, airport = %airport_name, "takeoff denied");
                self.audio_events.push(AudioEvent::ClearanceDenied {
                    callsign,
                    airport: airport_name,
                    reason: "takeoff runway busy".to_string(),
                });
            }
            Some((first_target, taxi_speed)) => {
                if let Ok(mut state) = self.world.get::<&mut FlightState>(entity) {
                    state.status = AircraftStatus::Takeoff;
                    state.altitude = None;
                }
                if let Ok(mut taxi) = self.world.get::<&mut TaxiProgress>(entity) {
                    taxi.stage = TaxiStage::TakeoffRun { index: 0 };
                }
                if let Ok(mut plan) = self.world.get::<&mut FlightPlan>(entity) {
                    plan.current_target = first_target;
                }
                let heading = self
                    .world
                    .get::<&Position>(entity)
                    .map(|pos| pos.bearing_to(&first_target))
                    .unwrap_or_default();
                if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
                    *vel = Velocity::new(0.0, taxi_speed, 0.0).with_heading(heading);
                }
                tracing::info!(callsign = %callsign, airport = %airport_name, "cleared for takeoff");
                self.audio_events.push(AudioEvent::ClearanceGranted {
                    callsign,
                    airport: airport_name,
                });
            }
        }
        Ok(())
    }
}
