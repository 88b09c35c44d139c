//! Airport-side aircraft management: the taxi state machine, runway
//! descent/ascent profiles, bay allocation and departures.
//!
//! Each airport walks its managed callsigns once per tick. Stage
//! transitions fire on arrival at the aircraft's current target; the
//! awaiting-bay stage re-polls the bays every tick instead.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use airwave_core::components::{
    AirportState, FlightId, FlightKinematics, FlightPlan, FlightState, ManualControl,
    RunwayProfile, TaxiProgress, TaxiStage,
};
use airwave_core::constants::{
    ARRIVAL_RADIUS_SQ, ASCENT_CLIMB_START_RATIO, DESCENT_RUNWAY_FRACTION, FLIGHT_LEVEL_HIGH,
};
use airwave_core::enums::{AircraftStatus, AltitudeState, WaypointKind};
use airwave_core::events::AudioEvent;
use airwave_core::types::{Position, Velocity};
use airwave_core::waypoint::Waypoint;

use airwave_routing::find_route;

use crate::world::WorldMap;

pub fn run(world: &mut World, map: &WorldMap, rng: &mut ChaCha8Rng, audio: &mut Vec<AudioEvent>) {
    let index: HashMap<String, Entity> = world
        .query::<&FlightId>()
        .iter()
        .map(|(entity, id)| (id.callsign.clone(), entity))
        .collect();
    let airports: Vec<Entity> = world
        .query::<&AirportState>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    let mut detached: Vec<Entity> = Vec::new();

    for airport_entity in airports {
        let Ok(mut ap) = world.get::<&mut AirportState>(airport_entity) else {
            continue;
        };
        let managed = ap.managed.clone();
        for callsign in &managed {
            match index.get(callsign) {
                Some(&entity) => {
                    update_aircraft(world, &mut ap, entity, callsign, map, rng, audio, &mut detached);
                }
                // The aircraft despawned (crash) while under management.
                None => ap.departing.push(callsign.clone()),
            }
        }
        if !ap.departing.is_empty() {
            let departing = std::mem::take(&mut ap.departing);
            ap.managed.retain(|c| !departing.contains(c));
        }
    }

    // Component removal needs the world exclusively; defer it past the
    // airport guards.
    for entity in detached {
        let _ = world.remove_one::<TaxiProgress>(entity);
    }
}

#[allow(clippy::too_many_arguments)]
fn update_aircraft(
    world: &World,
    ap: &mut AirportState,
    entity: Entity,
    callsign: &str,
    map: &WorldMap,
    rng: &mut ChaCha8Rng,
    audio: &mut Vec<AudioEvent>,
    detached: &mut Vec<Entity>,
) {
    let Ok(mut pos) = world.get::<&mut Position>(entity) else {
        return;
    };
    let Ok(mut vel) = world.get::<&mut Velocity>(entity) else {
        return;
    };
    let Ok(mut plan) = world.get::<&mut FlightPlan>(entity) else {
        return;
    };
    let Ok(mut state) = world.get::<&mut FlightState>(entity) else {
        return;
    };
    let Ok(mut taxi) = world.get::<&mut TaxiProgress>(entity) else {
        return;
    };
    let Ok(mut manual) = world.get::<&mut ManualControl>(entity) else {
        return;
    };
    let Ok(kin) = world.get::<&FlightKinematics>(entity) else {
        return;
    };

    if state.status == AircraftStatus::Finished {
        return;
    }

    // Active runway profile runs every tick until it completes.
    if let Some(profile) = taxi.profile {
        match state.altitude {
            Some(AltitudeState::Falling) => apply_descent(
                &mut pos,
                &mut vel,
                &mut state,
                &profile,
                kin.initial_speed,
                ap.taxi_speed,
            ),
            Some(AltitudeState::Climbing) => apply_ascent(
                &mut pos,
                &mut vel,
                &mut state,
                &profile,
                kin.initial_speed,
                ap.taxi_speed,
            ),
            _ => {}
        }
    }

    let arrived = pos.0.horizontal_distance_squared(&plan.current_target) < ARRIVAL_RADIUS_SQ;
    match taxi.stage {
        TaxiStage::Holding { entry_index } if arrived => {
            let next = (entry_index + 1) % ap.entry_points.len();
            taxi.stage = TaxiStage::Holding { entry_index: next };
            plan.current_target = ap.entry_points[next].position;
        }
        TaxiStage::Inbound { entry_index } if arrived => {
            // The cycle commits to the runway from entry index 1.
            if entry_index == 1 {
                taxi.stage = TaxiStage::LandingRun { index: 0 };
                plan.current_target = ap.landing_points[0].position;
            } else {
                let next = (entry_index + 1) % ap.entry_points.len();
                taxi.stage = TaxiStage::Inbound { entry_index: next };
                plan.current_target = ap.entry_points[next].position;
            }
        }
        TaxiStage::LandingRun { index } if arrived => {
            let last = ap.landing_points.len() - 1;
            if index == 0 {
                state.altitude = Some(AltitudeState::Falling);
                taxi.profile = Some(RunwayProfile {
                    start: ap.landing_points[0].position,
                    length: (ap.landing_points[last].position - ap.landing_points[0].position)
                        .magnitude(),
                    top_altitude: pos.0.z,
                });
                taxi.stage = TaxiStage::LandingRun { index: 1 };
                plan.current_target = ap.landing_points[1].position;
            } else if index == last {
                assign_bay(ap, &mut taxi, &mut plan);
            } else {
                // Touchdown point: the runway frees up for the next arrival.
                if index == 2 {
                    ap.landing_runway_busy = false;
                }
                taxi.stage = TaxiStage::LandingRun { index: index + 1 };
                plan.current_target = ap.landing_points[index + 1].position;
            }
        }
        TaxiStage::AwaitingBay => {
            assign_bay(ap, &mut taxi, &mut plan);
        }
        TaxiStage::ToBay { bay } if arrived => {
            taxi.stage = TaxiStage::Parked { bay };
            taxi.profile = None;
            state.status = AircraftStatus::Parked;
            state.altitude = None;
            pos.0.z = 0.0;
            *vel = Velocity::default();
            tracing::info!(callsign, airport = %ap.name, bay, "parked");
        }
        TaxiStage::TakeoffRun { index } if arrived => {
            let last = ap.takeoff_points.len() - 1;
            if index == last {
                // End of the takeoff run: hand back to free flight with a
                // fresh route to a random exit.
                ap.takeoff_runway_busy = false;
                ap.capacity += 1;

                let (exit_name, exit) = map.exits[rng.gen_range(0..map.exits.len())].clone();
                let origin = Waypoint::at(pos.0, WaypointKind::Airspace);
                match find_route(&origin, &exit, &map.airspace) {
                    Ok(route) => {
                        plan.current_stage = 0;
                        plan.current_target = route[0].position;
                        plan.route = route;
                        plan.origin_name = ap.name.clone();
                        plan.destination = exit;
                        plan.destination_name = exit_name;
                        manual.active = false;
                        manual.bearing_target = None;
                        state.status = AircraftStatus::Normal;
                        // Finish the climb to the high level in free flight.
                        state.altitude = Some(AltitudeState::Climbing);
                        taxi.profile = None;
                        let heading = pos.bearing_to(&plan.current_target);
                        *vel = Velocity::new(0.0, kin.initial_speed, 0.0).with_heading(heading);

                        audio.push(AudioEvent::Departure {
                            callsign: callsign.to_string(),
                            airport: ap.name.clone(),
                        });
                        tracing::info!(
                            callsign,
                            airport = %ap.name,
                            destination = %plan.destination_name,
                            "departed"
                        );
                    }
                    Err(err) => {
                        tracing::error!(callsign, error = %err, "departure replanning failed");
                        state.status = AircraftStatus::Finished;
                    }
                }
                ap.departing.push(callsign.to_string());
                detached.push(entity);
            } else {
                if index == last - 1 {
                    state.altitude = Some(AltitudeState::Climbing);
                    taxi.profile = Some(RunwayProfile {
                        start: ap.takeoff_points[last - 1].position,
                        length: (ap.takeoff_points[last].position
                            - ap.takeoff_points[last - 1].position)
                            .magnitude(),
                        top_altitude: FLIGHT_LEVEL_HIGH,
                    });
                }
                taxi.stage = TaxiStage::TakeoffRun { index: index + 1 };
                plan.current_target = ap.takeoff_points[index + 1].position;
            }
        }
        _ => {}
    }
}

/// Allocate the first free bay, or fall back to awaiting one.
fn assign_bay(ap: &mut AirportState, taxi: &mut TaxiProgress, plan: &mut FlightPlan) {
    match ap.bays.iter().position(|occupied| !occupied) {
        Some(bay) => {
            ap.bays[bay] = true;
            taxi.stage = TaxiStage::ToBay { bay };
            plan.current_target = ap.parking_points[bay].position;
        }
        None => taxi.stage = TaxiStage::AwaitingBay,
    }
}

/// Runway descent profile: altitude interpolates down over the first
/// three quarters of the runway while speed decays steeply toward the
/// ground taxi speed.
pub fn apply_descent(
    pos: &mut Position,
    vel: &mut Velocity,
    state: &mut FlightState,
    profile: &RunwayProfile,
    entry_speed: f64,
    taxi_speed: f64,
) {
    if pos.0.z <= 0.0 {
        pos.0.z = 0.0;
        state.altitude = Some(AltitudeState::Level);
        return;
    }
    let travelled = pos.0.horizontal_distance(&profile.start);
    let ratio = (travelled / (DESCENT_RUNWAY_FRACTION * profile.length)).min(1.0);
    pos.0.z = (profile.top_altitude * (1.0 - ratio)).max(0.0);
    let blend = ratio.powi(4);
    *vel = vel.with_horizontal_speed(entry_speed * (1.0 - blend) + taxi_speed * blend);
}

/// Runway ascent profile: ground roll for the first stretch, then
/// altitude rises with the progress ratio while speed builds back up to
/// the flight entry speed.
pub fn apply_ascent(
    pos: &mut Position,
    vel: &mut Velocity,
    state: &mut FlightState,
    profile: &RunwayProfile,
    entry_speed: f64,
    taxi_speed: f64,
) {
    if pos.0.z >= FLIGHT_LEVEL_HIGH {
        pos.0.z = FLIGHT_LEVEL_HIGH;
        state.altitude = Some(AltitudeState::Level);
        return;
    }
    let travelled = pos.0.horizontal_distance(&profile.start);
    let ratio = (travelled / profile.length).min(1.0);
    pos.0.z = if ratio > ASCENT_CLIMB_START_RATIO {
        FLIGHT_LEVEL_HIGH * ratio
    } else {
        0.0
    };
    let blend = ratio * ratio;
    *vel = vel.with_horizontal_speed(taxi_speed * (1.0 - blend) + entry_speed * blend);
}

/// Take over a flight that reached its destination airport's fix: hold at
/// the entry cycle until the controller grants a landing clearance.
pub fn admit(world: &mut World, aircraft: Entity, airport_name: &str, audio: &mut Vec<AudioEvent>) {
    let airport_entity = world
        .query::<&AirportState>()
        .iter()
        .find(|(_, ap)| ap.name == airport_name)
        .map(|(entity, _)| entity);
    let Some(airport_entity) = airport_entity else {
        tracing::warn!(airport = airport_name, "handoff to unknown airport");
        return;
    };
    let Ok(id) = world.get::<&FlightId>(aircraft) else {
        return;
    };
    let callsign = id.callsign.clone();
    drop(id);

    let first_entry = {
        let Ok(mut ap) = world.get::<&mut AirportState>(airport_entity) else {
            return;
        };
        if !ap.managed.iter().any(|c| c == &callsign) {
            ap.managed.push(callsign.clone());
        }
        ap.entry_points[0].position
    };

    if let Ok(mut state) = world.get::<&mut FlightState>(aircraft) {
        state.status = AircraftStatus::Waiting;
        state.altitude = None;
    }
    if let Ok(mut plan) = world.get::<&mut FlightPlan>(aircraft) {
        plan.current_target = first_entry;
    }
    let _ = world.insert_one(
        aircraft,
        TaxiProgress {
            airport: airport_name.to_string(),
            stage: TaxiStage::Holding { entry_index: 0 },
            profile: None,
        },
    );

    audio.push(AudioEvent::Handoff {
        callsign: callsign.clone(),
        airport: airport_name.to_string(),
    });
    tracing::info!(callsign = %callsign, airport = airport_name, "handed off to airport");
}
