//! Free-flight kinematics and route progression.
//!
//! One pass over every aircraft: vertical motion between the two cruise
//! flight levels, arrival detection against the current target, position
//! integration, and heading correction toward the steering target.

use hecs::{Entity, World};

use airwave_core::components::{
    FlightId, FlightKinematics, FlightPlan, FlightState, ManualControl, Score,
};
use airwave_core::constants::{ARRIVAL_RADIUS_SQ, DT, FLIGHT_LEVEL_HIGH, FLIGHT_LEVEL_LOW};
use airwave_core::enums::{AircraftStatus, AltitudeState, WaypointKind};
use airwave_core::events::AudioEvent;
use airwave_core::types::{Position, Velocity};

use crate::scoring::{self, ScoreState};
use crate::systems::airport;

pub fn run(world: &mut World, audio: &mut Vec<AudioEvent>, score_state: &mut ScoreState) {
    let mut handoffs: Vec<(Entity, String)> = Vec::new();

    for (entity, (id, pos, vel, kin, plan, state, manual, score)) in world.query_mut::<(
        &FlightId,
        &mut Position,
        &mut Velocity,
        &FlightKinematics,
        &mut FlightPlan,
        &mut FlightState,
        &ManualControl,
        &mut Score,
    )>() {
        if state.status == AircraftStatus::Finished {
            continue;
        }

        // Vertical motion between the cruise levels. Runway profiles are
        // driven by the airport system instead.
        if state.status == AircraftStatus::Normal {
            match state.altitude {
                Some(AltitudeState::Climbing) => {
                    pos.0.z += kin.altitude_rate * DT;
                    if pos.0.z >= FLIGHT_LEVEL_HIGH {
                        pos.0.z = FLIGHT_LEVEL_HIGH;
                        state.altitude = Some(AltitudeState::Level);
                    }
                }
                Some(AltitudeState::Falling) => {
                    pos.0.z -= kin.altitude_rate * DT;
                    if pos.0.z <= FLIGHT_LEVEL_LOW {
                        pos.0.z = FLIGHT_LEVEL_LOW;
                        state.altitude = Some(AltitudeState::Level);
                    }
                }
                _ => {}
            }
        }

        // Arrival at the current target.
        if state.status == AircraftStatus::Normal
            && pos.0.horizontal_distance_squared(&plan.current_target) < ARRIVAL_RADIUS_SQ
        {
            if plan.current_target == plan.destination.position {
                match plan.destination.kind {
                    WaypointKind::Airport => {
                        handoffs.push((entity, plan.destination_name.clone()));
                    }
                    _ => {
                        state.status = AircraftStatus::Finished;
                        audio.push(AudioEvent::FlightCompleted {
                            callsign: id.callsign.clone(),
                            score: score.points,
                        });
                        scoring::bank_completion(score_state, score);
                        tracing::info!(callsign = %id.callsign, "flight completed");
                    }
                }
            } else {
                plan.current_stage += 1;
                plan.current_target = if plan.current_stage < plan.route.len() {
                    plan.route[plan.current_stage].position
                } else {
                    plan.destination.position
                };
            }
        }

        if state.status != AircraftStatus::Parked {
            pos.0.x += vel.0.x * DT;
            pos.0.y += vel.0.y * DT;
            if state.status == AircraftStatus::Normal {
                pos.0.z += vel.0.z * DT;
            }

            let desired = if manual.active {
                manual.bearing_target.unwrap_or_else(|| vel.heading())
            } else {
                pos.bearing_to(&plan.current_target)
            };
            *vel = steer(*vel, desired, kin.turn_speed, kin.bearing_leniency);
        }
    }

    // Handoffs mutate airport state and attach taxi components, so they
    // apply after the aircraft query's borrow ends.
    for (entity, airport_name) in handoffs {
        airport::admit(world, entity, &airport_name, audio);
    }
}

/// One steering step: rotate the heading toward `desired` by at most the
/// per-tick turn budget, taking the shorter way around. Deviations inside
/// the leniency dead band are left alone.
pub fn steer(vel: Velocity, desired: f64, turn_speed: f64, leniency: f64) -> Velocity {
    use std::f64::consts::{PI, TAU};

    let current = vel.heading();
    let mut diff = (desired - current).rem_euclid(TAU);
    if diff > PI {
        diff -= TAU;
    }
    if diff.abs() <= leniency {
        return vel;
    }
    let step = (turn_speed * DT).min(diff.abs());
    vel.rotated(if diff >= 0.0 { step } else { -step })
}
