//! Pairwise separation and collision scan.
//!
//! All-pairs over live aircraft on squared 3D distances. Inside the
//! collision radius both flights end immediately; inside the difficulty
//! tier's separation minimum the pair is flagged, with the warning sound
//! and score penalty debounced to once per violation episode.
//!
//! Parked aircraft are out of the conflict picture entirely: they sit
//! stationary in a bay, and the taxi line to the remaining bays runs
//! past occupied ones.

use hecs::{Entity, World};

use airwave_core::components::{FlightId, FlightState, Proximity, Score};
use airwave_core::constants::COLLISION_RADIUS;
use airwave_core::enums::{AircraftStatus, AlertLevel, DifficultySettings};
use airwave_core::events::{Alert, AudioEvent};
use airwave_core::types::{Position, Vec3};

use crate::scoring::{self, ScoreState};

struct Contact {
    entity: Entity,
    callsign: String,
    position: Vec3,
    status: AircraftStatus,
}

pub fn run(
    world: &mut World,
    settings: &DifficultySettings,
    audio: &mut Vec<AudioEvent>,
    alerts: &mut Vec<Alert>,
    score_state: &mut ScoreState,
    tick: u64,
) {
    let contacts: Vec<Contact> = world
        .query::<(&FlightId, &Position, &FlightState)>()
        .iter()
        .filter(|(_, (_, _, state))| {
            state.status != AircraftStatus::Finished && state.status != AircraftStatus::Parked
        })
        .map(|(entity, (id, pos, state))| Contact {
            entity,
            callsign: id.callsign.clone(),
            position: pos.0,
            status: state.status,
        })
        .collect();

    let n = contacts.len();
    let mut near: Vec<Vec<String>> = vec![Vec::new(); n];
    let mut crashes: Vec<(usize, usize)> = Vec::new();
    let separation_sq = settings.separation * settings.separation;
    let collision_sq = COLLISION_RADIUS * COLLISION_RADIUS;

    for i in 0..n {
        for j in (i + 1)..n {
            let d_sq = (contacts[j].position - contacts[i].position).magnitude_squared();
            if d_sq < collision_sq {
                crashes.push((i, j));
            } else if d_sq < separation_sq {
                near[i].push(contacts[j].callsign.clone());
                near[j].push(contacts[i].callsign.clone());
            }
        }
    }

    for (i, contact) in contacts.iter().enumerate() {
        let Ok(mut prox) = world.get::<&mut Proximity>(contact.entity) else {
            continue;
        };
        if near[i].is_empty() {
            prox.too_near.clear();
            prox.warned = false;
            continue;
        }
        let fresh_episode = !prox.warned;
        prox.warned = true;
        prox.too_near = std::mem::take(&mut near[i]);
        drop(prox);

        if fresh_episode {
            audio.push(AudioEvent::SeparationWarning {
                callsign: contact.callsign.clone(),
            });
            // Aircraft holding at an airport are not penalized for the
            // stack packing the controller forced on them.
            if contact.status != AircraftStatus::Waiting {
                if let Ok(mut score) = world.get::<&mut Score>(contact.entity) {
                    let penalty = scoring::separation_penalty(score.points);
                    scoring::apply_penalty(&mut score, penalty);
                }
                score_state.violations += 1;
                tracing::debug!(callsign = %contact.callsign, "separation violation");
            }
        }
    }

    for (i, j) in crashes {
        for k in [i, j] {
            if let Ok(mut state) = world.get::<&mut FlightState>(contacts[k].entity) {
                state.status = AircraftStatus::Finished;
            }
        }
        score_state.crashed += 2;
        audio.push(AudioEvent::Collision {
            callsign_a: contacts[i].callsign.clone(),
            callsign_b: contacts[j].callsign.clone(),
        });
        alerts.push(Alert {
            level: AlertLevel::Critical,
            message: format!(
                "{} and {} collided",
                contacts[i].callsign, contacts[j].callsign
            ),
            tick,
        });
        tracing::warn!(
            a = %contacts[i].callsign,
            b = %contacts[j].callsign,
            "midair collision"
        );
    }
}
