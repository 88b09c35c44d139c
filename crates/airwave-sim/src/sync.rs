//! Name-keyed aircraft synchronization for networked sessions.
//!
//! A peer sends whole-aircraft values; applying one either overwrites
//! the matching local flight in place (entity identity preserved) or
//! spawns a new entity. Airport taxi bookkeeping is deliberately not
//! carried: the managing session owns it.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use airwave_core::components::{
    FlightId, FlightKinematics, FlightPlan, FlightState, ManualControl, Proximity, Score,
};
use airwave_core::types::{Position, Velocity};

/// One aircraft's replicated state, keyed by callsign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftSync {
    pub callsign: String,
    pub position: Position,
    pub velocity: Velocity,
    pub kinematics: FlightKinematics,
    pub plan: FlightPlan,
    pub state: FlightState,
    pub manual: ManualControl,
    pub score: Score,
}

/// Snapshot every aircraft into sync values, sorted by callsign.
pub fn export(world: &World) -> Vec<AircraftSync> {
    let mut out: Vec<AircraftSync> = world
        .query::<(
            &FlightId,
            &Position,
            &Velocity,
            &FlightKinematics,
            &FlightPlan,
            &FlightState,
            &ManualControl,
            &Score,
        )>()
        .iter()
        .map(
            |(_, (id, pos, vel, kin, plan, state, manual, score))| AircraftSync {
                callsign: id.callsign.clone(),
                position: *pos,
                velocity: *vel,
                kinematics: *kin,
                plan: plan.clone(),
                state: *state,
                manual: *manual,
                score: *score,
            },
        )
        .collect();
    out.sort_by(|a, b| a.callsign.cmp(&b.callsign));
    out
}

/// Upsert a replicated aircraft by callsign.
pub fn apply(world: &mut World, sync: AircraftSync) -> Entity {
    let existing = world
        .query::<&FlightId>()
        .iter()
        .find(|(_, id)| id.callsign == sync.callsign)
        .map(|(entity, _)| entity);

    match existing {
        Some(entity) => {
            if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                *pos = sync.position;
            }
            if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
                *vel = sync.velocity;
            }
            if let Ok(mut kin) = world.get::<&mut FlightKinematics>(entity) {
                *kin = sync.kinematics;
            }
            if let Ok(mut plan) = world.get::<&mut FlightPlan>(entity) {
                *plan = sync.plan;
            }
            if let Ok(mut state) = world.get::<&mut FlightState>(entity) {
                *state = sync.state;
            }
            if let Ok(mut manual) = world.get::<&mut ManualControl>(entity) {
                *manual = sync.manual;
            }
            if let Ok(mut score) = world.get::<&mut Score>(entity) {
                *score = sync.score;
            }
            entity
        }
        None => world.spawn((
            FlightId {
                callsign: sync.callsign,
            },
            sync.position,
            sync.velocity,
            sync.kinematics,
            sync.plan,
            sync.state,
            sync.manual,
            sync.score,
            Proximity::default(),
        )),
    }
}
