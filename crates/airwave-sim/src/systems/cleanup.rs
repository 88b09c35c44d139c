//! Despawn finished aircraft.
//!
//! Collect-then-despawn keeps the query borrow and the structural world
//! mutation apart. The buffer is owned by the engine so the allocation
//! is reused across ticks.

use hecs::{Entity, World};

use airwave_core::components::FlightState;
use airwave_core::enums::AircraftStatus;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, state) in world.query_mut::<&FlightState>() {
        if state.status == AircraftStatus::Finished {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
