//! Scheduled traffic generation.
//!
//! Spawns an arrival at a random entry point on a fixed tick interval,
//! bound for a random exit or airport, subject to an active-aircraft cap.
//! Drawing from the engine's seeded RNG keeps schedules reproducible.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use airwave_core::components::{AirportState, FlightId};
use airwave_core::constants::{TRAFFIC_INTERVAL_TICKS, TRAFFIC_MAX_ACTIVE};
use airwave_core::enums::{AlertLevel, DifficultySettings, WaypointKind};
use airwave_core::events::Alert;
use airwave_core::types::Vec3;
use airwave_core::waypoint::Waypoint;

use crate::names::NameRegistry;
use crate::world::{self, WorldMap};

#[derive(Debug, Clone)]
pub struct TrafficConfig {
    pub enabled: bool,
    pub interval_ticks: u64,
    pub max_active: usize,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ticks: TRAFFIC_INTERVAL_TICKS,
            max_active: TRAFFIC_MAX_ACTIVE,
        }
    }
}

#[derive(Debug)]
pub struct TrafficSchedule {
    config: TrafficConfig,
    next_spawn_tick: u64,
}

impl TrafficSchedule {
    pub fn new(config: TrafficConfig) -> Self {
        Self {
            config,
            next_spawn_tick: 0,
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    schedule: &mut TrafficSchedule,
    names: &mut NameRegistry,
    rng: &mut ChaCha8Rng,
    settings: &DifficultySettings,
    map: &WorldMap,
    tick: u64,
    alerts: &mut Vec<Alert>,
) {
    if !schedule.config.enabled || tick < schedule.next_spawn_tick {
        return;
    }
    schedule.next_spawn_tick = tick + schedule.config.interval_ticks;

    let active = world.query::<&FlightId>().iter().count();
    if active >= schedule.config.max_active {
        return;
    }

    let (origin_name, origin) = map.entries[rng.gen_range(0..map.entries.len())].clone();

    let airport_fixes: Vec<(String, Vec3)> = world
        .query::<&AirportState>()
        .iter()
        .map(|(_, ap)| (ap.name.clone(), ap.entry_points[0].position))
        .collect();
    let pick = rng.gen_range(0..map.exits.len() + airport_fixes.len());
    let (destination_name, destination) = if pick < map.exits.len() {
        map.exits[pick].clone()
    } else {
        let (name, fix) = airport_fixes[pick - map.exits.len()].clone();
        (name, Waypoint::at(fix, WaypointKind::Airport))
    };

    match world::spawn_aircraft(
        world,
        names,
        rng,
        settings,
        map,
        &origin,
        &origin_name,
        destination,
        &destination_name,
    ) {
        Ok((_, callsign)) => {
            alerts.push(Alert {
                level: AlertLevel::Info,
                message: format!("{callsign} inbound from {origin_name} to {destination_name}"),
                tick,
            });
        }
        Err(err) => {
            tracing::error!(error = %err, origin = %origin_name, "scheduled spawn failed");
        }
    }
}
