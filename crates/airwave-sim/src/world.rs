//! Static world geometry and entity spawn factories.
//!
//! The waypoint graph is fixed at session start: airspace routing nodes,
//! boundary entry/exit points, and per-airport taxi sequences. Airports
//! are validated against the taxi state machine's shape requirements
//! before anything flies.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use airwave_core::components::*;
use airwave_core::constants::*;
use airwave_core::enums::{DifficultySettings, WaypointKind};
use airwave_core::errors::WorldConfigError;
use airwave_core::types::{Position, Vec3, Velocity};
use airwave_core::waypoint::{DisplayScale, Waypoint};

use airwave_routing::{find_route, RouteError};

use crate::names::NameRegistry;

/// The free-airspace portion of the waypoint graph. Airport sequences
/// live on the airport entities themselves.
#[derive(Debug, Clone)]
pub struct WorldMap {
    pub airspace: Vec<Waypoint>,
    pub entries: Vec<(String, Waypoint)>,
    pub exits: Vec<(String, Waypoint)>,
}

/// Build the default sector: nine routing nodes, four entries, four
/// exits, two airports. Coordinates are authored at the reference design
/// resolution; fixed points remap through `scale` at construction.
pub fn default_world(scale: DisplayScale) -> (WorldMap, Vec<AirportState>) {
    let airspace = [
        (200.0, 160.0),
        (480.0, 180.0),
        (960.0, 160.0),
        (1440.0, 220.0),
        (640.0, 380.0),
        (1600.0, 560.0),
        (960.0, 700.0),
        (480.0, 880.0),
        (1440.0, 900.0),
    ]
    .iter()
    .map(|&(x, y)| Waypoint::new(x, y, WaypointKind::Airspace, scale))
    .collect();

    let entries = [
        ("ENTRY-W", 0.0, 200.0),
        ("ENTRY-N", 700.0, 0.0),
        ("ENTRY-E", 1920.0, 400.0),
        ("ENTRY-S", 1200.0, 1080.0),
    ]
    .iter()
    .map(|&(name, x, y)| (name.to_string(), Waypoint::new(x, y, WaypointKind::Entry, scale)))
    .collect();

    let exits = [
        ("EXIT-N", 300.0, 0.0),
        ("EXIT-NE", 1920.0, 80.0),
        ("EXIT-W", 0.0, 620.0),
        ("EXIT-SE", 1920.0, 980.0),
    ]
    .iter()
    .map(|&(name, x, y)| (name.to_string(), Waypoint::new(x, y, WaypointKind::Exit, scale)))
    .collect();

    let map = WorldMap {
        airspace,
        entries,
        exits,
    };
    (map, vec![meridian(scale), kestrel(scale)])
}

fn meridian(scale: DisplayScale) -> AirportState {
    airport_state(
        "MERIDIAN",
        scale,
        &[(680.0, 260.0), (900.0, 40.0), (1120.0, 260.0), (900.0, 480.0)],
        &[(640.0, 560.0), (840.0, 560.0), (1040.0, 560.0), (1140.0, 560.0)],
        &[(1180.0, 600.0), (1220.0, 640.0), (1260.0, 680.0)],
        &[(1220.0, 760.0), (1100.0, 800.0), (600.0, 800.0)],
    )
}

fn kestrel(scale: DisplayScale) -> AirportState {
    airport_state(
        "KESTREL",
        scale,
        &[(80.0, 560.0), (300.0, 340.0), (520.0, 560.0), (300.0, 780.0)],
        &[(60.0, 860.0), (260.0, 860.0), (460.0, 860.0), (560.0, 860.0)],
        &[(600.0, 900.0), (640.0, 940.0), (680.0, 980.0)],
        &[(640.0, 1020.0), (520.0, 1040.0), (20.0, 1040.0)],
    )
}

fn airport_state(
    name: &str,
    scale: DisplayScale,
    entries: &[(f64, f64)],
    landing: &[(f64, f64)],
    parking: &[(f64, f64)],
    takeoff: &[(f64, f64)],
) -> AirportState {
    let wp = |&(x, y): &(f64, f64)| Waypoint::new(x, y, WaypointKind::Airport, scale);
    let parking_points: Vec<Waypoint> = parking.iter().map(wp).collect();
    AirportState {
        name: name.to_string(),
        initial_capacity: parking_points.len() as u32,
        capacity: parking_points.len() as u32,
        entry_points: entries.iter().map(wp).collect(),
        landing_points: landing.iter().map(wp).collect(),
        bays: vec![false; parking_points.len()],
        parking_points,
        takeoff_points: takeoff.iter().map(wp).collect(),
        landing_runway_busy: false,
        takeoff_runway_busy: false,
        taxi_speed: AIRPORT_TAXI_SPEED,
        managed: Vec::new(),
        departing: Vec::new(),
    }
}

/// Check an airport against the taxi state machine's shape requirements.
pub fn validate_airport(ap: &AirportState) -> Result<(), WorldConfigError> {
    let checks = [
        ("entry", ap.entry_points.len(), MIN_ENTRY_POINTS),
        ("landing", ap.landing_points.len(), MIN_LANDING_POINTS),
        ("parking", ap.parking_points.len(), 1),
        ("takeoff", ap.takeoff_points.len(), MIN_TAKEOFF_POINTS),
    ];
    for (sequence, actual, required) in checks {
        if actual < required {
            return Err(WorldConfigError::TooFewWaypoints {
                name: ap.name.clone(),
                sequence,
                required,
                actual,
            });
        }
    }
    if ap.bays.len() != ap.parking_points.len() {
        return Err(WorldConfigError::BayCountMismatch {
            name: ap.name.clone(),
            bays: ap.bays.len(),
            points: ap.parking_points.len(),
        });
    }
    Ok(())
}

/// The fix an arriving aircraft is routed to when its destination is
/// this airport: the first entry point of the holding cycle.
pub fn airport_fix(ap: &AirportState) -> Waypoint {
    Waypoint::at(ap.entry_points[0].position, WaypointKind::Airport)
}

/// Spawn a new flight: unique callsign, greedy route, difficulty-scaled
/// initial speed, low cruise flight level. A planning failure aborts the
/// creation — no entity is spawned.
#[allow(clippy::too_many_arguments)]
pub fn spawn_aircraft(
    world: &mut World,
    names: &mut NameRegistry,
    rng: &mut ChaCha8Rng,
    settings: &DifficultySettings,
    map: &WorldMap,
    origin: &Waypoint,
    origin_name: &str,
    destination: Waypoint,
    destination_name: &str,
) -> Result<(Entity, String), RouteError> {
    let route = find_route(origin, &destination, &map.airspace)?;
    let callsign = names.generate(rng);

    let current_target = route[0].position;
    let speed = BASE_CRUISE_SPEED * settings.speed_factor;
    let position = Position(Vec3::new(
        origin.position.x,
        origin.position.y,
        FLIGHT_LEVEL_LOW,
    ));
    let heading = position.bearing_to(&current_target);
    let velocity = Velocity::new(0.0, speed, 0.0).with_heading(heading);

    let plan = FlightPlan {
        route,
        current_stage: 0,
        current_target,
        destination,
        origin_name: origin_name.to_string(),
        destination_name: destination_name.to_string(),
    };
    let kinematics = FlightKinematics {
        initial_speed: speed,
        turn_speed: settings.turn_speed,
        altitude_rate: settings.altitude_rate,
        bearing_leniency: BEARING_LENIENCY,
    };

    tracing::info!(
        callsign = %callsign,
        origin = origin_name,
        destination = destination_name,
        "flight spawned"
    );

    let entity = world.spawn((
        FlightId {
            callsign: callsign.clone(),
        },
        position,
        velocity,
        kinematics,
        plan,
        FlightState::default(),
        ManualControl::default(),
        Score {
            points: INITIAL_SCORE,
        },
        Proximity::default(),
    ));
    Ok((entity, callsign))
}
