//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Display ---

/// Reference design resolution. Fixed waypoints are authored against this
/// and remapped once at construction to the active resolution.
pub const REFERENCE_WIDTH: f64 = 1920.0;
pub const REFERENCE_HEIGHT: f64 = 1080.0;

// --- Flight levels ---

/// Low cruise flight level.
pub const FLIGHT_LEVEL_LOW: f64 = 28_000.0;

/// High cruise flight level.
pub const FLIGHT_LEVEL_HIGH: f64 = 30_000.0;

// --- Arrival / collision geometry ---

/// An aircraft has reached its current target within this horizontal radius.
pub const ARRIVAL_RADIUS: f64 = 4.0;
pub const ARRIVAL_RADIUS_SQ: f64 = ARRIVAL_RADIUS * ARRIVAL_RADIUS;

/// Physical body radius: two aircraft within this 3D distance have collided.
pub const COLLISION_RADIUS: f64 = 16.0;

// --- Separation rules (units, by difficulty tier) ---

pub const SEPARATION_EASY: f64 = 64.0;
pub const SEPARATION_MEDIUM: f64 = 96.0;
pub const SEPARATION_HARD: f64 = 128.0;

// --- Kinematics ---

/// Cruise speed before the difficulty multiplier (units per second).
pub const BASE_CRUISE_SPEED: f64 = 40.0;

/// Turn rate before the difficulty multiplier (radians per second).
pub const BASE_TURN_SPEED: f64 = 1.0;

/// Free-flight climb/descent rate before the difficulty multiplier
/// (altitude units per second).
pub const BASE_ALTITUDE_RATE: f64 = 250.0;

/// Dead band before heading corrections kick in (radians).
pub const BEARING_LENIENCY: f64 = 0.02;

// --- Scoring ---

/// Score an aircraft carries at spawn; penalties erode it, and the
/// remainder is banked into the session total on successful completion.
pub const INITIAL_SCORE: i32 = 100;

// --- Airport ---

/// Ground taxi speed (units per second).
pub const AIRPORT_TAXI_SPEED: f64 = 8.0;

/// Fraction of the landing runway over which descent completes.
pub const DESCENT_RUNWAY_FRACTION: f64 = 0.75;

/// Fraction of the takeoff runway covered before altitude starts rising.
pub const ASCENT_CLIMB_START_RATIO: f64 = 0.2;

/// Minimum waypoints per airport sequence. The landing run needs index 0
/// (descent start), index 2 (runway release) and a distinct last index
/// (bay scan); the takeoff run needs a distinct second-to-last index
/// (climb start).
pub const MIN_ENTRY_POINTS: usize = 2;
pub const MIN_LANDING_POINTS: usize = 4;
pub const MIN_TAKEOFF_POINTS: usize = 3;

// --- Route planner ---

/// Weight applied to the remaining distance to the destination when the
/// greedy planner scores a candidate hop.
pub const DESTINATION_WEIGHT: f64 = 0.5;

// --- Traffic generation ---

/// Ticks between scheduled arrivals (~15 seconds at 30 Hz).
pub const TRAFFIC_INTERVAL_TICKS: u64 = 450;

/// Active-aircraft cap for the traffic scheduler.
pub const TRAFFIC_MAX_ACTIVE: usize = 8;
