//! Tests for the shared vocabulary: serde round-trips, geometry, waypoints.

use std::str::FromStr;

use crate::commands::ControllerCommand;
use crate::constants::*;
use crate::enums::*;
use crate::events::{Alert, AudioEvent};
use crate::state::SimSnapshot;
use crate::types::{Position, SimTime, Vec3, Velocity};
use crate::waypoint::{DisplayScale, Waypoint};

/// Verify all enums round-trip through serde_json.
#[test]
fn test_status_serde() {
    let variants = vec![
        AircraftStatus::Normal,
        AircraftStatus::Waiting,
        AircraftStatus::Landing,
        AircraftStatus::Parked,
        AircraftStatus::Takeoff,
        AircraftStatus::Finished,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: AircraftStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn test_waypoint_kind_serde() {
    let variants = vec![
        WaypointKind::Airspace,
        WaypointKind::Entry,
        WaypointKind::Exit,
        WaypointKind::Airport,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: WaypointKind = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

/// Verify ControllerCommand round-trips through serde (tagged union).
#[test]
fn test_controller_command_serde() {
    let commands = vec![
        ControllerCommand::ToggleManualControl {
            callsign: "BAW123".into(),
        },
        ControllerCommand::TurnLeft {
            callsign: "BAW123".into(),
        },
        ControllerCommand::SetBearing {
            callsign: "BAW123".into(),
            bearing: 1.25,
        },
        ControllerCommand::DirectTo {
            callsign: "BAW123".into(),
            stage: 2,
        },
        ControllerCommand::ClearLanding {
            callsign: "BAW123".into(),
        },
        ControllerCommand::ClearTakeoff {
            callsign: "BAW123".into(),
        },
    ];
    for cmd in &commands {
        let json = serde_json::to_string(cmd).unwrap();
        let back: ControllerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(json, serde_json::to_string(&back).unwrap());
    }
}

#[test]
fn test_audio_event_serde() {
    let events = vec![
        AudioEvent::SeparationWarning {
            callsign: "DLH404".into(),
        },
        AudioEvent::Collision {
            callsign_a: "DLH404".into(),
            callsign_b: "KLM202".into(),
        },
        AudioEvent::FlightCompleted {
            callsign: "DLH404".into(),
            score: 95,
        },
    ];
    for event in &events {
        let json = serde_json::to_string(event).unwrap();
        let _back: AudioEvent = serde_json::from_str(&json).unwrap();
    }
}

#[test]
fn test_alert_serde() {
    let alert = Alert {
        level: AlertLevel::Critical,
        message: "collision over sector 4".to_string(),
        tick: 1000,
    };
    let json = serde_json::to_string(&alert).unwrap();
    let back: Alert = serde_json::from_str(&json).unwrap();
    assert_eq!(alert.message, back.message);
    assert_eq!(alert.tick, back.tick);
}

#[test]
fn test_snapshot_serde() {
    let snapshot = SimSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: SimSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.time.tick, back.time.tick);
    assert!(back.aircraft.is_empty());
}

// ---- Geometry ----

#[test]
fn test_vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, -2.0, 1.0);
    assert_eq!(a + b, Vec3::new(5.0, 0.0, 4.0));
    assert_eq!(a - b, Vec3::new(-3.0, 4.0, 2.0));
    assert_eq!(a.scale(2.0), Vec3::new(2.0, 4.0, 6.0));
}

#[test]
fn test_vec3_magnitude() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!((v.magnitude() - 5.0).abs() < 1e-10);
    assert!((v.magnitude_squared() - 25.0).abs() < 1e-10);
}

#[test]
fn test_vec3_normalized() {
    let v = Vec3::new(0.0, 10.0, 0.0).normalized();
    assert_eq!(v, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_vec3_angle_between() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    assert!((x.angle_between(&y) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    assert!(x.angle_between(&x).abs() < 1e-10);
}

/// Exact component equality — no epsilon.
#[test]
fn test_vec3_exact_equality() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
    assert_ne!(a, Vec3::new(1.0 + 1e-12, 2.0, 3.0));
}

#[test]
fn test_position_bearing() {
    let origin = Position::new(0.0, 0.0, 0.0);

    // Due North (positive Y)
    assert!(origin.bearing_to(&Vec3::new(0.0, 100.0, 0.0)).abs() < 1e-10);

    // Due East (positive X)
    let east = origin.bearing_to(&Vec3::new(100.0, 0.0, 0.0));
    assert!((east - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
}

#[test]
fn test_velocity_heading_roundtrip() {
    let v = Velocity::new(10.0, 0.0, -3.0);
    let rotated = v.with_heading(0.0);
    assert!((rotated.0.x).abs() < 1e-10);
    assert!((rotated.0.y - 10.0).abs() < 1e-10);
    // Vertical rate preserved
    assert!((rotated.0.z + 3.0).abs() < 1e-10);
}

#[test]
fn test_velocity_with_horizontal_speed() {
    let v = Velocity::new(3.0, 4.0, 1.0);
    let slowed = v.with_horizontal_speed(2.5);
    assert!((slowed.horizontal_speed() - 2.5).abs() < 1e-10);
    assert!((slowed.heading() - v.heading()).abs() < 1e-10);
}

// ---- Waypoints ----

/// Non-airspace waypoints are remapped through the display scale once.
#[test]
fn test_waypoint_display_remap() {
    let scale = DisplayScale { x: 0.5, y: 2.0 };
    let fixed = Waypoint::new(100.0, 100.0, WaypointKind::Entry, scale);
    assert_eq!(fixed.position, Vec3::new(50.0, 200.0, 0.0));

    let airspace = Waypoint::new(100.0, 100.0, WaypointKind::Airspace, scale);
    assert_eq!(airspace.position, Vec3::new(100.0, 100.0, 0.0));
}

#[test]
fn test_waypoint_cost_symmetric() {
    let scale = DisplayScale::default();
    let a = Waypoint::new(0.0, 0.0, WaypointKind::Airspace, scale);
    let b = Waypoint::new(3.0, 4.0, WaypointKind::Airspace, scale);
    assert!((b.cost(a.position) - 5.0).abs() < 1e-10);
    assert!((Waypoint::cost_between(&a, &b) - Waypoint::cost_between(&b, &a)).abs() < 1e-10);
}

// ---- Difficulty ----

#[test]
fn test_difficulty_settings() {
    assert_eq!(Difficulty::Easy.settings().separation, SEPARATION_EASY);
    assert_eq!(Difficulty::Medium.settings().separation, SEPARATION_MEDIUM);
    assert_eq!(Difficulty::Hard.settings().separation, SEPARATION_HARD);
    assert_eq!(Difficulty::Easy.settings().speed_factor, 1.0);
    assert_eq!(Difficulty::Medium.settings().speed_factor, 2.0);
    assert_eq!(Difficulty::Hard.settings().speed_factor, 3.0);
}

/// An unknown tier fails loudly instead of silently defaulting.
#[test]
fn test_difficulty_parse() {
    assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
    assert_eq!(Difficulty::from_str("Easy").unwrap(), Difficulty::Easy);
    assert!(Difficulty::from_str("brutal").is_err());
}

// ---- Time ----

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..30 {
        time.advance();
    }
    assert_eq!(time.tick, 30);
    // 30 ticks at 30Hz = 1 second
    assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
}
