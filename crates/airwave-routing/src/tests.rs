use airwave_core::enums::WaypointKind;
use airwave_core::types::Vec3;
use airwave_core::waypoint::{DisplayScale, Waypoint};

use crate::planner::find_route;

fn airspace(x: f64, y: f64) -> Waypoint {
    Waypoint::new(x, y, WaypointKind::Airspace, DisplayScale::default())
}

fn exit(x: f64, y: f64) -> Waypoint {
    Waypoint::new(x, y, WaypointKind::Exit, DisplayScale::default())
}

#[test]
fn test_route_ends_at_destination() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(1000.0, 0.0);
    let pool = vec![airspace(250.0, 10.0), airspace(500.0, -10.0), airspace(750.0, 5.0)];

    let route = find_route(&origin, &dest, &pool).unwrap();
    assert!(!route.is_empty());
    assert_eq!(route.last().unwrap().position, dest.position);
}

#[test]
fn test_route_never_contains_origin() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(400.0, 400.0);
    let pool = vec![origin.clone(), airspace(200.0, 200.0)];

    let route = find_route(&origin, &dest, &pool).unwrap();
    assert!(route.iter().all(|w| w.position != origin.position));
}

#[test]
fn test_route_has_no_duplicate_positions() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(600.0, 0.0);
    let pool = vec![
        airspace(100.0, 50.0),
        airspace(200.0, -50.0),
        airspace(300.0, 40.0),
        airspace(450.0, -20.0),
    ];

    let route = find_route(&origin, &dest, &pool).unwrap();
    for (i, a) in route.iter().enumerate() {
        for b in route.iter().skip(i + 1) {
            assert_ne!(a.position, b.position);
        }
    }
}

/// Re-running the planner with identical inputs yields the identical route.
#[test]
fn test_planner_idempotent() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(800.0, 300.0);
    let pool = vec![
        airspace(150.0, 80.0),
        airspace(400.0, 120.0),
        airspace(600.0, 250.0),
        airspace(320.0, 300.0),
    ];

    let first = find_route(&origin, &dest, &pool).unwrap();
    let second = find_route(&origin, &dest, &pool).unwrap();
    assert_eq!(first, second);
}

/// Two candidates at identical cost: the one earlier in the pool wins.
#[test]
fn test_tie_break_first_encountered() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(200.0, 0.0);
    // Mirror images across the x-axis — identical hop and destination costs.
    let pool = vec![airspace(100.0, 50.0), airspace(100.0, -50.0)];

    let route = find_route(&origin, &dest, &pool).unwrap();
    assert_eq!(route[0].position, Vec3::new(100.0, 50.0, 0.0));
}

/// Non-airspace pool members are not routing candidates.
#[test]
fn test_non_airspace_pool_members_ignored() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(300.0, 0.0);
    let lure = Waypoint::new(150.0, 0.0, WaypointKind::Entry, DisplayScale::default());
    let pool = vec![lure.clone(), airspace(160.0, 40.0)];

    let route = find_route(&origin, &dest, &pool).unwrap();
    assert!(route.iter().all(|w| w.position != lure.position));
}

/// The destination-weighted cost steers the greedy choice: a hop slightly
/// farther from the current position but much closer to the destination
/// is preferred.
#[test]
fn test_destination_weight_steers_choice() {
    let origin = airspace(0.0, 0.0);
    let dest = exit(1000.0, 0.0);
    // Near hop pointing away from the destination vs. slightly farther
    // hop pointing toward it.
    let pool = vec![airspace(-90.0, 0.0), airspace(100.0, 0.0)];

    let route = find_route(&origin, &dest, &pool).unwrap();
    assert_eq!(route[0].position, Vec3::new(100.0, 0.0, 0.0));
}

/// A destination sharing the origin's position can never be selected.
#[test]
fn test_unreachable_destination_is_an_error() {
    let origin = airspace(50.0, 50.0);
    let dest = exit(50.0, 50.0);

    assert!(find_route(&origin, &dest, &[]).is_err());
}
