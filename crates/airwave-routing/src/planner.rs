//! Greedy nearest-plus-destination-weighted route construction.
//!
//! Deliberately not shortest-path: each hop minimizes the local cost
//! `cost(current -> candidate) + 0.5 * cost(candidate -> destination)`,
//! so routes can be sub-optimal. Ties resolve to the first encountered
//! minimum, which makes the result deterministic for a fixed pool order.

use thiserror::Error;

use airwave_core::constants::DESTINATION_WEIGHT;
use airwave_core::enums::WaypointKind;
use airwave_core::waypoint::Waypoint;

/// Planning failure. Fatal to the aircraft being created — never
/// silently skipped.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no reachable waypoint toward the destination at ({x}, {y})")]
    Unreachable { x: f64, y: f64 },
}

/// Build an ordered route from `origin` to `destination` over `pool`.
///
/// Candidates are the Airspace-kind members of the pool plus the
/// destination itself (appended if no pool member shares its position).
/// The output never includes the origin and always ends with a waypoint
/// at the destination's exact position. Idempotent for fixed inputs.
pub fn find_route(
    origin: &Waypoint,
    destination: &Waypoint,
    pool: &[Waypoint],
) -> Result<Vec<Waypoint>, RouteError> {
    let mut candidates: Vec<Waypoint> = pool
        .iter()
        .filter(|w| w.kind == WaypointKind::Airspace)
        .cloned()
        .collect();
    if !candidates
        .iter()
        .any(|w| w.position == destination.position)
    {
        candidates.push(destination.clone());
    }

    let mut route: Vec<Waypoint> = Vec::new();
    let mut current = origin.position;

    loop {
        let mut cheapest: Option<usize> = None;
        let mut cheapest_cost = f64::INFINITY;

        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.position == origin.position {
                continue;
            }
            if route.iter().any(|w| w.position == candidate.position) {
                continue;
            }
            let cost = candidate.cost(current)
                + DESTINATION_WEIGHT * Waypoint::cost_between(candidate, destination);
            // First encountered minimum wins.
            if cost < cheapest_cost {
                cheapest_cost = cost;
                cheapest = Some(i);
            }
        }

        let Some(i) = cheapest else {
            return Err(RouteError::Unreachable {
                x: destination.position.x,
                y: destination.position.y,
            });
        };

        let chosen = candidates[i].clone();
        current = chosen.position;
        let done = chosen.position == destination.position;
        route.push(chosen);
        if done {
            return Ok(route);
        }
    }
}
