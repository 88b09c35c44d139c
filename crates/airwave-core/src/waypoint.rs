//! Fixed waypoints: routing nodes, boundary points and airport sequence points.

use serde::{Deserialize, Serialize};

use crate::constants::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::enums::WaypointKind;
use crate::types::Vec3;

/// Ratio of the active display resolution to the reference design
/// resolution. Fixed non-airspace waypoints are remapped through this
/// exactly once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayScale {
    pub x: f64,
    pub y: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl DisplayScale {
    pub fn ratio(actual_width: f64, actual_height: f64) -> Self {
        Self {
            x: actual_width / REFERENCE_WIDTH,
            y: actual_height / REFERENCE_HEIGHT,
        }
    }
}

/// An immutable-position, typed node used both as a routing graph vertex
/// and as a named airspace landmark.
///
/// Routes detect "aircraft has reached waypoint N" by position equality,
/// so two waypoints must never share a position unless they are meant to
/// be interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vec3,
    pub kind: WaypointKind,
}

impl Waypoint {
    /// Construct at design-resolution coordinates. Airspace points are
    /// assumed pre-placed at design resolution; every other kind is
    /// remapped through the display scale.
    pub fn new(x: f64, y: f64, kind: WaypointKind, scale: DisplayScale) -> Self {
        let position = if kind == WaypointKind::Airspace {
            Vec3::new(x, y, 0.0)
        } else {
            Vec3::new(x * scale.x, y * scale.y, 0.0)
        };
        Self { position, kind }
    }

    /// Construct directly at a known position, bypassing the remap.
    /// Used for synthetic origins when replanning from mid-air.
    pub fn at(position: Vec3, kind: WaypointKind) -> Self {
        Self {
            position: Vec3::new(position.x, position.y, 0.0),
            kind,
        }
    }

    /// Planner edge cost: Euclidean distance from `from` to this waypoint.
    pub fn cost(&self, from: Vec3) -> f64 {
        (self.position - from).magnitude()
    }

    /// Symmetric pairwise cost between two waypoints.
    pub fn cost_between(a: &Waypoint, b: &Waypoint) -> f64 {
        b.cost(a.position)
    }
}
