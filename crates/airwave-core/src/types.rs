//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D vector in display units.
/// x = East, y = North, z = altitude (feet-equivalent units).
///
/// Equality is exact component equality — route bookkeeping relies on
/// waypoint positions comparing equal, so no epsilon is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn scale(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Unit vector in the same direction.
    ///
    /// Precondition: non-zero magnitude. Normalizing a zero vector is a
    /// caller error; the components would be NaN.
    pub fn normalized(&self) -> Vec3 {
        let mag = self.magnitude();
        debug_assert!(mag > 0.0, "normalized() called on a zero vector");
        self.scale(1.0 / mag)
    }

    /// Angle between two vectors in radians (0..=PI).
    ///
    /// Precondition: both vectors non-zero.
    pub fn angle_between(&self, other: &Vec3) -> f64 {
        let mags = self.magnitude() * other.magnitude();
        debug_assert!(mags > 0.0, "angle_between() called on a zero vector");
        (self.dot(other) / mags).clamp(-1.0, 1.0).acos()
    }

    /// Squared distance ignoring altitude. Arrival checks use this —
    /// cruise altitude dwarfs the horizontal scale, so a 3D arrival
    /// check against ground-level waypoints could never trigger.
    pub fn horizontal_distance_squared(&self, other: &Vec3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn horizontal_distance(&self, other: &Vec3) -> f64 {
        self.horizontal_distance_squared(other).sqrt()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Position component (meters-equivalent display units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Velocity component (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// 3D range to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        (other.0 - self.0).magnitude()
    }

    /// Squared 3D range — the separation scan works on squared distances.
    pub fn range_squared_to(&self, other: &Position) -> f64 {
        (other.0 - self.0).magnitude_squared()
    }

    /// Bearing to a point in radians (0 = North, clockwise).
    pub fn bearing_to(&self, target: &Vec3) -> f64 {
        let dx = target.x - self.0.x;
        let dy = target.y - self.0.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vec3::new(x, y, z))
    }

    pub fn speed(&self) -> f64 {
        self.0.magnitude()
    }

    pub fn horizontal_speed(&self) -> f64 {
        (self.0.x * self.0.x + self.0.y * self.0.y).sqrt()
    }

    /// Heading in radians (0 = North, clockwise).
    pub fn heading(&self) -> f64 {
        self.0.x.atan2(self.0.y).rem_euclid(std::f64::consts::TAU)
    }

    /// Same horizontal speed and vertical rate, new heading.
    pub fn with_heading(&self, heading: f64) -> Velocity {
        let h = self.horizontal_speed();
        Velocity::new(h * heading.sin(), h * heading.cos(), self.0.z)
    }

    /// Rotate the horizontal component by a signed angle (positive = clockwise).
    pub fn rotated(&self, delta: f64) -> Velocity {
        self.with_heading(self.heading() + delta)
    }

    /// Same heading and vertical rate, new horizontal speed.
    pub fn with_horizontal_speed(&self, speed: f64) -> Velocity {
        let h = self.horizontal_speed();
        if h <= f64::EPSILON {
            return Velocity::new(0.0, speed, self.0.z);
        }
        let factor = speed / h;
        Velocity::new(self.0.x * factor, self.0.y * factor, self.0.z)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
