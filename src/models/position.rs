use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::Direction;
use super::quadrant::Quadrant;

/// A room's cell in the grid. Integer cell indices, never world units, so
/// rooms can be keyed exactly. (0,0,0) is the origin room.
/// X increases east, Z increases north, Y is the floor level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Coordinate { x, y, z }
    }

    /// Snap a world-space position to its cell. Positions are rounded to the
    /// nearest cell, so (9.99, 0, 10.01) with a cell size of 10 lands on (1,0,1).
    pub fn from_world(position: [f32; 3], cell_size: f32) -> Self {
        Coordinate {
            x: (position[0] / cell_size).round() as i32,
            y: (position[1] / cell_size).round() as i32,
            z: (position[2] / cell_size).round() as i32,
        }
    }

    pub fn to_world(self, cell_size: f32) -> [f32; 3] {
        [
            self.x as f32 * cell_size,
            self.y as f32 * cell_size,
            self.z as f32 * cell_size,
        ]
    }

    pub fn is_origin(&self) -> bool {
        *self == Coordinate::ORIGIN
    }

    /// Chebyshev distance from the origin over the horizontal axes.
    pub fn ring_distance(&self) -> u32 {
        self.x.unsigned_abs().max(self.z.unsigned_abs())
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::of(self.x, self.z)
    }

    pub fn neighbor(&self, direction: Direction) -> Coordinate {
        let (dx, dz) = direction.offset();
        Coordinate {
            x: self.x + dx,
            y: self.y,
            z: self.z + dz,
        }
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for Coordinate {
    fn from(a: [i32; 3]) -> Self {
        Coordinate::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
