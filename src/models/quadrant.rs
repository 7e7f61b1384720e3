use serde::{Deserialize, Serialize};

/// Horizontal-plane region used to pick which boost table a room rolls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    NorthEast,
    EastSouth,
    SouthWest,
    NorthWest,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::EastSouth,
        Quadrant::SouthWest,
        Quadrant::NorthWest,
    ];

    /// Zero on either axis counts as the non-negative side.
    pub fn of(x: i32, z: i32) -> Quadrant {
        match (x >= 0, z >= 0) {
            (true, true) => Quadrant::NorthEast,
            (false, true) => Quadrant::NorthWest,
            (true, false) => Quadrant::EastSouth,
            (false, false) => Quadrant::SouthWest,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}
