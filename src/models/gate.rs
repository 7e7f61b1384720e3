use serde::{Deserialize, Serialize};

use super::constants::{Direction, GemType};
use super::position::Coordinate;

/// Unordered pair of adjacent rooms, stored low-then-high so both sides of
/// a boundary look up the same gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GateKey {
    pub low: Coordinate,
    pub high: Coordinate,
}

impl GateKey {
    pub fn between(a: Coordinate, b: Coordinate) -> Self {
        if a <= b {
            GateKey { low: a, high: b }
        } else {
            GateKey { low: b, high: a }
        }
    }

    /// 0 for the low end, 1 for the high end.
    pub fn side_of(&self, coord: Coordinate) -> usize {
        if coord == self.low {
            0
        } else {
            1
        }
    }

    pub fn other(&self, coord: Coordinate) -> Coordinate {
        if coord == self.low {
            self.high
        } else {
            self.low
        }
    }
}

/// The boundary between two adjacent rooms. One entity per room pair, so
/// unlocking flips both sides in a single write.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub(crate) key: GateKey,
    pub(crate) deposited: u32,
    pub(crate) bound: Option<GemType>,
    pub(crate) unlocked: bool,
    /// Physical barrier state per side, indexed by `GateKey::side_of`.
    pub(crate) open: [bool; 2],
}

impl Gate {
    pub fn new(key: GateKey) -> Self {
        Gate {
            key,
            deposited: 0,
            bound: None,
            unlocked: false,
            open: [false, false],
        }
    }

    pub fn key(&self) -> GateKey {
        self.key
    }

    pub fn deposited(&self) -> u32 {
        self.deposited
    }

    pub fn bound(&self) -> Option<GemType> {
        self.bound
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_open_from(&self, coord: Coordinate) -> bool {
        self.open[self.key.side_of(coord)]
    }

    pub fn status(&self, required: u32) -> GateStatus {
        if self.unlocked {
            GateStatus::Unlocked
        } else if self.deposited >= required {
            GateStatus::Unlockable
        } else {
            GateStatus::Locked {
                deposited: self.deposited,
                required,
                bound: self.bound,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Locked {
        deposited: u32,
        required: u32,
        bound: Option<GemType>,
    },
    Unlockable,
    Unlocked,
}

/// A gate seen from one of its rooms. Read-only snapshot for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSide {
    pub owner: Coordinate,
    pub direction: Direction,
    pub neighbor: Coordinate,
    /// Gems needed, from the ring of the room on the far side.
    pub required: u32,
    pub deposited: u32,
    pub bound: Option<GemType>,
    pub unlocked: bool,
    /// Whether this room's barrier is down. Can be true without `unlocked`
    /// when the room was created next to an already-active neighbour.
    pub barrier_open: bool,
}

impl GateSide {
    pub fn index(&self) -> usize {
        self.direction.index()
    }

    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.deposited)
    }

    pub fn status(&self) -> GateStatus {
        if self.unlocked {
            GateStatus::Unlocked
        } else if self.deposited >= self.required {
            GateStatus::Unlockable
        } else {
            GateStatus::Locked {
                deposited: self.deposited,
                required: self.required,
                bound: self.bound,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_symmetric() {
        let a = Coordinate::new(0, 0, 0);
        let b = Coordinate::new(1, 0, 0);
        assert_eq!(GateKey::between(a, b), GateKey::between(b, a));
        let key = GateKey::between(b, a);
        assert_eq!(key.other(a), b);
        assert_eq!(key.other(b), a);
        assert_ne!(key.side_of(a), key.side_of(b));
    }

    #[test]
    fn status_progresses_with_deposits() {
        let mut gate = Gate::new(GateKey::between(
            Coordinate::ORIGIN,
            Coordinate::new(0, 0, 1),
        ));
        assert_eq!(
            gate.status(10),
            GateStatus::Locked {
                deposited: 0,
                required: 10,
                bound: None
            }
        );
        gate.deposited = 10;
        assert_eq!(gate.status(10), GateStatus::Unlockable);
        gate.unlocked = true;
        assert_eq!(gate.status(10), GateStatus::Unlocked);
    }
}
