//! Room graph
//!
//! Owns every instantiated room and the gates between them. Rooms are
//! created lazily: each active room always has its four neighbours
//! materialized, one ring beyond the active region.

mod frontier;
mod unlock;

use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ProgressionConfig, RewardPolicy};

use super::catalog::StatBoostCatalog;
use super::constants::{Direction, GemType, GEMS_PER_RING};
use super::errors::{GameError, GameResult};
use super::gate::{Gate, GateKey, GateSide};
use super::position::Coordinate;
use super::room::Room;
use super::stat_boost::StatBoost;

pub use unlock::UnlockOutcome;

/// Salts for [`RoomGraph::roll_rng`].
const ROOM_ROLL: u64 = 0;
const UNLOCK_REROLL: u64 = 1;

pub struct RoomGraph {
    rooms: BTreeMap<Coordinate, Room>,
    gates: BTreeMap<GateKey, Gate>,
    catalog: StatBoostCatalog,
    gems_per_ring: u32,
    reward_policy: RewardPolicy,
    seed: u64,
}

impl RoomGraph {
    /// An empty graph. Call [`RoomGraph::bootstrap`] to place the origin.
    pub fn new(seed: u64) -> Self {
        Self::with_catalog(seed, StatBoostCatalog::default())
    }

    pub fn with_catalog(seed: u64, catalog: StatBoostCatalog) -> Self {
        RoomGraph {
            rooms: BTreeMap::new(),
            gates: BTreeMap::new(),
            catalog,
            gems_per_ring: GEMS_PER_RING,
            reward_policy: RewardPolicy::Keep,
            seed,
        }
    }

    pub fn from_config(config: &ProgressionConfig, catalog: StatBoostCatalog) -> Self {
        let mut graph = Self::with_catalog(config.seed, catalog);
        graph.gems_per_ring = config.gems_per_ring;
        graph.reward_policy = config.reward_policy;
        graph
    }

    /// Origin room plus its first ring of frontier.
    pub fn bootstrapped(seed: u64) -> Self {
        let mut graph = Self::new(seed);
        graph.bootstrap();
        graph
    }

    pub fn bootstrap(&mut self) {
        self.ensure_room(Coordinate::ORIGIN, true);
        self.expand_frontier(Coordinate::ORIGIN);
    }

    // ========== Accessor Methods ==========

    pub fn get(&self, coord: Coordinate) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.rooms.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> + Clone + '_ {
        self.rooms.values()
    }

    /// Active rooms. Calling again restarts the sequence; callers must not
    /// depend on the order.
    pub fn active_rooms(&self) -> impl Iterator<Item = &Room> + Clone + '_ {
        self.rooms.values().filter(|room| room.is_active())
    }

    pub fn catalog(&self) -> &StatBoostCatalog {
        &self.catalog
    }

    pub fn gems_per_ring(&self) -> u32 {
        self.gems_per_ring
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reward_policy(&self) -> RewardPolicy {
        self.reward_policy
    }

    /// Gems a gate leading into `far` requires.
    pub fn required_for(&self, far: Coordinate) -> u32 {
        self.gems_per_ring.saturating_mul(far.ring_distance())
    }

    pub fn gate(&self, coord: Coordinate, direction: Direction) -> Option<GateSide> {
        if !self.contains(coord) {
            return None;
        }
        let neighbor = coord.neighbor(direction);
        let gate = self.gates.get(&GateKey::between(coord, neighbor))?;
        Some(GateSide {
            owner: coord,
            direction,
            neighbor,
            required: self.required_for(neighbor),
            deposited: gate.deposited,
            bound: gate.bound,
            unlocked: gate.unlocked,
            barrier_open: gate.is_open_from(coord),
        })
    }

    /// All four gates of a room, in direction-index order.
    pub fn gates(&self, coord: Coordinate) -> Vec<GateSide> {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.gate(coord, *dir))
            .collect()
    }

    pub fn gate_states(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gates.values()
    }

    /// Every active room has all four neighbours instantiated.
    pub fn frontier_is_complete(&self) -> bool {
        self.active_rooms().all(|room| {
            Direction::ALL
                .iter()
                .all(|dir| self.contains(room.coordinate().neighbor(*dir)))
        })
    }

    // ========== End Accessor Methods ==========

    /// Generator for one roll at `coord`.
    ///
    /// Seeded from the graph seed, the coordinate and `salt` only, so a roll
    /// never depends on which rooms were created before it. A reloaded graph
    /// keeps rolling exactly what the saved session would have.
    pub(crate) fn roll_rng(&self, coord: Coordinate, salt: u64) -> StdRng {
        let parts = [coord.x, coord.y, coord.z].map(|v| u64::from(v as u32));
        let mixed = parts
            .into_iter()
            .chain([salt])
            .fold(mix64(self.seed), |acc, part| mix64(acc ^ part));
        StdRng::seed_from_u64(mixed)
    }

    fn room_or_err(&self, coord: Coordinate) -> GameResult<&Room> {
        self.rooms.get(&coord).ok_or(GameError::RoomNotFound(coord))
    }

    fn gate_or_err(&self, key: GateKey) -> GameResult<&Gate> {
        self.gates.get(&key).ok_or(GameError::RoomNotFound(key.high))
    }

    /// Rebuild a room from saved state without rolling a reward.
    pub(crate) fn restore_room(
        &mut self,
        coord: Coordinate,
        active: bool,
        resource_type: Option<GemType>,
        boost: Option<StatBoost>,
    ) {
        if !self.contains(coord) {
            self.insert_room(coord, false, None);
        }
        if let Some(room) = self.rooms.get_mut(&coord) {
            room.restore(active, resource_type, boost);
        }
    }

    /// Overwrite a gate from saved state. Returns false when no room on
    /// either side exists.
    pub(crate) fn restore_gate(&mut self, gate: Gate) -> bool {
        match self.gates.get_mut(&gate.key) {
            Some(existing) => {
                *existing = gate;
                true
            }
            None => false,
        }
    }
}

// splitmix64 finalizer
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// Custom Debug: counts only
impl fmt::Debug for RoomGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RoomGraph")
            .field("rooms", &self.rooms.len())
            .field("active", &self.active_rooms().count())
            .field("gates", &self.gates.len())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
