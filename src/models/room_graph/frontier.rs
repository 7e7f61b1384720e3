use tracing::debug;

use super::{RoomGraph, ROOM_ROLL};
use crate::models::constants::Direction;
use crate::models::gate::{Gate, GateKey};
use crate::models::position::Coordinate;
use crate::models::room::Room;
use crate::models::stat_boost::StatBoost;

impl RoomGraph {
    /// Return the room at `coord`, creating it if needed.
    ///
    /// An existing room only ever gains activity here: `active` becomes
    /// `active || initially_active`. A new room other than the origin gets
    /// its reward rolled immediately.
    pub fn ensure_room(&mut self, coord: Coordinate, initially_active: bool) -> &Room {
        if let Some(room) = self.rooms.get_mut(&coord) {
            if initially_active && !room.is_active() {
                room.activate();
                debug!(%coord, "room activated");
            }
        } else {
            let boost = if coord.is_origin() {
                None
            } else {
                let mut rng = self.roll_rng(coord, ROOM_ROLL);
                self.catalog
                    .roll(coord.quadrant(), coord.ring_distance(), &mut rng)
            };
            self.insert_room(coord, initially_active, boost);
        }
        &self.rooms[&coord]
    }

    /// Materialize any missing neighbours of `coord`. Returns the rooms that
    /// were created.
    pub fn expand_frontier(&mut self, coord: Coordinate) -> Vec<Coordinate> {
        let mut spawned = Vec::new();
        for dir in Direction::ALL {
            let neighbor = coord.neighbor(dir);
            if !self.contains(neighbor) {
                self.ensure_room(neighbor, false);
                spawned.push(neighbor);
            }
        }
        if !spawned.is_empty() {
            debug!(%coord, count = spawned.len(), "frontier expanded");
        }
        spawned
    }

    /// Place a new room and wire its four gates. A side facing an already
    /// active neighbour opens straight away.
    pub(super) fn insert_room(&mut self, coord: Coordinate, active: bool, boost: Option<StatBoost>) {
        let room = Room::new(coord, active, boost);
        debug!(
            %coord,
            active = room.is_active(),
            quadrant = ?room.quadrant(),
            ring = room.ring(),
            boost = ?room.boost(),
            "room created"
        );
        self.rooms.insert(coord, room);

        for dir in Direction::ALL {
            let neighbor = coord.neighbor(dir);
            let key = GateKey::between(coord, neighbor);
            let neighbor_active = self.rooms.get(&neighbor).is_some_and(Room::is_active);
            let gate = self.gates.entry(key).or_insert_with(|| Gate::new(key));
            if neighbor_active && !gate.open[key.side_of(coord)] {
                gate.open[key.side_of(coord)] = true;
                debug!(%coord, ?dir, "gate opened toward active neighbour");
            }
        }
    }
}
