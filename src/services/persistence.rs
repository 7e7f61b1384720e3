//! Save/Load for progression state
//!
//! JSON via serde_json. The save format is self-contained: dedicated records
//! keep it decoupled from the in-memory types, and names (gems, stats, boost
//! ids) are stored as strings so unknown values degrade to warnings instead of
//! failing the whole load.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ProgressionConfig;
use crate::models::catalog::StatBoostCatalog;
use crate::models::constants::{GemType, StatType};
use crate::models::errors::{GameError, GameResult};
use crate::models::gate::{Gate, GateKey};
use crate::models::inventory::PlayerInventory;
use crate::models::position::Coordinate;
use crate::models::room_graph::RoomGraph;
use crate::models::stats::StatMap;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SAVE_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "default_version")]
    pub version: u32,
    pub rooms: Vec<RoomRecord>,
    pub inventory: BTreeMap<String, u32>,
    pub stats: BTreeMap<String, f32>,
    /// Deposit and barrier state. Absent in saves that predate it.
    #[serde(default)]
    pub gates: Vec<GateRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub coordinate: [i32; 3],
    pub active: bool,
    pub resource_type: Option<String>,
    pub stat_boost_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    pub rooms: [[i32; 3]; 2],
    pub deposited: u32,
    pub bound: Option<String>,
    pub unlocked: bool,
    pub open: [bool; 2],
}

/// State rebuilt from a save.
#[derive(Debug)]
pub struct LoadedState {
    pub graph: RoomGraph,
    pub inventory: PlayerInventory,
    /// Stats exactly as they were saved. Callers recompute from the graph.
    pub saved_stats: StatMap,
    /// Rooms whose saved boost id resolved to nothing.
    pub missing_boosts: Vec<Coordinate>,
}

/// Capture everything that must survive a scene change.
pub fn snapshot(graph: &RoomGraph, inventory: &PlayerInventory, stats: &StatMap) -> SaveData {
    let rooms = graph
        .rooms()
        .map(|room| RoomRecord {
            coordinate: room.coordinate().to_array(),
            active: room.is_active(),
            resource_type: room.resource_type().map(|gem| gem.name().to_string()),
            stat_boost_id: room.boost().map(|boost| boost.instance_id()),
        })
        .collect();

    let gates = graph
        .gate_states()
        .map(|gate| GateRecord {
            rooms: [gate.key().low.to_array(), gate.key().high.to_array()],
            deposited: gate.deposited(),
            bound: gate.bound().map(|gem| gem.name().to_string()),
            unlocked: gate.is_unlocked(),
            open: gate.open,
        })
        .collect();

    SaveData {
        version: SAVE_VERSION,
        rooms,
        inventory: inventory
            .iter()
            .map(|(gem, count)| (gem.name().to_string(), count))
            .collect(),
        stats: stats
            .iter()
            .map(|(stat, value)| (stat.name().to_string(), value))
            .collect(),
        gates,
    }
}

pub fn encode(data: &SaveData) -> GameResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(data)?)
}

pub fn save(graph: &RoomGraph, inventory: &PlayerInventory, stats: &StatMap) -> GameResult<Vec<u8>> {
    let data = snapshot(graph, inventory, stats);
    info!(
        rooms = data.rooms.len(),
        gates = data.gates.len(),
        "progression saved"
    );
    encode(&data)
}

pub fn decode(bytes: &[u8]) -> GameResult<SaveData> {
    let data: SaveData = serde_json::from_slice(bytes)?;
    if data.version != SAVE_VERSION {
        return Err(GameError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(data)
}

/// Rebuild graph and inventory from saved records.
///
/// Starts from a freshly bootstrapped graph. Saved rooms are created without
/// rolling, and their flags, gem types and boosts are set verbatim. A boost
/// id that resolves to nothing leaves the room without a reward. Gate
/// records are applied after every room exists, so saved barrier state
/// replaces whatever room creation opened.
pub fn restore(data: SaveData, config: &ProgressionConfig, catalog: StatBoostCatalog) -> LoadedState {
    let mut graph = RoomGraph::from_config(config, catalog);
    graph.bootstrap();

    let mut missing_boosts = Vec::new();
    for record in &data.rooms {
        let coord = Coordinate::from(record.coordinate);
        let resource_type = record.resource_type.as_deref().and_then(|name| {
            name.parse::<GemType>()
                .inspect_err(|e| warn!(%coord, error = %e, "dropping saved gem type"))
                .ok()
        });
        let boost = match &record.stat_boost_id {
            Some(id) => match graph.catalog().resolve(id) {
                Ok(boost) => Some(boost),
                Err(e) => {
                    warn!(%coord, error = %e, "stat boost lookup failed, room keeps no reward");
                    missing_boosts.push(coord);
                    None
                }
            },
            None => None,
        };
        graph.restore_room(coord, record.active, resource_type, boost);
    }

    for record in &data.gates {
        let a = Coordinate::from(record.rooms[0]);
        let b = Coordinate::from(record.rooms[1]);
        let key = GateKey::between(a, b);
        let mut open = record.open;
        if key.low != a {
            open.swap(0, 1);
        }
        let bound = record.bound.as_deref().and_then(|name| {
            name.parse::<GemType>()
                .inspect_err(|e| warn!(from = %a, to = %b, error = %e, "dropping saved gate gem type"))
                .ok()
        });
        if bound.is_none() && record.deposited > 0 {
            warn!(from = %a, to = %b, deposited = record.deposited, "saved gate holds gems of no known type, skipped");
            continue;
        }
        let gate = Gate {
            key,
            deposited: record.deposited,
            bound,
            unlocked: record.unlocked,
            open,
        };
        if !graph.restore_gate(gate) {
            warn!(from = %a, to = %b, "saved gate has no room, skipped");
        }
    }

    let active: Vec<Coordinate> = graph.active_rooms().map(|room| room.coordinate()).collect();
    for coord in active {
        let spawned = graph.expand_frontier(coord);
        if !spawned.is_empty() {
            warn!(%coord, count = spawned.len(), "save was missing frontier rooms");
        }
    }

    let mut inventory = PlayerInventory::new();
    for (name, count) in &data.inventory {
        match name.parse::<GemType>() {
            Ok(gem) => inventory.set(gem, *count),
            Err(e) => warn!(error = %e, "dropping saved inventory entry"),
        }
    }

    let saved_stats: StatMap = data
        .stats
        .iter()
        .filter_map(|(name, value)| match name.parse::<StatType>() {
            Ok(stat) => Some((stat, *value)),
            Err(e) => {
                warn!(error = %e, "dropping saved stat");
                None
            }
        })
        .collect();

    info!(
        rooms = graph.len(),
        active = graph.active_rooms().count(),
        missing_boosts = missing_boosts.len(),
        "progression restored"
    );

    LoadedState {
        graph,
        inventory,
        saved_stats,
        missing_boosts,
    }
}

/// Decode and restore. `catalog` should be the one the session was saved
/// with: it resolves boost ids and drives every later roll.
pub fn load(bytes: &[u8], config: &ProgressionConfig, catalog: StatBoostCatalog) -> GameResult<LoadedState> {
    let data = decode(bytes)?;
    Ok(restore(data, config, catalog))
}

pub fn save_to_path(path: &Path, bytes: &[u8]) -> GameResult<()> {
    fs::write(path, bytes)?;
    Ok(())
}

/// `Ok(None)` when there is no save yet.
pub fn load_from_path(path: &Path) -> GameResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constants::Direction;

    #[test]
    fn version_mismatch_is_rejected() {
        let graph = RoomGraph::bootstrapped(0);
        let mut data = snapshot(&graph, &PlayerInventory::new(), &StatMap::base());
        data.version = 99;
        let bytes = encode(&data).unwrap();
        assert!(matches!(
            decode(&bytes),
            Err(GameError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }

    #[test]
    fn saves_without_gates_still_load() {
        let json = br#"{
            "rooms": [
                {"coordinate": [0,0,0], "active": true, "resource_type": null, "stat_boost_id": null},
                {"coordinate": [1,0,0], "active": true, "resource_type": "RedGem", "stat_boost_id": "Armor-2.5-2.5"}
            ],
            "inventory": {"RedGem": 4},
            "stats": {"Armor": 7.5}
        }"#;
        let loaded = load(json, &ProgressionConfig::default(), StatBoostCatalog::default()).unwrap();
        let east = loaded.graph.get(Coordinate::new(1, 0, 0)).unwrap();
        assert!(east.is_active());
        assert_eq!(east.resource_type(), Some(GemType::RedGem));
        assert_eq!(east.boost().unwrap().value, 2.5);
        assert_eq!(loaded.inventory.count(GemType::RedGem), 4);
        assert_eq!(loaded.saved_stats.get(StatType::Armor), 7.5);
        assert!(loaded.graph.frontier_is_complete());
    }

    #[test]
    fn unresolvable_boost_falls_back_to_none() {
        let json = br#"{
            "rooms": [
                {"coordinate": [0,0,1], "active": false, "resource_type": null, "stat_boost_id": "Armor-7-9"},
                {"coordinate": [0,0,-1], "active": false, "resource_type": "OnyxGem", "stat_boost_id": "garbage"}
            ],
            "inventory": {"OnyxGem": 3},
            "stats": {}
        }"#;
        let loaded = load(json, &ProgressionConfig::default(), StatBoostCatalog::default()).unwrap();
        assert_eq!(loaded.missing_boosts.len(), 2);
        let north = loaded.graph.get(Coordinate::new(0, 0, 1)).unwrap();
        assert!(north.boost().is_none());
        let south = loaded.graph.get(Coordinate::new(0, 0, -1)).unwrap();
        assert!(south.resource_type().is_none());
        assert_eq!(loaded.inventory.iter().count(), 0);
    }

    #[test]
    fn gate_deposits_survive() {
        let mut graph = RoomGraph::bootstrapped(8);
        graph
            .deposit(Coordinate::ORIGIN, Direction::South, GemType::GreenGem, 6)
            .unwrap();
        let bytes = save(&graph, &PlayerInventory::new(), &StatMap::base()).unwrap();
        let loaded = load(&bytes, &ProgressionConfig::with_seed(8), StatBoostCatalog::default()).unwrap();
        let side = loaded.graph.gate(Coordinate::ORIGIN, Direction::South).unwrap();
        assert_eq!(side.deposited, 6);
        assert_eq!(side.bound, Some(GemType::GreenGem));
        let auto = loaded.graph.gate(Coordinate::new(0, 0, -1), Direction::North).unwrap();
        assert!(auto.barrier_open);
    }

    #[test]
    fn every_barrier_survives_growth() {
        let mut graph = RoomGraph::bootstrapped(3);
        let north = Coordinate::new(0, 0, 1);
        for (coord, dir) in [
            (Coordinate::ORIGIN, Direction::North),
            (Coordinate::ORIGIN, Direction::East),
            (north, Direction::North),
        ] {
            let required = graph.gate(coord, dir).unwrap().required;
            graph.deposit(coord, dir, GemType::RedGem, required).unwrap();
            graph.try_unlock(coord, dir).unwrap();
        }
        // (1,0,1) was spawned by the north room before east was active.
        let corner = Coordinate::new(1, 0, 1);
        assert!(!graph.gate(corner, Direction::South).unwrap().barrier_open);

        let bytes = save(&graph, &PlayerInventory::new(), &StatMap::base()).unwrap();
        let loaded = load(&bytes, &ProgressionConfig::with_seed(3), StatBoostCatalog::default()).unwrap();
        assert_eq!(loaded.graph.len(), graph.len());
        for room in graph.rooms() {
            for dir in Direction::ALL {
                assert_eq!(
                    loaded.graph.gate(room.coordinate(), dir),
                    graph.gate(room.coordinate(), dir),
                    "{} {:?}",
                    room.coordinate(),
                    dir
                );
            }
        }
    }

    #[test]
    fn gate_with_unknown_gem_is_skipped() {
        let json = br#"{
            "rooms": [],
            "inventory": {},
            "stats": {},
            "gates": [
                {"rooms": [[0,0,0],[1,0,0]], "deposited": 3, "bound": "OnyxGem", "unlocked": false, "open": [false, false]},
                {"rooms": [[0,0,0],[0,0,1]], "deposited": 2, "bound": "BlueGem", "unlocked": false, "open": [false, true]}
            ]
        }"#;
        let loaded = load(json, &ProgressionConfig::default(), StatBoostCatalog::default()).unwrap();
        let east = loaded.graph.gate(Coordinate::ORIGIN, Direction::East).unwrap();
        assert_eq!(east.deposited, 0);
        assert_eq!(east.bound, None);
        let north = loaded.graph.gate(Coordinate::ORIGIN, Direction::North).unwrap();
        assert_eq!(north.deposited, 2);
        assert_eq!(north.bound, Some(GemType::BlueGem));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.save");
        assert!(load_from_path(&path).unwrap().is_none());
        save_to_path(&path, b"{}").unwrap();
        assert_eq!(load_from_path(&path).unwrap().unwrap(), b"{}");
    }
}
