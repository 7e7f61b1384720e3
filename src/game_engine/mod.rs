//! Progression engine
//!
//! Owns the room graph, the player's inventory and stats, and routes the
//! player's actions through them. Presentation code polls
//! [`Progression::take_stats_changed`] instead of subscribing to events.

use std::path::Path;

use tracing::{info, warn};

use crate::config::ProgressionConfig;
use crate::models::catalog::StatBoostCatalog;
use crate::models::constants::{Direction, GemType};
use crate::models::errors::GameResult;
use crate::models::gate::GateSide;
use crate::models::inventory::PlayerInventory;
use crate::models::position::Coordinate;
use crate::models::room::Room;
use crate::models::room_graph::{RoomGraph, UnlockOutcome};
use crate::models::stats::StatMap;
use crate::services::persistence;
use crate::services::progression::ProgressionAggregator;

#[derive(Debug)]
pub struct Progression {
    config: ProgressionConfig,
    graph: RoomGraph,
    inventory: PlayerInventory,
    aggregator: ProgressionAggregator,
    stats: StatMap,
    stats_changed: bool,
}

impl Progression {
    /// A fresh session: origin room, first ring of frontier, starting gems.
    pub fn new(config: ProgressionConfig) -> Self {
        Self::with_catalog(config, StatBoostCatalog::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ProgressionConfig::with_seed(seed))
    }

    pub fn with_catalog(config: ProgressionConfig, catalog: StatBoostCatalog) -> Self {
        let mut graph = RoomGraph::from_config(&config, catalog);
        graph.bootstrap();
        let inventory = PlayerInventory::with_counts(config.starting_gems.clone());
        Self::assemble(config, graph, inventory)
    }

    fn assemble(config: ProgressionConfig, graph: RoomGraph, inventory: PlayerInventory) -> Self {
        let aggregator = ProgressionAggregator::new(config.base_stat_map());
        let stats = aggregator.recompute(graph.active_rooms());
        Progression {
            config,
            graph,
            inventory,
            aggregator,
            stats,
            stats_changed: true,
        }
    }

    // ========== Accessor Methods ==========

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn inventory(&self) -> &PlayerInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut PlayerInventory {
        &mut self.inventory
    }

    pub fn stats(&self) -> &StatMap {
        &self.stats
    }

    pub fn room(&self, coord: Coordinate) -> Option<&Room> {
        self.graph.get(coord)
    }

    pub fn gate(&self, coord: Coordinate, direction: Direction) -> Option<GateSide> {
        self.graph.gate(coord, direction)
    }

    /// Cell containing a world-space position.
    pub fn coordinate_at(&self, position: [f32; 3]) -> Coordinate {
        Coordinate::from_world(position, self.config.cell_size)
    }

    // ========== End Accessor Methods ==========

    /// Move gems from the inventory into a gate. Either both the inventory
    /// and the gate change, or neither does.
    pub fn deposit(
        &mut self,
        coord: Coordinate,
        direction: Direction,
        gem: GemType,
        amount: u32,
    ) -> GameResult<GateSide> {
        self.inventory.ensure_available(gem, amount)?;
        let side = self.graph.deposit(coord, direction, gem, amount)?;
        self.inventory.spend(gem, amount)?;
        Ok(side)
    }

    /// [`Progression::deposit`] with raw input: a gate index and a gem name.
    pub fn deposit_named(
        &mut self,
        coord: Coordinate,
        gate_index: usize,
        gem: &str,
        amount: u32,
    ) -> GameResult<GateSide> {
        let direction = Direction::try_from(gate_index)?;
        let gem: GemType = gem.parse()?;
        self.deposit(coord, direction, gem, amount)
    }

    /// Unlock a gate and refresh stats.
    pub fn try_unlock(&mut self, coord: Coordinate, direction: Direction) -> GameResult<UnlockOutcome> {
        let outcome = self.graph.try_unlock(coord, direction)?;
        self.recompute_stats();
        Ok(outcome)
    }

    /// Rebuild stats from the active rooms. Returns true if anything moved.
    pub fn recompute_stats(&mut self) -> bool {
        let stats = self.aggregator.recompute(self.graph.active_rooms());
        let changed = !stats.bitwise_eq(&self.stats);
        self.stats = stats;
        self.stats_changed |= changed;
        changed
    }

    /// Whether stats changed since the last call. Clears the flag.
    pub fn take_stats_changed(&mut self) -> bool {
        std::mem::take(&mut self.stats_changed)
    }

    pub fn save(&self) -> GameResult<Vec<u8>> {
        persistence::save(&self.graph, &self.inventory, &self.stats)
    }

    /// Restore a session from [`Progression::save`] output, using the
    /// built-in catalog.
    pub fn load(bytes: &[u8], config: ProgressionConfig) -> GameResult<Self> {
        Self::load_with_catalog(bytes, config, StatBoostCatalog::default())
    }

    /// Restore a session that was built with [`Progression::with_catalog`].
    pub fn load_with_catalog(
        bytes: &[u8],
        config: ProgressionConfig,
        catalog: StatBoostCatalog,
    ) -> GameResult<Self> {
        let loaded = persistence::load(bytes, &config, catalog)?;
        let progression = Self::assemble(config, loaded.graph, loaded.inventory);
        if !progression.stats.bitwise_eq(&loaded.saved_stats) {
            warn!("saved stats differ from recomputed stats, using recomputed");
        }
        Ok(progression)
    }

    pub fn save_to_path(&self, path: &Path) -> GameResult<()> {
        persistence::save_to_path(path, &self.save()?)
    }

    /// `Ok(None)` when there is no save file yet.
    pub fn load_from_path(
        path: &Path,
        config: ProgressionConfig,
        catalog: StatBoostCatalog,
    ) -> GameResult<Option<Self>> {
        match persistence::load_from_path(path)? {
            Some(bytes) => Self::load_with_catalog(&bytes, config, catalog).map(Some),
            None => Ok(None),
        }
    }

    /// Load the save at `path`, or start fresh if there is none.
    pub fn load_or_new(
        path: &Path,
        config: ProgressionConfig,
        catalog: StatBoostCatalog,
    ) -> GameResult<Self> {
        match Self::load_from_path(path, config.clone(), catalog.clone())? {
            Some(progression) => Ok(progression),
            None => {
                info!(path = %path.display(), "no save found, starting fresh");
                Ok(Self::with_catalog(config, catalog))
            }
        }
    }
}
