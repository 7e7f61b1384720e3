use std::collections::BTreeMap;

use crate::models::constants::StatType;
use crate::models::room::Room;
use crate::models::stats::StatMap;

/// Folds base stats with the rewards of active rooms.
#[derive(Debug, Clone, Default)]
pub struct ProgressionAggregator {
    base: StatMap,
}

impl ProgressionAggregator {
    pub fn new(base: StatMap) -> Self {
        ProgressionAggregator { base }
    }

    pub fn base(&self) -> &StatMap {
        &self.base
    }

    /// Base stats plus every active room's boost.
    ///
    /// Per-stat contributions are sorted before summing, so any ordering of
    /// `rooms` produces bit-identical results. Inactive rooms are skipped.
    pub fn recompute<'a, I>(&self, rooms: I) -> StatMap
    where
        I: IntoIterator<Item = &'a Room>,
    {
        let mut contributions: BTreeMap<StatType, Vec<f32>> = BTreeMap::new();
        for room in rooms.into_iter().filter(|room| room.is_active()) {
            if let Some(boost) = room.boost() {
                contributions.entry(boost.stat).or_default().push(boost.value);
            }
        }

        let mut stats = self.base.clone();
        for (stat, mut values) in contributions {
            values.sort_by(f32::total_cmp);
            let total: f32 = values.iter().sum();
            stats.add(stat, total);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constants::{Direction, GemType};
    use crate::models::position::Coordinate;
    use crate::models::room_graph::RoomGraph;

    fn grown_graph() -> RoomGraph {
        let mut graph = RoomGraph::bootstrapped(17);
        for dir in Direction::ALL {
            graph
                .deposit(Coordinate::ORIGIN, dir, GemType::RedGem, 10)
                .unwrap();
            graph.try_unlock(Coordinate::ORIGIN, dir).unwrap();
        }
        graph
    }

    #[test]
    fn base_only_when_nothing_unlocked() {
        let graph = RoomGraph::bootstrapped(17);
        let aggregator = ProgressionAggregator::default();
        let stats = aggregator.recompute(graph.active_rooms());
        assert!(stats.bitwise_eq(&StatMap::base()));
    }

    #[test]
    fn adds_each_active_reward() {
        let graph = grown_graph();
        let aggregator = ProgressionAggregator::default();
        let stats = aggregator.recompute(graph.active_rooms());

        let mut expected = StatMap::base();
        for room in graph.active_rooms() {
            if let Some(boost) = room.boost() {
                expected.add(boost.stat, boost.value);
            }
        }
        for stat in StatType::ALL {
            assert!((stats.get(stat) - expected.get(stat)).abs() < 1e-4);
        }
    }

    #[test]
    fn order_does_not_matter() {
        let graph = grown_graph();
        let aggregator = ProgressionAggregator::default();
        let forward: Vec<&Room> = graph.active_rooms().collect();
        let mut backward = forward.clone();
        backward.reverse();
        let a = aggregator.recompute(forward);
        let b = aggregator.recompute(backward);
        assert!(a.bitwise_eq(&b));
    }

    #[test]
    fn inactive_rooms_are_ignored() {
        let graph = RoomGraph::bootstrapped(17);
        let aggregator = ProgressionAggregator::default();
        let stats = aggregator.recompute(graph.rooms());
        assert!(stats.bitwise_eq(&StatMap::base()));
    }
}
