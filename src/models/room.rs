use super::constants::GemType;
use super::position::Coordinate;
use super::quadrant::Quadrant;
use super::stat_boost::StatBoost;

/// One cell of the room grid. Gates live on the graph, keyed by room pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    coordinate: Coordinate,
    active: bool,
    resource_type: Option<GemType>,
    boost: Option<StatBoost>,
    quadrant: Quadrant,
    ring: u32,
}

impl Room {
    pub(crate) fn new(coordinate: Coordinate, active: bool, boost: Option<StatBoost>) -> Self {
        Room {
            coordinate,
            active: active || coordinate.is_origin(),
            resource_type: None,
            boost,
            quadrant: coordinate.quadrant(),
            ring: coordinate.ring_distance(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_origin(&self) -> bool {
        self.coordinate.is_origin()
    }

    pub fn resource_type(&self) -> Option<GemType> {
        self.resource_type
    }

    pub fn boost(&self) -> Option<&StatBoost> {
        self.boost.as_ref()
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn ring(&self) -> u32 {
        self.ring
    }

    /// Activation is one-way.
    pub(crate) fn activate(&mut self) {
        self.active = true;
    }

    /// First write wins; the origin never takes a gem type.
    pub(crate) fn bind_resource_type(&mut self, gem: GemType) -> bool {
        if self.resource_type.is_some() || self.is_origin() {
            return false;
        }
        self.resource_type = Some(gem);
        true
    }

    pub(crate) fn restore(&mut self, active: bool, resource_type: Option<GemType>, boost: Option<StatBoost>) {
        if self.is_origin() {
            return;
        }
        self.active = self.active || active;
        self.resource_type = resource_type;
        self.boost = boost;
    }

    pub(crate) fn replace_boost(&mut self, boost: Option<StatBoost>) {
        if !self.is_origin() {
            self.boost = boost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constants::StatType;

    #[test]
    fn origin_is_always_active_and_unassigned() {
        let mut room = Room::new(Coordinate::ORIGIN, false, None);
        assert!(room.is_active());
        assert!(!room.bind_resource_type(GemType::RedGem));
        room.restore(false, Some(GemType::BlueGem), Some(StatBoost::new(StatType::Armor, 1.0)));
        assert!(room.is_active());
        assert_eq!(room.resource_type(), None);
        assert!(room.boost().is_none());
    }

    #[test]
    fn resource_binding_is_first_write_wins() {
        let mut room = Room::new(Coordinate::new(1, 0, 0), false, None);
        assert!(room.bind_resource_type(GemType::GreenGem));
        assert!(!room.bind_resource_type(GemType::RedGem));
        assert_eq!(room.resource_type(), Some(GemType::GreenGem));
    }

    #[test]
    fn derives_quadrant_and_ring() {
        let room = Room::new(Coordinate::new(-2, 0, 1), false, None);
        assert_eq!(room.quadrant(), Quadrant::NorthWest);
        assert_eq!(room.ring(), 2);
    }
}
