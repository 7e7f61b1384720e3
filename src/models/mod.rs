//! Domain models
//!
//! Rooms, gates and the graph that owns them, plus the small value types
//! they are built from. The graph holds the unlock rules; everything else
//! is plain data with minimal logic.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod gate;
pub mod inventory;
pub mod position;
pub mod quadrant;
pub mod room;
pub mod room_graph;
pub mod stat_boost;
pub mod stats;
