//! Game services
//!
//! Logic that reads the models without owning them: stat aggregation,
//! persistence and combat math.

pub mod combat;
pub mod persistence;
pub mod progression;
