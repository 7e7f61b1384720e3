//! Gem-gated room progression
//!
//! Core rules for a grid of rooms that open up as the player deposits gems
//! into the gates between them. Each unlocked room contributes a stat boost
//! to the player.
//!
//! # Overview
//!
//! The world starts with a single active room at the origin. Every active
//! room is surrounded by inactive frontier rooms; depositing enough gems of
//! one type into a gate unlocks it, activates the room behind it and spawns
//! that room's own frontier.
//!
//! # Modules
//!
//! - [`game_engine`] - `Progression`, the owner object driving a session
//! - [`models`] - Rooms, gates, the room graph and the boost catalog
//! - [`services`] - Stat aggregation, save/load and arena combat math
//! - [`config`] - Tunables loaded from JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use gemrooms::models::constants::{Direction, GemType};
//! use gemrooms::models::position::Coordinate;
//! use gemrooms::{Progression, ProgressionConfig};
//!
//! let mut config = ProgressionConfig::with_seed(42);
//! config.starting_gems.insert(GemType::RedGem, 10);
//! let mut game = Progression::new(config);
//! game.deposit(Coordinate::ORIGIN, Direction::North, GemType::RedGem, 10)?;
//! game.try_unlock(Coordinate::ORIGIN, Direction::North)?;
//! # Ok::<(), gemrooms::GameError>(())
//! ```

pub mod config;
pub mod game_engine;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{ProgressionConfig, RewardPolicy};
pub use game_engine::Progression;
pub use models::errors::{GameError, GameResult};
