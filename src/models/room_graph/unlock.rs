use tracing::{debug, info};

use super::{RoomGraph, UNLOCK_REROLL};
use crate::config::RewardPolicy;
use crate::models::constants::{Direction, GemType};
use crate::models::errors::{GameError, GameResult, ProtocolViolation};
use crate::models::gate::{GateKey, GateSide};
use crate::models::position::Coordinate;
use crate::models::stat_boost::StatBoost;

/// What a successful unlock changed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockOutcome {
    /// The room that became active.
    pub activated: Coordinate,
    /// Gate on the unlocking side.
    pub direction: Direction,
    /// Reward now granted by the activated room.
    pub reward: Option<StatBoost>,
    /// Frontier rooms created around the activated room.
    pub spawned: Vec<Coordinate>,
}

impl RoomGraph {
    /// Put `amount` gems of `gem` into the gate on `direction` of `coord`.
    ///
    /// Nothing changes unless every check passes. The first accepted deposit
    /// binds the gate to `gem` and, if it has none yet, gives the far room
    /// the same gem type.
    pub fn deposit(
        &mut self,
        coord: Coordinate,
        direction: Direction,
        gem: GemType,
        amount: u32,
    ) -> GameResult<GateSide> {
        if amount == 0 {
            return Err(GameError::InvalidArgument(
                "deposit amount must be positive".to_string(),
            ));
        }
        let neighbor = coord.neighbor(direction);
        let key = GateKey::between(coord, neighbor);
        let required = self.required_for(neighbor);

        let owner_active = self.room_or_err(coord)?.is_active();
        let neighbor_active = self.room_or_err(neighbor)?.is_active();
        let gate = self.gate_or_err(key)?;

        if !owner_active {
            return Err(ProtocolViolation::InactiveSide.into());
        }
        if gate.unlocked {
            return Err(ProtocolViolation::AlreadyUnlocked.into());
        }
        if neighbor_active {
            return Err(ProtocolViolation::NeighborActive.into());
        }
        if let Some(bound) = gate.bound {
            if bound != gem {
                return Err(ProtocolViolation::GemTypeMismatch {
                    bound,
                    offered: gem,
                }
                .into());
            }
        }
        let total = gate.deposited.checked_add(amount).filter(|t| *t <= required);
        let Some(total) = total else {
            return Err(ProtocolViolation::ExceedsRequirement {
                deposited: gate.deposited,
                amount,
                required,
            }
            .into());
        };

        let first_bind = gate.bound.is_none();
        if let Some(gate) = self.gates.get_mut(&key) {
            gate.bound = Some(gem);
            gate.deposited = total;
        }
        if first_bind {
            if let Some(far) = self.rooms.get_mut(&neighbor) {
                if far.bind_resource_type(gem) {
                    debug!(%neighbor, %gem, "room gem type bound");
                }
            }
        }
        debug!(%coord, ?direction, %gem, amount, total, required, "gems deposited");

        self.gate(coord, direction)
            .ok_or(GameError::RoomNotFound(coord))
    }

    /// Open the gate on `direction` of `coord` once enough gems are in it.
    ///
    /// On success both barriers drop, the far room activates, its reward is
    /// finalized per the reward policy, and the frontier grows around it.
    /// The caller is responsible for recomputing stats.
    pub fn try_unlock(&mut self, coord: Coordinate, direction: Direction) -> GameResult<UnlockOutcome> {
        let neighbor = coord.neighbor(direction);
        let key = GateKey::between(coord, neighbor);
        let required = self.required_for(neighbor);

        let owner_active = self.room_or_err(coord)?.is_active();
        let far = self.room_or_err(neighbor)?;
        let (neighbor_active, quadrant, ring, has_reward) =
            (far.is_active(), far.quadrant(), far.ring(), far.boost().is_some());
        let gate = self.gate_or_err(key)?;

        if gate.unlocked {
            return Err(ProtocolViolation::AlreadyUnlocked.into());
        }
        if !owner_active {
            return Err(ProtocolViolation::InactiveSide.into());
        }
        if gate.deposited < required {
            return Err(ProtocolViolation::NotEnoughDeposited {
                deposited: gate.deposited,
                required,
            }
            .into());
        }
        if neighbor_active {
            return Err(ProtocolViolation::NeighborActive.into());
        }
        let bound = gate.bound;

        let reroll = match (self.reward_policy, has_reward) {
            (RewardPolicy::RerollWithResource, true) => {
                let mut rng = self.roll_rng(neighbor, UNLOCK_REROLL);
                Some(match bound {
                    Some(gem) => self
                        .catalog
                        .roll_with_resource_modifier(quadrant, ring, gem, &mut rng),
                    None => self.catalog.roll(quadrant, ring, &mut rng),
                })
            }
            _ => None,
        };

        if let Some(gate) = self.gates.get_mut(&key) {
            gate.unlocked = true;
            gate.open = [true, true];
        }
        let mut reward = None;
        if let Some(room) = self.rooms.get_mut(&neighbor) {
            room.activate();
            if let Some(boost) = reroll {
                room.replace_boost(boost);
            }
            reward = room.boost().copied();
        }
        let spawned = self.expand_frontier(neighbor);

        info!(
            from = %coord,
            to = %neighbor,
            ?direction,
            reward = ?reward,
            spawned = spawned.len(),
            "gate unlocked"
        );

        Ok(UnlockOutcome {
            activated: neighbor,
            direction,
            reward,
            spawned,
        })
    }
}
