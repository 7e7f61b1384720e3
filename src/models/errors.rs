use crate::models::constants::GemType;
use crate::models::position::Coordinate;

/// Game-specific error types
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Gem name not recognized
    #[error("unknown gem type: {0}")]
    UnknownGemType(String),
    /// Stat name not recognized
    #[error("unknown stat type: {0}")]
    UnknownStatType(String),
    /// Gate index outside 0..4
    #[error("invalid gate index: {0}")]
    InvalidGateIndex(usize),
    /// Other malformed input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Deposit or unlock not allowed in the gate's current state
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
    /// No room has been instantiated at the coordinate
    #[error("room not found at {0}")]
    RoomNotFound(Coordinate),
    /// A saved stat boost identity matched nothing in the catalog
    #[error("stat boost not found: {0}")]
    BoostNotFound(String),
    /// Not enough gems in the inventory
    #[error("insufficient {gem}: required {required}, available {available}")]
    InsufficientGems {
        gem: GemType,
        required: u32,
        available: u32,
    },
    /// Save format version the codec does not understand
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a deposit or unlock is refused. Every refusal leaves state unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolViolation {
    #[error("gate is already unlocked")]
    AlreadyUnlocked,
    #[error("room beyond the gate is already active")]
    NeighborActive,
    #[error("gate only accepts {bound}, got {offered}")]
    GemTypeMismatch { bound: GemType, offered: GemType },
    #[error("deposit of {amount} exceeds requirement ({deposited}/{required})")]
    ExceedsRequirement {
        deposited: u32,
        amount: u32,
        required: u32,
    },
    #[error("not enough gems deposited ({deposited}/{required})")]
    NotEnoughDeposited { deposited: u32, required: u32 },
    #[error("gate can only be worked from an active room")]
    InactiveSide,
}

/// Broad failure categories for callers that only care about UX class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ProtocolViolation,
    MissingReference,
    InsufficientResources,
    Persistence,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::UnknownGemType(_)
            | GameError::UnknownStatType(_)
            | GameError::InvalidGateIndex(_)
            | GameError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GameError::Protocol(_) => ErrorKind::ProtocolViolation,
            GameError::RoomNotFound(_) | GameError::BoostNotFound(_) => ErrorKind::MissingReference,
            GameError::InsufficientGems { .. } => ErrorKind::InsufficientResources,
            GameError::VersionMismatch { .. } | GameError::Serialization(_) | GameError::Io(_) => {
                ErrorKind::Persistence
            }
        }
    }
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;
