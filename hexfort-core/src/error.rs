//! Error types for the rules engine and the layout loader

use crate::hex::Hex;
use crate::units::UnitKind;

/// Precondition violations on the unit model.
///
/// These are programming errors: the board checks them before acting and
/// never surfaces them for ordinary player input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("{kind:?} needs {requested} moves but has {remaining} left")]
    InsufficientMoves {
        kind: UnitKind,
        requested: u32,
        remaining: u32,
    },

    #[error("{0:?} cannot carry a flag")]
    CannotCarryFlag(UnitKind),

    #[error("{0:?} is already carrying a flag")]
    AlreadyCarrying(UnitKind),
}

/// Problems reading a board layout
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid coordinate `{0}`")]
    Coordinate(String),

    #[error("coordinate {0} is outside the board limit")]
    OutOfBounds(Hex),

    #[error("missing tile type")]
    MissingType,

    #[error("unknown tile type `{0}`")]
    UnknownType(char),

    #[error("unknown modifier `{0}`")]
    UnknownModifier(char),

    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),
}
