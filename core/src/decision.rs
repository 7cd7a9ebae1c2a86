//! Decision payloads handed back to the match engine each turn.

use std::fmt;

use thiserror::Error;

use crate::{CropType, Position};

/// Movement chosen for the movement phase of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveDecision {
    target: Position,
}

impl MoveDecision {
    /// Creates a decision to move onto the provided tile.
    #[must_use]
    pub const fn new(target: Position) -> Self {
        Self { target }
    }

    /// Tile the player asked to move onto.
    #[must_use]
    pub const fn target(&self) -> Position {
        self.target
    }
}

impl fmt::Display for MoveDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MOVE {} {}", self.target.x(), self.target.y())
    }
}

/// Action chosen for the action phase of a turn.
///
/// The payload-carrying variants hold parallel arrays. Build them through
/// [`ActionDecision::buy`] and [`ActionDecision::plant`] so mismatched lengths
/// are caught before anything is transmitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionDecision {
    /// Purchase seeds at the green grocer.
    Buy {
        /// Crops to buy seeds for.
        crops: Vec<CropType>,
        /// Number of seeds bought for the crop at the same index.
        quantities: Vec<u32>,
    },
    /// Plant seeds on nearby tiles.
    Plant {
        /// Seeds to plant.
        crops: Vec<CropType>,
        /// Tile receiving the seed at the same index.
        positions: Vec<Position>,
    },
    /// Harvest ready crops on nearby tiles.
    Harvest {
        /// Tiles to harvest.
        positions: Vec<Position>,
    },
    /// Activate the carried item.
    UseItem,
    /// Take no action this turn.
    DoNothing,
}

impl ActionDecision {
    /// Creates a validated buy decision.
    pub fn buy(crops: Vec<CropType>, quantities: Vec<u32>) -> Result<Self, DecisionError> {
        let decision = Self::Buy { crops, quantities };
        decision.validate()?;
        Ok(decision)
    }

    /// Creates a validated plant decision.
    pub fn plant(crops: Vec<CropType>, positions: Vec<Position>) -> Result<Self, DecisionError> {
        let decision = Self::Plant { crops, positions };
        decision.validate()?;
        Ok(decision)
    }

    /// Creates a harvest decision for the provided tiles.
    #[must_use]
    pub fn harvest(positions: Vec<Position>) -> Self {
        Self::Harvest { positions }
    }

    /// Checks that parallel payload arrays line up.
    pub fn validate(&self) -> Result<(), DecisionError> {
        match self {
            Self::Buy { crops, quantities } if crops.len() != quantities.len() => {
                Err(DecisionError::MismatchedBuy {
                    crops: crops.len(),
                    quantities: quantities.len(),
                })
            }
            Self::Plant { crops, positions } if crops.len() != positions.len() => {
                Err(DecisionError::MismatchedPlant {
                    crops: crops.len(),
                    positions: positions.len(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ActionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy { crops, quantities } => {
                f.write_str("BUY")?;
                for (crop, quantity) in crops.iter().zip(quantities) {
                    write!(f, " {crop} {quantity}")?;
                }
                Ok(())
            }
            Self::Plant { crops, positions } => {
                f.write_str("PLANT")?;
                for (crop, position) in crops.iter().zip(positions) {
                    write!(f, " {crop} {} {}", position.x(), position.y())?;
                }
                Ok(())
            }
            Self::Harvest { positions } => {
                f.write_str("HARVEST")?;
                for position in positions {
                    write!(f, " {} {}", position.x(), position.y())?;
                }
                Ok(())
            }
            Self::UseItem => f.write_str("USE_ITEM"),
            Self::DoNothing => f.write_str("NOTHING"),
        }
    }
}

/// Either half of a turn's output, as seen by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Movement phase output.
    Move(MoveDecision),
    /// Action phase output.
    Action(ActionDecision),
}

impl From<MoveDecision> for Decision {
    fn from(decision: MoveDecision) -> Self {
        Self::Move(decision)
    }
}

impl From<ActionDecision> for Decision {
    fn from(decision: ActionDecision) -> Self {
        Self::Action(decision)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(decision) => fmt::Display::fmt(decision, f),
            Self::Action(decision) => fmt::Display::fmt(decision, f),
        }
    }
}

/// Payload shape violations detected while emitting a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// A buy decision listed a different number of crops and quantities.
    #[error("buy decision lists {crops} crops but {quantities} quantities")]
    MismatchedBuy {
        /// Number of crops supplied.
        crops: usize,
        /// Number of quantities supplied.
        quantities: usize,
    },
    /// A plant decision listed a different number of seeds and positions.
    #[error("plant decision lists {crops} seeds but {positions} positions")]
    MismatchedPlant {
        /// Number of seeds supplied.
        crops: usize,
        /// Number of positions supplied.
        positions: usize,
    },
}
