//! Wraps policy choices into validated decisions.
//!
//! A payload mismatch here means the controller itself is broken, so the
//! error is handed back to the caller rather than patched over.

use harvest_bot_core::{ActionDecision, CropType, DecisionError, MoveDecision, Position};
use tracing::info;

/// Emits a movement onto `target`.
#[must_use]
pub fn movement(target: Position) -> MoveDecision {
    let decision = MoveDecision::new(target);
    info!(%decision, "movement decided");
    decision
}

/// Emits a purchase of `quantity` seeds of `crop`.
pub fn buy(crop: CropType, quantity: u32) -> Result<ActionDecision, DecisionError> {
    action(ActionDecision::buy(vec![crop], vec![quantity]))
}

/// Emits a planting of each seed on the position at the same index.
pub fn plant(
    seeds: Vec<CropType>,
    positions: Vec<Position>,
) -> Result<ActionDecision, DecisionError> {
    action(ActionDecision::plant(seeds, positions))
}

/// Emits a harvest of the provided positions.
pub fn harvest(positions: Vec<Position>) -> Result<ActionDecision, DecisionError> {
    action(Ok(ActionDecision::harvest(positions)))
}

/// Emits use of the carried item.
pub fn use_item() -> Result<ActionDecision, DecisionError> {
    action(Ok(ActionDecision::UseItem))
}

/// Emits an idle action.
pub fn do_nothing() -> Result<ActionDecision, DecisionError> {
    action(Ok(ActionDecision::DoNothing))
}

fn action(
    decision: Result<ActionDecision, DecisionError>,
) -> Result<ActionDecision, DecisionError> {
    let decision = decision?;
    info!(%decision, "action decided");
    Ok(decision)
}
