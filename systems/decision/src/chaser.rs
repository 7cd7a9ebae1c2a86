//! A policy that shadows the opponent and harvests whatever it passes.

use harvest_bot_core::{ActionDecision, DecisionError, ItemType, MoveDecision};
use harvest_bot_system_planning::move_toward;
use harvest_bot_world::{query, GameState};
use tracing::debug;

use crate::{emission, Policy};

/// Policy that follows the opponent around the board.
///
/// The carried item is used once, on the first turn the opponent gets out of
/// single-turn reach.
#[derive(Clone, Debug)]
pub struct Chaser {
    item: ItemType,
    item_requested: bool,
    item_used: bool,
}

impl Chaser {
    /// Creates a chaser carrying `item`.
    #[must_use]
    pub const fn new(item: ItemType) -> Self {
        Self {
            item,
            item_requested: false,
            item_used: false,
        }
    }

    /// Reports whether the carried item has already been spent.
    #[must_use]
    pub const fn item_used(&self) -> bool {
        self.item_used
    }
}

impl Policy for Chaser {
    fn name(&self) -> &'static str {
        "chaser"
    }

    fn decide_move(&mut self, snapshot: &GameState) -> MoveDecision {
        let me = snapshot.my_player();
        let opponent = snapshot.opponent_player();
        let distance = me.position.manhattan_distance(opponent.position);
        if distance > me.max_movement && self.item != ItemType::None {
            self.item_requested = true;
        }
        debug!(distance, "chasing opponent");
        emission::movement(move_toward(me.position, opponent.position, me.max_movement))
    }

    fn decide_action(&mut self, snapshot: &GameState) -> Result<ActionDecision, DecisionError> {
        let me = snapshot.my_player();
        if self.item_requested && !self.item_used {
            self.item_requested = false;
            self.item_used = true;
            return emission::use_item();
        }

        let ready = query::harvestable_within_range(&snapshot.tile_map, me);
        if ready.is_empty() {
            return emission::do_nothing();
        }
        emission::harvest(ready)
    }
}
