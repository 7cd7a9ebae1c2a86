//! The farming controller: buy seeds, plant them on the fertility band,
//! wait, harvest, repeat.

use harvest_bot_core::{ActionDecision, DecisionError, MoveDecision};
use harvest_bot_system_planning::{ideal_band_row, move_toward, stall_position, turns_to_cover};
use harvest_bot_world::{query, GameState};
use tracing::{debug, warn};

use crate::{emission, BotBehaviorState, BotMode, Policy, Rules};

/// Policy that farms the fertility band and trades at the green grocer.
#[derive(Clone, Debug)]
pub struct Farmer {
    rules: Rules,
    state: BotBehaviorState,
}

impl Farmer {
    /// Creates a farmer at the start of a match.
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        let state = BotBehaviorState::new(&rules);
        Self { rules, state }
    }

    /// Memory carried between turns.
    #[must_use]
    pub fn state(&self) -> &BotBehaviorState {
        &self.state
    }
}

impl Policy for Farmer {
    fn name(&self) -> &'static str {
        "farmer"
    }

    fn decide_move(&mut self, snapshot: &GameState) -> MoveDecision {
        plan_move(&mut self.state, &self.rules, snapshot)
    }

    fn decide_action(&mut self, snapshot: &GameState) -> Result<ActionDecision, DecisionError> {
        plan_action(&mut self.state, &self.rules, snapshot)
    }
}

/// Runs the movement phase of the farmer.
///
/// Every tracked planting is counted down first. A ready planting then forces
/// [`BotMode::Harvesting`], and running out of turns to reach the market
/// forces [`BotMode::MovingToMarket`], before the current mode picks a target.
pub fn plan_move(state: &mut BotBehaviorState, rules: &Rules, snapshot: &GameState) -> MoveDecision {
    state.tick_timers();

    let me = snapshot.my_player();
    let opponent = snapshot.opponent_player();
    let board = &snapshot.tile_map;
    let position = me.position;
    debug!(turn = snapshot.turn, feedback = ?snapshot.feedback, "movement phase snapshot");

    if state.next_ready_planting().is_some() {
        state.set_mode(BotMode::Harvesting);
    }

    let market = rules.market.closest_position(position);
    let turns_left = f64::from(rules.final_turn) - f64::from(snapshot.turn);
    if turns_to_cover(market.manhattan_distance(position), me.max_movement) >= turns_left {
        state.set_mode(BotMode::MovingToMarket);
    }
    debug!(mode = ?state.mode(), "movement phase mode");

    let target = match state.mode() {
        BotMode::MovingToMarket => {
            let step = move_toward(position, market, me.max_movement);
            if step == market {
                state.mark_market_visited();
                state.set_mode(BotMode::Buying);
            }
            step
        }
        BotMode::MovingToBand | BotMode::Planting => {
            let row = ideal_band_row(board, rules.fallback_band_row);
            let area = query::nearest_plantable_plus(
                board,
                opponent,
                position.with_y(row),
                rules.min_planting_row,
            );
            let step = move_toward(position, area, me.max_movement);
            let fertile = board
                .tile_at(step)
                .is_some_and(|tile| tile.kind.is_fertility_band());
            if step == area && fertile {
                state.set_mode(BotMode::Planting);
            }
            step
        }
        BotMode::Harvesting => match state.next_ready_planting() {
            Some(ready) => move_toward(position, ready, me.max_movement),
            None => {
                let fallback = if state.planted().is_empty() {
                    BotMode::MovingToMarket
                } else {
                    BotMode::WaitingForPlants
                };
                warn!(?fallback, "harvesting without any ready planting");
                state.set_mode(fallback);
                position
            }
        },
        BotMode::WaitingForPlants => {
            let soonest = state.soonest_planting().unwrap_or(position);
            stall_position(board, me, opponent, soonest)
        }
        BotMode::Buying => position,
    };

    emission::movement(target)
}

/// Runs the action phase of the farmer against the post-movement snapshot.
pub fn plan_action(
    state: &mut BotBehaviorState,
    rules: &Rules,
    snapshot: &GameState,
) -> Result<ActionDecision, DecisionError> {
    let me = snapshot.my_player();
    let opponent = snapshot.opponent_player();
    let board = &snapshot.tile_map;
    let seeds = me.seeds();
    debug!(turn = snapshot.turn, feedback = ?snapshot.feedback, "action phase snapshot");
    debug!(mode = ?state.mode(), "action phase mode");

    state.update_target_crop(me.money, rules);

    match state.mode() {
        BotMode::MovingToMarket | BotMode::MovingToBand => emission::do_nothing(),
        BotMode::Buying => {
            if snapshot.turn > rules.buy_cutoff_turn {
                return emission::do_nothing();
            }
            let crop = state.target_crop();
            let quantity = me
                .money
                .checked_div(crop.seed_price())
                .map_or(me.carrying_capacity, |affordable| {
                    affordable.min(me.carrying_capacity)
                });
            state.set_mode(BotMode::MovingToBand);
            emission::buy(crop, quantity)
        }
        BotMode::Planting => {
            let mut open = query::plantable_within_range(board, me, opponent);
            let count = seeds.len().min(open.len());
            debug!(seeds = seeds.len(), open = open.len(), "planting capacity");
            if count == 0 {
                state.set_mode(BotMode::MovingToBand);
                return emission::do_nothing();
            }

            open.truncate(count);
            let sown: Vec<_> = seeds.iter().copied().take(count).collect();
            for (crop, position) in sown.iter().zip(&open) {
                state.track_planting(*position, crop.growth_time() as i32 + 1);
            }
            if count == seeds.len() {
                state.set_mode(BotMode::WaitingForPlants);
            }
            emission::plant(sown, open)
        }
        BotMode::WaitingForPlants | BotMode::Harvesting => {
            let here = me.position;
            let lost = state.planted().get(&here).is_some_and(|timer| *timer <= 0)
                && board.tile_at(here).is_some_and(|tile| tile.crop.is_empty());
            if lost && state.untrack(here) {
                warn!(position = %here, "tracked planting is gone from the board");
            }

            let ready = query::harvestable_within_range(board, me);
            if ready.is_empty() {
                debug!("nothing to harvest in range");
                return emission::do_nothing();
            }

            let _ = state.untrack(here);
            for position in &ready {
                let _ = state.untrack(*position);
            }
            if state.planted().is_empty() {
                state.set_mode(if seeds.is_empty() {
                    BotMode::MovingToMarket
                } else {
                    BotMode::Planting
                });
            }
            emission::harvest(ready)
        }
    }
}
