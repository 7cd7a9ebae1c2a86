//! Cross-turn memory of the farmer.

use std::collections::BTreeMap;

use harvest_bot_core::{CropType, Position};

use crate::Rules;

/// Behaviour the farmer is currently pursuing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BotMode {
    /// Walking to the planting area on the fertility band.
    MovingToBand,
    /// Standing on the planting area and sowing seeds.
    Planting,
    /// Loitering while planted crops grow.
    WaitingForPlants,
    /// Walking to and collecting ready crops.
    Harvesting,
    /// Walking to the green grocer.
    #[default]
    MovingToMarket,
    /// Buying seeds at the green grocer.
    Buying,
}

/// Everything the farmer remembers between turns.
///
/// Plantings are tracked by the bot itself instead of being re-derived from
/// the board, so the farmer knows which crops are its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotBehaviorState {
    mode: BotMode,
    planted: BTreeMap<Position, i32>,
    target_crop: CropType,
    has_visited_market: bool,
}

impl BotBehaviorState {
    /// Creates the start-of-match state: heading to market with nothing planted.
    #[must_use]
    pub fn new(rules: &Rules) -> Self {
        Self {
            mode: BotMode::default(),
            planted: BTreeMap::new(),
            target_crop: rules.default_crop,
            has_visited_market: false,
        }
    }

    /// Returns the state switched into `mode`.
    #[must_use]
    pub fn with_mode(mut self, mode: BotMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current behaviour.
    #[must_use]
    pub const fn mode(&self) -> BotMode {
        self.mode
    }

    /// Crop the farmer buys seeds for.
    #[must_use]
    pub const fn target_crop(&self) -> CropType {
        self.target_crop
    }

    /// Reports whether the farmer has reached the market at least once.
    #[must_use]
    pub const fn has_visited_market(&self) -> bool {
        self.has_visited_market
    }

    /// Tracked plantings and their remaining growth turns, in row-major order.
    #[must_use]
    pub fn planted(&self) -> &BTreeMap<Position, i32> {
        &self.planted
    }

    /// Starts tracking a planting that needs `turns` more movement phases.
    pub fn track_planting(&mut self, position: Position, turns: i32) {
        let _ = self.planted.insert(position, turns);
    }

    pub(crate) fn set_mode(&mut self, mode: BotMode) {
        self.mode = mode;
    }

    pub(crate) fn mark_market_visited(&mut self) {
        self.has_visited_market = true;
    }

    pub(crate) fn untrack(&mut self, position: Position) -> bool {
        self.planted.remove(&position).is_some()
    }

    /// Counts every tracked planting down by one turn.
    pub(crate) fn tick_timers(&mut self) {
        for timer in self.planted.values_mut() {
            *timer -= 1;
        }
    }

    /// First tracked planting, in row-major order, whose timer has run out.
    pub(crate) fn next_ready_planting(&self) -> Option<Position> {
        self.planted
            .iter()
            .find(|(_, timer)| **timer <= 0)
            .map(|(position, _)| *position)
    }

    /// Tracked planting with the least time left; ties go to row-major order.
    pub(crate) fn soonest_planting(&self) -> Option<Position> {
        self.planted
            .iter()
            .min_by_key(|(position, timer)| (**timer, **position))
            .map(|(position, _)| *position)
    }

    /// Switches to the premium crop once `money` reaches the threshold.
    ///
    /// The switch is permanent.
    pub(crate) fn update_target_crop(&mut self, money: u32, rules: &Rules) {
        if money >= rules.upgrade_threshold {
            self.target_crop = rules.upgraded_crop;
        }
    }
}
