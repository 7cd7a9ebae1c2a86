#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-by-turn decision engine for the harvest bot.
//!
//! A [`Policy`] receives two snapshots per turn: one before the movement
//! phase and one before the action phase. The [`Farmer`] policy runs a small
//! finite-state controller whose only memory is a [`BotBehaviorState`]; the
//! [`Chaser`] policy is a much simpler alternative that shadows the opponent.
//! Both hand their choices to [`emission`] for validation before returning.

use harvest_bot_core::{ActionDecision, CropType, DecisionError, MoveDecision};
use harvest_bot_system_planning::MarketBand;
use harvest_bot_world::GameState;
use serde::Deserialize;

mod chaser;
pub mod emission;
mod farmer;
mod state;

pub use chaser::Chaser;
pub use farmer::{plan_action, plan_move, Farmer};
pub use state::{BotBehaviorState, BotMode};

/// Strategy that turns snapshots into decisions.
pub trait Policy {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Chooses where to move during the movement phase.
    fn decide_move(&mut self, snapshot: &GameState) -> MoveDecision;

    /// Chooses what to do during the action phase.
    fn decide_action(&mut self, snapshot: &GameState) -> Result<ActionDecision, DecisionError>;
}

/// Fixed heuristic constants consulted by the farmer.
///
/// Every field has a default, so a rules file only needs to list the values
/// it overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Where the green grocer trades.
    pub market: MarketBand,
    /// Last turn of the match.
    pub final_turn: u32,
    /// Turns after this one no longer buy seeds.
    pub buy_cutoff_turn: u32,
    /// Money at which the farmer switches to the premium crop for good.
    pub upgrade_threshold: u32,
    /// Crop bought until the upgrade threshold is reached.
    pub default_crop: CropType,
    /// Crop bought once the upgrade threshold has been reached.
    pub upgraded_crop: CropType,
    /// Planting row used when the board has no fertility bands.
    pub fallback_band_row: i32,
    /// Topmost row a plus-shaped planting area may be centred on.
    pub min_planting_row: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            market: MarketBand::default(),
            final_turn: 179,
            buy_cutoff_turn: 170,
            upgrade_threshold: 1000,
            default_crop: CropType::DuchamFruit,
            upgraded_crop: CropType::GoldenCorn,
            fallback_band_row: 4,
            min_planting_row: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Rules;
    use harvest_bot_core::CropType;
    use harvest_bot_system_planning::MarketBand;

    #[test]
    fn partial_rules_file_keeps_remaining_defaults() {
        let rules: Rules = toml::from_str(
            r#"
            final_turn = 99
            upgraded_crop = "JOGAN_FRUIT"

            [market]
            first_column = 2
            last_column = 4
            row = 1
            "#,
        )
        .expect("rules parse");

        assert_eq!(rules.final_turn, 99);
        assert_eq!(rules.upgraded_crop, CropType::JoganFruit);
        assert_eq!(rules.market, MarketBand::new(2, 4, 1).expect("valid band"));
        assert_eq!(rules.buy_cutoff_turn, Rules::default().buy_cutoff_turn);
        assert_eq!(rules.default_crop, CropType::DuchamFruit);
    }

    #[test]
    fn inverted_market_band_is_rejected_on_load() {
        let error = toml::from_str::<Rules>(
            r#"
            [market]
            first_column = 17
            last_column = 13
            row = 0
            "#,
        )
        .expect_err("inverted band");
        assert!(
            error
                .to_string()
                .contains("starts at column 17 but ends at column 13"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn unknown_rule_is_rejected() {
        assert!(toml::from_str::<Rules>("harvest_everything = true").is_err());
    }
}
