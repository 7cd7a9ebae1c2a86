#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure planning routines that turn a board snapshot into movement targets.
//!
//! Nothing here remembers anything between turns. The decision system owns
//! the bot's memory and asks these helpers where to go next.

use harvest_bot_core::{Position, TileType};
use harvest_bot_world::{query, Player, SearchDirection, TileMap};
use serde::Deserialize;
use thiserror::Error;

/// Steps from `current` toward `target` spending at most `budget` movement.
///
/// Targets within budget are reached exactly. Farther targets are approached
/// along the straight line between the two points, rounded so the step never
/// passes the target on either axis. Rounding toward zero can leave a short
/// diagonal step with nothing to spend: a budget of one toward a target that
/// differs on both axes stays put.
#[must_use]
pub fn move_toward(current: Position, target: Position, budget: u32) -> Position {
    if current.manhattan_distance(target) <= budget {
        return target;
    }
    current + (target - current).clamp_magnitude(budget)
}

/// Errors raised while building a [`MarketBand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MarketBandError {
    /// The band's first column lies to the right of its last column.
    #[error("market band starts at column {first_column} but ends at column {last_column}")]
    Inverted {
        /// Leftmost column requested.
        first_column: i32,
        /// Rightmost column requested.
        last_column: i32,
    },
}

/// Column band on a single row where the green grocer trades.
///
/// The band always spans at least one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireMarketBand")]
pub struct MarketBand {
    first_column: i32,
    last_column: i32,
    row: i32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireMarketBand {
    first_column: i32,
    last_column: i32,
    row: i32,
}

impl TryFrom<WireMarketBand> for MarketBand {
    type Error = MarketBandError;

    fn try_from(wire: WireMarketBand) -> Result<Self, Self::Error> {
        Self::new(wire.first_column, wire.last_column, wire.row)
    }
}

impl MarketBand {
    /// Creates a market band spanning `first_column..=last_column` on `row`.
    pub const fn new(
        first_column: i32,
        last_column: i32,
        row: i32,
    ) -> Result<Self, MarketBandError> {
        if first_column > last_column {
            return Err(MarketBandError::Inverted {
                first_column,
                last_column,
            });
        }
        Ok(Self {
            first_column,
            last_column,
            row,
        })
    }

    /// Reports whether `column` falls inside the band.
    #[must_use]
    pub const fn contains_column(&self, column: i32) -> bool {
        column >= self.first_column && column <= self.last_column
    }

    /// Nearest market tile to `from`.
    ///
    /// Keeps the current column when it already lies in the band and
    /// otherwise snaps to the closest band edge.
    #[must_use]
    pub fn closest_position(&self, from: Position) -> Position {
        Position::new(from.x().clamp(self.first_column, self.last_column), self.row)
    }
}

impl Default for MarketBand {
    fn default() -> Self {
        Self {
            first_column: 13,
            last_column: 17,
            row: 0,
        }
    }
}

/// Row the farmer should plant on.
///
/// Prefers the lowest middle fertility band, then the lowest outer band, and
/// falls back to `fallback_row` on boards without bands.
#[must_use]
pub fn ideal_band_row(board: &TileMap, fallback_row: i32) -> i32 {
    board
        .fertility_band_row(TileType::FBandMid, SearchDirection::BottomUp)
        .or_else(|| board.fertility_band_row(TileType::FBandOuter, SearchDirection::BottomUp))
        .map_or(fallback_row, |row| row as i32)
}

/// Tile to loiter on while crops around `target` grow.
///
/// Among tiles reachable this turn that lie outside the opponent's protection
/// radius around `target`, picks the one farthest from `target`; ties go to
/// the first tile in row-major order. Stays put when nothing qualifies.
#[must_use]
pub fn stall_position(
    board: &TileMap,
    player: &Player,
    opponent: &Player,
    target: Position,
) -> Position {
    let mut farthest = player.position;
    let mut farthest_distance = 0;
    for candidate in query::within_move_range(board, player) {
        let distance = candidate.manhattan_distance(target);
        if distance <= opponent.protection_radius {
            continue;
        }
        if distance > farthest_distance {
            farthest_distance = distance;
            farthest = candidate;
        }
    }
    farthest
}

/// Number of turns needed to cover `distance` at `speed` tiles per turn.
///
/// A player that cannot move never arrives anywhere it is not already.
#[must_use]
pub fn turns_to_cover(distance: u32, speed: u32) -> f64 {
    match (distance, speed) {
        (0, _) => 0.0,
        (_, 0) => f64::INFINITY,
        _ => f64::from(distance) / f64::from(speed),
    }
}
