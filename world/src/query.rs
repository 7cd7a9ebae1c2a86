//! Spatial queries over a board snapshot.
//!
//! Every query returns positions in row-major order so callers that pick
//! "the first" candidate behave the same on every run.

use harvest_bot_core::Position;

use super::{Player, TileMap};

/// Offsets of the five tiles making up a plus-shaped planting footprint.
pub const PLUS_FOOTPRINT: [Position; 5] = [
    Position::new(-1, 0),
    Position::new(0, 0),
    Position::new(1, 0),
    Position::new(0, -1),
    Position::new(0, 1),
];

/// Board positions within `radius` Manhattan distance of `center`.
#[must_use]
pub fn positions_within(board: &TileMap, center: Position, radius: u32) -> Vec<Position> {
    let span = radius.min(board.width() + board.height()) as i32;
    let mut positions = Vec::new();
    for dy in -span..=span {
        for dx in -span..=span {
            let candidate = center + Position::new(dx, dy);
            if candidate.manhattan_distance(center) <= radius && board.is_valid_position(candidate)
            {
                positions.push(candidate);
            }
        }
    }
    positions
}

/// Positions the player can reach this turn.
#[must_use]
pub fn within_move_range(board: &TileMap, player: &Player) -> Vec<Position> {
    positions_within(board, player.position, player.max_movement)
}

/// Positions the player can harvest from where it stands.
#[must_use]
pub fn within_harvest_range(board: &TileMap, player: &Player) -> Vec<Position> {
    positions_within(board, player.position, player.harvest_radius)
}

/// Positions the player can plant on from where it stands.
#[must_use]
pub fn within_plant_range(board: &TileMap, player: &Player) -> Vec<Position> {
    positions_within(board, player.position, player.plant_radius)
}

/// Reports whether a seed may be planted at `position`.
///
/// A tile is plantable when it exists, bears no crop, and lies outside the
/// opponent's protection radius.
#[must_use]
pub fn is_plantable(board: &TileMap, opponent: &Player, position: Position) -> bool {
    let Some(tile) = board.tile_at(position) else {
        return false;
    };
    if !tile.crop.is_empty() {
        return false;
    }
    position.manhattan_distance(opponent.position) > opponent.protection_radius
}

/// Plantable positions within the player's plant range.
#[must_use]
pub fn plantable_within_range(board: &TileMap, player: &Player, opponent: &Player) -> Vec<Position> {
    within_plant_range(board, player)
        .into_iter()
        .filter(|position| is_plantable(board, opponent, *position))
        .collect()
}

/// Positions within harvest range whose crop is ready.
#[must_use]
pub fn harvestable_within_range(board: &TileMap, player: &Player) -> Vec<Position> {
    within_harvest_range(board, player)
        .into_iter()
        .filter(|position| {
            board
                .tile_at(*position)
                .is_some_and(|tile| tile.is_harvestable())
        })
        .collect()
}

/// Finds the centre of the closest fully plantable plus-shaped area on the
/// row of `ideal`.
///
/// The row is first pulled down to `min_row` and up to one row above the
/// bottom edge so the footprint fits on the board. Columns are scanned left
/// to right and the first one closest to `ideal` wins. When no column on the
/// row qualifies, the clamped ideal position is returned unchanged.
#[must_use]
pub fn nearest_plantable_plus(
    board: &TileMap,
    opponent: &Player,
    ideal: Position,
    min_row: i32,
) -> Position {
    let last_row = board.height() as i32 - 1;
    let row = if ideal.y() < min_row {
        min_row
    } else if ideal.y() >= last_row {
        last_row - 1
    } else {
        ideal.y()
    };
    let anchor = ideal.with_y(row);

    let mut best: Option<(u32, Position)> = None;
    for x in 1..(board.width() as i32 - 1) {
        let centre = Position::new(x, row);
        let unobstructed = PLUS_FOOTPRINT
            .iter()
            .all(|offset| is_plantable(board, opponent, centre + *offset));
        if !unobstructed {
            continue;
        }
        let distance = anchor.manhattan_distance(centre);
        if best.map_or(true, |(closest, _)| distance < closest) {
            best = Some((distance, centre));
        }
    }

    best.map_or(anchor, |(_, centre)| centre)
}
