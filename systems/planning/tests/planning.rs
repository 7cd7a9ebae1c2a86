use harvest_bot_core::{Position, TileType};
use harvest_bot_system_planning::{
    ideal_band_row, move_toward, stall_position, turns_to_cover, MarketBand, MarketBandError,
};
use harvest_bot_world::{Player, Tile, TileMap};

#[test]
fn move_toward_respects_budget_and_arrives_exactly() {
    let origins = [Position::new(0, 0), Position::new(7, 3), Position::new(19, 19)];
    let targets = [
        Position::new(0, 0),
        Position::new(3, 3),
        Position::new(13, 0),
        Position::new(19, 2),
        Position::new(4, 18),
    ];

    for origin in origins {
        for target in targets {
            for budget in 0..8 {
                let step = move_toward(origin, target, budget);
                let distance = origin.manhattan_distance(target);
                assert!(
                    origin.manhattan_distance(step) <= budget,
                    "{origin} -> {target} with {budget} overspent: {step}"
                );
                assert_eq!(
                    step == target,
                    distance <= budget,
                    "{origin} -> {target} with {budget} landed on {step}"
                );
                assert!(
                    step.manhattan_distance(target) <= distance,
                    "{origin} -> {target} with {budget} moved away: {step}"
                );
            }
        }
    }
}

#[test]
fn move_toward_never_passes_the_target_on_an_axis() {
    let origin = Position::new(10, 10);
    for target in [Position::new(11, 30), Position::new(-20, 9), Position::new(12, 2)] {
        let step = move_toward(origin, target, 6);
        let between =
            |from: i32, to: i32, value: i32| (from.min(to)..=from.max(to)).contains(&value);
        assert!(between(origin.x(), target.x(), step.x()), "{step}");
        assert!(between(origin.y(), target.y(), step.y()), "{step}");
    }
}

#[test]
fn single_point_budget_cannot_step_diagonally() {
    let stuck = Position::new(12, 1);
    assert_eq!(move_toward(stuck, Position::new(13, 0), 1), stuck);
    assert_eq!(move_toward(stuck, Position::new(12, 0), 1), Position::new(12, 0));
    assert_eq!(move_toward(stuck, Position::new(14, 0), 2), Position::new(13, 0));
}

#[test]
fn market_approach_walks_in_budgeted_steps() {
    let market = MarketBand::new(13, 17, 0).expect("valid band");
    let mut position = Position::new(10, 19);
    let destination = market.closest_position(position);
    assert_eq!(destination, Position::new(13, 0));

    let mut path = Vec::new();
    while position != destination {
        let step = move_toward(position, destination, 5);
        assert!(position.manhattan_distance(step) <= 5);
        position = step;
        path.push(step);
    }

    assert_eq!(
        path,
        vec![
            Position::new(10, 15),
            Position::new(10, 11),
            Position::new(11, 8),
            Position::new(12, 4),
            Position::new(13, 0),
        ]
    );
}

#[test]
fn market_keeps_column_inside_band() {
    let market = MarketBand::default();
    assert!(market.contains_column(15));
    assert!(!market.contains_column(12));
    assert_eq!(market.closest_position(Position::new(15, 7)), Position::new(15, 0));
    assert_eq!(market.closest_position(Position::new(2, 7)), Position::new(13, 0));
    assert_eq!(market.closest_position(Position::new(25, 3)), Position::new(17, 0));
}

#[test]
fn inverted_market_band_is_rejected() {
    assert_eq!(
        MarketBand::new(17, 13, 0),
        Err(MarketBandError::Inverted {
            first_column: 17,
            last_column: 13,
        })
    );
    let single = MarketBand::new(4, 4, 2).expect("one-column band");
    assert_eq!(single.closest_position(Position::new(9, 9)), Position::new(4, 2));
}

#[test]
fn ideal_row_prefers_lowest_middle_band() {
    let board = TileMap::from_fn(4, 12, |position| {
        Tile::new(match position.y() {
            3 | 8 => TileType::FBandOuter,
            4 | 7 => TileType::FBandMid,
            5 | 6 => TileType::FBandInner,
            _ => TileType::Soil,
        })
    });
    assert_eq!(ideal_band_row(&board, 4), 7);
}

#[test]
fn ideal_row_falls_back_to_outer_band_then_default() {
    let outer_only = TileMap::from_fn(4, 12, |position| {
        Tile::new(if position.y() == 9 {
            TileType::FBandOuter
        } else {
            TileType::Soil
        })
    });
    assert_eq!(ideal_band_row(&outer_only, 4), 9);

    let bare = TileMap::filled(4, 12, TileType::Arid);
    assert_eq!(ideal_band_row(&bare, 4), 4);
}

#[test]
fn stall_position_keeps_outside_protection_radius() {
    let board = TileMap::filled(10, 10, TileType::Soil);
    let me = Player {
        max_movement: 2,
        ..Player::at(Position::new(5, 5))
    };
    let opponent = Player {
        protection_radius: 1,
        ..Player::at(Position::new(0, 0))
    };

    let stall = stall_position(&board, &me, &opponent, Position::new(5, 5));
    assert_eq!(stall, Position::new(5, 3));
    assert!(stall.manhattan_distance(Position::new(5, 5)) > opponent.protection_radius);
}

#[test]
fn stall_position_stays_put_when_nothing_qualifies() {
    let board = TileMap::filled(10, 10, TileType::Soil);
    let me = Player {
        max_movement: 2,
        ..Player::at(Position::new(5, 5))
    };
    let opponent = Player {
        protection_radius: 4,
        ..Player::at(Position::new(0, 0))
    };
    assert_eq!(
        stall_position(&board, &me, &opponent, Position::new(5, 5)),
        Position::new(5, 5)
    );
}

#[test]
fn turns_to_cover_handles_stationary_players() {
    assert_eq!(turns_to_cover(0, 0), 0.0);
    assert!(turns_to_cover(3, 0).is_infinite());
    assert!((turns_to_cover(12, 5) - 2.4).abs() < f64::EPSILON);
}
