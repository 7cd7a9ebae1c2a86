use harvest_bot_core::{CropType, Position, TileType};
use harvest_bot_world::{
    query::{self, PLUS_FOOTPRINT},
    Crop, Player, SearchDirection, Tile, TileMap,
};

fn banded_board(height: u32, band_of: impl Fn(i32) -> TileType) -> TileMap {
    TileMap::from_fn(6, height, |position| Tile::new(band_of(position.y())))
}

fn far_opponent() -> Player {
    Player {
        protection_radius: 1,
        ..Player::at(Position::new(-100, -100))
    }
}

#[test]
fn out_of_bounds_positions_are_invalid() {
    let board = TileMap::filled(4, 3, TileType::Soil);
    assert!(board.is_valid_position(Position::new(3, 2)));
    assert!(!board.is_valid_position(Position::new(4, 2)));
    assert!(!board.is_valid_position(Position::new(0, 3)));
    assert!(!board.is_valid_position(Position::new(-1, 0)));
    assert!(board.tile_at(Position::new(0, -1)).is_none());
}

#[test]
fn fertility_band_row_searches_from_either_end() {
    let board = banded_board(10, |row| match row {
        2 | 7 => TileType::FBandMid,
        4 => TileType::FBandOuter,
        _ => TileType::Soil,
    });
    assert_eq!(
        board.fertility_band_row(TileType::FBandMid, SearchDirection::TopDown),
        Some(2)
    );
    assert_eq!(
        board.fertility_band_row(TileType::FBandMid, SearchDirection::BottomUp),
        Some(7)
    );
    assert_eq!(
        board.fertility_band_row(TileType::FBandInner, SearchDirection::BottomUp),
        None
    );
}

#[test]
fn fertility_band_search_is_mirror_symmetric() {
    let height = 12;
    let layout = |row: i32| match row {
        1 => TileType::FBandOuter,
        3 | 5 => TileType::FBandMid,
        6 => TileType::FBandInner,
        9 => TileType::FBandOuter,
        _ => TileType::Soil,
    };
    let board = banded_board(height, layout);
    let mirrored = banded_board(height, |row| layout(height as i32 - 1 - row));

    for target in [
        TileType::FBandOuter,
        TileType::FBandMid,
        TileType::FBandInner,
        TileType::Arid,
    ] {
        let bottom_up = board.fertility_band_row(target, SearchDirection::BottomUp);
        let top_down = mirrored.fertility_band_row(target, SearchDirection::TopDown);
        assert_eq!(bottom_up.map(|row| height - 1 - row), top_down, "{target:?}");
    }
}

#[test]
fn ranges_are_bounded_diamonds_in_row_major_order() {
    let board = TileMap::filled(5, 5, TileType::Soil);
    let player = Player {
        max_movement: 2,
        harvest_radius: 1,
        plant_radius: 0,
        ..Player::at(Position::new(0, 0))
    };

    assert_eq!(
        query::within_move_range(&board, &player),
        vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(0, 2),
        ]
    );
    assert_eq!(
        query::within_harvest_range(&board, &player),
        vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)]
    );
    assert_eq!(
        query::within_plant_range(&board, &player),
        vec![Position::new(0, 0)]
    );
}

#[test]
fn plantable_excludes_crops_and_protected_tiles() {
    let board = TileMap::from_fn(6, 6, |position| {
        let tile = Tile::new(TileType::FBandMid);
        if position == Position::new(1, 1) {
            tile.with_crop(Crop::new(CropType::Corn, 3))
        } else {
            tile
        }
    });
    let opponent = Player {
        protection_radius: 1,
        ..Player::at(Position::new(4, 4))
    };

    assert!(!query::is_plantable(&board, &opponent, Position::new(1, 1)));
    assert!(!query::is_plantable(&board, &opponent, Position::new(4, 3)));
    assert!(!query::is_plantable(&board, &opponent, Position::new(6, 0)));
    assert!(query::is_plantable(&board, &opponent, Position::new(4, 2)));
    assert!(query::is_plantable(&board, &opponent, Position::new(0, 0)));
}

#[test]
fn harvestable_requires_ready_crop_in_range() {
    let board = TileMap::from_fn(5, 5, |position| {
        let tile = Tile::new(TileType::FBandOuter);
        match (position.x(), position.y()) {
            (2, 1) => tile.with_crop(Crop::new(CropType::Grape, 0)),
            (2, 3) => tile.with_crop(Crop::new(CropType::Grape, 2)),
            (0, 0) => tile.with_crop(Crop::new(CropType::Grape, -1)),
            _ => tile,
        }
    });
    let player = Player::at(Position::new(2, 2));
    assert_eq!(
        query::harvestable_within_range(&board, &player),
        vec![Position::new(2, 1)]
    );
}

#[test]
fn plus_search_picks_closest_clear_column() {
    let board = TileMap::from_fn(10, 10, |position| {
        let tile = Tile::new(TileType::FBandMid);
        if position == Position::new(5, 6) {
            tile.with_crop(Crop::new(CropType::Potato, 2))
        } else {
            tile
        }
    });
    let centre = query::nearest_plantable_plus(&board, &far_opponent(), Position::new(5, 6), 4);
    assert_eq!(centre, Position::new(3, 6), "ties break toward the lower column");
}

#[test]
fn plus_search_clamps_row_onto_board() {
    let board = TileMap::filled(8, 10, TileType::Soil);
    let opponent = far_opponent();
    assert_eq!(
        query::nearest_plantable_plus(&board, &opponent, Position::new(3, 1), 4).y(),
        4
    );
    assert_eq!(
        query::nearest_plantable_plus(&board, &opponent, Position::new(3, 9), 4).y(),
        8
    );
}

#[test]
fn plus_search_never_overlaps_obstructions() {
    let board = TileMap::from_fn(12, 12, |position| {
        let tile = Tile::new(TileType::FBandMid);
        if (position.x() + position.y()) % 5 == 0 {
            tile.with_crop(Crop::new(CropType::Peanut, 1))
        } else {
            tile
        }
    });
    let opponent = Player {
        protection_radius: 2,
        ..Player::at(Position::new(6, 6))
    };

    for row in 4..11 {
        for column in 0..12 {
            let ideal = Position::new(column, row);
            let centre = query::nearest_plantable_plus(&board, &opponent, ideal, 4);
            let clear = PLUS_FOOTPRINT
                .iter()
                .all(|offset| query::is_plantable(&board, &opponent, centre + *offset));
            if centre != ideal {
                assert!(clear, "footprint at {centre} overlaps an obstruction");
            }
        }
    }
}

#[test]
fn plus_search_falls_back_to_ideal_when_row_is_blocked() {
    let board = TileMap::from_fn(6, 8, |position| {
        Tile::new(TileType::FBandMid).with_crop(if position.y() == 5 {
            Crop::new(CropType::Corn, 4)
        } else {
            Crop::default()
        })
    });
    let ideal = Position::new(2, 5);
    assert_eq!(
        query::nearest_plantable_plus(&board, &far_opponent(), ideal, 4),
        ideal
    );
}
