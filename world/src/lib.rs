#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only board and player snapshots for the harvest bot.
//!
//! The engine sends a complete [`GameState`] every phase. This crate decodes
//! it, validates the tile grid, and exposes the snapshot through immutable
//! accessors. Nothing here survives past a single phase: the next snapshot
//! replaces the previous one wholesale. Spatial reasoning over a snapshot
//! lives in [`query`].

use std::collections::BTreeMap;

use harvest_bot_core::{CropType, ItemType, Position, TileType, UpgradeType};
use serde::{de::Error as _, Deserialize, Deserializer};
use thiserror::Error;

pub mod query;

const DEFAULT_RADIUS: u32 = 1;

/// Errors raised while decoding an engine snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot was not valid JSON or did not match the expected shape.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// The declared grid dimensions disagree with the supplied rows.
    #[error("tile map declares {width}x{height} but row {row} has {actual} tiles")]
    RaggedRow {
        /// Declared number of columns.
        width: u32,
        /// Declared number of rows.
        height: u32,
        /// Index of the offending row.
        row: usize,
        /// Number of tiles found in the offending row.
        actual: usize,
    },
    /// The declared height disagrees with the number of rows supplied.
    #[error("tile map declares {height} rows but {actual} were supplied")]
    RowCount {
        /// Declared number of rows.
        height: u32,
        /// Number of rows supplied.
        actual: usize,
    },
    /// The snapshot referenced a player number other than 1 or 2.
    #[error("unknown player number {0}")]
    UnknownPlayer(u8),
}

/// Identifies one of the two players in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum PlayerId {
    /// The player the engine numbers 1.
    One,
    /// The player the engine numbers 2.
    Two,
}

impl PlayerId {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Zero-based index the engine uses in tile effect markers.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = SnapshotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(SnapshotError::UnknownPlayer(other)),
        }
    }
}

/// Crop occupying a tile, or the empty marker when `kind` is [`CropType::None`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Crop {
    /// Kind of crop growing on the tile.
    #[serde(rename = "type")]
    pub kind: CropType,
    /// Turns remaining before the crop can be harvested.
    #[serde(default)]
    pub growth_timer: i32,
    /// Sale value of the crop once harvested.
    #[serde(default)]
    pub value: f64,
}

impl Crop {
    /// Creates a crop of the provided kind with the given growth timer.
    #[must_use]
    pub const fn new(kind: CropType, growth_timer: i32) -> Self {
        Self {
            kind,
            growth_timer,
            value: 0.0,
        }
    }

    /// Reports whether no crop is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == CropType::None
    }
}

/// Immutable representation of a single board tile.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tile {
    /// Terrain classification.
    #[serde(rename = "type")]
    pub kind: TileType,
    /// Crop currently planted on the tile.
    #[serde(default)]
    pub crop: Crop,
    /// Item player one placed on the tile.
    #[serde(default)]
    pub p1_item: ItemType,
    /// Item player two placed on the tile.
    #[serde(default)]
    pub p2_item: ItemType,
    /// Engine-side growth countdown for the tile.
    #[serde(rename = "turnsLeftToGrow", default)]
    pub turns_left_to_grow: i32,
    /// Player whose rain totem covers the tile.
    #[serde(
        rename = "rainTotemEffect",
        default,
        deserialize_with = "effect_owner"
    )]
    pub rain_totem_effect: Option<PlayerId>,
    /// Player whose fertility idol covers the tile.
    #[serde(
        rename = "fertilityIdolEffect",
        default,
        deserialize_with = "effect_owner"
    )]
    pub fertility_idol_effect: Option<PlayerId>,
    /// Player whose scarecrow covers the tile.
    #[serde(
        rename = "scarecrowEffect",
        default,
        deserialize_with = "effect_owner"
    )]
    pub scarecrow_effect: Option<PlayerId>,
}

impl Tile {
    /// Creates an empty tile with the provided terrain.
    #[must_use]
    pub fn new(kind: TileType) -> Self {
        Self {
            kind,
            crop: Crop::default(),
            p1_item: ItemType::None,
            p2_item: ItemType::None,
            turns_left_to_grow: 0,
            rain_totem_effect: None,
            fertility_idol_effect: None,
            scarecrow_effect: None,
        }
    }

    /// Returns the tile with the provided crop planted on it.
    #[must_use]
    pub fn with_crop(mut self, crop: Crop) -> Self {
        self.crop = crop;
        self
    }

    /// Reports whether the tile holds a crop that is ready to harvest.
    #[must_use]
    pub fn is_harvestable(&self) -> bool {
        !self.crop.is_empty() && self.crop.growth_timer <= 0
    }

    /// Reports whether an opposing scarecrow keeps `player` off this tile.
    #[must_use]
    pub fn has_scarecrow_effect(&self, player: PlayerId) -> bool {
        self.scarecrow_effect.is_some_and(|owner| owner != player)
    }
}

fn effect_owner<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    match i32::deserialize(deserializer)? {
        index if index < 0 => Ok(None),
        0 => Ok(Some(PlayerId::One)),
        1 => Ok(Some(PlayerId::Two)),
        other => Err(D::Error::custom(format!("unknown effect owner index {other}"))),
    }
}

/// Which end of the board a fertility band search starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDirection {
    /// Scan from row zero downward.
    TopDown,
    /// Scan from the last row upward.
    BottomUp,
}

/// Dense row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "WireTileMap")]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

#[derive(Deserialize)]
struct WireTileMap {
    #[serde(rename = "mapWidth")]
    map_width: u32,
    #[serde(rename = "mapHeight")]
    map_height: u32,
    tiles: Vec<Vec<Tile>>,
}

impl TryFrom<WireTileMap> for TileMap {
    type Error = SnapshotError;

    fn try_from(wire: WireTileMap) -> Result<Self, Self::Error> {
        Self::new(wire.map_width, wire.map_height, wire.tiles)
    }
}

impl TileMap {
    /// Builds a tile map from row-major rows, validating the dimensions.
    pub fn new(width: u32, height: u32, rows: Vec<Vec<Tile>>) -> Result<Self, SnapshotError> {
        if rows.len() != height as usize {
            return Err(SnapshotError::RowCount {
                height,
                actual: rows.len(),
            });
        }

        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for (row, row_tiles) in rows.into_iter().enumerate() {
            if row_tiles.len() != width as usize {
                return Err(SnapshotError::RaggedRow {
                    width,
                    height,
                    row,
                    actual: row_tiles.len(),
                });
            }
            tiles.extend(row_tiles);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Builds a tile map by asking `tile_at` for every position in row-major order.
    #[must_use]
    pub fn from_fn<F>(width: u32, height: u32, mut tile_at: F) -> Self
    where
        F: FnMut(Position) -> Tile,
    {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(tile_at(Position::new(x as i32, y as i32)));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Builds a tile map where every tile has the same empty terrain.
    #[must_use]
    pub fn filled(width: u32, height: u32, kind: TileType) -> Self {
        Self::from_fn(width, height, |_| Tile::new(kind))
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the position lies on the board.
    #[must_use]
    pub fn is_valid_position(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the tile at the provided position, or `None` off the board.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|index| self.tiles.get(index))
    }

    /// Finds the first row whose leftmost tile has the requested terrain.
    ///
    /// Fertility bands span whole rows, so only column zero is inspected.
    #[must_use]
    pub fn fertility_band_row(&self, target: TileType, direction: SearchDirection) -> Option<u32> {
        let matches = |row: &u32| {
            self.tile_at(Position::new(0, *row as i32))
                .is_some_and(|tile| tile.kind == target)
        };
        match direction {
            SearchDirection::TopDown => (0..self.height).find(matches),
            SearchDirection::BottomUp => (0..self.height).rev().find(matches),
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = u32::try_from(position.x()).ok()?;
        let y = u32::try_from(position.y()).ok()?;
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

fn default_radius() -> u32 {
    DEFAULT_RADIUS
}

/// Immutable representation of a player's state for one phase.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Player {
    /// Display name chosen by the player.
    #[serde(default)]
    pub name: String,
    /// Tile the player stands on.
    pub position: Position,
    /// Money available for buying seeds.
    #[serde(default)]
    pub money: u32,
    /// Item carried into the match.
    #[serde(default)]
    pub item: ItemType,
    /// Upgrade selected for the match.
    #[serde(default)]
    pub upgrade: UpgradeType,
    /// Seeds owned, keyed by crop.
    #[serde(default)]
    pub seed_inventory: BTreeMap<CropType, u32>,
    /// Crops harvested and not yet sold.
    #[serde(default)]
    pub harvested_inventory: Vec<Crop>,
    /// Manhattan distance the player may travel per turn.
    #[serde(default)]
    pub max_movement: u32,
    /// Manhattan radius within which the player can harvest.
    #[serde(default = "default_radius")]
    pub harvest_radius: u32,
    /// Manhattan radius within which the player can plant.
    #[serde(default = "default_radius")]
    pub plant_radius: u32,
    /// Manhattan radius around the player where the opponent may not plant.
    #[serde(default)]
    pub protection_radius: u32,
    /// Maximum number of seeds and crops the player can carry.
    #[serde(default, alias = "carring_capacity")]
    pub carrying_capacity: u32,
    /// Reports whether the carried item is still unused.
    #[serde(default)]
    pub has_item: bool,
}

impl Player {
    /// Creates a player at `position` with the engine's default radii.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self {
            position,
            harvest_radius: DEFAULT_RADIUS,
            plant_radius: DEFAULT_RADIUS,
            ..Self::default()
        }
    }

    /// Owned seeds flattened into one entry per seed, in crop order.
    #[must_use]
    pub fn seeds(&self) -> Vec<CropType> {
        self.seed_inventory
            .iter()
            .flat_map(|(crop, count)| std::iter::repeat(*crop).take(*count as usize))
            .collect()
    }
}

/// Complete snapshot of one phase of the match.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameState {
    /// Current turn number.
    pub turn: u32,
    /// Free-text messages from the engine about the previous phase.
    #[serde(default)]
    pub feedback: Vec<String>,
    /// Which of the two players this bot controls.
    pub player_num: PlayerId,
    /// State of player one.
    pub p1: Player,
    /// State of player two.
    pub p2: Player,
    /// Board contents.
    pub tile_map: TileMap,
}

impl GameState {
    /// Decodes a snapshot from the engine's JSON representation.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The player controlled by this bot.
    #[must_use]
    pub fn my_player(&self) -> &Player {
        self.player(self.player_num)
    }

    /// The opposing player.
    #[must_use]
    pub fn opponent_player(&self) -> &Player {
        self.player(self.player_num.opponent())
    }

    /// Player state for the provided identifier.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.p1,
            PlayerId::Two => &self.p2,
        }
    }
}
