#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the harvest bot.
//!
//! This crate defines the value types every other crate speaks in: board
//! [`Position`]s and the real-valued [`Vector2`] used while clamping movement,
//! the game enumerations that appear on the wire, and the decision payloads
//! the bot hands back to the match engine. The world crate builds read-only
//! snapshots out of these types, systems reason over them, and adapters encode
//! the resulting decisions for transmission.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Div, Mul, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod decision;

pub use decision::{ActionDecision, Decision, DecisionError, MoveDecision};

/// Location of a single board tile expressed as column and row coordinates.
///
/// Positions double as integer displacement vectors, so arithmetic may
/// transiently leave the board. Callers validate against the tile map before
/// using a position as a tile reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from column and row coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns a copy of the position moved onto the provided row.
    #[must_use]
    pub const fn with_y(self, y: i32) -> Self {
        Self { x: self.x, y }
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Euclidean length of the position interpreted as a displacement.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.to_vector().magnitude()
    }

    /// Real-valued copy of the position.
    #[must_use]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Limits a displacement so it spends at most `max` movement points.
    ///
    /// Displacements already within budget are returned unchanged. Longer ones
    /// keep their direction, are scaled down to `max` and then rounded toward
    /// zero on each axis, so the result never overshoots the requested target.
    /// Budget is measured in Manhattan length, the same metric the engine
    /// charges movement in.
    #[must_use]
    pub fn clamp_magnitude(self, max: u32) -> Self {
        let length = self.manhattan_distance(Position::default());
        if length <= max {
            return self;
        }

        (self.to_vector() * f64::from(max) / f64::from(length)).truncate()
    }
}

impl Ord for Position {
    /// Row-major ordering: rows first, then columns.
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    fn mul(self, rhs: i32) -> Position {
        Position::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Position {
    type Output = Position;

    fn div(self, rhs: i32) -> Position {
        Position::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Real-valued two dimensional vector used while scaling displacements.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Sum of the absolute components.
    #[must_use]
    pub fn manhattan_length(self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Unit-length vector pointing the same way, or `None` for the zero vector.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return None;
        }
        Some(self / magnitude)
    }

    /// Rounds each component toward zero.
    ///
    /// Flooring positive components and ceiling negative ones keeps a scaled
    /// step from reaching past the point it was aimed at.
    #[must_use]
    pub fn truncate(self) -> Position {
        Position::new(self.x.trunc() as i32, self.y.trunc() as i32)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

/// Crops that can be bought as seeds, planted, and harvested.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CropType {
    /// Marker for a tile without a crop.
    #[default]
    None,
    /// Cheap staple crop.
    Corn,
    /// Fast growing vine crop.
    Grape,
    /// Cheap root crop.
    Potato,
    /// Mid-tier fruit.
    JoganFruit,
    /// Quick, low value legume.
    Peanut,
    /// Hardy grain crop.
    Quadrotriticale,
    /// Mid-tier fruit the farmer starts the match with.
    DuchamFruit,
    /// Premium crop unlocked once the farmer is wealthy.
    GoldenCorn,
}

impl CropType {
    /// Price the green grocer charges for a single seed.
    #[must_use]
    pub const fn seed_price(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Corn => 5,
            Self::Grape => 15,
            Self::Potato => 5,
            Self::JoganFruit => 20,
            Self::Peanut => 5,
            Self::Quadrotriticale => 20,
            Self::DuchamFruit => 20,
            Self::GoldenCorn => 1000,
        }
    }

    /// Number of turns a planted seed needs before it can be harvested.
    #[must_use]
    pub const fn growth_time(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Corn => 6,
            Self::Grape => 3,
            Self::Potato => 3,
            Self::JoganFruit => 5,
            Self::Peanut => 1,
            Self::Quadrotriticale => 4,
            Self::DuchamFruit => 5,
            Self::GoldenCorn => 12,
        }
    }

    /// Name the engine uses for the crop.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Corn => "CORN",
            Self::Grape => "GRAPE",
            Self::Potato => "POTATO",
            Self::JoganFruit => "JOGAN_FRUIT",
            Self::Peanut => "PEANUT",
            Self::Quadrotriticale => "QUADROTRITICALE",
            Self::DuchamFruit => "DUCHAM_FRUIT",
            Self::GoldenCorn => "GOLDEN_CORN",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Terrain classification of a tile.
///
/// Variants are declared in fertility order so that [`TileType::fertility`]
/// grows with soil quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    /// Market tile where seeds are bought and harvests sold.
    GreenGrocer,
    /// Barren ground that grows nothing.
    Arid,
    /// Plain soil.
    Soil,
    /// Outermost and least fertile band.
    FBandOuter,
    /// Middle fertility band.
    FBandMid,
    /// Innermost and most fertile band.
    FBandInner,
}

impl TileType {
    /// Ordered fertility level of the terrain.
    #[must_use]
    pub const fn fertility(self) -> u8 {
        match self {
            Self::GreenGrocer => 0,
            Self::Arid => 1,
            Self::Soil => 2,
            Self::FBandOuter => 3,
            Self::FBandMid => 4,
            Self::FBandInner => 5,
        }
    }

    /// Reports whether the tile belongs to any fertility band.
    #[must_use]
    pub const fn is_fertility_band(self) -> bool {
        self.fertility() >= Self::FBandOuter.fertility()
    }
}

/// Consumable items a player may carry into the match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    /// No item carried.
    #[default]
    None,
    /// Speeds up growth around the player.
    RainTotem,
    /// Boosts fertility around the player.
    FertilityIdol,
    /// Destroys the opponent's crops around the player.
    Pesticide,
    /// Scares the opponent away from nearby crops.
    Scarecrow,
    /// Lets the player sell from anywhere.
    DeliveryDrone,
    /// Grants extra movement for a turn.
    CoffeeThermos,
}

impl ItemType {
    /// Name the engine uses for the item.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::RainTotem => "RAIN_TOTEM",
            Self::FertilityIdol => "FERTILITY_IDOL",
            Self::Pesticide => "PESTICIDE",
            Self::Scarecrow => "SCARECROW",
            Self::DeliveryDrone => "DELIVERY_DRONE",
            Self::CoffeeThermos => "COFFEE_THERMOS",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ItemType {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        const ALL: [ItemType; 7] = [
            ItemType::None,
            ItemType::RainTotem,
            ItemType::FertilityIdol,
            ItemType::Pesticide,
            ItemType::Scarecrow,
            ItemType::DeliveryDrone,
            ItemType::CoffeeThermos,
        ];
        parse_wire_name(value, &ALL, |item| item.wire_name(), "item")
    }
}

/// Passive upgrades a player selects before the match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeType {
    /// No upgrade selected.
    #[default]
    None,
    /// Larger carrying capacity.
    BiggerMuscles,
    /// Larger movement budget.
    LongerLegs,
    /// Larger harvest radius.
    LongerScythe,
    /// Cheaper seeds at the grocer.
    LoyaltyCard,
    /// Chance of doubled harvests.
    RabbitsFoot,
    /// Larger plant radius.
    Spyglass,
}

impl UpgradeType {
    /// Name the engine uses for the upgrade.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::BiggerMuscles => "BIGGER_MUSCLES",
            Self::LongerLegs => "LONGER_LEGS",
            Self::LongerScythe => "LONGER_SCYTHE",
            Self::LoyaltyCard => "LOYALTY_CARD",
            Self::RabbitsFoot => "RABBITS_FOOT",
            Self::Spyglass => "SPYGLASS",
        }
    }
}

impl fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for UpgradeType {
    type Err = ParseNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        const ALL: [UpgradeType; 7] = [
            UpgradeType::None,
            UpgradeType::BiggerMuscles,
            UpgradeType::LongerLegs,
            UpgradeType::LongerScythe,
            UpgradeType::LoyaltyCard,
            UpgradeType::RabbitsFoot,
            UpgradeType::Spyglass,
        ];
        parse_wire_name(value, &ALL, |upgrade| upgrade.wire_name(), "upgrade")
    }
}

/// Error returned when a textual item or upgrade name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`")]
pub struct ParseNameError {
    kind: &'static str,
    name: String,
}

/// Accepts engine names as well as kebab-case spellings such as `coffee-thermos`.
fn parse_wire_name<T: Copy>(
    value: &str,
    all: &[T],
    wire_name: impl Fn(T) -> &'static str,
    kind: &'static str,
) -> Result<T, ParseNameError> {
    let normalized = value.trim().replace('-', "_").to_ascii_uppercase();
    all.iter()
        .copied()
        .find(|candidate| wire_name(*candidate) == normalized)
        .ok_or_else(|| ParseNameError {
            kind,
            name: value.to_owned(),
        })
}
