//! Element identifiers and their static physical properties.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Closed set of elements that may occupy a grid cell.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementId {
    /// Basic element available from the first level.
    Fire,
    /// Basic element available from the first level.
    Water,
    /// Basic element available from the first level.
    Earth,
    /// Basic element available from the first level.
    Air,
    /// Unlockable element.
    Metal,
    /// Unlockable element.
    Wood,
    /// Derived from sand and fire.
    Crystal,
    /// Derived from fire and water.
    Steam,
    /// Derived from water and air.
    Cloud,
    /// Derived from fire and earth.
    Lava,
    /// Derived from earth and air.
    Sand,
    /// Derived from fire and air, or from a ring of fire.
    Plasma,
    /// Result of the earth, fire and metal combination.
    Forge,
    /// Result of the earth, water and wood combination.
    Forest,
    /// Result of the air, cloud and metal combination.
    Lightning,
    /// Result of the earth, steam and water combination.
    Geyser,
}

impl ElementId {
    /// Every element in declaration order.
    pub const ALL: [ElementId; 16] = [
        Self::Fire,
        Self::Water,
        Self::Earth,
        Self::Air,
        Self::Metal,
        Self::Wood,
        Self::Crystal,
        Self::Steam,
        Self::Cloud,
        Self::Lava,
        Self::Sand,
        Self::Plasma,
        Self::Forge,
        Self::Forest,
        Self::Lightning,
        Self::Geyser,
    ];

    /// The four elements every board starts with.
    pub const BASIC: [ElementId; 4] = [Self::Fire, Self::Water, Self::Earth, Self::Air];

    /// Lower-case name used in catalogs, logs and the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Metal => "metal",
            Self::Wood => "wood",
            Self::Crystal => "crystal",
            Self::Steam => "steam",
            Self::Cloud => "cloud",
            Self::Lava => "lava",
            Self::Sand => "sand",
            Self::Plasma => "plasma",
            Self::Forge => "forge",
            Self::Forest => "forest",
            Self::Lightning => "lightning",
            Self::Geyser => "geyser",
        }
    }

    /// Progression tier the element belongs to.
    #[must_use]
    pub const fn tier(self) -> ElementTier {
        match self {
            Self::Fire | Self::Water | Self::Earth | Self::Air => ElementTier::Basic,
            Self::Metal | Self::Wood => ElementTier::Unlockable,
            Self::Crystal
            | Self::Steam
            | Self::Cloud
            | Self::Lava
            | Self::Sand
            | Self::Plasma => ElementTier::Derived,
            Self::Forge | Self::Forest | Self::Lightning | Self::Geyser => {
                ElementTier::Combination
            }
        }
    }

    /// Element printed with the provided glyph, if any.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Option<ElementId> {
        Self::ALL.into_iter().find(|element| element.glyph() == glyph)
    }

    /// Single character used when printing boards.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Fire => 'F',
            Self::Water => 'W',
            Self::Earth => 'E',
            Self::Air => 'A',
            Self::Metal => 'M',
            Self::Wood => 'O',
            Self::Crystal => 'C',
            Self::Steam => 'S',
            Self::Cloud => 'L',
            Self::Lava => 'V',
            Self::Sand => 'D',
            Self::Plasma => 'P',
            Self::Forge => 'G',
            Self::Forest => 'T',
            Self::Lightning => 'Z',
            Self::Geyser => 'Y',
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known element.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown element '{0}'")]
pub struct UnknownElementName(pub String);

impl FromStr for ElementId {
    type Err = UnknownElementName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|element| element.as_str() == needle)
            .ok_or_else(|| UnknownElementName(value.to_owned()))
    }
}

/// Progression tier of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementTier {
    /// Available on every board.
    Basic,
    /// Unlocked through level progression.
    Unlockable,
    /// Produced by pair interactions.
    Derived,
    /// Produced by three-element combinations.
    Combination,
}

/// Physical properties attached to an element for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementProperties {
    /// Relative mass per cell in `[0, 1]`.
    pub density: f32,
    /// Resistance to flow in `[0, 1]`.
    pub viscosity: f32,
    /// Tendency to react or evaporate in `[0, 1]`.
    pub volatility: f32,
    /// Ability to carry energy in `[0, 1]`.
    pub conductivity: f32,
    /// Whether the element can rest on top of another element.
    pub stackable: bool,
}

impl ElementProperties {
    /// Creates a property record.
    #[must_use]
    pub const fn new(
        density: f32,
        viscosity: f32,
        volatility: f32,
        conductivity: f32,
        stackable: bool,
    ) -> Self {
        Self {
            density,
            viscosity,
            volatility,
            conductivity,
            stackable,
        }
    }

    /// Returns the first property outside `[0, 1]`, if any.
    #[must_use]
    pub fn out_of_range(&self) -> Option<(&'static str, f32)> {
        [
            ("density", self.density),
            ("viscosity", self.viscosity),
            ("volatility", self.volatility),
            ("conductivity", self.conductivity),
        ]
        .into_iter()
        .find(|(_, value)| !(0.0..=1.0).contains(value))
    }
}
