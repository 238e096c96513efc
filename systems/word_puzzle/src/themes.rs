//! Puzzle themes, their word lists and the canned definitions used by hints.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Topic a puzzle word is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Classical elements and their reactions.
    Elements,
    /// Plants and landscapes.
    Nature,
    /// Sky and climate.
    Weather,
    /// Laboratory equipment and substances.
    Alchemy,
    /// Rocks and gems.
    Minerals,
    /// Power and physics.
    Energy,
    /// Sea and shore.
    Ocean,
}

impl Theme {
    /// Every theme in rotation order.
    pub const ALL: [Theme; 7] = [
        Self::Elements,
        Self::Nature,
        Self::Weather,
        Self::Alchemy,
        Self::Minerals,
        Self::Energy,
        Self::Ocean,
    ];

    /// Theme assigned to a level when none is requested.
    ///
    /// Level zero is treated as level one.
    #[must_use]
    pub fn for_level(level: u32) -> Theme {
        let index = (level.max(1) - 1) as usize % Self::ALL.len();
        Self::ALL[index]
    }

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elements => "elements",
            Self::Nature => "nature",
            Self::Weather => "weather",
            Self::Alchemy => "alchemy",
            Self::Minerals => "minerals",
            Self::Energy => "energy",
            Self::Ocean => "ocean",
        }
    }

    /// Upper-case words of the theme; the first entry is the fallback.
    #[must_use]
    pub const fn words(self) -> &'static [&'static str] {
        match self {
            Self::Elements => &[
                "FLAME", "EARTH", "WATER", "BLAZE", "STONE", "PLASMA", "CINDER", "EMBERS",
                "ELEMENT", "CRYSTAL", "LIGHTNING",
            ],
            Self::Nature => &[
                "GROVE", "PLANT", "CEDAR", "BLOOM", "MAPLE", "FOREST", "MEADOW", "BRANCH",
                "BLOSSOM", "SEEDLING", "WILDERNESS",
            ],
            Self::Weather => &[
                "CLOUD", "STORM", "SLEET", "FROST", "SHOWER", "STORMY", "CLOUDY", "THUNDER",
                "DRIZZLE", "MONSOON",
            ],
            Self::Alchemy => &[
                "FLASK", "FORGE", "ETHER", "ELIXIR", "POTION", "SULFUR", "ALEMBIC", "MERCURY",
                "CRUCIBLE", "TRANSMUTE",
            ],
            Self::Minerals => &[
                "TOPAZ", "SLATE", "BERYL", "AGATE", "QUARTZ", "GARNET", "COBALT", "GRANITE",
                "OBSIDIAN", "FELDSPAR",
            ],
            Self::Energy => &[
                "POWER", "SPARK", "SOLAR", "JOULE", "CHARGE", "FUSION", "PHOTON", "VOLTAGE",
                "KINETIC", "REACTOR",
            ],
            Self::Ocean => &[
                "WAVES", "CORAL", "TIDAL", "SHORE", "LAGOON", "ANCHOR", "HARBOR", "CURRENT",
                "SEAWEED", "MARINER",
            ],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a theme.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == needle)
            .ok_or_else(|| UnknownTheme(value.to_owned()))
    }
}

const DEFINITIONS: [(&str, &str); 16] = [
    ("FLAME", "The visible, glowing part of a fire."),
    ("PLASMA", "A hot, electrically charged state of matter."),
    ("CRYSTAL", "A solid whose atoms repeat in an ordered lattice."),
    ("FOREST", "A large area covered chiefly with trees."),
    ("MEADOW", "A field of grass and wildflowers."),
    ("CLOUD", "A visible mass of water droplets floating in the sky."),
    ("THUNDER", "The sound that follows a flash of lightning."),
    ("ELIXIR", "A magical liquid said to cure or transform."),
    ("ALEMBIC", "An apparatus once used for distilling."),
    ("CRUCIBLE", "A container that withstands very high heat."),
    ("QUARTZ", "A hard mineral made of silicon and oxygen."),
    ("OBSIDIAN", "Dark volcanic glass."),
    ("JOULE", "The unit of energy in the metric system."),
    ("FUSION", "Joining light nuclei into heavier ones."),
    ("LAGOON", "Shallow water separated from the sea by a reef or bar."),
    ("CORAL", "A hard structure built by tiny sea animals."),
];

/// Canned definition of a word, if one exists.
pub(crate) fn definition(word: &str) -> Option<&'static str> {
    DEFINITIONS
        .iter()
        .find(|(entry, _)| *entry == word)
        .map(|&(_, text)| text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_rotate_through_themes() {
        assert_eq!(Theme::for_level(0), Theme::Elements);
        assert_eq!(Theme::for_level(1), Theme::Elements);
        assert_eq!(Theme::for_level(7), Theme::Ocean);
        assert_eq!(Theme::for_level(8), Theme::Elements);
    }

    #[test]
    fn every_theme_covers_every_length_tier() {
        for theme in Theme::ALL {
            let words = theme.words();
            assert!(words.iter().any(|w| w.len() == 5), "{theme} lacks 5 letters");
            assert!(words.iter().any(|w| w.len() == 6), "{theme} lacks 6 letters");
            assert!(words.iter().any(|w| w.len() >= 7), "{theme} lacks long words");
            assert!(
                words.iter().all(|w| w.bytes().all(|b| b.is_ascii_uppercase())),
                "{theme} has a non-letter word"
            );
        }
    }

    #[test]
    fn themes_parse_case_insensitively() {
        assert_eq!("Ocean".parse::<Theme>(), Ok(Theme::Ocean));
        assert!("lava".parse::<Theme>().is_err());
    }

    #[test]
    fn definitions_exist_only_for_listed_words() {
        assert!(definition("FLAME").is_some());
        assert_eq!(definition("BLAZE"), None);
    }
}
