//! Static element catalog: physical properties and the pair interaction table.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::elements::{ElementId, ElementProperties, UnknownElementName};

/// Outcome of two adjacent elements reacting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Element the reacting neighbour turns into.
    pub result: ElementId,
    /// Score awarded for the reaction.
    pub score: u32,
    /// Optional label used by objectives and logs.
    #[serde(default)]
    pub tag: Option<String>,
}

impl InteractionRule {
    /// Creates a rule without a tag.
    #[must_use]
    pub const fn new(result: ElementId, score: u32) -> Self {
        Self {
            result,
            score,
            tag: None,
        }
    }
}

/// Errors raised while building a catalog from external data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog document could not be parsed.
    #[error("could not parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    /// A property table names an element outside the closed set.
    #[error(transparent)]
    UnknownElement(#[from] UnknownElementName),
    /// An element has no property record.
    #[error("element '{0}' has no properties")]
    MissingProperties(ElementId),
    /// A property value lies outside `[0, 1]`.
    #[error("property '{property}' of '{element}' is {value}, expected a value in [0, 1]")]
    PropertyOutOfRange {
        /// Element owning the property.
        element: ElementId,
        /// Name of the offending property.
        property: &'static str,
        /// Value found in the document.
        value: f32,
    },
    /// The same ordered pair was declared twice.
    #[error("interaction '{first}_{second}' is declared more than once")]
    DuplicateInteraction {
        /// First element of the pair.
        first: ElementId,
        /// Second element of the pair.
        second: ElementId,
    },
}

/// Read-only catalog of element properties and interactions.
#[derive(Clone, Debug)]
pub struct Catalog {
    properties: BTreeMap<ElementId, ElementProperties>,
    interactions: HashMap<(ElementId, ElementId), InteractionRule>,
}

impl Catalog {
    /// Builds the catalog shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        let properties = BUILTIN_PROPERTIES.iter().copied().collect();
        let interactions = BUILTIN_INTERACTIONS
            .iter()
            .map(|&(first, second, result, score)| {
                ((first, second), InteractionRule::new(result, score))
            })
            .collect();
        Self {
            properties,
            interactions,
        }
    }

    /// Parses a catalog document.
    ///
    /// The document lists one `[elements.<name>]` table per element and any
    /// number of `[[interactions]]` entries with `first`, `second`, `result`,
    /// `score` and an optional `tag`. Every element must have properties.
    pub fn from_toml_str(document: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(document)?;

        let mut properties_by_element = BTreeMap::new();
        for (name, properties) in file.elements {
            let element: ElementId = name.parse()?;
            let _ = properties_by_element.insert(element, properties);
        }

        for element in ElementId::ALL {
            let Some(properties) = properties_by_element.get(&element) else {
                return Err(CatalogError::MissingProperties(element));
            };
            if let Some((property, value)) = properties.out_of_range() {
                return Err(CatalogError::PropertyOutOfRange {
                    element,
                    property,
                    value,
                });
            }
        }

        let mut interactions = HashMap::with_capacity(file.interactions.len());
        for entry in file.interactions {
            let key = (entry.first, entry.second);
            let rule = InteractionRule {
                result: entry.result,
                score: entry.score,
                tag: entry.tag,
            };
            if interactions.insert(key, rule).is_some() {
                return Err(CatalogError::DuplicateInteraction {
                    first: entry.first,
                    second: entry.second,
                });
            }
        }

        Ok(Self {
            properties: properties_by_element,
            interactions,
        })
    }

    /// Properties of the provided element.
    #[must_use]
    pub fn properties(&self, element: ElementId) -> Option<&ElementProperties> {
        self.properties.get(&element)
    }

    /// Rule stored for the exact ordered pair, without trying the reverse order.
    #[must_use]
    pub fn interaction(&self, first: ElementId, second: ElementId) -> Option<&InteractionRule> {
        self.interactions.get(&(first, second))
    }

    /// Iterates the ordered pairs and rules in the table, sorted by pair.
    pub fn interactions(&self) -> impl Iterator<Item = ((ElementId, ElementId), &InteractionRule)> {
        let mut entries: Vec<_> = self
            .interactions
            .iter()
            .map(|(pair, rule)| (*pair, rule))
            .collect();
        entries.sort_by_key(|(pair, _)| *pair);
        entries.into_iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    elements: BTreeMap<String, ElementProperties>,
    #[serde(default)]
    interactions: Vec<InteractionEntry>,
}

#[derive(Debug, Deserialize)]
struct InteractionEntry {
    first: ElementId,
    second: ElementId,
    result: ElementId,
    score: u32,
    #[serde(default)]
    tag: Option<String>,
}

const BUILTIN_PROPERTIES: [(ElementId, ElementProperties); 16] = [
    (ElementId::Fire, ElementProperties::new(0.1, 0.0, 0.9, 0.6, false)),
    (ElementId::Water, ElementProperties::new(0.6, 0.3, 0.3, 0.7, false)),
    (ElementId::Earth, ElementProperties::new(0.9, 1.0, 0.1, 0.2, true)),
    (ElementId::Air, ElementProperties::new(0.05, 0.0, 0.5, 0.1, false)),
    (ElementId::Metal, ElementProperties::new(1.0, 1.0, 0.05, 1.0, true)),
    (ElementId::Wood, ElementProperties::new(0.5, 1.0, 0.4, 0.1, true)),
    (ElementId::Crystal, ElementProperties::new(0.8, 1.0, 0.2, 0.9, true)),
    (ElementId::Steam, ElementProperties::new(0.05, 0.1, 0.8, 0.3, false)),
    (ElementId::Cloud, ElementProperties::new(0.1, 0.2, 0.4, 0.4, false)),
    (ElementId::Lava, ElementProperties::new(0.95, 0.8, 0.7, 0.5, false)),
    (ElementId::Sand, ElementProperties::new(0.7, 0.6, 0.1, 0.1, true)),
    (ElementId::Plasma, ElementProperties::new(0.01, 0.0, 1.0, 1.0, false)),
    (ElementId::Forge, ElementProperties::new(1.0, 1.0, 0.3, 0.8, true)),
    (ElementId::Forest, ElementProperties::new(0.6, 1.0, 0.3, 0.1, true)),
    (ElementId::Lightning, ElementProperties::new(0.0, 0.0, 1.0, 1.0, false)),
    (ElementId::Geyser, ElementProperties::new(0.7, 0.4, 0.6, 0.5, false)),
];

// Patterns rely on earth/earth, metal/metal, metal/fire, fire/fire and
// water/water staying inert, so none of those pairs appear here.
const BUILTIN_INTERACTIONS: [(ElementId, ElementId, ElementId, u32); 13] = [
    (ElementId::Fire, ElementId::Water, ElementId::Steam, 100),
    (ElementId::Fire, ElementId::Earth, ElementId::Lava, 120),
    (ElementId::Fire, ElementId::Air, ElementId::Plasma, 150),
    (ElementId::Water, ElementId::Air, ElementId::Cloud, 110),
    (ElementId::Earth, ElementId::Air, ElementId::Sand, 80),
    (ElementId::Earth, ElementId::Water, ElementId::Wood, 90),
    (ElementId::Sand, ElementId::Fire, ElementId::Crystal, 180),
    (ElementId::Lava, ElementId::Water, ElementId::Earth, 60),
    (ElementId::Steam, ElementId::Air, ElementId::Cloud, 90),
    (ElementId::Fire, ElementId::Wood, ElementId::Fire, 50),
    (ElementId::Cloud, ElementId::Cloud, ElementId::Cloud, 10),
    (ElementId::Plasma, ElementId::Water, ElementId::Steam, 70),
    (ElementId::Lava, ElementId::Wood, ElementId::Fire, 60),
];
