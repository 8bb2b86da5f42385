use indexmap::IndexMap;

use crate::core::CanonicalDataset;
use crate::render::Color;

/// Tableau 10 categorical palette.
pub const TABLEAU_10: [Color; 10] = [
    Color::rgb8(0x4e, 0x79, 0xa7),
    Color::rgb8(0xf2, 0x8e, 0x2c),
    Color::rgb8(0xe1, 0x57, 0x59),
    Color::rgb8(0x76, 0xb7, 0xb2),
    Color::rgb8(0x59, 0xa1, 0x4f),
    Color::rgb8(0xed, 0xc9, 0x49),
    Color::rgb8(0xaf, 0x7a, 0xa1),
    Color::rgb8(0xff, 0x9d, 0xa7),
    Color::rgb8(0x9c, 0x75, 0x5f),
    Color::rgb8(0xba, 0xb0, 0xab),
];

/// Ordinal category-to-color map fixed at load time.
///
/// Slots follow the sorted category set of the whole dataset, so a category
/// keeps its color whatever else is currently visible. Palettes shorter than
/// the category set wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssignment {
    slots: IndexMap<String, Color>,
}

impl ColorAssignment {
    /// Assigns palette slots to `categories` after sorting and de-duplicating them.
    #[must_use]
    pub fn new<I, S>(categories: I, palette: &[Color]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = categories.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();

        let palette = if palette.is_empty() {
            &TABLEAU_10[..]
        } else {
            palette
        };
        let slots = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name, palette[idx % palette.len()]))
            .collect();
        Self { slots }
    }

    #[must_use]
    pub fn from_dataset(dataset: &CanonicalDataset, palette: &[Color]) -> Self {
        Self::new(dataset.categories(), palette)
    }

    #[must_use]
    pub fn color_of(&self, category: &str) -> Option<Color> {
        self.slots.get(category).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.slots.iter().map(|(name, color)| (name.as_str(), *color))
    }
}
