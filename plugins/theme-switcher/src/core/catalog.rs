use std::borrow::Cow;
use std::collections::BTreeMap;

use derive_more::Display;
use nonempty::NonEmpty;
use thiserror::Error;
use webrs_support::cycle;

/// Built-in rotation used when no usable catalog is injected.
pub const DEFAULT_THEME_NAMES: [&str; 7] = [
    "darkpaper",
    "paper",
    "blue",
    "green",
    "orange",
    "pink",
    "red",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("theme name must contain a non-blank character")]
    BlankName,
    #[error("theme catalog has no usable names")]
    Empty,
}

/// Theme identifier. Doubles as the marker class and the persisted value,
/// so it never carries surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Display)]
pub struct ThemeName(Cow<'static, str>);

impl ThemeName {
    pub fn try_new(value: &str) -> Result<Self, CatalogError> {
        match value.trim() {
            "" => Err(CatalogError::BlankName),
            trimmed => Ok(Self(Cow::Owned(trimmed.to_string()))),
        }
    }

    /// Built-in names are trimmed literals.
    const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label shown on the toggle control.
    pub fn display_label(&self) -> String {
        webrs_support::capitalize_first(self.as_str())
    }
}

/// Position of a theme inside the `ThemeCatalog` that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ThemeIndex {
    position: usize,
}

impl ThemeIndex {
    pub const FIRST: Self = Self { position: 0 };

    pub const fn position(self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCycleDirection {
    Next,
    Prev,
}

/// Ordered theme rotation. Never empty; duplicate names keep their slots
/// but resolve to the first one on lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: NonEmpty<ThemeName>,
    positions: BTreeMap<String, ThemeIndex>,
}

impl ThemeCatalog {
    pub fn new(themes: NonEmpty<ThemeName>) -> Self {
        // Reversed so earlier duplicates overwrite later ones.
        let positions = themes
            .iter()
            .enumerate()
            .rev()
            .map(|(position, theme)| (theme.as_str().to_string(), ThemeIndex { position }))
            .collect();
        Self { themes, positions }
    }

    /// Builds a catalog from raw strings, dropping blank entries.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let themes = names
            .into_iter()
            .filter_map(|name| ThemeName::try_new(name.as_ref()).ok())
            .collect();
        NonEmpty::from_vec(themes)
            .map(Self::new)
            .ok_or(CatalogError::Empty)
    }

    pub fn builtin() -> Self {
        let [head, tail @ ..] = DEFAULT_THEME_NAMES;
        Self::new(NonEmpty::from((
            ThemeName::from_static(head),
            tail.into_iter().map(ThemeName::from_static).collect(),
        )))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Index of the final theme in rotation order.
    pub fn last(&self) -> ThemeIndex {
        ThemeIndex {
            position: self.len() - 1,
        }
    }

    pub fn at(&self, position: usize) -> Option<ThemeIndex> {
        (position < self.len()).then_some(ThemeIndex { position })
    }

    pub fn get(&self, index: ThemeIndex) -> Option<&ThemeName> {
        self.themes.get(index.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeName> {
        self.themes.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ThemeIndex> {
        self.positions.get(name).copied()
    }

    /// One step in `direction`, wrapping at both ends.
    pub fn step(&self, current: ThemeIndex, direction: ThemeCycleDirection) -> Option<ThemeIndex> {
        let position = match direction {
            ThemeCycleDirection::Next => cycle::next_index(self.len(), current.position),
            ThemeCycleDirection::Prev => cycle::prev_index(self.len(), current.position),
        }?;
        Some(ThemeIndex { position })
    }
}

/// Computes the one-step cycle target.
///
/// Semantics:
/// - known current theme: move one step in the requested direction with wrap-around.
/// - unknown current theme: `Next` chooses first, `Prev` chooses last.
pub fn cycle_theme_index_from_index(
    catalog: &ThemeCatalog,
    current_index: Option<ThemeIndex>,
    direction: ThemeCycleDirection,
) -> ThemeIndex {
    match (current_index, direction) {
        (Some(index), _) => catalog.step(index, direction).unwrap_or(index),
        (None, ThemeCycleDirection::Next) => ThemeIndex::FIRST,
        (None, ThemeCycleDirection::Prev) => catalog.last(),
    }
}
