use super::catalog::{ThemeCatalog, ThemeIndex};

/// Where the starting theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartingSource {
    /// A stored preference named a catalog member.
    Persisted,
    /// The page already carried a catalog member as a marker.
    Ambient,
    /// Nothing matched; first catalog entry.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingTheme {
    pub index: ThemeIndex,
    pub source: StartingSource,
}

impl StartingTheme {
    /// Only a stored preference is re-applied on load; ambient and default
    /// starts already match what the page renders.
    pub fn should_apply(self) -> bool {
        self.source == StartingSource::Persisted
    }
}

/// Resolves the starting theme from the stored preference and page markers.
///
/// Priority:
/// 1) persisted value
/// 2) first page marker that names a catalog member
/// 3) first catalog entry
///
/// Only names present in `catalog` are considered valid.
pub fn resolve_starting_theme<S>(
    catalog: &ThemeCatalog,
    persisted: Option<&str>,
    ambient_markers: &[S],
) -> StartingTheme
where
    S: AsRef<str>,
{
    if let Some(index) = persisted.and_then(|name| catalog.find_by_name(name)) {
        return StartingTheme {
            index,
            source: StartingSource::Persisted,
        };
    }
    ambient_markers
        .iter()
        .find_map(|marker| catalog.find_by_name(marker.as_ref()))
        .map_or_else(
            || StartingTheme {
                index: ThemeIndex::FIRST,
                source: StartingSource::Default,
            },
            |index| StartingTheme {
                index,
                source: StartingSource::Ambient,
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(values: &[&str]) -> Result<ThemeCatalog, &'static str> {
        ThemeCatalog::try_from_names(values).map_err(|_| "empty catalog")
    }

    const NO_MARKERS: [&str; 0] = [];

    #[test]
    fn prefers_persisted_when_both_match() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let start = resolve_starting_theme(&catalog, Some("c"), &["a"]);
        assert_eq!(start.index.position(), 2);
        assert_eq!(start.source, StartingSource::Persisted);
        assert!(start.should_apply());
        Ok(())
    }

    #[test]
    fn falls_back_to_marker_when_persisted_is_missing() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let start = resolve_starting_theme(&catalog, None, &["layout", "b"]);
        assert_eq!(start.index.position(), 1);
        assert_eq!(start.source, StartingSource::Ambient);
        assert!(!start.should_apply());
        Ok(())
    }

    #[test]
    fn falls_back_to_marker_when_persisted_is_unknown() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let start = resolve_starting_theme(&catalog, Some("missing"), &["b"]);
        assert_eq!(start.index.position(), 1);
        assert_eq!(start.source, StartingSource::Ambient);
        Ok(())
    }

    #[test]
    fn first_recognised_marker_wins() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let start = resolve_starting_theme(&catalog, None, &["x", "c", "b"]);
        assert_eq!(start.index.position(), 2);
        Ok(())
    }

    #[test]
    fn defaults_to_first_when_nothing_matches() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let start = resolve_starting_theme(&catalog, Some("x"), &["y"]);
        assert_eq!(start.index, ThemeIndex::FIRST);
        assert_eq!(start.source, StartingSource::Default);

        let start = resolve_starting_theme(&catalog, None, &NO_MARKERS);
        assert_eq!(start.source, StartingSource::Default);
        Ok(())
    }
}
