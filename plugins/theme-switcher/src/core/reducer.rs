use webrs_web_utils::state_machine::{Machine, Transition};

use super::catalog::{
    ThemeCatalog, ThemeCycleDirection, ThemeIndex, ThemeName, cycle_theme_index_from_index,
};
use super::selection::StartingTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherStatus {
    Uninitialized,
    Initialized(ThemeIndex),
}

/// Input events for the theme switcher state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSwitcherEvent {
    /// The page finished parsing and the starting theme was resolved.
    Ready(StartingTheme),
    /// The toggle control was activated.
    Cycle(ThemeCycleDirection),
}

/// Side-effects requested by one state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSwitcherEffect {
    MountControl,
    ApplyTheme(ThemeIndex),
    PersistTheme(ThemeIndex),
}

pub type ThemeSwitcherTransition = Transition<ThemeSwitcherEffect>;

/// Pure reducer for one page lifetime.
///
/// Invariants:
/// - `catalog` is non-empty.
/// - an initialized index is always a catalog index.
/// - `Ready` is accepted once; `Cycle` only after `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSwitcherMachine {
    catalog: ThemeCatalog,
    status: SwitcherStatus,
}

impl ThemeSwitcherMachine {
    pub const fn new(catalog: ThemeCatalog) -> Self {
        Self {
            catalog,
            status: SwitcherStatus::Uninitialized,
        }
    }

    pub const fn status(&self) -> SwitcherStatus {
        self.status
    }

    pub const fn is_initialized(&self) -> bool {
        matches!(self.status, SwitcherStatus::Initialized(_))
    }

    pub const fn current_index(&self) -> Option<ThemeIndex> {
        match self.status {
            SwitcherStatus::Initialized(index) => Some(index),
            SwitcherStatus::Uninitialized => None,
        }
    }

    pub fn current_theme(&self) -> Option<&ThemeName> {
        self.current_index()
            .and_then(|index| self.catalog.get(index))
    }

    pub const fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    fn reduce_ready(&mut self, start: StartingTheme) -> ThemeSwitcherTransition {
        if self.is_initialized() {
            return ThemeSwitcherTransition::default();
        }
        let index = self
            .catalog
            .at(start.index.position())
            .unwrap_or(ThemeIndex::FIRST);
        self.status = SwitcherStatus::Initialized(index);

        let mut transition = ThemeSwitcherTransition::with_effect(ThemeSwitcherEffect::MountControl);
        if start.should_apply() {
            transition.push_effect(ThemeSwitcherEffect::ApplyTheme(index));
        }
        transition
    }

    fn reduce_cycle(&mut self, direction: ThemeCycleDirection) -> ThemeSwitcherTransition {
        let SwitcherStatus::Initialized(current) = self.status else {
            return ThemeSwitcherTransition::default();
        };
        let next = cycle_theme_index_from_index(&self.catalog, Some(current), direction);
        self.status = SwitcherStatus::Initialized(next);
        ThemeSwitcherTransition::with_effects(vec![
            ThemeSwitcherEffect::ApplyTheme(next),
            ThemeSwitcherEffect::PersistTheme(next),
        ])
    }
}

impl Machine for ThemeSwitcherMachine {
    type Event = ThemeSwitcherEvent;
    type Effect = ThemeSwitcherEffect;

    fn reduce(&mut self, event: Self::Event) -> ThemeSwitcherTransition {
        match event {
            ThemeSwitcherEvent::Ready(start) => self.reduce_ready(start),
            ThemeSwitcherEvent::Cycle(direction) => self.reduce_cycle(direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::{StartingSource, resolve_starting_theme};
    use proptest::prelude::*;

    fn catalog(values: &[&str]) -> Result<ThemeCatalog, &'static str> {
        ThemeCatalog::try_from_names(values).map_err(|_| "expected non-empty theme catalog")
    }

    fn ready_at(catalog: &ThemeCatalog, raw: usize, source: StartingSource) -> ThemeSwitcherEvent {
        let index = catalog.at(raw).unwrap_or(ThemeIndex::FIRST);
        ThemeSwitcherEvent::Ready(StartingTheme { index, source })
    }

    const NEXT: ThemeSwitcherEvent = ThemeSwitcherEvent::Cycle(ThemeCycleDirection::Next);

    #[test]
    fn cycle_before_ready_is_noop() -> Result<(), &'static str> {
        let mut machine = ThemeSwitcherMachine::new(catalog(&["a", "b"])?);
        assert!(machine.reduce(NEXT).is_empty());
        assert_eq!(machine.status(), SwitcherStatus::Uninitialized);
        assert_eq!(machine.current_theme(), None);
        Ok(())
    }

    #[test]
    fn persisted_start_mounts_then_applies() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let start = resolve_starting_theme(&catalog, Some("b"), &["a"]);
        let mut machine = ThemeSwitcherMachine::new(catalog);
        let transition = machine.reduce(ThemeSwitcherEvent::Ready(start));
        assert_eq!(
            transition.effects,
            vec![
                ThemeSwitcherEffect::MountControl,
                ThemeSwitcherEffect::ApplyTheme(start.index),
            ]
        );
        assert_eq!(machine.current_theme().map(ThemeName::as_str), Some("b"));
        Ok(())
    }

    #[test]
    fn ambient_start_only_mounts() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let event = ready_at(&catalog, 2, StartingSource::Ambient);
        let mut machine = ThemeSwitcherMachine::new(catalog);
        let transition = machine.reduce(event);
        assert_eq!(transition.effects, vec![ThemeSwitcherEffect::MountControl]);
        assert_eq!(machine.current_index().map(ThemeIndex::position), Some(2));
        Ok(())
    }

    #[test]
    fn second_ready_is_ignored() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let first = ready_at(&catalog, 1, StartingSource::Persisted);
        let second = ready_at(&catalog, 2, StartingSource::Persisted);
        let mut machine = ThemeSwitcherMachine::new(catalog);
        let _ = machine.reduce(first);
        assert!(machine.reduce(second).is_empty());
        assert_eq!(machine.current_index().map(ThemeIndex::position), Some(1));
        Ok(())
    }

    #[test]
    fn cycle_wraps_and_emits_apply_then_persist() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let event = ready_at(&catalog, 2, StartingSource::Default);
        let mut machine = ThemeSwitcherMachine::new(catalog);
        let _ = machine.reduce(event);
        let transition = machine.reduce(NEXT);
        let first = ThemeIndex::FIRST;
        assert_eq!(
            transition.effects,
            vec![
                ThemeSwitcherEffect::ApplyTheme(first),
                ThemeSwitcherEffect::PersistTheme(first),
            ]
        );
        assert_eq!(machine.current_theme().map(ThemeName::as_str), Some("a"));
        Ok(())
    }

    #[test]
    fn cycle_prev_wraps_to_last() -> Result<(), &'static str> {
        let catalog = catalog(&["a", "b", "c"])?;
        let event = ready_at(&catalog, 0, StartingSource::Default);
        let mut machine = ThemeSwitcherMachine::new(catalog);
        let _ = machine.reduce(event);
        let _ = machine.reduce(ThemeSwitcherEvent::Cycle(ThemeCycleDirection::Prev));
        assert_eq!(machine.current_theme().map(ThemeName::as_str), Some("c"));
        Ok(())
    }

    #[test]
    fn single_theme_cycle_still_applies_and_persists() -> Result<(), &'static str> {
        let catalog = catalog(&["only"])?;
        let event = ready_at(&catalog, 0, StartingSource::Default);
        let mut machine = ThemeSwitcherMachine::new(catalog);
        let _ = machine.reduce(event);
        let transition = machine.reduce(NEXT);
        assert_eq!(transition.effects.len(), 2);
        assert_eq!(machine.current_index().map(ThemeIndex::position), Some(0));
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_n_cycles_rotate_by_n(
            len in 1_usize..12,
            start in 0_usize..12,
            cycles in 0_usize..64,
        ) {
            let names: Vec<String> = (0..len).map(|raw| format!("theme-{raw}")).collect();
            let Ok(catalog) = ThemeCatalog::try_from_names(&names) else {
                return Err(TestCaseError::fail("expected non-empty catalog"));
            };
            let start = start % len;
            let event = ready_at(&catalog, start, StartingSource::Persisted);
            let mut machine = ThemeSwitcherMachine::new(catalog);
            let _ = machine.reduce(event);
            for _ in 0..cycles {
                let _ = machine.reduce(NEXT);
            }
            prop_assert_eq!(
                machine.current_index().map(ThemeIndex::position),
                Some((start + cycles) % len)
            );
        }
    }
}
