mod catalog;
mod palette;
mod reducer;
mod selection;

pub use catalog::{
    CatalogError, DEFAULT_THEME_NAMES, ThemeCatalog, ThemeCycleDirection, ThemeIndex, ThemeName,
    cycle_theme_index_from_index,
};
pub use palette::{
    Backdrop, StyleAssignment, StyleTable, StyleVar, ThemeRender, ThemeStyle, render_theme,
};
pub use reducer::{
    SwitcherStatus, ThemeSwitcherEffect, ThemeSwitcherEvent, ThemeSwitcherMachine,
    ThemeSwitcherTransition,
};
pub use selection::{StartingSource, StartingTheme, resolve_starting_theme};
