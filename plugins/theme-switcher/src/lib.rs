pub mod config;
pub mod controller;
pub mod core;
pub mod host;
pub mod persist;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, MarkerTarget, SwitcherConfig, ThemeListInput};
pub use controller::ThemeController;
pub use host::{CONTROL_MARKUP, ControlMarkup, HeadlessPage, PageHost};
pub use persist::{MemoryBackend, PreferenceBackend, PreferenceChain, PreferenceError};

pub(crate) const LOG_CONTEXT: &str = "theme-switcher";
