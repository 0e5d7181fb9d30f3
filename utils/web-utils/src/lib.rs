//! Shared browser-side helpers for widget crates.

#[cfg(target_arch = "wasm32")]
pub mod decode;
mod error;
#[cfg(target_arch = "wasm32")]
pub mod panic;
#[cfg(target_arch = "wasm32")]
pub mod ready;

pub use error::{Error, Result};

pub mod state_machine {
    /// Reducer output: the effects to execute, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Transition<E> {
        pub effects: Vec<E>,
    }

    impl<E> Default for Transition<E> {
        fn default() -> Self {
            Self {
                effects: Vec::new(),
            }
        }
    }

    impl<E> Transition<E> {
        pub fn with_effect(effect: E) -> Self {
            Self {
                effects: vec![effect],
            }
        }

        pub fn with_effects(effects: Vec<E>) -> Self {
            Self { effects }
        }

        pub fn push_effect(&mut self, effect: E) {
            self.effects.push(effect);
        }

        pub fn is_empty(&self) -> bool {
            self.effects.is_empty()
        }
    }

    /// Generic reducer contract for state machines that emit effects.
    pub trait Machine {
        type Event;
        type Effect;

        fn reduce(&mut self, event: Self::Event) -> Transition<Self::Effect>;
    }
}

pub mod notify {
    /// Severity of a diagnostic.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Debug,
        Warn,
        Error,
    }

    pub(crate) fn format_message(context: &str, message: &str) -> String {
        if context.is_empty() {
            message.to_string()
        } else {
            format!("{context}: {message}")
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn mirror_to_console(level: Level, text: &str) {
        use wasm_bindgen::JsValue;
        use web_sys::console;

        let value = JsValue::from_str(text);
        match level {
            Level::Debug => console::debug_1(&value),
            Level::Warn => console::warn_1(&value),
            Level::Error => console::error_1(&value),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn mirror_to_console(_level: Level, _text: &str) {}

    /// Emit a diagnostic as a `tracing` event and mirror it to the browser console.
    pub fn emit(level: Level, context: &str, message: &str) {
        let text = format_message(context, message);
        match level {
            Level::Debug => tracing::debug!("{text}"),
            Level::Warn => tracing::warn!("{text}"),
            Level::Error => tracing::error!("{text}"),
        }
        mirror_to_console(level, &text);
    }

    pub fn debug(context: &str, message: &str) {
        emit(Level::Debug, context, message);
    }

    pub fn warn(context: &str, message: &str) {
        emit(Level::Warn, context, message);
    }

    pub fn error(context: &str, message: &str) {
        emit(Level::Error, context, message);
    }
}
