//! Ordered preference backends: the first one that accepts a write wins.

pub mod cookie;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;
use webrs_web_utils::notify;

use crate::LOG_CONTEXT;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("{backend} is unavailable")]
    Unavailable { backend: &'static str },
    #[error("{backend} read failed: {message}")]
    Read {
        backend: &'static str,
        message: String,
    },
    #[error("{backend} write failed: {message}")]
    Write {
        backend: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no preference backend accepted `{value}` ({} tried)", .failures.len())]
pub struct PersistError {
    pub value: String,
    pub failures: Vec<PreferenceError>,
}

/// One place a preference can live.
pub trait PreferenceBackend {
    fn name(&self) -> &'static str;

    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Backends tried in order under one key.
pub struct PreferenceChain {
    key: String,
    backends: Vec<Box<dyn PreferenceBackend>>,
}

impl std::fmt::Debug for PreferenceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.backends.iter().map(|backend| backend.name()).collect();
        f.debug_struct("PreferenceChain")
            .field("key", &self.key)
            .field("backends", &names)
            .finish()
    }
}

impl PreferenceChain {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            backends: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_backend<B>(mut self, backend: B) -> Self
    where
        B: PreferenceBackend + 'static,
    {
        self.backends.push(Box::new(backend));
        self
    }

    /// First non-empty value, in backend order. Later backends are only
    /// consulted when earlier ones hold nothing; unreadable ones are skipped.
    pub fn read(&self) -> Option<String> {
        for backend in &self.backends {
            match backend.read(&self.key) {
                Ok(Some(value)) if !value.trim().is_empty() => return Some(value),
                Ok(_) => {}
                Err(err) => notify::debug(LOG_CONTEXT, &err.to_string()),
            }
        }
        None
    }

    /// Writes to the first backend that accepts the value and returns its name.
    pub fn write(&mut self, value: &str) -> Result<&'static str, PersistError> {
        let mut failures = Vec::new();
        for backend in &mut self.backends {
            match backend.write(&self.key, value) {
                Ok(()) => return Ok(backend.name()),
                Err(err) => {
                    notify::debug(LOG_CONTEXT, &err.to_string());
                    failures.push(err);
                }
            }
        }
        Err(PersistError {
            value: value.to_string(),
            failures,
        })
    }
}

/// In-memory backend. Clones share storage, so a handle kept outside a
/// chain observes its writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    reject_reads: bool,
    reject_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose writes always fail, like storage disabled by the browser.
    pub fn rejecting_writes() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Backend whose reads always fail.
    pub fn rejecting_reads() -> Self {
        Self {
            reject_reads: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        if self.reject_reads {
            return Err(PreferenceError::Unavailable {
                backend: self.name(),
            });
        }
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.reject_writes {
            return Err(PreferenceError::Write {
                backend: self.name(),
                message: "writes rejected".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KEY: &str = "preferred-theme";

    #[test]
    fn read_prefers_first_backend_with_a_value() {
        let chain = PreferenceChain::new(KEY)
            .with_backend(MemoryBackend::new().with_entry(KEY, "blue"))
            .with_backend(MemoryBackend::new().with_entry(KEY, "red"));
        assert_eq!(chain.read().as_deref(), Some("blue"));
    }

    #[test]
    fn read_skips_empty_and_failing_backends() {
        let chain = PreferenceChain::new(KEY)
            .with_backend(MemoryBackend::rejecting_reads())
            .with_backend(MemoryBackend::new().with_entry(KEY, ""))
            .with_backend(MemoryBackend::new().with_entry(KEY, "red"));
        assert_eq!(chain.read().as_deref(), Some("red"));
    }

    #[test]
    fn read_does_not_fall_through_on_unrecognised_value() {
        let chain = PreferenceChain::new(KEY)
            .with_backend(MemoryBackend::new().with_entry(KEY, "neon"))
            .with_backend(MemoryBackend::new().with_entry(KEY, "red"));
        assert_eq!(chain.read().as_deref(), Some("neon"));
    }

    #[test]
    fn write_stops_at_first_success() -> Result<(), PersistError> {
        let primary = MemoryBackend::new();
        let fallback = MemoryBackend::new();
        let mut chain = PreferenceChain::new(KEY)
            .with_backend(primary.clone())
            .with_backend(fallback.clone());
        chain.write("green")?;
        assert_eq!(primary.get(KEY).as_deref(), Some("green"));
        assert_eq!(fallback.get(KEY), None);
        Ok(())
    }

    #[test]
    fn write_falls_back_when_primary_rejects() -> Result<(), PersistError> {
        let fallback = MemoryBackend::new();
        let mut chain = PreferenceChain::new(KEY)
            .with_backend(MemoryBackend::rejecting_writes())
            .with_backend(fallback.clone());
        assert_eq!(chain.write("pink")?, "memory");
        assert_eq!(fallback.get(KEY).as_deref(), Some("pink"));
        Ok(())
    }

    #[test]
    fn write_reports_every_failure() {
        let mut chain = PreferenceChain::new(KEY)
            .with_backend(MemoryBackend::rejecting_writes())
            .with_backend(MemoryBackend::rejecting_writes());
        let err = chain.write("pink").err();
        assert_eq!(err.map(|err| err.failures.len()), Some(2));
    }
}
