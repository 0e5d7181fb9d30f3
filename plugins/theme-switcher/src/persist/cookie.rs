use std::cell::RefCell;
use std::rc::Rc;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use super::{PreferenceBackend, PreferenceError};

const BACKEND_NAME: &str = "cookie";

/// Bytes that may not appear raw in a cookie value.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'=')
    .add(b'\\');

/// Raw access to `document.cookie`: reads give the `name=value; ...`
/// header, writes take one `Set-Cookie`-style string.
pub trait CookieJar {
    fn header(&self) -> Result<String, PreferenceError>;

    fn set(&mut self, cookie: &str) -> Result<(), PreferenceError>;
}

/// Formats `at` the way `Date.prototype.toUTCString` does.
pub fn http_date(at: OffsetDateTime) -> Result<String, time::error::Format> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    at.to_offset(UtcOffset::UTC).format(format)
}

pub fn format_cookie(
    name: &str,
    value: &str,
    expires: OffsetDateTime,
) -> Result<String, time::error::Format> {
    let value = utf8_percent_encode(value, COOKIE_VALUE);
    let expires = http_date(expires)?;
    Ok(format!("{name}={value}; expires={expires}; path=/"))
}

/// Value of cookie `name` in a `document.cookie` header, exact name match.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(candidate, _)| candidate.trim() == name)
        .and_then(|(_, value)| percent_decode_str(value.trim()).decode_utf8().ok())
        .map(std::borrow::Cow::into_owned)
        .filter(|value| !value.is_empty())
}

pub fn now_utc() -> OffsetDateTime {
    let since_epoch = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .unwrap_or_default();
    OffsetDateTime::UNIX_EPOCH + since_epoch
}

/// Cookie-backed preference with a site-wide path and a fixed lifetime.
#[derive(Debug)]
pub struct CookieBackend<J> {
    jar: J,
    max_age: Duration,
    clock: fn() -> OffsetDateTime,
}

impl<J: CookieJar> CookieBackend<J> {
    pub fn new(jar: J, max_age_days: u32) -> Self {
        Self {
            jar,
            max_age: Duration::days(i64::from(max_age_days)),
            clock: now_utc,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }
}

impl<J: CookieJar> PreferenceBackend for CookieBackend<J> {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(find_cookie(&self.jar.header()?, key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let expires = (self.clock)()
            .checked_add(self.max_age)
            .ok_or_else(|| PreferenceError::Write {
                backend: BACKEND_NAME,
                message: format!("expiry {} days ahead is out of range", self.max_age.whole_days()),
            })?;
        let cookie = format_cookie(key, value, expires).map_err(|err| PreferenceError::Write {
            backend: BACKEND_NAME,
            message: err.to_string(),
        })?;
        self.jar.set(&cookie)
    }
}

/// Jar that keeps cookies in memory with browser-like overwrite semantics.
/// Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieJar {
    written: Rc<RefCell<Vec<String>>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cookie string written, oldest first, attributes included.
    pub fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }
}

impl CookieJar for MemoryCookieJar {
    fn header(&self) -> Result<String, PreferenceError> {
        let written = self.written.borrow();
        let mut pairs: Vec<&str> = Vec::new();
        for cookie in written.iter() {
            let pair = cookie.split(';').next().unwrap_or_default().trim();
            let name = pair.split_once('=').map_or(pair, |(name, _)| name);
            pairs.retain(|existing| !existing.starts_with(&format!("{name}=")));
            pairs.push(pair);
        }
        Ok(pairs.join("; "))
    }

    fn set(&mut self, cookie: &str) -> Result<(), PreferenceError> {
        self.written.borrow_mut().push(cookie.to_string());
        Ok(())
    }
}
