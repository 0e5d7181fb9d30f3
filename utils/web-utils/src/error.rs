use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value for `{key}`; expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
    #[error("malformed `{key}`: {message}")]
    Malformed { key: String, message: String },
    #[error("browser api unavailable: {api}")]
    Unavailable { api: &'static str },
    #[error("{operation} failed: {message}")]
    Js {
        operation: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_value(key: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            expected,
        }
    }

    pub fn malformed(key: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn unavailable(api: &'static str) -> Self {
        Self::Unavailable { api }
    }

    pub fn js(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Js {
            operation,
            message: message.into(),
        }
    }
}
