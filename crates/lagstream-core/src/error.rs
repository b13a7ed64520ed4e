use thiserror::Error;

/// Canonical result for construction-time checks.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing an operator, before any element is pulled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: `{name}` is required")]
    InvalidArgument { name: &'static str },

    #[error("Argument out of range: `{name}` = {value} ({reason})")]
    OutOfRange {
        name: &'static str,
        value: i64,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Payload-free discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    Config,
}

impl Error {
    pub fn missing(name: &'static str) -> Self {
        Error::InvalidArgument { name }
    }

    pub fn out_of_range(name: &'static str, value: i64, reason: impl Into<String>) -> Self {
        Error::OutOfRange {
            name,
            value,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Error::missing("source").kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::out_of_range("offset", 0, "must be positive").kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn messages_name_the_argument() {
        let err = Error::out_of_range("offset", -3, "must be positive");
        assert_eq!(
            err.to_string(),
            "Argument out of range: `offset` = -3 (must be positive)"
        );
        assert_eq!(
            Error::missing("selector").to_string(),
            "Invalid argument: `selector` is required"
        );
    }

    #[test]
    fn json_errors_map_to_config() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
