//! Operator configuration that callers can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagConfig {
    /// Upper bound on the lag offset. Construction fails with `OutOfRange`
    /// above it, which keeps the window allocation bounded.
    pub max_offset: Option<usize>,

    /// Reserve every window slot on the first pull instead of growing the
    /// window while it fills. Best effort: a reservation the allocator
    /// refuses falls back to growing. Pair with `max_offset` when offsets
    /// come from untrusted input.
    pub preallocate_window: bool,
}

impl LagConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAGSTREAM_MAX_OFFSET`: largest accepted offset
    /// - `LAGSTREAM_PREALLOCATE_WINDOW`: `true`/`false`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAGSTREAM_MAX_OFFSET") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.max_offset = Some(v);
            }
        }

        if let Ok(s) = std::env::var("LAGSTREAM_PREALLOCATE_WINDOW") {
            if let Ok(v) = s.trim().parse::<bool>() {
                cfg.preallocate_window = v;
            }
        }

        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_max_offset(mut self, max_offset: usize) -> Self {
        self.max_offset = Some(max_offset);
        self
    }

    pub fn with_preallocated_window(mut self, preallocate: bool) -> Self {
        self.preallocate_window = preallocate;
        self
    }

    /// Validate a caller-supplied offset and return it as a window size.
    ///
    /// Zero and negative offsets are rejected rather than read as a lead.
    pub fn check_offset(&self, offset: i64) -> Result<usize> {
        if offset <= 0 {
            return Err(Error::out_of_range(
                "offset",
                offset,
                "must be greater than zero",
            ));
        }
        let size = usize::try_from(offset).map_err(|_| {
            Error::out_of_range("offset", offset, "does not fit in memory on this platform")
        })?;
        if let Some(max) = self.max_offset {
            if size > max {
                return Err(Error::out_of_range(
                    "offset",
                    offset,
                    format!("exceeds configured maximum of {max}"),
                ));
            }
        }
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_accepts_any_positive_offset() {
        let cfg = LagConfig::default();
        assert_eq!(cfg.check_offset(1).unwrap(), 1);
        assert_eq!(cfg.check_offset(1_000_000).unwrap(), 1_000_000);
    }

    #[test]
    fn non_positive_offsets_are_out_of_range() {
        let cfg = LagConfig::default();
        for offset in [0, -1, -3, i64::MIN] {
            let err = cfg.check_offset(offset).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "offset {offset}");
        }
    }

    #[test]
    fn max_offset_is_inclusive() {
        let cfg = LagConfig::default().with_max_offset(8);
        assert_eq!(cfg.check_offset(8).unwrap(), 8);
        assert_eq!(cfg.check_offset(9).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = LagConfig::from_json(r#"{"max_offset": 16}"#).unwrap();
        assert_eq!(cfg.max_offset, Some(16));
        assert!(!cfg.preallocate_window);

        let err = LagConfig::from_json(r#"{"max_offset": "lots"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
