use std::str::FromStr;

use thiserror::Error;

/// Default floor (percent) for non-empty progress bars.
pub const DEFAULT_MIN_NONZERO_PCT: f64 = 15.0;

/// What a reset does to the change log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Zero the counts and leave the log as history.
    #[default]
    KeepLog,
    /// Zero the counts and empty the log.
    ClearLog,
}

impl ResetPolicy {
    #[must_use]
    pub fn from_clear_log(clear_log: bool) -> Self {
        if clear_log { Self::ClearLog } else { Self::KeepLog }
    }

    #[must_use]
    pub fn clears_log(self) -> bool {
        matches!(self, Self::ClearLog)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("minimum bar height must be between 0 and 100 percent (got {0})")]
    InvalidMinNonzeroPct(f64),

    #[error("invalid boolean value: {0}")]
    InvalidBool(String),
}

/// Validated tracker settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    min_nonzero_pct: f64,
    reset_policy: ResetPolicy,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerSettingsDraft {
    pub min_nonzero_pct: Option<f64>,
    pub reset_policy: Option<ResetPolicy>,
}

impl TrackerSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset values with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidMinNonzeroPct` if the bar floor is not a
    /// finite value in `[0, 100]`.
    pub fn validate(self) -> Result<TrackerSettings, SettingsError> {
        let min_nonzero_pct = self.min_nonzero_pct.unwrap_or(DEFAULT_MIN_NONZERO_PCT);
        if !min_nonzero_pct.is_finite() || !(0.0..=100.0).contains(&min_nonzero_pct) {
            return Err(SettingsError::InvalidMinNonzeroPct(min_nonzero_pct));
        }

        Ok(TrackerSettings {
            min_nonzero_pct,
            reset_policy: self.reset_policy.unwrap_or_default(),
        })
    }
}

impl TrackerSettings {
    #[must_use]
    pub fn min_nonzero_pct(&self) -> f64 {
        self.min_nonzero_pct
    }

    #[must_use]
    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            min_nonzero_pct: DEFAULT_MIN_NONZERO_PCT,
            reset_policy: ResetPolicy::KeepLog,
        }
    }
}

/// Parses the usual spellings of a boolean flag value (`1/0`, `true/false`,
/// `yes/no`, `on/off`).
///
/// # Errors
///
/// Returns `SettingsError::InvalidBool` for anything else.
pub fn parse_bool_flag(raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(SettingsError::InvalidBool(raw.to_owned())),
    }
}

impl FromStr for ResetPolicy {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "keep-log" | "keep_log" => Ok(Self::KeepLog),
            "clear-log" | "clear_log" => Ok(Self::ClearLog),
            other => parse_bool_flag(other).map(Self::from_clear_log),
        }
    }
}
