use crate::error::ConfigError;

use std::fmt;
use std::str::FromStr;

/// Strictness threshold. A validator runs iff its level is at or below the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationLevel {
    /// Cheap structural checks only.
    Minimum,
    Low,
    /// Everything, including checks many real-world files fail.
    High,
}

impl FromStr for ValidationLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimum" => Ok(Self::Minimum),
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            _ => Err(ConfigError::UnknownValidationLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minimum => "minimum",
            Self::Low => "low",
            Self::High => "high",
        })
    }
}

/// What to do with the first failing validator of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintMode {
    /// Return the diagnostic to the caller and stop (fail-fast).
    Error,
    /// Write the diagnostic to the report sink and keep going.
    Report,
}

impl FromStr for LintMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "report" => Ok(Self::Report),
            _ => Err(ConfigError::UnknownLintMode(s.to_string())),
        }
    }
}

impl fmt::Display for LintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Report => "report",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOptions {
    pub single_read_validation_level: ValidationLevel,
    pub paired_read_validation_level: ValidationLevel,
    pub lint_mode: LintMode,
    /// Validator codes (e.g. `"S003"`) removed from the chains regardless of level.
    pub disabled_validators: Vec<String>,
}

impl LintOptions {
    /// Build options from the textual configuration surface.
    ///
    /// Every value is resolved here, so a bad level or mode never reaches the read loop.
    pub fn parse(
        single_read_validation_level: &str,
        paired_read_validation_level: &str,
        lint_mode: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            single_read_validation_level: single_read_validation_level.parse()?,
            paired_read_validation_level: paired_read_validation_level.parse()?,
            lint_mode: lint_mode.parse()?,
            disabled_validators: Vec::new(),
        })
    }

    pub fn with_disabled_validators<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled_validators = codes.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            single_read_validation_level: ValidationLevel::Low,
            paired_read_validation_level: ValidationLevel::Low,
            lint_mode: LintMode::Error,
            disabled_validators: Vec::new(),
        }
    }
}
