//! What to do with a line that fails to parse.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Policy applied by the driver when a line fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop processing the document
    #[default]
    Abort,
    /// Drop the line and log a warning
    Skip,
    /// Write the line as HTML-escaped text
    Passthrough,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            "passthrough" => Ok(ErrorPolicy::Passthrough),
            other => Err(format!(
                "unknown error policy '{}' (expected abort, skip or passthrough)",
                other
            )),
        }
    }
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Skip => write!(f, "skip"),
            ErrorPolicy::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// The `[errors]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorsConfig {
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

/// `[errors]` keys set by an override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorsOverride {
    pub on_error: Option<ErrorPolicy>,
}

impl ErrorsConfig {
    pub fn merge(&mut self, other: &ErrorsOverride) {
        if let Some(on_error) = other.on_error {
            self.on_error = on_error;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_abort() {
        assert_eq!(ErrorsConfig::default().on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("skip".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Skip));
        assert_eq!("Passthrough".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Passthrough));
        assert!("ignore".parse::<ErrorPolicy>().is_err());
    }

    #[test]
    fn test_serde() {
        let errors: ErrorsConfig = toml::from_str(r#"OnError = "skip""#).unwrap();
        assert_eq!(errors.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn test_empty_override_keeps_policy() {
        let mut errors = ErrorsConfig {
            on_error: ErrorPolicy::Passthrough,
        };
        errors.merge(&ErrorsOverride::default());
        assert_eq!(errors.on_error, ErrorPolicy::Passthrough);
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for policy in [ErrorPolicy::Abort, ErrorPolicy::Skip, ErrorPolicy::Passthrough] {
            assert_eq!(policy.to_string().parse::<ErrorPolicy>(), Ok(policy));
        }
    }
}
