//! Configuration issues
//!
//! Loaders validate raw configuration and report problems as structured
//! [`ConfigIssue`]s instead of failing on the first one, so every problem can
//! be shown to the user at once.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model name field is present but empty.
    EmptyModelName { field: String },
    /// A string field holds a value outside its allowed set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// Chunk size / overlap combination cannot split text.
    InvalidChunking,
    /// Retrieval would return no context at all.
    ZeroTopK,
    /// Temperature outside the range accepted by chat APIs.
    TemperatureOutOfRange { value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        assert!(ConfigIssue::error(ConfigIssueCode::ZeroTopK, "k").is_error());
        assert!(!ConfigIssue::warning(ConfigIssueCode::ZeroTopK, "k").is_error());
    }

    #[test]
    fn test_display() {
        let issue = ConfigIssue::warning(
            ConfigIssueCode::TemperatureOutOfRange {
                value: "3.5".to_string(),
            },
            "llm.temperature: 3.5 is outside 0.0..=2.0",
        );
        assert_eq!(
            issue.to_string(),
            "warning: llm.temperature: 3.5 is outside 0.0..=2.0"
        );
    }
}
