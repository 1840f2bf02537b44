//! Structured configuration issues.

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
    /// A field names a provider that does not exist.
    UnknownProvider { field: String, value: String },
    /// A field holds a value outside its allowed set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// Both battle slots use the same provider.
    SameProviderBothSlots,
    /// A numeric field is out of range.
    OutOfRange { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors() {
        let warning = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::SameProviderBothSlots,
            message: "same".to_string(),
        };
        assert!(!ConfigIssue::has_errors(std::slice::from_ref(&warning)));

        let error = ConfigIssue {
            severity: Severity::Error,
            code: ConfigIssueCode::OutOfRange {
                field: "server.port".to_string(),
            },
            message: "port".to_string(),
        };
        assert!(ConfigIssue::has_errors(&[warning, error]));
    }
}
