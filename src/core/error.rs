use thiserror::Error;

/// Errors that can occur while loading or storing configuration.
/// Validation failures are not errors here: they are reported as data
/// through [`ValidationReport`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BijakError {
    /// Configuration file could not be read or written.
    #[error("config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid JSON.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// A single validation finding with field path, rule code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dot-separated path to the invalid field (e.g. "items[2].quantity").
    pub field: String,
    /// Stable rule code (e.g. "required", "total_mismatch").
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

impl ValidationIssue {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a validation pass. Produced fresh by every call,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// All violations found, in check order — validation never
    /// short-circuits on the first failure.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Report with no findings.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    /// Build a report from accumulated issues.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// True if any issue targets the given field path.
    pub fn has_issue_for(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}
