use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One problem found in a data graph resource.
///
/// `path` locates the offending element with dot-separated segments
/// (`nodes.3`, `edges.0`, `nodes.1.props.age`). Violations are plain data,
/// compared and ordered over every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Violation {
    pub path: String,
    pub severity: Severity,
    pub validator: String,
    pub message: String,
    pub flavor: String,
}

impl Violation {
    pub fn new(
        severity: Severity,
        validator: &str,
        flavor: &str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            severity,
            validator: validator.to_string(),
            message: message.into(),
            flavor: flavor.to_string(),
        }
    }

    pub fn error(
        validator: &str,
        flavor: &str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, validator, flavor, path, message)
    }

    pub fn warning(
        validator: &str,
        flavor: &str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, validator, flavor, path, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        write!(f, "{} - {path}: {}", self.validator, self.message)
    }
}

/// Violations per resource name
pub type ViolationMap = BTreeMap<String, BTreeSet<Violation>>;

/// A validator that failed to run, as opposed to a problem in the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineDiagnostic {
    pub validator: String,
    pub message: String,
}

impl fmt::Display for PipelineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validator {} failed: {}", self.validator, self.message)
    }
}

/// Aggregated outcome of one pipeline run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub violations: ViolationMap,
    pub diagnostics: Vec<PipelineDiagnostic>,
}

impl ValidationReport {
    /// Union `other` into the report, resource by resource
    pub fn absorb(&mut self, other: ViolationMap) {
        for (resource, violations) in other {
            self.violations
                .entry(resource)
                .or_default()
                .extend(violations);
        }
    }

    pub fn violations_for(&self, resource: &str) -> Option<&BTreeSet<Violation>> {
        self.violations.get(resource)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.values().flatten()
    }

    pub fn error_count(&self) -> usize {
        self.iter().filter(|violation| violation.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.iter().filter(|violation| !violation.is_error()).count()
    }

    /// True when any error-severity violation or failed validator is present
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0 || !self.diagnostics.is_empty()
    }
}
