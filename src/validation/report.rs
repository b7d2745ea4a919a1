//! Findings collected while checking a region document.

use std::fmt;

/// Every issue found in one document, in the order the regions were visited.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Whether the document converts without errors. In strict mode any
    /// warning also fails it.
    pub fn passes(&self, strict: bool) -> bool {
        self.issues
            .iter()
            .all(|i| i.severity == Severity::Warning && !strict)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }
        writeln!(
            f,
            "{} region issue(s): {} error(s), {} warning(s)",
            self.issues.len(),
            self.error_count(),
            self.warning_count()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// One problem found in a region, or in the document as a whole.
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            context,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} {:?} at {}: {}",
            self.severity, self.code, self.context, self.message
        )
    }
}

/// Errors make conversion fail; warnings mean the result differs from the input shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Stable identifier for each kind of finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// NaN or infinite coordinates.
    NonFiniteCoordinate,
    /// Box bounds with min greater than max.
    NegativeSize,
    /// Shape path that does not open with a move.
    MalformedPath,
    /// No points, so nothing is produced.
    EmptyGeometry,
    /// Line whose endpoints coincide.
    DegenerateLine,
    /// Closed outline with fewer than three vertices.
    TooFewPolygonPoints,
    /// Toolkit region with no source counterpart.
    UnsupportedToolkitKind,
    /// Toolkit region that comes back as a general area.
    ConvertsToArea,
}

/// Where an issue was found.
#[derive(Clone, Debug)]
pub enum IssueContext {
    Document,
    Region { index: usize, kind: &'static str },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Document => f.write_str("document"),
            IssueContext::Region { index, kind } => write!(f, "region {index} ({kind})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(index: usize) -> IssueContext {
        IssueContext::Region {
            index,
            kind: "rectangle",
        }
    }

    #[test]
    fn strict_mode_fails_on_warnings_only() {
        let mut report = ValidationReport::new();
        assert!(report.passes(true));

        report.add(ValidationIssue::warning(
            IssueCode::ConvertsToArea,
            "rounded",
            region(0),
        ));
        assert!(report.passes(false));
        assert!(!report.passes(true));

        report.add(ValidationIssue::error(
            IssueCode::NegativeSize,
            "negative",
            region(1),
        ));
        assert!(!report.passes(false));
        assert_eq!((report.error_count(), report.warning_count()), (1, 1));
    }

    #[test]
    fn issue_line_names_code_and_region() {
        let issue =
            ValidationIssue::error(IssueCode::NegativeSize, "Negative size -2x1", region(3));
        assert_eq!(
            issue.to_string(),
            "error   NegativeSize at region 3 (rectangle): Negative size -2x1"
        );
    }
}
