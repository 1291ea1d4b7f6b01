//! Diagnostics accumulated while resolving and synthesizing HVDC links.
//!
//! The pipeline never prints or throws for expected data problems; it records
//! them here and keeps going. Three non-fatal channels are used:
//!
//! - `ignored` - equipment or configurations dropped on purpose (missing
//!   property data, empty island ends, equipment never consumed)
//! - `fixed` - values auto-corrected to a documented default (negative DC
//!   resistance, NaN loss factor, invalid target voltage), naming old and new
//! - plain warnings - anything unusual that changed no value
//!
//! Fatal conditions are *not* recorded here; they travel as
//! [`crate::HvdcError`] values scoped to one configuration.
//!
//! # Example
//!
//! ```
//! use hvdc_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//! diag.add_fixed("resistance", "was negative", -0.5, 0.1);
//! diag.add_ignored("DcLineSegment", "L7", "no converter pair found");
//!
//! assert_eq!(diag.fixed().count(), 1);
//! assert_eq!(diag.ignored().count(), 1);
//! ```

use serde::Serialize;

/// Severity level for diagnostic issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unusual but operation continued (e.g., defaulted value)
    Warning,
    /// Could not complete one configuration (data was abandoned)
    Error,
}

/// A single diagnostic issue encountered during conversion
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    /// Severity of the issue
    pub severity: Severity,
    /// Category for grouping ("ignored", "fixed", "mode", "regulation", ...)
    pub category: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Optional equipment reference (e.g. "AcDcConverter C1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl DiagnosticIssue {
    pub fn new(severity: Severity, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            entity: None,
        }
    }

    /// Add equipment reference to the issue
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{}:{}] {}", severity, self.category, self.message)?;
        if let Some(entity) = &self.entity {
            write!(f, " ({})", entity)?;
        }
        Ok(())
    }
}

/// Collection of diagnostic issues for one conversion pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// All collected issues
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    /// Create new empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw issue directly
    pub fn add(&mut self, issue: DiagnosticIssue) {
        self.issues.push(issue);
    }

    /// Record a value auto-corrected to a default, naming old and new value
    pub fn add_fixed(&mut self, what: &str, reason: &str, old: f64, new: f64) {
        self.issues.push(DiagnosticIssue::new(
            Severity::Warning,
            "fixed",
            format!("{what} {reason}: {old} fixed to {new}"),
        ));
    }

    /// Record equipment or a configuration dropped on purpose
    pub fn add_ignored(&mut self, kind: &str, id: &str, reason: &str) {
        self.issues.push(
            DiagnosticIssue::new(Severity::Warning, "ignored", reason.to_string())
                .with_entity(format!("{kind} {id}")),
        );
    }

    /// Add a warning with category and message
    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message));
    }

    /// Add a warning with equipment reference
    pub fn add_warning_with_entity(&mut self, category: &str, message: &str, entity: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Warning, category, message).with_entity(entity));
    }

    /// Record a fatal error that aborted one configuration
    pub fn add_error(&mut self, category: &str, message: &str) {
        self.issues
            .push(DiagnosticIssue::new(Severity::Error, category, message));
    }

    /// Issues on the `fixed` channel
    pub fn fixed(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues_by_category("fixed")
    }

    /// Issues on the `ignored` channel
    pub fn ignored(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues_by_category("ignored")
    }

    /// Get issues filtered by category
    pub fn issues_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    /// Count warning issues
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Count error issues
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Check if there are any issues
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Merge another diagnostics into this one
    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Diagnostics: {} warning(s), {} error(s)",
            self.warning_count(),
            self.error_count()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

// ============================================================================
// Conversion report
// ============================================================================

/// Counters for one conversion pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    pub islands: usize,
    pub configurations: usize,
    pub hvdc_lines: usize,
    pub converters_used: usize,
    pub dc_line_segments_used: usize,
}

/// Complete result bookkeeping for one conversion pass
///
/// Combines counters with diagnostic issues plus the completeness check:
/// every converter and DC line segment that no configuration consumed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Element counts for the pass
    pub stats: ConversionStats,
    /// All collected issues
    pub diagnostics: Diagnostics,
    /// Converter ids never consumed by a synthesized configuration
    pub unused_converters: Vec<String>,
    /// DC line segment ids never consumed by a synthesized configuration
    pub unused_dc_line_segments: Vec<String>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        format!(
            "{} island(s), {} configuration(s), {} HVDC line(s) | {} warning(s), {} error(s)",
            self.stats.islands,
            self.stats.configurations,
            self.stats.hvdc_lines,
            self.diagnostics.warning_count(),
            self.diagnostics.error_count()
        )
    }
}

impl std::fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "HVDC conversion: {}", self.summary())?;
        for issue in &self.diagnostics.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_counts() {
        let mut diag = Diagnostics::new();
        diag.add_warning("mode", "test warning");
        diag.add_error("configuration", "test error");
        diag.add_fixed("resistance", "was negative", -1.0, 0.1);

        assert_eq!(diag.warning_count(), 2);
        assert_eq!(diag.error_count(), 1);
        assert!(diag.has_issues());
        assert!(diag.has_errors());
    }

    #[test]
    fn test_fixed_channel_names_old_and_new() {
        let mut diag = Diagnostics::new();
        diag.add_fixed("lossFactor1", "was NaN", f64::NAN, 0.0);

        let issue = diag.fixed().next().unwrap();
        assert!(issue.message.contains("lossFactor1"));
        assert!(issue.message.contains("NaN"));
        assert!(issue.message.contains("0"));
    }

    #[test]
    fn test_ignored_channel_carries_entity() {
        let mut diag = Diagnostics::new();
        diag.add_ignored("AcDcConverter", "C9", "no configuration consumed it");

        let issue = diag.ignored().next().unwrap();
        assert_eq!(issue.entity.as_deref(), Some("AcDcConverter C9"));
    }

    #[test]
    fn test_diagnostics_serialization() {
        let mut diag = Diagnostics::new();
        diag.add_warning_with_entity("regulation", "unknown control mode", "VsConverter C1");

        let json = serde_json::to_string_pretty(&diag).unwrap();
        assert!(json.contains("\"warning\""));
        assert!(json.contains("\"entity\": \"VsConverter C1\""));
    }

    #[test]
    fn test_issue_display() {
        let issue = DiagnosticIssue::new(Severity::Error, "configuration", "type mismatch")
            .with_entity("C1/C2");
        let display = format!("{}", issue);
        assert!(display.contains("error"));
        assert!(display.contains("configuration"));
        assert!(display.contains("C1/C2"));
    }

    #[test]
    fn test_report_summary() {
        let mut report = ConversionReport::new();
        report.stats.islands = 2;
        report.stats.configurations = 3;
        report.stats.hvdc_lines = 3;
        report.diagnostics.add_warning("mode", "defaulted");

        let summary = report.summary();
        assert!(summary.contains("2 island(s)"));
        assert!(summary.contains("3 HVDC line(s)"));
        assert!(summary.contains("1 warning(s)"));
    }

    #[test]
    fn test_diagnostics_merge() {
        let mut diag1 = Diagnostics::new();
        diag1.add_warning("mode", "warning 1");

        let mut diag2 = Diagnostics::new();
        diag2.add_error("configuration", "error 1");

        diag1.merge(diag2);
        assert_eq!(diag1.warning_count(), 1);
        assert_eq!(diag1.error_count(), 1);
    }
}
