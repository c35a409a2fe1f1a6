//! # Validation Reports
//!
//! Every validator in the workspace returns a [`ValidationReport`]: an
//! accumulated list of errors and warnings plus the derived validity flag.
//!
//! ## Policy
//!
//! - **Errors** flip `is_valid` and ultimately the process exit code.
//! - **Warnings** are reported to the user but never counted toward
//!   pass/fail. Unused-but-defined registry entries and naming-convention
//!   findings land here.
//! - Validators accumulate every finding in one pass rather than stopping
//!   at the first, so a single run surfaces all problems at once.

/// Result of one validation pass (or a merge of several).
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Whether the validated document passed. Errors flip this; warnings
    /// never do.
    pub is_valid: bool,
    /// Accumulated errors. Human-readable, one finding per entry.
    pub errors: Vec<String>,
    /// Accumulated warnings (non-fatal).
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a passing report with no findings.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed report with the given errors.
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Add an error. Marks the report as invalid.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    /// Add a warning (does not affect validity).
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merge another report into this one. Validity is the conjunction;
    /// both finding lists are concatenated in order.
    pub fn merge(&mut self, other: ValidationReport) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// True when the report carries neither errors nor warnings.
    pub fn is_clean(&self) -> bool {
        self.is_valid && self.warnings.is_empty()
    }
}
