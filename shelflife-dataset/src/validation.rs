//! Dataset Validation
//!
//! Checks a dataset before it is used for training. Rows that would poison
//! the regressor (NaN readings, impossible temperatures, zero-day labels)
//! are errors. Rows that are merely unusual are warnings, and summary facts
//! are recorded as info.

use shelflife_core::{profiles::product_profile, TemperatureValidator, Validator};

use crate::observation::Dataset;

/// Outcome of validating a dataset
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Validation errors (must be fixed)
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (should be reviewed)
    pub warnings: Vec<ValidationIssue>,

    /// Informational messages
    pub info: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an issue under its severity
    pub fn add(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }

    /// Get total issue count
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }

    /// First error message, if any
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|issue| issue.message.as_str())
    }
}

/// Individual validation issue
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Type of issue
    pub issue_type: IssueType,

    /// Zero-based row index (if the issue belongs to one row)
    pub row: Option<usize>,

    /// Human-readable message
    pub message: String,

    /// Issue severity
    pub severity: Severity,
}

impl ValidationIssue {
    fn at_row(row: usize, issue_type: IssueType, severity: Severity, message: String) -> Self {
        Self {
            issue_type,
            row: Some(row),
            message,
            severity,
        }
    }
}

/// Types of validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    /// Product type column is blank
    MissingProduct,

    /// Temperature is not a number or at/below absolute zero
    InvalidTemperature,

    /// Humidity is not a number
    InvalidHumidity,

    /// Label below the one-day floor
    InvalidLabel,

    /// Value is unusual but not impossible
    UnusualValue,

    /// Product type has no decay profile
    UnprofiledProduct,

    /// Summary of the dataset contents
    Summary,
}

/// Issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational only
    Info,

    /// Should be reviewed
    Warning,

    /// Must be fixed
    Error,
}

/// Validate every row of a dataset
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport::new();
    let temperature = TemperatureValidator::default();

    for (index, row) in dataset.iter().enumerate() {
        if row.product_type.trim().is_empty() {
            report.add(ValidationIssue::at_row(
                index,
                IssueType::MissingProduct,
                Severity::Error,
                "product type is blank".to_string(),
            ));
        }

        if let Err(e) = temperature.validate(row.temperature_c) {
            report.add(ValidationIssue::at_row(
                index,
                IssueType::InvalidTemperature,
                Severity::Error,
                format!("temperature {}: {}", row.temperature_c, e),
            ));
        }

        if !row.humidity_pct.is_finite() {
            report.add(ValidationIssue::at_row(
                index,
                IssueType::InvalidHumidity,
                Severity::Error,
                format!("humidity {} is not a number", row.humidity_pct),
            ));
        } else if !(0.0..=100.0).contains(&row.humidity_pct) {
            report.add(ValidationIssue::at_row(
                index,
                IssueType::UnusualValue,
                Severity::Warning,
                format!("humidity {}% outside 0-100%", row.humidity_pct),
            ));
        }

        if row.shelf_life_days < 1 {
            report.add(ValidationIssue::at_row(
                index,
                IssueType::InvalidLabel,
                Severity::Error,
                format!("shelf life {} days is below one day", row.shelf_life_days),
            ));
        }
    }

    let types = dataset.product_types();
    for product_type in types.iter().filter(|t| !t.trim().is_empty()) {
        if product_profile(product_type).is_err() {
            report.add(ValidationIssue {
                issue_type: IssueType::UnprofiledProduct,
                row: None,
                message: format!("'{}' has no decay profile", product_type),
                severity: Severity::Warning,
            });
        }
    }

    report.add(ValidationIssue {
        issue_type: IssueType::Summary,
        row: None,
        message: format!("{} rows across {} product types", dataset.len(), types.len()),
        severity: Severity::Info,
    });

    report
}
