//! Input validation for sequencing runs.
//!
//! Checks job data once at load time, before any cost matrix is built.
//! Detects:
//! - Empty input
//! - Duplicate or blank job IDs
//! - Negative or non-finite quantities, processing times and prices
//!
//! All problems are collected instead of stopping at the first one, so a
//! caller can report a whole broken import at once.

use std::collections::HashSet;
use std::fmt;

use crate::models::Job;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No jobs were given.
    EmptyInput,
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job ID is empty or whitespace.
    BlankId,
    /// Quantity is negative or not finite.
    InvalidQuantity,
    /// Minutes per piece is negative or not finite.
    InvalidTime,
    /// Price is negative or not finite.
    InvalidPrice,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the jobs of a sequencing run.
///
/// Checks:
/// 1. At least one job
/// 2. No blank job IDs
/// 3. No duplicate job IDs
/// 4. Quantity, minutes per piece and price are finite and >= 0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    if jobs.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "No jobs to sequence",
        )]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if job.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                "Job with blank ID",
            ));
        } else if !ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        for (kind, field, value) in [
            (ValidationErrorKind::InvalidQuantity, "quantity", job.quantity),
            (
                ValidationErrorKind::InvalidTime,
                "time_minutes_per_piece",
                job.time_minutes_per_piece,
            ),
            (ValidationErrorKind::InvalidPrice, "price", job.price),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ValidationError::new(
                    kind,
                    format!("Job '{}' has invalid {field}: {value}", job.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
