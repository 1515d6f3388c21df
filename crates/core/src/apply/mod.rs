//! Classification of idempotent remote operations (Functional Core).
//!
//! Every remote write either applies, finds the resource already present, or
//! fails. Only the first two are acceptable, and only the caller knows what
//! "already present" looks like for its error type, so the predicate is passed
//! in.

use serde::Serialize;

/// Result of applying one idempotent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome<T> {
    /// The operation took effect.
    Applied(T),
    /// The target already existed; nothing changed.
    AlreadyExists,
    /// The operation failed for any other reason.
    Failed(String),
}

impl<T> ApplyOutcome<T> {
    /// Whether the remote state now contains the target.
    pub fn is_present(&self) -> bool {
        !matches!(self, ApplyOutcome::Failed(_))
    }

    /// Drops the applied value, keeping the classification.
    pub fn status(&self) -> ApplyStatus {
        match self {
            ApplyOutcome::Applied(_) => ApplyStatus::Created,
            ApplyOutcome::AlreadyExists => ApplyStatus::AlreadyExists,
            ApplyOutcome::Failed(message) => ApplyStatus::Failed {
                message: message.clone(),
            },
        }
    }
}

/// Value-free version of [`ApplyOutcome`], kept in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplyStatus {
    Created,
    AlreadyExists,
    Failed { message: String },
}

impl ApplyStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ApplyStatus::Failed { .. })
    }
}

/// Classifies the result of a remote operation.
///
/// Errors for which `is_conflict` holds become [`ApplyOutcome::AlreadyExists`];
/// any other error becomes [`ApplyOutcome::Failed`] with its display message.
pub fn classify<T, E, F>(result: Result<T, E>, is_conflict: F) -> ApplyOutcome<T>
where
    E: std::fmt::Display,
    F: Fn(&E) -> bool,
{
    match result {
        Ok(value) => ApplyOutcome::Applied(value),
        Err(err) if is_conflict(&err) => ApplyOutcome::AlreadyExists,
        Err(err) => ApplyOutcome::Failed(err.to_string()),
    }
}

/// Counts of created, already existing and failed units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

impl Tally {
    /// Adds one status to the tally.
    pub fn record(&mut self, status: &ApplyStatus) {
        match status {
            ApplyStatus::Created => self.created += 1,
            ApplyStatus::AlreadyExists => self.existing += 1,
            ApplyStatus::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.existing + self.failed
    }
}

impl<'a> FromIterator<&'a ApplyStatus> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a ApplyStatus>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for status in iter {
            tally.record(status);
        }
        tally
    }
}
