//! The one routine every idempotent remote write goes through.

use std::future::Future;

use appschema_core::apply::{classify, ApplyOutcome};

/// Awaits `operation` and classifies its result with `is_conflict`.
///
/// Conflicts are logged as warnings, other failures as errors; neither stops
/// the caller, which decides what to skip based on the returned outcome.
pub async fn apply_idempotent<T, E, Fut, P>(
    label: &str,
    operation: Fut,
    is_conflict: P,
) -> ApplyOutcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let outcome = classify(operation.await, is_conflict);
    match &outcome {
        ApplyOutcome::Applied(_) => tracing::info!(unit = %label, "Created"),
        ApplyOutcome::AlreadyExists => {
            tracing::warn!(unit = %label, "Already exists, skipping")
        }
        ApplyOutcome::Failed(message) => {
            tracing::error!(unit = %label, error = %message, "Failed")
        }
    }
    outcome
}
