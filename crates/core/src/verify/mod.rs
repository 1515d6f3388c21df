//! Verification reports, scratch documents and exit-code policy (Functional Core).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::schema::{is_critical, AttributeDescriptor, AttributeKind, CollectionDescriptor};

/// Longest document id the remote service accepts.
pub const MAX_DOCUMENT_ID_LEN: usize = 36;

const SCRATCH_PREFIX: &str = "smoke-";
const SCRATCH_TEXT: &str = "smoke-test";

/// Which expected collections were found in the remote collection listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresenceAudit {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// Pure function: partitions `expected` by membership in `found`, keeping the
/// order of `expected`.
pub fn audit_presence<S: AsRef<str>>(expected: &[S], found: &[String]) -> PresenceAudit {
    let (present, missing): (Vec<String>, Vec<String>) = expected
        .iter()
        .map(|id| id.as_ref().to_string())
        .partition(|id| found.contains(id));
    PresenceAudit { present, missing }
}

/// Reachability of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    Reachable { documents: u64 },
    Unreachable { message: String },
}

/// Result of listing the documents of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionCheck {
    pub id: String,
    #[serde(flatten)]
    pub status: CheckStatus,
}

impl CollectionCheck {
    pub fn passed(&self) -> bool {
        matches!(self.status, CheckStatus::Reachable { .. })
    }
}

/// Outcome of one step of a write cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    Failed { message: String },
}

impl StepStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, StepStatus::Ok)
    }
}

/// Create-then-delete of a scratch document in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteCycle {
    pub id: String,
    pub document_id: String,
    pub create: StepStatus,
    /// `None` when creation failed and deletion was never attempted.
    pub delete: Option<StepStatus>,
}

impl WriteCycle {
    pub fn passed(&self) -> bool {
        self.create.is_ok() && self.delete.as_ref().is_some_and(StepStatus::is_ok)
    }
}

/// Report of a whole verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub audit: PresenceAudit,
    pub checks: Vec<CollectionCheck>,
    pub write_cycles: Vec<WriteCycle>,
}

impl VerificationReport {
    /// Whether a collection passed its check and, if one ran, its write cycle.
    pub fn collection_passed(&self, id: &str) -> bool {
        let checked = self
            .checks
            .iter()
            .find(|c| c.id == id)
            .is_some_and(CollectionCheck::passed);
        let written = self
            .write_cycles
            .iter()
            .filter(|w| w.id == id)
            .all(WriteCycle::passed);
        checked && written
    }

    /// Critical collections that were checked and did not pass.
    pub fn critical_failures(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| is_critical(&c.id) && !self.collection_passed(&c.id))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Non-critical collections that were checked and did not pass.
    pub fn other_failures(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !is_critical(&c.id) && !self.collection_passed(&c.id))
            .map(|c| c.id.as_str())
            .collect()
    }

    pub fn passed(&self) -> bool {
        self.critical_failures().is_empty()
    }

    /// Process exit code: 0 iff every critical collection passed.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Pure function: a synthetic document id that fits the remote id limit.
pub fn scratch_document_id(seed: Uuid) -> String {
    let mut id = format!("{}{}", SCRATCH_PREFIX, seed.simple());
    id.truncate(MAX_DOCUMENT_ID_LEN);
    id
}

/// Pure function: the smallest payload that satisfies a collection's required
/// attributes.
pub fn scratch_document(collection: &CollectionDescriptor, now: DateTime<Utc>) -> Map<String, Value> {
    collection
        .required_attributes()
        .map(|attribute| {
            let value = placeholder(attribute, now);
            let value = if attribute.array {
                Value::Array(vec![value])
            } else {
                value
            };
            (attribute.key.clone(), value)
        })
        .collect()
}

fn placeholder(attribute: &AttributeDescriptor, now: DateTime<Utc>) -> Value {
    match attribute.kind {
        AttributeKind::String => {
            let size = attribute.size.unwrap_or(SCRATCH_TEXT.len() as u32) as usize;
            json!(SCRATCH_TEXT.chars().take(size.max(1)).collect::<String>())
        }
        AttributeKind::Integer => json!(numeric_placeholder(attribute) as i64),
        AttributeKind::Float => json!(numeric_placeholder(attribute)),
        AttributeKind::Boolean => json!(false),
        AttributeKind::Datetime => json!(now.to_rfc3339()),
        AttributeKind::Email => json!("smoke-test@example.com"),
        AttributeKind::Url => json!("https://example.com/smoke-test"),
    }
}

fn numeric_placeholder(attribute: &AttributeDescriptor) -> f64 {
    match (attribute.min, attribute.max) {
        (Some(min), _) => min,
        (None, Some(max)) if max < 0.0 => max,
        _ => 0.0,
    }
}

/// Pure function: lines for the final verification summary block.
pub fn format_summary(report: &VerificationReport) -> Vec<String> {
    let reachable = report.checks.iter().filter(|c| c.passed()).count();
    let mut lines = vec![
        "=".repeat(50),
        "VERIFICATION SUMMARY".to_string(),
        "=".repeat(50),
        format!(
            "Collections found: {}/{}",
            report.audit.present.len(),
            report.audit.present.len() + report.audit.missing.len()
        ),
    ];
    if !report.audit.missing.is_empty() {
        lines.push(format!("Missing: {}", report.audit.missing.join(", ")));
    }
    lines.push(format!(
        "Reachable: {}/{}",
        reachable,
        report.checks.len()
    ));
    if !report.write_cycles.is_empty() {
        let passed = report.write_cycles.iter().filter(|w| w.passed()).count();
        lines.push(format!(
            "Write cycles: {}/{}",
            passed,
            report.write_cycles.len()
        ));
    }

    let other = report.other_failures();
    if !other.is_empty() {
        lines.push(format!("Non-critical failures: {}", other.join(", ")));
    }
    let critical = report.critical_failures();
    if critical.is_empty() {
        lines.push("Critical collections: OK".to_string());
    } else {
        lines.push(format!("Critical collections failed: {}", critical.join(", ")));
    }
    lines.push("=".repeat(50));
    lines
}
