//! Provisioning run reports and their formatting (Functional Core).

use serde::Serialize;

use crate::apply::{ApplyStatus, Tally};
use crate::schema::{is_critical, AttributeKind, CollectionDescriptor};

/// Outcome of one attribute creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeReport {
    pub key: String,
    pub kind: AttributeKind,
    #[serde(flatten)]
    pub status: ApplyStatus,
}

/// Outcome of one collection and the attributes attempted in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    pub id: String,
    #[serde(flatten)]
    pub status: ApplyStatus,
    pub attributes: Vec<AttributeReport>,
}

impl CollectionReport {
    /// The collection exists and none of its attributes failed.
    pub fn succeeded(&self) -> bool {
        !self.status.is_failed() && self.attributes.iter().all(|a| !a.status.is_failed())
    }
}

/// Report of a whole provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningReport {
    pub collections: Vec<CollectionReport>,
}

impl ProvisioningReport {
    pub fn collection_tally(&self) -> Tally {
        self.collections.iter().map(|c| &c.status).collect()
    }

    pub fn attribute_tally(&self) -> Tally {
        self.collections
            .iter()
            .flat_map(|c| c.attributes.iter())
            .map(|a| &a.status)
            .collect()
    }

    /// Collections that are critical and did not fully succeed.
    pub fn critical_failures(&self) -> Vec<&str> {
        self.collections
            .iter()
            .filter(|c| is_critical(&c.id) && !c.succeeded())
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Whether the run counts as successful for automation.
    pub fn passed(&self) -> bool {
        self.critical_failures().is_empty()
    }

    /// Process exit code: 0 when every critical collection succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Pure function: lines describing what a run will attempt.
pub fn format_plan(collections: &[CollectionDescriptor]) -> Vec<String> {
    collections
        .iter()
        .map(|c| {
            let marker = if is_critical(&c.id) { "*" } else { " " };
            format!(
                "{} {} ({}) - {} attributes",
                marker,
                c.id,
                c.name,
                c.attributes.len()
            )
        })
        .collect()
}

/// Pure function: lines for the final summary block.
pub fn format_summary(report: &ProvisioningReport) -> Vec<String> {
    let collections = report.collection_tally();
    let attributes = report.attribute_tally();
    let mut lines = vec![
        "=".repeat(50),
        "PROVISIONING SUMMARY".to_string(),
        "=".repeat(50),
        format!(
            "Collections: {} created, {} already existed, {} failed",
            collections.created, collections.existing, collections.failed
        ),
        format!(
            "Attributes:  {} created, {} already existed, {} failed",
            attributes.created, attributes.existing, attributes.failed
        ),
    ];

    for collection in &report.collections {
        if let ApplyStatus::Failed { message } = &collection.status {
            lines.push(format!("- {}: {}", collection.id, message));
        }
        for attribute in &collection.attributes {
            if let ApplyStatus::Failed { message } = &attribute.status {
                lines.push(format!(
                    "- {}.{} ({}): {}",
                    collection.id, attribute.key, attribute.kind, message
                ));
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(key: &str, status: ApplyStatus) -> AttributeReport {
        AttributeReport {
            key: key.to_string(),
            kind: AttributeKind::String,
            status,
        }
    }

    fn failed(message: &str) -> ApplyStatus {
        ApplyStatus::Failed {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_tallies() {
        let report = ProvisioningReport {
            collections: vec![
                CollectionReport {
                    id: "users".into(),
                    status: ApplyStatus::Created,
                    attributes: vec![
                        attribute("name", ApplyStatus::Created),
                        attribute("email", ApplyStatus::AlreadyExists),
                    ],
                },
                CollectionReport {
                    id: "clients".into(),
                    status: failed("server error"),
                    attributes: vec![],
                },
            ],
        };

        let collections = report.collection_tally();
        assert_eq!((collections.created, collections.failed), (1, 1));
        let attributes = report.attribute_tally();
        assert_eq!((attributes.created, attributes.existing), (1, 1));
    }

    #[test]
    fn test_non_critical_failure_passes() {
        let report = ProvisioningReport {
            collections: vec![
                CollectionReport {
                    id: "users".into(),
                    status: ApplyStatus::AlreadyExists,
                    attributes: vec![attribute("name", ApplyStatus::AlreadyExists)],
                },
                CollectionReport {
                    id: "notifications".into(),
                    status: failed("boom"),
                    attributes: vec![],
                },
            ],
        };
        assert!(report.passed());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_critical_attribute_failure_fails_run() {
        let report = ProvisioningReport {
            collections: vec![CollectionReport {
                id: "invoices".into(),
                status: ApplyStatus::Created,
                attributes: vec![
                    attribute("amount", ApplyStatus::Created),
                    attribute("status", failed("invalid size")),
                ],
            }],
        };
        assert_eq!(report.critical_failures(), vec!["invoices"]);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_format_summary_lists_failures() {
        let report = ProvisioningReport {
            collections: vec![CollectionReport {
                id: "budgets".into(),
                status: ApplyStatus::Created,
                attributes: vec![attribute("name", failed("bad request"))],
            }],
        };
        let lines = format_summary(&report);
        assert!(lines.contains(&"- budgets.name (string): bad request".to_string()));
        assert!(lines.contains(&"Critical collections failed: budgets".to_string()));
    }

    #[test]
    fn test_format_plan_marks_critical() {
        let lines = format_plan(&[
            CollectionDescriptor::new("users", "Users"),
            CollectionDescriptor::new("tasks", "Tasks"),
        ]);
        assert_eq!(lines[0], "* users (Users) - 0 attributes");
        assert_eq!(lines[1], "  tasks (Tasks) - 0 attributes");
    }
}
