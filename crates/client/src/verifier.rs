//! Post-provisioning smoke checks (Imperative Shell).

use chrono::Utc;
use uuid::Uuid;

use appschema_core::schema::{is_critical, CollectionDescriptor};
use appschema_core::verify::{
    audit_presence, scratch_document, scratch_document_id, CheckStatus, CollectionCheck,
    PresenceAudit, StepStatus, VerificationReport, WriteCycle,
};

use crate::output::Console;
use crate::service::SchemaService;

/// Checks that provisioned collections exist, are readable and optionally
/// accept a create-then-delete of a scratch document.
pub struct Verifier<'a, S: SchemaService + ?Sized> {
    service: &'a S,
    console: Console,
}

impl<'a, S: SchemaService + ?Sized> Verifier<'a, S> {
    pub fn new(service: &'a S, console: Console) -> Self {
        Self { service, console }
    }

    /// Runs the presence audit, then the per-collection checks in order.
    pub async fn run(
        &self,
        collections: &[CollectionDescriptor],
        write_cycle: bool,
    ) -> VerificationReport {
        let mut report = VerificationReport {
            audit: self.audit(collections).await,
            ..Default::default()
        };

        for collection in collections {
            self.console.step(&format!(
                "{}{}",
                collection.id,
                if is_critical(&collection.id) {
                    " (critical)"
                } else {
                    ""
                }
            ));

            let check = self.check_collection(&collection.id).await;
            let reachable = check.passed();
            report.checks.push(check);

            if write_cycle && reachable {
                report.write_cycles.push(self.test_write_cycle(collection).await);
            }
        }

        report
    }

    /// Lists remote collections and partitions the expected ids. A listing
    /// failure reports every collection as missing.
    pub async fn audit(&self, collections: &[CollectionDescriptor]) -> PresenceAudit {
        let expected: Vec<&str> = collections.iter().map(|c| c.id.as_str()).collect();
        let found: Vec<String> = match self.service.list_collections().await {
            Ok(list) => {
                tracing::info!(total = list.total, "Listed collections");
                list.collections
                    .into_iter()
                    .map(|c| {
                        tracing::debug!(id = %c.id, name = %c.name, "Found collection");
                        c.id
                    })
                    .collect()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list collections");
                self.console.fail(&format!("listing collections failed: {}", e));
                Vec::new()
            }
        };

        let audit = audit_presence(&expected, &found);
        self.console.field(
            "Found:",
            &format!("{}/{}", audit.present.len(), expected.len()),
        );
        if !audit.missing.is_empty() {
            self.console
                .warn(&format!("missing: {}", audit.missing.join(", ")));
        }
        audit
    }

    /// Lists the documents of one collection.
    pub async fn check_collection(&self, collection_id: &str) -> CollectionCheck {
        let status = match self.service.list_documents(collection_id).await {
            Ok(list) => {
                tracing::info!(collection = %collection_id, documents = list.total, "Reachable");
                self.console
                    .ok(&format!("reachable ({} documents)", list.total));
                CheckStatus::Reachable {
                    documents: list.total,
                }
            }
            Err(e) => {
                tracing::error!(collection = %collection_id, error = %e, "Unreachable");
                self.console.fail(&format!("unreachable: {}", e));
                CheckStatus::Unreachable {
                    message: e.to_string(),
                }
            }
        };
        CollectionCheck {
            id: collection_id.to_string(),
            status,
        }
    }

    /// Creates a scratch document and deletes it again. Deletion is only
    /// attempted when creation succeeded.
    pub async fn test_write_cycle(&self, collection: &CollectionDescriptor) -> WriteCycle {
        let document_id = scratch_document_id(Uuid::new_v4());
        let data = scratch_document(collection, Utc::now());

        let create = match self
            .service
            .create_document(&collection.id, &document_id, &data)
            .await
        {
            Ok(_) => {
                self.console.ok(&format!("created {}", document_id));
                StepStatus::Ok
            }
            Err(e) => {
                tracing::error!(collection = %collection.id, error = %e, "Scratch document create failed");
                self.console.fail(&format!("create failed: {}", e));
                StepStatus::Failed {
                    message: e.to_string(),
                }
            }
        };

        let delete = if create.is_ok() {
            Some(
                match self
                    .service
                    .delete_document(&collection.id, &document_id)
                    .await
                {
                    Ok(()) => {
                        self.console.ok(&format!("deleted {}", document_id));
                        StepStatus::Ok
                    }
                    Err(e) => {
                        tracing::error!(
                            collection = %collection.id,
                            document = %document_id,
                            error = %e,
                            "Scratch document delete failed"
                        );
                        self.console.fail(&format!("delete failed: {}", e));
                        StepStatus::Failed {
                            message: e.to_string(),
                        }
                    }
                },
            )
        } else {
            None
        };

        WriteCycle {
            id: collection.id.clone(),
            document_id,
            create,
            delete,
        }
    }
}
