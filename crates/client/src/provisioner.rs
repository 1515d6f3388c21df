//! Sequential schema provisioning (Imperative Shell).

use appschema_core::apply::ApplyOutcome;
use appschema_core::provision::{AttributeReport, CollectionReport, ProvisioningReport};
use appschema_core::schema::{AttributeDescriptor, CollectionDescriptor, PermissionProfile};

use crate::apply::apply_idempotent;
use crate::config::Pacing;
use crate::error::ClientError;
use crate::output::Console;
use crate::service::SchemaService;

/// Brings the remote schema in line with a list of collection descriptors.
///
/// Collections are handled strictly in order, each one fully (collection, then
/// every attribute) before the next. Nothing is rolled back: running again
/// picks up whatever is still missing.
pub struct Provisioner<'a, S: SchemaService + ?Sized> {
    service: &'a S,
    profile: PermissionProfile,
    pacing: Pacing,
    console: Console,
}

impl<'a, S: SchemaService + ?Sized> Provisioner<'a, S> {
    pub fn new(service: &'a S, profile: PermissionProfile, pacing: Pacing, console: Console) -> Self {
        Self {
            service,
            profile,
            pacing,
            console,
        }
    }

    /// Provisions every collection and returns the run report.
    pub async fn run(&self, collections: &[CollectionDescriptor]) -> ProvisioningReport {
        let mut report = ProvisioningReport::default();
        for collection in collections {
            report.collections.push(self.create_collection(collection).await);
        }
        report
    }

    /// Creates one collection, then its attributes unless creation failed
    /// outright. An existing collection still gets its missing attributes.
    pub async fn create_collection(&self, collection: &CollectionDescriptor) -> CollectionReport {
        self.console
            .step(&format!("Collection {} ({})", collection.id, collection.name));

        let outcome = apply_idempotent(
            &collection.id,
            self.service.create_collection(collection, self.profile),
            ClientError::is_conflict,
        )
        .await;

        match &outcome {
            ApplyOutcome::Applied(()) => self.console.ok("created"),
            ApplyOutcome::AlreadyExists => self.console.warn("already exists"),
            ApplyOutcome::Failed(message) => {
                self.console.fail(&format!("failed: {}", message));
                return CollectionReport {
                    id: collection.id.clone(),
                    status: outcome.status(),
                    attributes: Vec::new(),
                };
            }
        }

        tokio::time::sleep(self.pacing.after_collection).await;

        let mut attributes = Vec::with_capacity(collection.attributes.len());
        for attribute in &collection.attributes {
            attributes.push(self.create_attribute(&collection.id, attribute).await);
        }

        CollectionReport {
            id: collection.id.clone(),
            status: outcome.status(),
            attributes,
        }
    }

    /// Creates one attribute through the endpoint of its kind, then waits the
    /// per-attribute delay whatever the outcome.
    pub async fn create_attribute(
        &self,
        collection_id: &str,
        attribute: &AttributeDescriptor,
    ) -> AttributeReport {
        let label = format!("{}.{}", collection_id, attribute.key);
        let outcome = apply_idempotent(
            &label,
            self.service.create_attribute(collection_id, attribute),
            ClientError::is_conflict,
        )
        .await;

        let line = format!("{} ({})", attribute.key, attribute.kind);
        match &outcome {
            ApplyOutcome::Applied(()) => self.console.ok(&line),
            ApplyOutcome::AlreadyExists => self.console.warn(&format!("{} already exists", line)),
            ApplyOutcome::Failed(message) => {
                self.console.fail(&format!("{} failed: {}", line, message))
            }
        }

        tokio::time::sleep(self.pacing.after_attribute).await;

        AttributeReport {
            key: attribute.key.clone(),
            kind: attribute.kind,
            status: outcome.status(),
        }
    }
}
