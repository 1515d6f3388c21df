//! The collections the application expects (pure data).

use serde::{Deserialize, Serialize};

use super::error::SchemaError;
use super::types::{AttributeDescriptor as A, CollectionDescriptor, DefaultValue};

/// Collections whose presence decides whether a run succeeded.
pub const CRITICAL_COLLECTIONS: [&str; 5] = ["users", "projects", "invoices", "expenses", "budgets"];

/// Size used for identifier references to other documents.
const ID_SIZE: u32 = 36;

/// Named subsets of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSet {
    /// The critical collections only.
    Core,
    /// Everything that is not critical.
    Extended,
    /// The whole catalog.
    #[default]
    All,
}

/// Whether a collection id belongs to the critical subset.
pub fn is_critical(collection_id: &str) -> bool {
    CRITICAL_COLLECTIONS.contains(&collection_id)
}

/// Returns the collections of a catalog set, in provisioning order.
pub fn catalog(set: CatalogSet) -> Vec<CollectionDescriptor> {
    full_catalog()
        .into_iter()
        .filter(|c| match set {
            CatalogSet::Core => is_critical(&c.id),
            CatalogSet::Extended => !is_critical(&c.id),
            CatalogSet::All => true,
        })
        .collect()
}

/// Restricts a catalog to the given ids, keeping catalog order.
///
/// An empty `only` keeps everything. Unknown ids are an error so that typos do
/// not silently turn into an empty run.
pub fn select(
    collections: Vec<CollectionDescriptor>,
    only: &[String],
) -> Result<Vec<CollectionDescriptor>, SchemaError> {
    if only.is_empty() {
        return Ok(collections);
    }
    if let Some(unknown) = only
        .iter()
        .find(|id| !collections.iter().any(|c| &c.id == *id))
    {
        return Err(SchemaError::UnknownCollection(unknown.clone()));
    }
    Ok(collections
        .into_iter()
        .filter(|c| only.contains(&c.id))
        .collect())
}

/// The full catalog, in provisioning order.
pub fn full_catalog() -> Vec<CollectionDescriptor> {
    vec![
        users(),
        clients(),
        projects(),
        tasks(),
        time_entries(),
        invoices(),
        expenses(),
        budgets(),
        categories(),
        notifications(),
    ]
}

fn text(value: &str) -> DefaultValue {
    DefaultValue::String(value.to_string())
}

fn users() -> CollectionDescriptor {
    CollectionDescriptor::new("users", "Users")
        .with(A::string("name", 255).required())
        .with(A::email("email").required())
        .with(A::url("avatar_url"))
        .with(A::string("role", 32).default_value(text("member")))
        .with(A::string("company", 255))
        .with(A::string("currency", 3).default_value(text("EUR")))
        .with(A::datetime("created_at"))
}

fn clients() -> CollectionDescriptor {
    CollectionDescriptor::new("clients", "Clients")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("name", 255).required())
        .with(A::email("email"))
        .with(A::string("phone", 32))
        .with(A::string("company", 255))
        .with(A::string("address", 1000))
        .with(A::url("website"))
        .with(A::datetime("created_at"))
}

fn projects() -> CollectionDescriptor {
    CollectionDescriptor::new("projects", "Projects")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("name", 255).required())
        .with(A::string("description", 5000))
        .with(A::string("client_id", ID_SIZE))
        .with(A::string("status", 32).default_value(text("active")))
        .with(A::float("budget").bounds(Some(0.0), None))
        .with(A::float("hourly_rate").bounds(Some(0.0), None))
        .with(A::datetime("start_date"))
        .with(A::datetime("end_date"))
        .with(A::string("tags", 64).array())
}

fn tasks() -> CollectionDescriptor {
    CollectionDescriptor::new("tasks", "Tasks")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("project_id", ID_SIZE).required())
        .with(A::string("title", 255).required())
        .with(A::string("description", 5000))
        .with(A::boolean("completed").default_value(DefaultValue::Boolean(false)))
        .with(
            A::integer("priority")
                .bounds(Some(1.0), Some(5.0))
                .default_value(DefaultValue::Integer(3)),
        )
        .with(A::datetime("due_date"))
        .with(A::float("estimated_hours").bounds(Some(0.0), None))
}

fn time_entries() -> CollectionDescriptor {
    CollectionDescriptor::new("time_entries", "Time Entries")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("project_id", ID_SIZE).required())
        .with(A::string("task_id", ID_SIZE))
        .with(A::string("description", 1000))
        .with(A::integer("duration_minutes").required().bounds(Some(0.0), None))
        .with(A::boolean("billable").default_value(DefaultValue::Boolean(true)))
        .with(A::datetime("started_at").required())
}

fn invoices() -> CollectionDescriptor {
    CollectionDescriptor::new("invoices", "Invoices")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("client_id", ID_SIZE).required())
        .with(A::string("project_id", ID_SIZE))
        .with(A::string("invoice_number", 64).required())
        .with(A::float("amount").required().bounds(Some(0.0), None))
        .with(
            A::float("tax_rate")
                .bounds(Some(0.0), Some(100.0))
                .default_value(DefaultValue::Float(0.0)),
        )
        .with(A::string("currency", 3).default_value(text("EUR")))
        .with(A::string("status", 32).default_value(text("draft")))
        .with(A::datetime("issue_date").required())
        .with(A::datetime("due_date"))
        .with(A::datetime("paid_at"))
        .with(A::string("notes", 5000))
}

fn expenses() -> CollectionDescriptor {
    CollectionDescriptor::new("expenses", "Expenses")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("project_id", ID_SIZE))
        .with(A::string("description", 1000).required())
        .with(A::float("amount").required().bounds(Some(0.0), None))
        .with(A::string("category", 64))
        .with(A::datetime("date").required())
        .with(A::url("receipt_url"))
        .with(A::boolean("billable").default_value(DefaultValue::Boolean(false)))
}

fn budgets() -> CollectionDescriptor {
    CollectionDescriptor::new("budgets", "Budgets")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("name", 255).required())
        .with(A::string("category", 64))
        .with(A::float("amount").required().bounds(Some(0.0), None))
        .with(A::float("spent").default_value(DefaultValue::Float(0.0)))
        .with(A::string("period", 32).default_value(text("monthly")))
        .with(A::datetime("start_date"))
        .with(A::datetime("end_date"))
        .with(
            A::integer("alert_threshold")
                .bounds(Some(0.0), Some(100.0))
                .default_value(DefaultValue::Integer(80)),
        )
}

fn categories() -> CollectionDescriptor {
    CollectionDescriptor::new("categories", "Categories")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("name", 64).required())
        .with(A::string("type", 32).default_value(text("expense")))
        .with(A::string("color", 16))
}

fn notifications() -> CollectionDescriptor {
    CollectionDescriptor::new("notifications", "Notifications")
        .with(A::string("user_id", ID_SIZE).required())
        .with(A::string("title", 255).required())
        .with(A::string("message", 2000))
        .with(A::string("type", 32).default_value(text("info")))
        .with(A::boolean("read").default_value(DefaultValue::Boolean(false)))
        .with(A::url("link"))
        .with(A::datetime("created_at"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validation::validate_catalog;

    #[test]
    fn test_full_catalog_is_valid() {
        assert_eq!(validate_catalog(&full_catalog()), Ok(()));
    }

    #[test]
    fn test_critical_collections_are_in_catalog() {
        let all = full_catalog();
        for id in CRITICAL_COLLECTIONS {
            assert!(all.iter().any(|c| c.id == id), "missing {id}");
        }
    }

    #[test]
    fn test_sets_partition_the_catalog() {
        let core = catalog(CatalogSet::Core);
        let extended = catalog(CatalogSet::Extended);
        let all = catalog(CatalogSet::All);

        assert_eq!(core.len(), CRITICAL_COLLECTIONS.len());
        assert_eq!(core.len() + extended.len(), all.len());
        assert!(core.iter().all(|c| is_critical(&c.id)));
        assert!(extended.iter().all(|c| !is_critical(&c.id)));
    }

    #[test]
    fn test_select_keeps_catalog_order() {
        let only = vec!["budgets".to_string(), "users".to_string()];
        let selected = select(full_catalog(), &only).unwrap();
        let ids: Vec<&str> = selected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["users", "budgets"]);
    }

    #[test]
    fn test_select_empty_keeps_everything() {
        let selected = select(full_catalog(), &[]).unwrap();
        assert_eq!(selected.len(), full_catalog().len());
    }

    #[test]
    fn test_select_unknown_id() {
        let only = vec!["userz".to_string()];
        assert_eq!(
            select(full_catalog(), &only),
            Err(SchemaError::UnknownCollection("userz".to_string()))
        );
    }
}
