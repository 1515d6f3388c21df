//! Collection and attribute descriptors, the shipped catalog and request builders.

mod catalog;
mod error;
mod requests;
mod types;
mod validation;

pub use catalog::{catalog, full_catalog, is_critical, select, CatalogSet, CRITICAL_COLLECTIONS};
pub use error::SchemaError;
pub use requests::{
    attribute_endpoint, create_attribute_request, create_collection_request,
    create_document_request, delete_document_request, list_collections_request,
    list_documents_request, ApiMethod, ApiRequest,
};
pub use types::{
    AttributeDescriptor, AttributeKind, CollectionDescriptor, DefaultValue, PermissionProfile,
};
pub use validation::{validate_catalog, validate_collection};
