use std::collections::HashSet;

use super::error::SchemaError;
use super::types::{AttributeDescriptor, CollectionDescriptor};

/// Validates a whole catalog: unique collection ids plus every collection's attributes.
pub fn validate_catalog(collections: &[CollectionDescriptor]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for collection in collections {
        if !seen.insert(collection.id.as_str()) {
            return Err(SchemaError::DuplicateCollection(collection.id.clone()));
        }
        validate_collection(collection)?;
    }
    Ok(())
}

/// Validates a single collection descriptor.
pub fn validate_collection(collection: &CollectionDescriptor) -> Result<(), SchemaError> {
    if collection.id.trim().is_empty() {
        return Err(SchemaError::EmptyCollectionId);
    }

    let mut keys = HashSet::new();
    for attribute in &collection.attributes {
        if !keys.insert(attribute.key.as_str()) {
            return Err(SchemaError::DuplicateAttribute {
                collection: collection.id.clone(),
                key: attribute.key.clone(),
            });
        }
        validate_attribute(&collection.id, attribute)?;
    }
    Ok(())
}

fn validate_attribute(collection: &str, attribute: &AttributeDescriptor) -> Result<(), SchemaError> {
    let collection = collection.to_string();
    let key = attribute.key.clone();

    if key.trim().is_empty() {
        return Err(SchemaError::EmptyAttributeKey { collection });
    }

    match (attribute.kind.is_sized(), attribute.size) {
        (true, None) | (true, Some(0)) => {
            return Err(SchemaError::MissingSize { collection, key });
        }
        (false, Some(_)) => {
            return Err(SchemaError::UnexpectedSize {
                collection,
                key,
                kind: attribute.kind.to_string(),
            });
        }
        _ => {}
    }

    if let Some(default) = &attribute.default {
        if attribute.required {
            return Err(SchemaError::RequiredWithDefault { collection, key });
        }
        if !default.fits(attribute.kind) {
            return Err(SchemaError::DefaultKindMismatch {
                collection,
                key,
                kind: attribute.kind.to_string(),
            });
        }
    }

    if let (Some(min), Some(max)) = (attribute.min, attribute.max) {
        if min > max {
            return Err(SchemaError::InvalidBounds { collection, key });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::DefaultValue;

    #[test]
    fn test_valid_catalog() {
        let catalog = vec![
            CollectionDescriptor::new("a", "A").with(AttributeDescriptor::string("name", 64)),
            CollectionDescriptor::new("b", "B").with(AttributeDescriptor::integer("count")),
        ];
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_duplicate_collection_id() {
        let catalog = vec![
            CollectionDescriptor::new("a", "A"),
            CollectionDescriptor::new("a", "Again"),
        ];
        assert_eq!(
            validate_catalog(&catalog),
            Err(SchemaError::DuplicateCollection("a".to_string()))
        );
    }

    #[test]
    fn test_duplicate_attribute_key() {
        let collection = CollectionDescriptor::new("a", "A")
            .with(AttributeDescriptor::email("email"))
            .with(AttributeDescriptor::string("email", 64));
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn test_string_needs_size() {
        let mut attribute = AttributeDescriptor::string("name", 64);
        attribute.size = None;
        let collection = CollectionDescriptor::new("a", "A").with(attribute);
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::MissingSize { .. })
        ));

        let collection =
            CollectionDescriptor::new("a", "A").with(AttributeDescriptor::string("name", 0));
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::MissingSize { .. })
        ));
    }

    #[test]
    fn test_size_on_unsized_kind() {
        let mut attribute = AttributeDescriptor::url("website");
        attribute.size = Some(255);
        let collection = CollectionDescriptor::new("a", "A").with(attribute);
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::UnexpectedSize { .. })
        ));
    }

    #[test]
    fn test_required_with_default_rejected() {
        let collection = CollectionDescriptor::new("a", "A").with(
            AttributeDescriptor::boolean("active")
                .required()
                .default_value(DefaultValue::Boolean(true)),
        );
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::RequiredWithDefault { .. })
        ));
    }

    #[test]
    fn test_default_kind_mismatch() {
        let collection = CollectionDescriptor::new("a", "A")
            .with(AttributeDescriptor::integer("count").default_value(DefaultValue::Boolean(true)));
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::DefaultKindMismatch { .. })
        ));
    }

    #[test]
    fn test_inverted_bounds() {
        let collection = CollectionDescriptor::new("a", "A")
            .with(AttributeDescriptor::float("ratio").bounds(Some(1.0), Some(0.0)));
        assert!(matches!(
            validate_collection(&collection),
            Err(SchemaError::InvalidBounds { .. })
        ));
    }
}
