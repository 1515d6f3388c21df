use thiserror::Error;

/// Errors found while validating a catalog of collection descriptors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Collection id cannot be empty")]
    EmptyCollectionId,
    #[error("Duplicate collection id: {0}")]
    DuplicateCollection(String),
    #[error("Attribute key cannot be empty in collection '{collection}'")]
    EmptyAttributeKey { collection: String },
    #[error("Duplicate attribute '{key}' in collection '{collection}'")]
    DuplicateAttribute { collection: String, key: String },
    #[error("String attribute '{collection}.{key}' needs a positive size")]
    MissingSize { collection: String, key: String },
    #[error("Attribute '{collection}.{key}' of kind {kind} does not take a size")]
    UnexpectedSize {
        collection: String,
        key: String,
        kind: String,
    },
    #[error("Required attribute '{collection}.{key}' cannot have a default")]
    RequiredWithDefault { collection: String, key: String },
    #[error("Default of '{collection}.{key}' does not match kind {kind}")]
    DefaultKindMismatch {
        collection: String,
        key: String,
        kind: String,
    },
    #[error("Attribute '{collection}.{key}' has min greater than max")]
    InvalidBounds { collection: String, key: String },
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_attribute_display() {
        let error = SchemaError::DuplicateAttribute {
            collection: "invoices".to_string(),
            key: "amount".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate attribute 'amount' in collection 'invoices'"
        );
    }

    #[test]
    fn test_missing_size_display() {
        let error = SchemaError::MissingSize {
            collection: "users".to_string(),
            key: "name".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "String attribute 'users.name' needs a positive size"
        );
    }
}
