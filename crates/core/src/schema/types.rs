use serde::{Deserialize, Serialize};

/// A collection to provision: stable identifier, display name and its ordered attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    pub id: String,
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl CollectionDescriptor {
    /// Creates a descriptor with no attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute, keeping declaration order.
    pub fn with(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Attributes that must be present when writing a document.
    pub fn required_attributes(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter().filter(|a| a.required)
    }
}

/// Scalar kind of an attribute. Each kind maps to its own remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Email,
    Url,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 7] = [
        AttributeKind::String,
        AttributeKind::Integer,
        AttributeKind::Float,
        AttributeKind::Boolean,
        AttributeKind::Datetime,
        AttributeKind::Email,
        AttributeKind::Url,
    ];

    /// Returns the lowercase name used in logs and endpoint paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Integer => "integer",
            AttributeKind::Float => "float",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Datetime => "datetime",
            AttributeKind::Email => "email",
            AttributeKind::Url => "url",
        }
    }

    /// Whether the kind takes a `size` limit.
    pub fn is_sized(&self) -> bool {
        matches!(self, AttributeKind::String)
    }

    /// Whether the kind accepts `min`/`max` bounds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeKind::Integer | AttributeKind::Float)
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value for an optional attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl DefaultValue {
    /// Whether this default can be stored in an attribute of `kind`.
    pub fn fits(&self, kind: AttributeKind) -> bool {
        matches!(
            (self, kind),
            (DefaultValue::String(_), AttributeKind::String)
                | (DefaultValue::String(_), AttributeKind::Email)
                | (DefaultValue::String(_), AttributeKind::Url)
                | (DefaultValue::String(_), AttributeKind::Datetime)
                | (DefaultValue::Integer(_), AttributeKind::Integer)
                | (DefaultValue::Integer(_), AttributeKind::Float)
                | (DefaultValue::Float(_), AttributeKind::Float)
                | (DefaultValue::Boolean(_), AttributeKind::Boolean)
        )
    }

    /// Converts the default to a JSON value for request bodies.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DefaultValue::Boolean(b) => serde_json::Value::from(*b),
            DefaultValue::Integer(i) => serde_json::Value::from(*i),
            DefaultValue::Float(f) => serde_json::Value::from(*f),
            DefaultValue::String(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

/// A typed field definition within a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub key: String,
    pub kind: AttributeKind,
    pub size: Option<u32>,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub array: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AttributeDescriptor {
    fn new(key: &str, kind: AttributeKind) -> Self {
        Self {
            key: key.to_string(),
            kind,
            size: None,
            required: false,
            default: None,
            array: false,
            min: None,
            max: None,
        }
    }

    /// A string attribute with a maximum size.
    pub fn string(key: &str, size: u32) -> Self {
        Self {
            size: Some(size),
            ..Self::new(key, AttributeKind::String)
        }
    }

    pub fn integer(key: &str) -> Self {
        Self::new(key, AttributeKind::Integer)
    }

    pub fn float(key: &str) -> Self {
        Self::new(key, AttributeKind::Float)
    }

    pub fn boolean(key: &str) -> Self {
        Self::new(key, AttributeKind::Boolean)
    }

    pub fn datetime(key: &str) -> Self {
        Self::new(key, AttributeKind::Datetime)
    }

    pub fn email(key: &str) -> Self {
        Self::new(key, AttributeKind::Email)
    }

    pub fn url(key: &str) -> Self {
        Self::new(key, AttributeKind::Url)
    }

    /// Marks the attribute as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the attribute as an array of its kind.
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Sets a default value.
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets numeric bounds.
    pub fn bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

/// Permission set attached to created collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionProfile {
    /// Anyone reads, signed-in users create and update, admins delete.
    #[default]
    RoleBased,
    /// Anyone reads, creates, updates and deletes.
    Open,
}

impl PermissionProfile {
    /// Returns the permission strings understood by the remote service.
    pub fn permissions(&self) -> Vec<String> {
        match self {
            PermissionProfile::RoleBased => vec![
                r#"read("any")"#.to_string(),
                r#"create("users")"#.to_string(),
                r#"update("users")"#.to_string(),
                r#"delete("team:admin")"#.to_string(),
            ],
            PermissionProfile::Open => vec![
                r#"read("any")"#.to_string(),
                r#"create("any")"#.to_string(),
                r#"update("any")"#.to_string(),
                r#"delete("any")"#.to_string(),
            ],
        }
    }
}
