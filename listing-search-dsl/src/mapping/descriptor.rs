//! Field and type descriptors.
//!
//! Rust has no runtime reflection, so every indexable record spells out its
//! fields once in a descriptor table. The mapper reads nothing else.

use std::fmt;

/// Primitive category of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// UTF-8 text.
    Text,
    /// Any signed or unsigned integer.
    Integer,
    /// Any floating point number.
    Float,
    /// `true` / `false`.
    Boolean,
    /// A point in time.
    Timestamp,
    /// A nested record with its own fields.
    Record(Vec<FieldDescriptor>),
    /// A list of values of the inner kind.
    Collection(Box<FieldKind>),
    /// Free-form JSON whose shape is not known ahead of time.
    Dynamic,
}

impl FieldKind {
    /// Shorthand for a collection of `inner`.
    pub fn collection(inner: FieldKind) -> Self {
        Self::Collection(Box::new(inner))
    }

    /// Shorthand for a nested record.
    pub fn record(fields: Vec<FieldDescriptor>) -> Self {
        Self::Record(fields)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Timestamp => write!(f, "timestamp"),
            FieldKind::Record(_) => write!(f, "record"),
            FieldKind::Collection(inner) => write!(f, "collection<{}>", inner),
            FieldKind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Description of a single record field.
///
/// The schema name is the `rename` value when present (mirroring a
/// `#[serde(rename = "...")]` attribute), otherwise the declared identifier.
/// The optional annotation carries schema directives such as
/// `"type=keyword,index=false"`.
///
/// # Example
///
/// ```
/// use listing_search_dsl::{FieldDescriptor, FieldKind};
///
/// let field = FieldDescriptor::new("city_name", FieldKind::Text)
///     .rename("city_name_tm")
///     .annotate("type=keyword");
///
/// assert_eq!(field.schema_name(), "city_name_tm");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    ident: String,
    rename: Option<String>,
    kind: FieldKind,
    annotation: Option<String>,
    excluded: bool,
}

impl FieldDescriptor {
    /// Create a descriptor for a field with the given identifier and kind.
    pub fn new(ident: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            ident: ident.into(),
            rename: None,
            kind,
            annotation: None,
            excluded: false,
        }
    }

    pub fn text(ident: impl Into<String>) -> Self {
        Self::new(ident, FieldKind::Text)
    }

    pub fn integer(ident: impl Into<String>) -> Self {
        Self::new(ident, FieldKind::Integer)
    }

    pub fn float(ident: impl Into<String>) -> Self {
        Self::new(ident, FieldKind::Float)
    }

    pub fn boolean(ident: impl Into<String>) -> Self {
        Self::new(ident, FieldKind::Boolean)
    }

    pub fn timestamp(ident: impl Into<String>) -> Self {
        Self::new(ident, FieldKind::Timestamp)
    }

    pub fn dynamic(ident: impl Into<String>) -> Self {
        Self::new(ident, FieldKind::Dynamic)
    }

    /// Keyword shorthand: a text field stored as an exact-match `keyword`.
    pub fn keyword(ident: impl Into<String>) -> Self {
        Self::text(ident).annotate("type=keyword")
    }

    /// Override the schema name of this field.
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Attach schema directives (`key=value` or bare `key`, comma separated).
    pub fn annotate(mut self, directives: impl Into<String>) -> Self {
        self.annotation = Some(directives.into());
        self
    }

    /// Keep this field out of the generated schema.
    pub fn exclude(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// The name this field is stored under.
    pub fn schema_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.ident)
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }
}

/// Shape of a top-level type handed to the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// A record with named fields. The only mappable shape.
    Record(Vec<FieldDescriptor>),
    /// Anything that is not a record.
    Scalar(FieldKind),
}

/// Types that can describe their own index schema.
///
/// Implementations list their fields in declaration order; that order is kept
/// in the generated `properties` object.
pub trait IndexSchema {
    /// The explicit field-descriptor table of this type.
    fn fields() -> Vec<FieldDescriptor>;

    /// The top-level shape of this type. Records use the default.
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Record(Self::fields())
    }
}
