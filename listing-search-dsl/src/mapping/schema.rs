//! Schema document construction.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::errors::SchemaError;
use crate::mapping::annotation::parse_annotation;
use crate::mapping::descriptor::{FieldDescriptor, FieldKind, IndexSchema, TypeDescriptor};

/// Name of the shared multilingual analyzer applied to inferred text fields.
pub const UNIVERSAL_ANALYZER: &str = "universal_analyzer";

/// Index-level settings emitted next to the mappings.
///
/// The analysis section is always present; shard and replica counts are only
/// emitted when set, so the cluster defaults apply otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSettings {
    pub number_of_shards: Option<u32>,
    pub number_of_replicas: Option<u32>,
}

impl IndexSettings {
    fn to_json(&self) -> Value {
        let mut settings = Map::new();
        if let Some(shards) = self.number_of_shards {
            settings.insert("number_of_shards".to_string(), json!(shards));
        }
        if let Some(replicas) = self.number_of_replicas {
            settings.insert("number_of_replicas".to_string(), json!(replicas));
        }
        settings.insert(
            "analysis".to_string(),
            json!({
                "analyzer": {
                    UNIVERSAL_ANALYZER: {
                        "tokenizer": "icu_tokenizer",
                        "filter": ["icu_folding", "lowercase"]
                    }
                }
            }),
        );
        Value::Object(settings)
    }
}

/// An index schema: per-field storage types plus index settings.
///
/// Serializes to the body expected by the index creation API:
///
/// ```json
/// {"settings": {...}, "mappings": {"properties": {"price": {"type": "double"}}}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    properties: Map<String, Value>,
    settings: IndexSettings,
}

impl SchemaDocument {
    /// The field name → type descriptor mapping, in field declaration order.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Look up a single property by its schema name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// Set the primary shard and replica counts.
    pub fn with_shards(mut self, number_of_shards: u32, number_of_replicas: u32) -> Self {
        self.settings.number_of_shards = Some(number_of_shards);
        self.settings.number_of_replicas = Some(number_of_replicas);
        self
    }

    /// Replace the index settings wholesale.
    pub fn with_settings(mut self, settings: IndexSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Render the full index creation body.
    pub fn to_json(&self) -> Value {
        json!({
            "settings": self.settings.to_json(),
            "mappings": {
                "properties": Value::Object(self.properties.clone())
            }
        })
    }
}

impl Serialize for SchemaDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Build an index schema from a type descriptor.
///
/// # Arguments
///
/// * `descriptor` - The top-level type; must be a record
///
/// # Returns
///
/// * `Ok(SchemaDocument)` - Properties for every non-excluded field
/// * `Err(SchemaError::UnsupportedType)` - If the descriptor is not a record
/// * `Err(SchemaError::DuplicateField)` - If two fields share a schema name
///
/// # Example
///
/// ```
/// use listing_search_dsl::{build_schema, FieldDescriptor, TypeDescriptor};
/// use serde_json::json;
///
/// let schema = build_schema(&TypeDescriptor::Record(vec![
///     FieldDescriptor::float("price"),
/// ]))
/// .unwrap();
///
/// assert_eq!(schema.property("price"), Some(&json!({"type": "double"})));
/// ```
pub fn build_schema(descriptor: &TypeDescriptor) -> Result<SchemaDocument, SchemaError> {
    match descriptor {
        TypeDescriptor::Record(fields) => Ok(SchemaDocument {
            properties: build_properties(fields)?,
            settings: IndexSettings::default(),
        }),
        TypeDescriptor::Scalar(kind) => Err(SchemaError::unsupported_type(kind.to_string())),
    }
}

/// Build the index schema of a type that describes itself.
pub fn schema_for<T: IndexSchema + ?Sized>() -> Result<SchemaDocument, SchemaError> {
    build_schema(&T::type_descriptor())
}

fn build_properties(fields: &[FieldDescriptor]) -> Result<Map<String, Value>, SchemaError> {
    let mut properties = Map::new();
    let mut seen = HashSet::new();

    for field in fields.iter().filter(|f| !f.is_excluded()) {
        let name = field.schema_name();
        if !seen.insert(name) {
            return Err(SchemaError::duplicate_field(name));
        }
        properties.insert(name.to_string(), build_property(field)?);
    }

    Ok(properties)
}

fn build_property(field: &FieldDescriptor) -> Result<Value, SchemaError> {
    let explicit = field.annotation().map(parse_annotation).unwrap_or_default();

    // An explicit type replaces the whole inferred default, analyzer included.
    let mut property = if explicit.contains_key("type") {
        Map::new()
    } else {
        inferred_property(field.kind())?
    };

    for (key, value) in explicit {
        property.insert(key, value);
    }

    Ok(Value::Object(property))
}

fn inferred_property(kind: &FieldKind) -> Result<Map<String, Value>, SchemaError> {
    let mut property = Map::new();
    match kind {
        FieldKind::Text => {
            property.insert("type".to_string(), json!("text"));
            property.insert("analyzer".to_string(), json!(UNIVERSAL_ANALYZER));
        }
        FieldKind::Integer => {
            property.insert("type".to_string(), json!("long"));
        }
        FieldKind::Float => {
            property.insert("type".to_string(), json!("double"));
        }
        FieldKind::Boolean => {
            property.insert("type".to_string(), json!("boolean"));
        }
        FieldKind::Timestamp => {
            property.insert("type".to_string(), json!("date"));
        }
        FieldKind::Record(fields) => {
            property.insert("type".to_string(), json!("object"));
            property.insert(
                "properties".to_string(),
                Value::Object(build_properties(fields)?),
            );
        }
        // Arrays carry no mapping of their own; the element type decides.
        FieldKind::Collection(inner) => return inferred_property(inner),
        FieldKind::Dynamic => {
            property.insert("type".to_string(), json!("object"));
        }
    }
    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: Vec<FieldDescriptor>) -> TypeDescriptor {
        TypeDescriptor::Record(fields)
    }

    #[test]
    fn test_float_maps_to_double() {
        let schema = build_schema(&record(vec![FieldDescriptor::float("price").annotate("")]))
            .unwrap();
        assert_eq!(schema.property("price"), Some(&json!({"type": "double"})));
    }

    #[test]
    fn test_inferred_types() {
        let schema = build_schema(&record(vec![
            FieldDescriptor::text("description"),
            FieldDescriptor::integer("year"),
            FieldDescriptor::boolean("is_credit"),
            FieldDescriptor::timestamp("created_at"),
            FieldDescriptor::dynamic("images"),
        ]))
        .unwrap();

        assert_eq!(
            schema.property("description"),
            Some(&json!({"type": "text", "analyzer": UNIVERSAL_ANALYZER}))
        );
        assert_eq!(schema.property("year"), Some(&json!({"type": "long"})));
        assert_eq!(schema.property("is_credit"), Some(&json!({"type": "boolean"})));
        assert_eq!(schema.property("created_at"), Some(&json!({"type": "date"})));
        assert_eq!(schema.property("images"), Some(&json!({"type": "object"})));
    }

    #[test]
    fn test_explicit_type_wins_and_drops_inferred_analyzer() {
        let schema = build_schema(&record(vec![
            FieldDescriptor::text("vin").annotate("type=keyword"),
            FieldDescriptor::integer("amount").annotate("type=integer"),
        ]))
        .unwrap();

        assert_eq!(schema.property("vin"), Some(&json!({"type": "keyword"})));
        assert_eq!(schema.property("amount"), Some(&json!({"type": "integer"})));
    }

    #[test]
    fn test_explicit_attributes_merge_with_inferred_type() {
        let schema = build_schema(&record(vec![
            FieldDescriptor::text("address").annotate("analyzer=standard"),
            FieldDescriptor::dynamic("logo").annotate("enabled=false"),
        ]))
        .unwrap();

        assert_eq!(
            schema.property("address"),
            Some(&json!({"type": "text", "analyzer": "standard"}))
        );
        assert_eq!(
            schema.property("logo"),
            Some(&json!({"type": "object", "enabled": false}))
        );
    }

    #[test]
    fn test_excluded_fields_are_skipped() {
        let schema = build_schema(&record(vec![
            FieldDescriptor::integer("id"),
            FieldDescriptor::text("password").exclude(),
        ]))
        .unwrap();

        assert!(schema.property("password").is_none());
        assert_eq!(schema.properties().len(), 1);
    }

    #[test]
    fn test_rename_is_used_as_property_name() {
        let schema = build_schema(&record(vec![
            FieldDescriptor::keyword("city_name").rename("city_name_tm")
        ]))
        .unwrap();

        assert!(schema.property("city_name").is_none());
        assert_eq!(schema.property("city_name_tm"), Some(&json!({"type": "keyword"})));
    }

    #[test]
    fn test_collection_uses_element_type() {
        let schema = build_schema(&record(vec![
            FieldDescriptor::new("options", FieldKind::collection(FieldKind::Integer)),
            FieldDescriptor::new("blobs", FieldKind::collection(FieldKind::Dynamic)),
        ]))
        .unwrap();

        assert_eq!(schema.property("options"), Some(&json!({"type": "long"})));
        assert_eq!(schema.property("blobs"), Some(&json!({"type": "object"})));
    }

    #[test]
    fn test_nested_record_emits_properties() {
        let schema = build_schema(&record(vec![FieldDescriptor::new(
            "location",
            FieldKind::record(vec![
                FieldDescriptor::keyword("latitude"),
                FieldDescriptor::keyword("longitude"),
            ]),
        )]))
        .unwrap();

        assert_eq!(
            schema.property("location"),
            Some(&json!({
                "type": "object",
                "properties": {
                    "latitude": {"type": "keyword"},
                    "longitude": {"type": "keyword"}
                }
            }))
        );
    }

    #[test]
    fn test_scalar_top_level_is_unsupported() {
        let result = build_schema(&TypeDescriptor::Scalar(FieldKind::Text));
        assert!(matches!(result, Err(SchemaError::UnsupportedType(_))));

        let result = build_schema(&TypeDescriptor::Scalar(FieldKind::collection(
            FieldKind::Integer,
        )));
        assert_eq!(
            result.unwrap_err(),
            SchemaError::unsupported_type("collection<integer>")
        );
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = build_schema(&record(vec![
            FieldDescriptor::integer("user_id"),
            FieldDescriptor::integer("owner").rename("user_id"),
        ]));
        assert_eq!(result.unwrap_err(), SchemaError::duplicate_field("user_id"));
    }

    #[test]
    fn test_duplicate_name_on_excluded_field_is_ignored() {
        let result = build_schema(&record(vec![
            FieldDescriptor::integer("user_id"),
            FieldDescriptor::integer("owner").rename("user_id").exclude(),
        ]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_document_shape() {
        let schema = build_schema(&record(vec![FieldDescriptor::integer("id")]))
            .unwrap()
            .with_shards(1, 1);
        let body = schema.to_json();

        assert_eq!(body["settings"]["number_of_shards"], json!(1));
        assert_eq!(body["settings"]["number_of_replicas"], json!(1));
        assert_eq!(
            body["settings"]["analysis"]["analyzer"][UNIVERSAL_ANALYZER],
            json!({"tokenizer": "icu_tokenizer", "filter": ["icu_folding", "lowercase"]})
        );
        assert_eq!(body["mappings"]["properties"]["id"], json!({"type": "long"}));
    }

    #[test]
    fn test_shards_omitted_by_default() {
        let body = build_schema(&record(vec![])).unwrap().to_json();
        assert!(body["settings"].get("number_of_shards").is_none());
        assert!(body["settings"].get("number_of_replicas").is_none());
        assert_eq!(body["mappings"]["properties"], json!({}));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let schema = build_schema(&record(vec![FieldDescriptor::text("name")])).unwrap();
        assert_eq!(serde_json::to_value(&schema).unwrap(), schema.to_json());
    }
}
