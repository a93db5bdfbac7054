use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const INCIDENT_SCHEMA_TITLE: &str = "incident";

const INCIDENT_FIELDS: &[(&str, FieldKind)] = &[
    ("_id", FieldKind::ObjectId),
    ("authors", FieldKind::Array),
    ("date_downloaded", FieldKind::String),
    ("date_modified", FieldKind::String),
    ("date_published", FieldKind::String),
    ("date_submitted", FieldKind::String),
    ("description", FieldKind::String),
    ("flag", FieldKind::Bool),
    ("image_url", FieldKind::String),
    ("incident_date", FieldKind::String),
    ("incident_id", FieldKind::Int),
    ("language", FieldKind::String),
    ("ref_number", FieldKind::Int),
    ("report_number", FieldKind::Int),
    ("source_domain", FieldKind::String),
    ("submitters", FieldKind::Array),
    ("text", FieldKind::String),
    ("title", FieldKind::String),
    ("url", FieldKind::String),
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "objectId")]
    ObjectId,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Ordered field contract a report is checked against. Validation walks
/// `fields` in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaDescriptor {
    title: String,
    fields: Vec<FieldSpec>,
}

/// On-disk form: `{"title": ..., "properties": {"field": {"bsonType": ...}}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub title: String,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PropertyDocument {
    #[serde(rename = "bsonType")]
    bson_type: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<PropertyDocument>>,
}

impl SchemaDescriptor {
    pub fn new(title: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }

    pub fn incident() -> Self {
        let fields = INCIDENT_FIELDS
            .iter()
            .map(|(name, kind)| FieldSpec {
                name: (*name).to_string(),
                kind: *kind,
            })
            .collect();
        Self::new(INCIDENT_SCHEMA_TITLE, fields)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| spec.kind)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read schema file: {}", path.display()))?;
        let document: SchemaDocument = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse schema file: {}", path.display()))?;
        Self::from_document(document)
            .with_context(|| format!("invalid schema file: {}", path.display()))
    }

    pub fn from_document(document: SchemaDocument) -> Result<Self> {
        if document.properties.is_empty() {
            bail!("schema '{}' declares no properties", document.title);
        }

        let mut fields = Vec::with_capacity(document.properties.len());
        for (name, property) in document.properties {
            let property: PropertyDocument = serde_json::from_value(property)
                .with_context(|| format!("invalid property definition for '{name}'"))?;
            fields.push(FieldSpec {
                name,
                kind: property.bson_type,
            });
        }

        Ok(Self::new(document.title, fields))
    }

    pub fn to_document(&self) -> Result<SchemaDocument> {
        let mut properties = Map::new();
        for spec in &self.fields {
            let items = (spec.kind == FieldKind::Array).then(|| {
                Box::new(PropertyDocument {
                    bson_type: FieldKind::String,
                    items: None,
                })
            });
            let property = PropertyDocument {
                bson_type: spec.kind,
                items,
            };
            properties.insert(
                spec.name.clone(),
                serde_json::to_value(property)
                    .with_context(|| format!("failed to encode property '{}'", spec.name))?,
            );
        }

        Ok(SchemaDocument {
            title: self.title.clone(),
            properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, SchemaDescriptor, SchemaDocument};

    #[test]
    fn incident_schema_declares_fields_in_alphabetical_order() {
        let schema = SchemaDescriptor::incident();
        let names = schema
            .fields()
            .iter()
            .map(|spec| spec.name.as_str())
            .collect::<Vec<&str>>();

        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 19);
        assert_eq!(schema.kind_of("_id"), Some(FieldKind::ObjectId));
        assert_eq!(schema.kind_of("flag"), Some(FieldKind::Bool));
        assert_eq!(schema.kind_of("submitters"), Some(FieldKind::Array));
        assert_eq!(schema.kind_of("ref_number"), Some(FieldKind::Int));
        assert_eq!(schema.kind_of("nonexistent"), None);
    }

    #[test]
    fn schema_document_keeps_declared_property_order() {
        let raw = r#"
        {
          "title": "custom",
          "properties": {
            "zeta": { "bsonType": "string" },
            "alpha": { "bsonType": "array", "items": { "bsonType": "string" } },
            "mid": { "bsonType": "int" }
          }
        }
        "#;

        let document: SchemaDocument =
            serde_json::from_str(raw).expect("schema document should deserialize");
        let schema =
            SchemaDescriptor::from_document(document).expect("schema should be accepted");

        assert_eq!(schema.title(), "custom");
        let names = schema
            .fields()
            .iter()
            .map(|spec| spec.name.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.kind_of("alpha"), Some(FieldKind::Array));
    }

    #[test]
    fn schema_document_rejects_unknown_bson_type() {
        let document: SchemaDocument = serde_json::from_value(serde_json::json!({
            "title": "broken",
            "properties": { "when": { "bsonType": "date" } }
        }))
        .expect("outer document should deserialize");

        let error = SchemaDescriptor::from_document(document)
            .expect_err("unknown bsonType should be rejected");
        assert!(
            error.to_string().contains("'when'"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn schema_document_rejects_empty_properties() {
        let document: SchemaDocument = serde_json::from_value(serde_json::json!({
            "title": "empty",
            "properties": {}
        }))
        .expect("outer document should deserialize");

        assert!(SchemaDescriptor::from_document(document).is_err());
    }

    #[test]
    fn incident_schema_survives_document_form() {
        let schema = SchemaDescriptor::incident();
        let document = schema.to_document().expect("schema should encode");
        assert_eq!(
            document.properties["authors"]["items"]["bsonType"],
            serde_json::json!("string")
        );
        assert!(document.properties["title"].get("items").is_none());

        let reloaded =
            SchemaDescriptor::from_document(document).expect("document should decode");
        assert_eq!(reloaded, schema);
    }
}
