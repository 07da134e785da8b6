use crate::model::{Audit, AttributeName, FilterValue, Id};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Schema entry for a single work package attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Human readable attribute name
    pub name: String,
    pub writable: bool,
    #[serde(default)]
    pub required: bool,
}

impl FieldSchema {
    pub fn writable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            writable: true,
            required: false,
        }
    }

    pub fn read_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            writable: false,
            required: false,
        }
    }
}

/// Per-instance schema of a work package: attribute name to field schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkPackageSchema {
    pub fields: HashMap<AttributeName, FieldSchema>,
}

impl WorkPackageSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, attribute: impl Into<AttributeName>, field: FieldSchema) -> Self {
        self.fields.insert(attribute.into(), field);
        self
    }

    pub fn field(&self, attribute: &str) -> Option<&FieldSchema> {
        self.fields.get(attribute)
    }

    /// Attributes missing from the schema are not writable
    pub fn is_writable(&self, attribute: &str) -> bool {
        self.field(attribute).map(|field| field.writable).unwrap_or(false)
    }

    pub fn human_name(&self, attribute: &str) -> String {
        self.field(attribute)
            .map(|field| field.name.clone())
            .unwrap_or_else(|| attribute.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPackage {
    pub id: Id,
    pub subject: String,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeName, FilterValue>,
    #[serde(default)]
    pub schema: WorkPackageSchema,
    #[serde(flatten)]
    pub audit: Audit,
}

impl WorkPackage {
    pub fn new(id: impl Into<Id>, subject: impl Into<String>, schema: WorkPackageSchema) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            attributes: BTreeMap::new(),
            schema,
            audit: Audit::now(),
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<AttributeName>, value: FilterValue) -> Self {
        self.attributes.insert(attribute.into(), value);
        self
    }

    pub fn value(&self, attribute: &str) -> Option<&FilterValue> {
        self.attributes.get(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lookup() {
        let schema = WorkPackageSchema::new()
            .with_field("status", FieldSchema::writable("Status"))
            .with_field("version", FieldSchema::read_only("Version"));

        assert!(schema.is_writable("status"));
        assert!(!schema.is_writable("version"));
        assert!(!schema.is_writable("assignee"));
        assert_eq!(schema.human_name("version"), "Version");
        assert_eq!(schema.human_name("assignee"), "assignee");
    }

    #[test]
    fn test_schema_json_is_a_plain_map() {
        let schema: WorkPackageSchema =
            serde_json::from_str(r#"{"status": {"name": "Status", "writable": true}}"#).unwrap();

        let field = schema.field("status").unwrap();
        assert!(field.writable);
        assert!(!field.required);
    }
}
