use crate::error::BoardActionError;
use crate::model::{AttributeName, FilterValue, Id, WorkPackage, WorkPackageSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pending, not yet persisted edits to a work package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPackageChangeset {
    pub work_package_id: Id,
    schema: WorkPackageSchema,
    pristine: BTreeMap<AttributeName, FilterValue>,
    changes: BTreeMap<AttributeName, FilterValue>,
}

impl WorkPackageChangeset {
    pub fn new(work_package: &WorkPackage) -> Self {
        Self {
            work_package_id: work_package.id.clone(),
            schema: work_package.schema.clone(),
            pristine: work_package.attributes.clone(),
            changes: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &WorkPackageSchema {
        &self.schema
    }

    pub fn is_writable(&self, attribute: &str) -> bool {
        self.schema.is_writable(attribute)
    }

    pub fn human_name(&self, attribute: &str) -> String {
        self.schema.human_name(attribute)
    }

    /// Pending value if changed, the persisted value otherwise
    pub fn value(&self, attribute: &str) -> Option<&FilterValue> {
        self.changes
            .get(attribute)
            .or_else(|| self.pristine.get(attribute))
    }

    /// Set a new value; non-writable attributes are rejected without touching the changeset
    pub fn set_value(&mut self, attribute: &str, value: FilterValue) -> Result<(), BoardActionError> {
        if !self.is_writable(attribute) {
            return Err(BoardActionError::not_writable(attribute, self.human_name(attribute)));
        }

        if self.pristine.get(attribute) == Some(&value) {
            self.changes.remove(attribute);
        } else {
            self.changes.insert(attribute.to_string(), value);
        }
        Ok(())
    }

    pub fn reset(&mut self, attribute: &str) {
        self.changes.remove(attribute);
    }

    pub fn changes(&self) -> &BTreeMap<AttributeName, FilterValue> {
        &self.changes
    }

    pub fn changed_attributes(&self) -> Vec<&str> {
        self.changes.keys().map(|key| key.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Write pending changes onto the work package
    pub fn apply_to(self, work_package: &mut WorkPackage) {
        for (attribute, value) in self.changes {
            work_package.attributes.insert(attribute, value);
        }
        work_package.audit.touch();
    }
}
