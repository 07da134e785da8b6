use crate::model::{AttributeName, FilterOperator, QueryFilter, WorkPackageChangeset};

/// Filters that never translate into work package values
pub const DEFAULT_EXCLUDED_FILTERS: &[&str] = &["search", "subprojectId", "datesInterval", "manualSort"];

/// Applies the values implied by a query's filters onto a changeset, so a
/// work package created in or moved into a list matches that list's query.
pub struct WorkPackageFilterValues<'a> {
    changeset: &'a mut WorkPackageChangeset,
    filters: &'a [QueryFilter],
    excluded: Vec<AttributeName>,
}

impl<'a> WorkPackageFilterValues<'a> {
    pub fn new(changeset: &'a mut WorkPackageChangeset, filters: &'a [QueryFilter]) -> Self {
        Self {
            changeset,
            filters,
            excluded: DEFAULT_EXCLUDED_FILTERS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn with_excluded(mut self, attributes: &[&str]) -> Self {
        self.excluded
            .extend(attributes.iter().map(|attribute| attribute.to_string()));
        self
    }

    /// Returns the attributes that were changed
    pub fn apply_defaults_from_filters(&mut self) -> Vec<AttributeName> {
        let mut applied = Vec::new();

        for filter in self.filters {
            if filter.operator != FilterOperator::Equals || self.excluded.contains(&filter.id) {
                continue;
            }

            if !self.changeset.is_writable(&filter.id) {
                log::debug!("Skipping filter on read-only attribute {}", filter.id);
                continue;
            }

            let Some(first) = filter.values.first() else {
                continue;
            };

            // Keep the current value when it already satisfies the filter
            if let Some(current) = self.changeset.value(&filter.id) {
                if filter.values.iter().any(|value| value.matches(current)) {
                    continue;
                }
            }

            if self.changeset.set_value(&filter.id, first.clone()).is_ok() {
                applied.push(filter.id.clone());
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldSchema, FilterValue, WorkPackage, WorkPackageSchema};

    fn changeset() -> WorkPackageChangeset {
        let schema = WorkPackageSchema::new()
            .with_field("status", FieldSchema::writable("Status"))
            .with_field("assignee", FieldSchema::writable("Assignee"))
            .with_field("version", FieldSchema::read_only("Version"))
            .with_field("subprojectId", FieldSchema::writable("Subproject"));
        let wp = WorkPackage::new("1", "Fix login", schema)
            .with_attribute("status", FilterValue::link("/api/v3/statuses/1"))
            .with_attribute("assignee", FilterValue::link("/api/v3/users/4"));
        WorkPackageChangeset::new(&wp)
    }

    #[test]
    fn test_equals_filters_are_applied() {
        let mut changeset = changeset();
        let filters = vec![QueryFilter::equals(
            "status",
            vec![FilterValue::link("/api/v3/statuses/3")],
        )];

        let applied = WorkPackageFilterValues::new(&mut changeset, &filters).apply_defaults_from_filters();

        assert_eq!(applied, vec!["status".to_string()]);
        assert_eq!(
            changeset.value("status"),
            Some(&FilterValue::link("/api/v3/statuses/3"))
        );
    }

    #[test]
    fn test_matching_value_is_kept() {
        let mut changeset = changeset();
        let filters = vec![QueryFilter::equals(
            "assignee",
            vec![FilterValue::link("/api/v3/users/9"), FilterValue::text("4")],
        )];

        let applied = WorkPackageFilterValues::new(&mut changeset, &filters).apply_defaults_from_filters();

        assert!(applied.is_empty());
        assert!(changeset.is_empty());
    }

    #[test]
    fn test_skipped_filters() {
        let mut changeset = changeset();
        let filters = vec![
            QueryFilter::new("status", FilterOperator::NotEquals, vec![FilterValue::text("3")]),
            QueryFilter::equals("version", vec![FilterValue::text("7")]),
            QueryFilter::equals("subprojectId", vec![FilterValue::text("2")]),
            QueryFilter::equals("assignee", vec![]),
            QueryFilter::equals("priority", vec![FilterValue::text("8")]),
        ];

        let applied = WorkPackageFilterValues::new(&mut changeset, &filters).apply_defaults_from_filters();

        assert!(applied.is_empty());
        assert!(changeset.is_empty());
    }

    #[test]
    fn test_caller_exclusions() {
        let mut changeset = changeset();
        let filters = vec![QueryFilter::equals("status", vec![FilterValue::text("3")])];

        let applied = WorkPackageFilterValues::new(&mut changeset, &filters)
            .with_excluded(&["status"])
            .apply_defaults_from_filters();

        assert!(applied.is_empty());
    }
}
