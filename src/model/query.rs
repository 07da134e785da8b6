use crate::model::{generate_id, id_from_link, Audit, AttributeName, Id, ResourceLink};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!")]
    NotEquals,
    #[serde(rename = "o")]
    Open,
    #[serde(rename = "c")]
    Closed,
    #[serde(rename = "*")]
    All,
    #[serde(rename = "!*")]
    None,
    #[serde(rename = "~")]
    Contains,
}

impl FilterOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "=",
            FilterOperator::NotEquals => "!",
            FilterOperator::Open => "o",
            FilterOperator::Closed => "c",
            FilterOperator::All => "*",
            FilterOperator::None => "!*",
            FilterOperator::Contains => "~",
        }
    }

    pub fn all() -> [FilterOperator; 7] {
        [
            FilterOperator::Equals,
            FilterOperator::NotEquals,
            FilterOperator::Open,
            FilterOperator::Closed,
            FilterOperator::All,
            FilterOperator::None,
            FilterOperator::Contains,
        ]
    }
}

/// A filter or attribute value: either a link to a resource or a plain scalar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Resource(ResourceLink),
    Number(i64),
    Text(String),
}

impl FilterValue {
    pub fn link(href: impl Into<String>) -> Self {
        FilterValue::Resource(ResourceLink::new(href))
    }

    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    /// The href for resource links, the raw value otherwise
    pub fn href_or_value(&self) -> String {
        match self {
            FilterValue::Resource(link) => link.href.clone(),
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Text(s) => s.clone(),
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, FilterValue::Resource(_))
    }

    /// Two values match when they reference the same resource id or carry the same scalar
    pub fn matches(&self, other: &FilterValue) -> bool {
        match (self, other) {
            (FilterValue::Resource(a), FilterValue::Resource(b)) => a.href == b.href,
            (FilterValue::Resource(link), scalar) | (scalar, FilterValue::Resource(link)) => {
                id_from_link(&link.href) == scalar.href_or_value()
            }
            (a, b) => a.href_or_value() == b.href_or_value(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<ResourceLink> for FilterValue {
    fn from(link: ResourceLink) -> Self {
        FilterValue::Resource(link)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub id: AttributeName,
    pub operator: FilterOperator,
    #[serde(default)]
    pub values: Vec<FilterValue>,
}

impl QueryFilter {
    pub fn new(id: impl Into<AttributeName>, operator: FilterOperator, values: Vec<FilterValue>) -> Self {
        Self {
            id: id.into(),
            operator,
            values,
        }
    }

    pub fn equals(id: impl Into<AttributeName>, values: Vec<FilterValue>) -> Self {
        Self::new(id, FilterOperator::Equals, values)
    }
}

/// A saved set of filters over work packages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    #[serde(default)]
    pub starred: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Query {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            filters: Vec::new(),
            starred: false,
            audit: Audit::now(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<QueryFilter>) -> Self {
        for filter in filters {
            self.set_filter(filter);
        }
        self
    }

    /// First filter on the given attribute
    pub fn filter(&self, attribute: &str) -> Option<&QueryFilter> {
        self.filters.iter().find(|filter| filter.id == attribute)
    }

    /// Add a filter, replacing any existing filter on the same attribute
    pub fn set_filter(&mut self, filter: QueryFilter) {
        match self.filters.iter_mut().find(|existing| existing.id == filter.id) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    pub fn remove_filter(&mut self, attribute: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|filter| filter.id != attribute);
        before != self.filters.len()
    }
}

/// Parameters for a query created on behalf of a board list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_filter_keeps_one_filter_per_attribute() {
        let mut query = Query::new("Board list");
        query.set_filter(QueryFilter::equals("status", vec![FilterValue::text("1")]));
        query.set_filter(QueryFilter::equals("status", vec![FilterValue::text("2")]));
        query.set_filter(QueryFilter::equals("version", vec![FilterValue::text("7")]));

        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filter("status").unwrap().values, vec![FilterValue::text("2")]);
        assert!(query.remove_filter("version"));
        assert!(query.filter("version").is_none());
    }

    #[test]
    fn test_filter_value_json_shapes() {
        let values: Vec<FilterValue> =
            serde_json::from_str(r#"[{"href": "/api/v3/statuses/3", "title": "Open"}, 12, "abc"]"#).unwrap();

        assert_eq!(
            values[0],
            FilterValue::Resource(ResourceLink {
                href: "/api/v3/statuses/3".to_string(),
                title: Some("Open".to_string()),
            })
        );
        assert_eq!(values[1], FilterValue::Number(12));
        assert_eq!(values[2], FilterValue::text("abc"));
    }

    #[test]
    fn test_operator_symbols() {
        let filter = QueryFilter::new("status", FilterOperator::None, vec![]);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["operator"], "!*");

        for op in FilterOperator::all() {
            let parsed: FilterOperator = serde_json::from_value(serde_json::json!(op.symbol())).unwrap();
            assert_eq!(parsed, op);
        }
    }

    #[test]
    fn test_filter_value_matching() {
        let link = FilterValue::link("/api/v3/statuses/3");
        assert!(link.matches(&FilterValue::text("3")));
        assert!(FilterValue::Number(3).matches(&link));
        assert!(!link.matches(&FilterValue::link("/api/v3/statuses/4")));
        assert!(FilterValue::Number(5).matches(&FilterValue::text("5")));
    }
}
