use crate::model::Id;
use serde::{Deserialize, Serialize};

/// Kinds of resources a board can be keyed on or that default data creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ResourceKind {
    Status,
    Version,
    User,
    Priority,
    Type,
    TimeEntryActivity,
    Role,
}

impl ResourceKind {
    /// Collection segment below the API root (e.g. "statuses")
    pub fn collection_segment(&self) -> &'static str {
        match self {
            ResourceKind::Status => "statuses",
            ResourceKind::Version => "versions",
            ResourceKind::User => "users",
            ResourceKind::Priority => "priorities",
            ResourceKind::Type => "types",
            ResourceKind::TimeEntryActivity => "time_entries/activities",
            ResourceKind::Role => "roles",
        }
    }

    /// Enumerations share one table upstream; deleting default data clears all of them
    pub fn is_enumeration(&self) -> bool {
        matches!(self, ResourceKind::Priority | ResourceKind::TimeEntryActivity)
    }

    pub fn all() -> [ResourceKind; 7] {
        [
            ResourceKind::Status,
            ResourceKind::Version,
            ResourceKind::User,
            ResourceKind::Priority,
            ResourceKind::Type,
            ResourceKind::TimeEntryActivity,
            ResourceKind::Role,
        ]
    }
}

/// Resource kind referenced by a work package attribute, if the attribute is a link
pub fn resource_kind_for_attribute(attribute: &str) -> Option<ResourceKind> {
    match attribute {
        "status" => Some(ResourceKind::Status),
        "version" => Some(ResourceKind::Version),
        "assignee" | "responsible" | "author" => Some(ResourceKind::User),
        "priority" => Some(ResourceKind::Priority),
        "type" => Some(ResourceKind::Type),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Open,
    Locked,
    Closed,
}

/// A referenceable API resource (status, version, user, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalResource {
    pub id: Id,
    #[serde(rename = "_type")]
    pub kind: ResourceKind,
    pub href: String,
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    /// Builtin roles and standard types survive a default data reset
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub builtin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_status: Option<VersionStatus>,
}

impl HalResource {
    pub fn new(kind: ResourceKind, id: impl Into<Id>, name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            href: href.into(),
            name: name.into(),
            position: 0,
            is_default: false,
            builtin: false,
            version_status: None,
        }
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn as_builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn with_version_status(mut self, status: VersionStatus) -> Self {
        self.version_status = Some(status);
        self
    }

    /// Identifier taken from the last segment of the href
    pub fn id_from_link(&self) -> Id {
        id_from_link(&self.href)
    }

    pub fn link(&self) -> ResourceLink {
        ResourceLink {
            href: self.href.clone(),
            title: Some(self.name.clone()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.version_status == Some(VersionStatus::Closed)
    }

    pub fn is_locked(&self) -> bool {
        self.version_status == Some(VersionStatus::Locked)
    }
}

/// Reference to a resource by its canonical href
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ResourceLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
        }
    }
}

pub fn id_from_link(href: &str) -> Id {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
