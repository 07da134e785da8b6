use crate::model::ResourceKind;
use crate::paths::queries::QueriesPaths;
use crate::paths::resources::{join, trim_base, ChildPath, PathResource, SimpleResource, SimpleResourceCollection};
use std::fmt;

/// Root of the API path namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiV3Paths {
    path: String,
}

impl ApiV3Paths {
    pub fn new(base: &str) -> Self {
        Self {
            path: trim_base(base).to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn queries(&self) -> QueriesPaths {
        QueriesPaths::new(&self.path)
    }

    pub fn statuses(&self) -> SimpleResourceCollection {
        self.resources(ResourceKind::Status)
    }

    pub fn versions(&self) -> SimpleResourceCollection {
        self.resources(ResourceKind::Version)
    }

    pub fn users(&self) -> SimpleResourceCollection {
        self.resources(ResourceKind::User)
    }

    pub fn resources(&self, kind: ResourceKind) -> SimpleResourceCollection {
        SimpleResourceCollection::new(&self.path, kind.collection_segment())
    }

    /// Canonical href of a single resource
    pub fn resource_href(&self, kind: ResourceKind, id: impl fmt::Display) -> String {
        self.resources(kind).id(id).path().to_string()
    }

    pub fn boards(&self) -> SimpleResourceCollection<BoardPaths> {
        SimpleResourceCollection::new(&self.path, "boards")
    }

    pub fn work_packages(&self) -> SimpleResourceCollection<WorkPackagePaths> {
        SimpleResourceCollection::new(&self.path, "work_packages")
    }
}

impl Default for ApiV3Paths {
    fn default() -> Self {
        Self::new("/api/v3")
    }
}

impl PathResource for ApiV3Paths {
    fn path(&self) -> &str {
        &self.path
    }
}

/// `/api/v3/boards/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPaths {
    path: String,
    pub lists: SimpleResource,
    pub available_values: SimpleResource,
}

impl BoardPaths {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ChildPath for BoardPaths {
    fn child_of(base: &str, id: &str) -> Self {
        let path = join(base, id);
        Self {
            lists: SimpleResource::new(&path, "lists"),
            available_values: SimpleResource::new(&path, "available_values"),
            path,
        }
    }
}

impl PathResource for BoardPaths {
    fn path(&self) -> &str {
        &self.path
    }
}

/// `/api/v3/work_packages/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPackagePaths {
    path: String,
    pub move_to_list: SimpleResource,
}

impl WorkPackagePaths {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ChildPath for WorkPackagePaths {
    fn child_of(base: &str, id: &str) -> Self {
        let path = join(base, id);
        Self {
            move_to_list: SimpleResource::new(&path, "move"),
            path,
        }
    }
}

impl PathResource for WorkPackagePaths {
    fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_paths() {
        let api = ApiV3Paths::new("/api/v3");

        assert_eq!(api.queries().path(), "/api/v3/queries");
        assert_eq!(api.queries().form.path(), "/api/v3/queries/form");
        assert_eq!(api.queries().id(42).path(), "/api/v3/queries/42");
        assert_eq!(
            api.queries().filter_instance_schema("status").path(),
            "/api/v3/queries/filter_instance_schemas/status"
        );
        assert_eq!(api.statuses().id(3).path(), "/api/v3/statuses/3");
        assert_eq!(
            api.resource_href(ResourceKind::TimeEntryActivity, 9),
            "/api/v3/time_entries/activities/9"
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(ApiV3Paths::new("/api/v3/"), ApiV3Paths::new("/api/v3"));
    }

    #[test]
    fn test_board_and_work_package_paths() {
        let api = ApiV3Paths::default();
        let board = api.boards().id("b1");

        assert_eq!(board.path(), "/api/v3/boards/b1");
        assert_eq!(board.lists.path(), "/api/v3/boards/b1/lists");
        assert_eq!(board.available_values.path(), "/api/v3/boards/b1/available_values");
        assert_eq!(
            api.work_packages().id(12).move_to_list.path(),
            "/api/v3/work_packages/12/move"
        );
    }
}
