use crate::paths::resources::{join, ChildPath, PathResource, SimpleResource, SimpleResourceCollection};
use std::fmt;

/// `/api/v3/queries`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueriesPaths {
    collection: SimpleResourceCollection<QueryPaths>,
    pub form: SimpleResource,
    pub default: SimpleResource,
}

impl QueriesPaths {
    pub fn new(base: &str) -> Self {
        let collection = SimpleResourceCollection::new(base, "queries");
        let form = SimpleResource::new(collection.path(), "form");
        let default = SimpleResource::new(collection.path(), "default");

        Self {
            collection,
            form,
            default,
        }
    }

    pub fn path(&self) -> &str {
        self.collection.path()
    }

    /// `/api/v3/queries/:id`
    pub fn id(&self, id: impl fmt::Display) -> QueryPaths {
        self.collection.id(id)
    }

    /// `/api/v3/queries/filter_instance_schemas/:id`
    pub fn filter_instance_schema(&self, id: impl fmt::Display) -> QueryFilterInstanceSchemaPaths {
        QueryFilterInstanceSchemaPaths::child_of(
            &join(self.path(), "filter_instance_schemas"),
            &id.to_string(),
        )
    }
}

impl PathResource for QueriesPaths {
    fn path(&self) -> &str {
        self.collection.path()
    }
}

/// `/api/v3/queries/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPaths {
    path: String,
    pub form: SimpleResource,
    pub star: SimpleResource,
    pub unstar: SimpleResource,
    pub order: SimpleResource,
}

impl QueryPaths {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ChildPath for QueryPaths {
    fn child_of(base: &str, id: &str) -> Self {
        let path = join(base, id);
        Self {
            form: SimpleResource::new(&path, "form"),
            star: SimpleResource::new(&path, "star"),
            unstar: SimpleResource::new(&path, "unstar"),
            order: SimpleResource::new(&path, "order"),
            path,
        }
    }
}

impl PathResource for QueryPaths {
    fn path(&self) -> &str {
        &self.path
    }
}

/// `/api/v3/queries/filter_instance_schemas/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilterInstanceSchemaPaths {
    path: String,
}

impl QueryFilterInstanceSchemaPaths {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ChildPath for QueryFilterInstanceSchemaPaths {
    fn child_of(base: &str, id: &str) -> Self {
        Self {
            path: join(base, id),
        }
    }
}

impl PathResource for QueryFilterInstanceSchemaPaths {
    fn path(&self) -> &str {
        &self.path
    }
}
