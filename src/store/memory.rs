use anyhow::Result;
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{Board, HalResource, Id, Query, ResourceKind, WorkPackage};
use crate::store::traits::{BoardStore, QueryStore, ResourceStore, WorkPackageStore};

/// Process-local store backing the API and the tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: RwLock<HashMap<ResourceKind, Vec<HalResource>>>,
    queries: RwLock<HashMap<Id, Query>>,
    boards: RwLock<HashMap<Id, Board>>,
    work_packages: RwLock<HashMap<Id, WorkPackage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ResourceStore for MemoryStore {
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<HalResource>> {
        let resources = self.resources.read();
        Ok(resources
            .get(&kind)
            .map(|items| items.iter().cloned().sorted_by_key(|item| item.position).collect())
            .unwrap_or_default())
    }

    async fn get_resource(&self, kind: ResourceKind, id: &Id) -> Result<Option<HalResource>> {
        let resources = self.resources.read();
        Ok(resources
            .get(&kind)
            .and_then(|items| items.iter().find(|item| &item.id == id))
            .cloned())
    }

    async fn upsert_resource(&self, resource: HalResource) -> Result<()> {
        let mut resources = self.resources.write();
        let items = resources.entry(resource.kind).or_default();
        match items.iter_mut().find(|item| item.id == resource.id) {
            Some(existing) => *existing = resource,
            None => items.push(resource),
        }
        Ok(())
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &Id) -> Result<bool> {
        let mut resources = self.resources.write();
        let Some(items) = resources.get_mut(&kind) else {
            return Ok(false);
        };
        let before = items.len();
        items.retain(|item| &item.id != id);
        Ok(items.len() != before)
    }
}

#[async_trait::async_trait]
impl QueryStore for MemoryStore {
    async fn get_query(&self, id: &Id) -> Result<Option<Query>> {
        Ok(self.queries.read().get(id).cloned())
    }

    async fn list_queries(&self) -> Result<Vec<Query>> {
        let queries = self.queries.read();
        Ok(queries
            .values()
            .cloned()
            .sorted_by(|a, b| a.audit.created_at.cmp(&b.audit.created_at))
            .collect())
    }

    async fn upsert_query(&self, query: Query) -> Result<()> {
        self.queries.write().insert(query.id.clone(), query);
        Ok(())
    }

    async fn delete_query(&self, id: &Id) -> Result<bool> {
        Ok(self.queries.write().remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl BoardStore for MemoryStore {
    async fn get_board(&self, id: &Id) -> Result<Option<Board>> {
        Ok(self.boards.read().get(id).cloned())
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        let boards = self.boards.read();
        Ok(boards
            .values()
            .cloned()
            .sorted_by(|a, b| a.audit.created_at.cmp(&b.audit.created_at))
            .collect())
    }

    async fn upsert_board(&self, board: Board) -> Result<()> {
        self.boards.write().insert(board.id.clone(), board);
        Ok(())
    }

    async fn delete_board(&self, id: &Id) -> Result<bool> {
        Ok(self.boards.write().remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl WorkPackageStore for MemoryStore {
    async fn get_work_package(&self, id: &Id) -> Result<Option<WorkPackage>> {
        Ok(self.work_packages.read().get(id).cloned())
    }

    async fn list_work_packages(&self) -> Result<Vec<WorkPackage>> {
        let work_packages = self.work_packages.read();
        Ok(work_packages
            .values()
            .cloned()
            .sorted_by(|a, b| a.id.cmp(&b.id))
            .collect())
    }

    async fn upsert_work_package(&self, work_package: WorkPackage) -> Result<()> {
        self.work_packages
            .write()
            .insert(work_package.id.clone(), work_package);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str, name: &str, position: i32) -> HalResource {
        HalResource::new(ResourceKind::Status, id, name, format!("/api/v3/statuses/{}", id))
            .with_position(position)
    }

    #[tokio::test]
    async fn test_resources_are_listed_by_position() {
        let store = MemoryStore::new();
        store.upsert_resource(status("2", "Closed", 3)).await.unwrap();
        store.upsert_resource(status("1", "New", 1)).await.unwrap();
        store.upsert_resource(status("3", "In progress", 2)).await.unwrap();

        let names: Vec<String> = store
            .list_resources(ResourceKind::Status)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["New", "In progress", "Closed"]);
        assert!(store.list_resources(ResourceKind::Version).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resource_upsert_and_delete() {
        let store = MemoryStore::new();
        store.upsert_resource(status("1", "New", 1)).await.unwrap();
        store.upsert_resource(status("1", "Fresh", 1)).await.unwrap();

        let found = store
            .get_resource(ResourceKind::Status, &"1".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Fresh");

        assert!(store.delete_resource(ResourceKind::Status, &"1".to_string()).await.unwrap());
        assert!(!store.delete_resource(ResourceKind::Status, &"1".to_string()).await.unwrap());
        assert!(!store.delete_resource(ResourceKind::Role, &"1".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_boards_round_trip() {
        let store = MemoryStore::new();
        let board = Board::new("Kanban", None);
        let id = board.id.clone();

        store.upsert_board(board.clone()).await.unwrap();
        assert_eq!(store.get_board(&id).await.unwrap(), Some(board));
        assert!(store.delete_board(&id).await.unwrap());
        assert!(store.get_board(&id).await.unwrap().is_none());
    }
}
