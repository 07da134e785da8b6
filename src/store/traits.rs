use crate::model::{Board, HalResource, Id, Query, ResourceKind, WorkPackage};
use anyhow::Result;

/// Referenceable resources: statuses, versions, users and enumerations
#[async_trait::async_trait]
pub trait ResourceStore: Send + Sync {
    /// List resources of a kind ordered by position
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<HalResource>>;
    async fn get_resource(&self, kind: ResourceKind, id: &Id) -> Result<Option<HalResource>>;
    async fn upsert_resource(&self, resource: HalResource) -> Result<()>;
    async fn delete_resource(&self, kind: ResourceKind, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait QueryStore: Send + Sync {
    async fn get_query(&self, id: &Id) -> Result<Option<Query>>;
    async fn list_queries(&self) -> Result<Vec<Query>>;
    async fn upsert_query(&self, query: Query) -> Result<()>;
    async fn delete_query(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait BoardStore: Send + Sync {
    async fn get_board(&self, id: &Id) -> Result<Option<Board>>;
    async fn list_boards(&self) -> Result<Vec<Board>>;
    async fn upsert_board(&self, board: Board) -> Result<()>;
    async fn delete_board(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait WorkPackageStore: Send + Sync {
    async fn get_work_package(&self, id: &Id) -> Result<Option<WorkPackage>>;
    async fn list_work_packages(&self) -> Result<Vec<WorkPackage>>;
    async fn upsert_work_package(&self, work_package: WorkPackage) -> Result<()>;
}

pub trait Store: ResourceStore + QueryStore + BoardStore + WorkPackageStore + Send + Sync {}
impl<T: ResourceStore + QueryStore + BoardStore + WorkPackageStore + Send + Sync> Store for T {}
