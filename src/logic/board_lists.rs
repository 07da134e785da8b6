use anyhow::Result;
use std::sync::Arc;

use crate::model::{resource_kind_for_attribute, Board, FilterValue, Query, QueryFilter, QueryParams};
use crate::store::traits::Store;

/// Persists queries as lists of a board
#[async_trait::async_trait]
pub trait BoardListService: Send + Sync {
    /// Create a query from `params` and `filters` and append it to the board as a new list
    async fn add_query(&self, board: Board, params: QueryParams, filters: Vec<QueryFilter>) -> Result<Board>;
}

pub struct StoreBoardListService<S> {
    store: Arc<S>,
}

impl<S: Store> StoreBoardListService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Scalar ids on link attributes are stored as links to the referenced resource
    async fn resolve_filter(&self, mut filter: QueryFilter) -> Result<QueryFilter> {
        let Some(kind) = resource_kind_for_attribute(&filter.id) else {
            return Ok(filter);
        };

        let mut values = Vec::with_capacity(filter.values.len());
        for value in filter.values {
            if value.is_resource() {
                values.push(value);
                continue;
            }
            match self.store.get_resource(kind, &value.href_or_value()).await? {
                Some(resource) => values.push(FilterValue::Resource(resource.link())),
                None => values.push(value),
            }
        }
        filter.values = values;

        Ok(filter)
    }
}

#[async_trait::async_trait]
impl<S: Store + 'static> BoardListService for StoreBoardListService<S> {
    async fn add_query(&self, mut board: Board, params: QueryParams, filters: Vec<QueryFilter>) -> Result<Board> {
        let mut resolved = Vec::with_capacity(filters.len());
        for filter in filters {
            resolved.push(self.resolve_filter(filter).await?);
        }

        let query = Query::new(params.name).with_filters(resolved);
        self.store.upsert_query(query.clone()).await?;

        board.add_list(query.id.clone());
        self.store.upsert_board(board.clone()).await?;

        log::info!(
            "Added list '{}' ({}) to board {}",
            query.name,
            query.id,
            board.id
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HalResource, ResourceKind};
    use crate::store::memory::MemoryStore;
    use crate::store::traits::{BoardStore, QueryStore, ResourceStore};

    #[tokio::test]
    async fn test_add_query_persists_list() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_resource(HalResource::new(
                ResourceKind::Status,
                "3",
                "In progress",
                "/api/v3/statuses/3",
            ))
            .await
            .unwrap();
        let service = StoreBoardListService::new(store.clone());

        let board = service
            .add_query(
                Board::new("Kanban", None),
                QueryParams {
                    name: "In progress".to_string(),
                },
                vec![QueryFilter::equals("status", vec![FilterValue::text("3")])],
            )
            .await
            .unwrap();

        assert_eq!(board.lists.len(), 1);
        let query = store.get_query(&board.lists[0].query_id).await.unwrap().unwrap();
        assert_eq!(query.name, "In progress");
        assert_eq!(
            query.filter("status").unwrap().values[0].href_or_value(),
            "/api/v3/statuses/3"
        );
        assert_eq!(store.get_board(&board.id).await.unwrap(), Some(board));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_kept_as_scalars() {
        let store = Arc::new(MemoryStore::new());
        let service = StoreBoardListService::new(store.clone());

        let board = service
            .add_query(
                Board::new("Kanban", None),
                QueryParams {
                    name: "Ghost".to_string(),
                },
                vec![
                    QueryFilter::equals("status", vec![FilterValue::text("404")]),
                    QueryFilter::equals("subject", vec![FilterValue::text("x")]),
                ],
            )
            .await
            .unwrap();

        let query = store.get_query(&board.lists[0].query_id).await.unwrap().unwrap();
        assert_eq!(query.filter("status").unwrap().values, vec![FilterValue::text("404")]);
        assert_eq!(query.filter("subject").unwrap().values, vec![FilterValue::text("x")]);
    }
}
