use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{self, AppState};
use crate::paths::ApiV3Paths;
use crate::store::traits::Store;

/// Router with every API v3 route rooted at `paths`
pub fn create_router<S: Store + 'static>(paths: &ApiV3Paths) -> Router<Arc<AppState<S>>> {
    let queries = paths.queries();
    let board = paths.boards().id(":id");
    let work_package = paths.work_packages().id(":id");

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Values a board's action attribute can take
        .route(paths.statuses().path(), get(handlers::list_statuses::<S>))
        .route(paths.versions().path(), get(handlers::list_versions::<S>))
        .route(paths.users().path(), get(handlers::list_users::<S>))
        // Queries
        .route(queries.path(), get(handlers::list_queries::<S>))
        .route(queries.default.path(), get(handlers::get_default_query))
        .route(queries.form.path(), get(handlers::get_query_form::<S>))
        .route(queries.id(":id").path(), get(handlers::get_query::<S>))
        .route(
            queries.filter_instance_schema(":id").path(),
            get(handlers::get_filter_instance_schema::<S>),
        )
        // Boards
        .route(paths.boards().path(), post(handlers::create_board::<S>))
        .route(board.path(), get(handlers::get_board::<S>))
        .route(board.path(), delete(handlers::delete_board::<S>))
        .route(
            board.available_values.path(),
            get(handlers::list_available_values::<S>),
        )
        .route(board.lists.path(), post(handlers::add_board_list::<S>))
        // Work packages
        .route(
            work_package.move_to_list.path(),
            post(handlers::move_work_package::<S>),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_router_builds_for_custom_base_path() {
        // Conflicting or malformed routes panic while building
        let _router: Router<Arc<AppState<MemoryStore>>> = create_router(&ApiV3Paths::new("/openproject/api/v3/"));
    }
}
