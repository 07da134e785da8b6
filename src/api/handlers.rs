use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::error::BoardActionError;
use crate::i18n::I18n;
use crate::logic::{
    action_kind_for, AutocompleterComponent, BoardActionService, DisabledButtonPlaceholder,
    HeaderComponent, ListMenuItem, StoreBoardListService, WorkPackageFilterValues,
};
use crate::model::{
    resource_kind_for_attribute, ActionAttribute, Board, FilterOperator, HalResource, Id,
    NewBoard, Query, QueryFilter, ResourceKind, WorkPackage, WorkPackageChangeset,
};
use crate::paths::ApiV3Paths;
use crate::store::traits::{BoardStore, QueryStore, ResourceStore, Store, WorkPackageStore};

/// Shared server state: the store, path builders, locale and one board
/// action session per action board
pub struct AppState<S> {
    pub store: Arc<S>,
    pub paths: ApiV3Paths,
    pub i18n: I18n,
    sessions: Mutex<HashMap<Id, Arc<BoardActionService>>>,
}

impl<S: Store + 'static> AppState<S> {
    pub fn new(store: Arc<S>, paths: ApiV3Paths, i18n: I18n) -> Self {
        Self {
            store,
            paths,
            i18n,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Action session of a board, started on first use. Free boards have none.
    pub fn board_session(&self, board: &Board) -> Option<Arc<BoardActionService>> {
        let attribute = board.action_attribute?;
        let mut sessions = self.sessions.lock();
        let session = sessions.entry(board.id.clone()).or_insert_with(|| {
            log::debug!("Starting {} action session for board {}", attribute, board.id);
            let resources: Arc<dyn ResourceStore> = self.store.clone();
            Arc::new(BoardActionService::new(
                action_kind_for(attribute, resources),
                Arc::new(StoreBoardListService::new(self.store.clone())),
            ))
        });
        Some(session.clone())
    }

    pub fn end_board_session(&self, board_id: &str) -> bool {
        self.sessions.lock().remove(board_id).is_some()
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

fn internal_error(e: impl fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&e.to_string())),
    )
}

fn not_found(what: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(&format!("{} not found", what))),
    )
}

/// Board action errors reach the client in the server's locale
fn action_error(err: BoardActionError, i18n: &I18n) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        BoardActionError::NotWritable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BoardActionError::LoadFailed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ErrorResponse::new(&err.localized(i18n))))
}

/// Action attribute details of a board
#[derive(Debug, Serialize)]
pub struct BoardActionDescription {
    pub attribute: ActionAttribute,
    pub name: String,
    pub autocompleter: AutocompleterComponent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderComponent>,
}

/// One list as rendered on a board
#[derive(Debug, Serialize)]
pub struct BoardListView {
    pub query: Query,
    pub href: String,
    /// Resource the list filters the action attribute on
    pub value: Option<HalResource>,
    pub menu_items: Vec<ListMenuItem>,
    pub drag_allowed: bool,
    pub can_add: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_button_placeholder: Option<DisabledButtonPlaceholder>,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    #[serde(flatten)]
    pub board: Board,
    pub href: String,
    pub action: Option<BoardActionDescription>,
    pub list_views: Vec<BoardListView>,
}

async fn board_response<S: Store + 'static>(state: &AppState<S>, board: Board) -> ApiResult<BoardResponse> {
    let session = state.board_session(&board);
    let mut list_views = Vec::with_capacity(board.lists.len());

    for query_id in board.query_ids() {
        let query = match state.store.get_query(&query_id).await {
            Ok(Some(query)) => query,
            Ok(None) => {
                log::warn!("Board {} lists missing query {}", board.id, query_id);
                continue;
            }
            Err(e) => return Err(internal_error(e)),
        };
        let href = state.paths.queries().id(&query.id).path().to_string();

        let view = match &session {
            Some(session) => {
                let value = session
                    .get_loaded_filter_value(&query)
                    .await
                    .map_err(|e| action_error(e, &state.i18n))?;
                let menu_items = session
                    .get_additional_list_menu_items(&query, &state.i18n)
                    .await
                    .map_err(|e| action_error(e, &state.i18n))?;
                let can_add = session
                    .can_add_to_query(&query)
                    .await
                    .map_err(|e| action_error(e, &state.i18n))?;
                let drag_allowed = session.drag_into_allowed(&query, value.as_ref());
                let add_button_placeholder =
                    session.disabled_add_button_placeholder(value.as_ref(), &state.i18n);

                BoardListView {
                    query,
                    href,
                    value,
                    menu_items,
                    drag_allowed,
                    can_add,
                    add_button_placeholder,
                }
            }
            None => BoardListView {
                query,
                href,
                value: None,
                menu_items: Vec::new(),
                drag_allowed: true,
                can_add: true,
                add_button_placeholder: None,
            },
        };
        list_views.push(view);
    }

    let action = session.as_ref().map(|session| BoardActionDescription {
        attribute: session.action_attribute(),
        name: session.localized_name(&state.i18n),
        autocompleter: session.autocompleter_component(),
        header: session.header_component(),
    });

    Ok(BoardResponse {
        href: state.paths.boards().id(&board.id).path().to_string(),
        board,
        action,
        list_views,
    })
}

async fn load_board<S: Store>(store: &S, board_id: &Id) -> ApiResult<Board> {
    match store.get_board(board_id).await {
        Ok(Some(board)) => Ok(board),
        Ok(None) => Err(not_found("Board")),
        Err(e) => Err(internal_error(e)),
    }
}

fn require_session<S: Store + 'static>(
    state: &AppState<S>,
    board: &Board,
) -> ApiResult<Arc<BoardActionService>> {
    state.board_session(board).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("Board has no action attribute")),
        )
    })
}

async fn list_resources_of<S: Store>(store: &S, kind: ResourceKind) -> ApiResult<Json<ListResponse<HalResource>>> {
    match store.list_resources(kind).await {
        Ok(resources) => Ok(Json(ListResponse::new(resources))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn list_statuses<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<ListResponse<HalResource>>> {
    list_resources_of(&*state.store, ResourceKind::Status).await
}

pub async fn list_versions<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<ListResponse<HalResource>>> {
    list_resources_of(&*state.store, ResourceKind::Version).await
}

pub async fn list_users<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<ListResponse<HalResource>>> {
    list_resources_of(&*state.store, ResourceKind::User).await
}

pub async fn list_queries<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<ListResponse<Query>>> {
    match state.store.list_queries().await {
        Ok(queries) => Ok(Json(ListResponse::new(queries))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_query<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(query_id): Path<Id>,
) -> ApiResult<Json<Query>> {
    match state.store.get_query(&query_id).await {
        Ok(Some(query)) => Ok(Json(query)),
        Ok(None) => Err(not_found("Query")),
        Err(e) => Err(internal_error(e)),
    }
}

fn default_query() -> Query {
    let mut query = Query::new("Default").with_filters(vec![QueryFilter::new(
        "status",
        FilterOperator::Open,
        Vec::new(),
    )]);
    query.id = "default".to_string();
    query
}

/// Unsaved query every new list starts from: open work packages
pub async fn get_default_query() -> Json<Query> {
    Json(default_query())
}

/// Filterable attributes offered by the query form
const FORM_ATTRIBUTES: &[&str] = &["status", "version", "assignee", "type", "priority", "subject"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFormResponse {
    pub payload: Query,
    pub filter_schemas: Vec<String>,
    pub available_operators: Vec<&'static str>,
}

pub async fn get_query_form<S: Store + 'static>(State(state): State<Arc<AppState<S>>>) -> Json<QueryFormResponse> {
    let queries = state.paths.queries();
    Json(QueryFormResponse {
        payload: default_query(),
        filter_schemas: FORM_ATTRIBUTES
            .iter()
            .map(|attribute| queries.filter_instance_schema(attribute).path().to_string())
            .collect(),
        available_operators: FilterOperator::all().iter().map(FilterOperator::symbol).collect(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInstanceSchemaResponse {
    pub id: String,
    pub name: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values_href: Option<String>,
    pub available_operators: Vec<&'static str>,
}

pub async fn get_filter_instance_schema<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(attribute): Path<String>,
) -> ApiResult<Json<FilterInstanceSchemaResponse>> {
    if !FORM_ATTRIBUTES.contains(&attribute.as_str()) {
        return Err(not_found("Filter"));
    }

    let queries = state.paths.queries();
    let name = state
        .i18n
        .lookup(&format!("js.work_packages.properties.{}", attribute))
        .map(str::to_string)
        .unwrap_or_else(|| attribute.clone());
    let allowed_values_href = resource_kind_for_attribute(&attribute)
        .map(|kind| state.paths.resources(kind).path().to_string());

    Ok(Json(FilterInstanceSchemaResponse {
        href: queries.filter_instance_schema(&attribute).path().to_string(),
        id: attribute,
        name,
        allowed_values_href,
        available_operators: FilterOperator::all().iter().map(FilterOperator::symbol).collect(),
    }))
}

pub async fn create_board<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    RequestJson(new_board): RequestJson<NewBoard>,
) -> ApiResult<(StatusCode, Json<BoardResponse>)> {
    let board = new_board.into_board();

    if let Err(e) = state.store.upsert_board(board.clone()).await {
        return Err(internal_error(format!("Failed to create board: {}", e)));
    }

    let board_id = board.id.clone();
    let board = match state.board_session(&board) {
        Some(session) => match session.add_action_queries(board).await {
            Ok(board) => board,
            Err(e) => {
                log::warn!("Seeding board {} failed, discarding it: {:#}", board_id, e);
                if let Err(cleanup) = discard_board(&state, &board_id).await {
                    log::error!("Failed to discard board {}: {:#}", board_id, cleanup);
                }
                return Err(internal_error(format!("Failed to add initial lists: {:#}", e)));
            }
        },
        None => board,
    };
    log::info!("Created board {} ({})", board.name, board.id);

    let response = board_response(&state, board).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Remove a board, the queries backing its lists and its session
async fn discard_board<S: Store + 'static>(state: &AppState<S>, board_id: &Id) -> anyhow::Result<()> {
    state.end_board_session(board_id);

    if let Some(board) = state.store.get_board(board_id).await? {
        for query_id in board.query_ids() {
            state.store.delete_query(&query_id).await?;
        }
        state.store.delete_board(board_id).await?;
    }
    Ok(())
}

pub async fn get_board<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<Id>,
) -> ApiResult<Json<BoardResponse>> {
    let board = load_board(&*state.store, &board_id).await?;
    Ok(Json(board_response(&state, board).await?))
}

pub async fn delete_board<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<Id>,
) -> ApiResult<Json<serde_json::Value>> {
    load_board(&*state.store, &board_id).await?;

    if let Err(e) = discard_board(&state, &board_id).await {
        return Err(internal_error(format!("Failed to delete board: {}", e)));
    }
    log::info!("Deleted board {}", board_id);

    Ok(Json(serde_json::json!({
        "message": "Board deleted successfully",
        "deleted_id": board_id,
    })))
}

#[derive(Debug, Serialize)]
pub struct AvailableValuesResponse {
    pub items: Vec<HalResource>,
    pub total: usize,
    /// Shown instead of the autocompleter when nothing is left to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

async fn board_queries<S: Store>(store: &S, board: &Board) -> ApiResult<Vec<Query>> {
    let mut queries = Vec::with_capacity(board.lists.len());
    for query_id in board.query_ids() {
        match store.get_query(&query_id).await {
            Ok(Some(query)) => queries.push(query),
            Ok(None) => {}
            Err(e) => return Err(internal_error(e)),
        }
    }
    Ok(queries)
}

pub async fn list_available_values<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<Id>,
) -> ApiResult<Json<AvailableValuesResponse>> {
    let board = load_board(&*state.store, &board_id).await?;
    let session = require_session(&state, &board)?;

    let queries = board_queries(&*state.store, &board).await?;
    let active = session.active_values(&queries);
    let items = session
        .get_available_values(&board, &active)
        .await
        .map_err(|e| action_error(e, &state.i18n))?;

    let warning = if items.is_empty() {
        session.warning_text_when_no_options_available(&state.i18n)
    } else {
        None
    };

    Ok(Json(AvailableValuesResponse {
        total: items.len(),
        items,
        warning,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddListRequest {
    /// Id or href of the value the new list filters on
    pub value: String,
}

pub async fn add_board_list<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<Id>,
    RequestJson(request): RequestJson<AddListRequest>,
) -> ApiResult<(StatusCode, Json<BoardResponse>)> {
    let board = load_board(&*state.store, &board_id).await?;
    let session = require_session(&state, &board)?;

    let queries = board_queries(&*state.store, &board).await?;
    let active = session.active_values(&queries);
    let candidates = session
        .get_available_values(&board, &HashSet::new())
        .await
        .map_err(|e| action_error(e, &state.i18n))?;

    let Some(value) = candidates
        .iter()
        .find(|candidate| candidate.id == request.value || candidate.href == request.value)
    else {
        return Err(not_found("Value"));
    };
    if active.contains(&value.id) {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(&format!("Board already has a list for {}", value.name))),
        ));
    }

    let board = session
        .add_action_query(board, value)
        .await
        .map_err(|e| internal_error(format!("Failed to add list: {:#}", e)))?;

    let response = board_response(&state, board).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub query_id: Id,
}

/// Move a work package into the list backed by `query_id`
pub async fn move_work_package<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(work_package_id): Path<Id>,
    RequestJson(request): RequestJson<MoveRequest>,
) -> ApiResult<Json<WorkPackage>> {
    let mut work_package = match state.store.get_work_package(&work_package_id).await {
        Ok(Some(work_package)) => work_package,
        Ok(None) => return Err(not_found("Work package")),
        Err(e) => return Err(internal_error(e)),
    };
    let query = match state.store.get_query(&request.query_id).await {
        Ok(Some(query)) => query,
        Ok(None) => return Err(not_found("Query")),
        Err(e) => return Err(internal_error(e)),
    };

    let boards = state.store.list_boards().await.map_err(internal_error)?;
    let board = boards
        .into_iter()
        .find(|board| board.lists.iter().any(|list| list.query_id == query.id));

    let mut changeset = WorkPackageChangeset::new(&work_package);
    match board.as_ref().and_then(|board| state.board_session(board)) {
        Some(session) => session
            .assign_to_work_package(&mut changeset, &query)
            .map_err(|e| action_error(e, &state.i18n))?,
        None => {
            WorkPackageFilterValues::new(&mut changeset, &query.filters).apply_defaults_from_filters();
        }
    }

    let changed: Vec<String> = changeset
        .changed_attributes()
        .into_iter()
        .map(str::to_string)
        .collect();
    changeset.apply_to(&mut work_package);

    if let Err(e) = state.store.upsert_work_package(work_package.clone()).await {
        return Err(internal_error(format!("Failed to save work package: {}", e)));
    }
    log::info!(
        "Moved work package {} into query {} (changed: {:?})",
        work_package.id,
        query.id,
        changed
    );

    Ok(Json(work_package))
}
