use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::BoardActionError;
use crate::i18n::I18n;
use crate::logic::action_kind::{
    ActionKind, AutocompleterComponent, DisabledButtonPlaceholder, HeaderComponent, ListMenuItem,
};
use crate::logic::available_values::{AvailableValues, AvailableValuesCache};
use crate::logic::board_lists::BoardListService;
use crate::logic::filter_values::WorkPackageFilterValues;
use crate::model::{
    id_from_link, ActionAttribute, Board, FilterValue, HalResource, Id, Query, QueryFilter,
    QueryParams, WorkPackage, WorkPackageChangeset,
};

/// Reads and writes the selection of one action attribute on board queries.
///
/// One service exists per board session. It owns the cache of available
/// values, which is loaded at most once and shared by every caller.
pub struct BoardActionService {
    kind: Arc<dyn ActionKind>,
    board_lists: Arc<dyn BoardListService>,
    cache: AvailableValuesCache,
}

impl BoardActionService {
    pub fn new(kind: Arc<dyn ActionKind>, board_lists: Arc<dyn BoardListService>) -> Self {
        Self {
            kind,
            board_lists,
            cache: AvailableValuesCache::new(),
        }
    }

    pub fn action_attribute(&self) -> ActionAttribute {
        self.kind.action_attribute()
    }

    /// Filter and schema key, e.g. "status"
    pub fn attribute_name(&self) -> &'static str {
        self.action_attribute().attribute_name()
    }

    pub fn localized_name(&self, i18n: &I18n) -> String {
        self.kind.localized_name(i18n)
    }

    /// Href of the query's filter value for the action attribute, or the raw
    /// value when the filter holds a scalar
    pub fn get_filter_href(&self, query: &Query) -> Option<String> {
        let filter = query.filter(self.attribute_name())?;
        filter.values.first().map(FilterValue::href_or_value)
    }

    /// Loaded resource the query's filter points to. Values missing from the
    /// available set (e.g. deleted upstream) resolve to `None`.
    pub async fn get_loaded_filter_value(&self, query: &Query) -> Result<Option<HalResource>, BoardActionError> {
        let Some(href) = self.get_filter_href(query).filter(|href| !href.is_empty()) else {
            return Ok(None);
        };

        let available = self.with_loaded_available().await?;
        Ok(available.iter().find(|resource| resource.href == href).cloned())
    }

    /// Seed a new board with the lists its action kind starts with. Kinds
    /// without initial lists return the board unchanged without loading.
    pub async fn add_action_queries(&self, board: Board) -> Result<Board> {
        if !self.kind.seeds_initial_lists() {
            return Ok(board);
        }

        let available = self.with_loaded_available().await?;
        let initial = self.kind.initial_values(&available);

        let mut board = board;
        for value in &initial {
            board = self.add_action_query(board, value).await?;
        }
        Ok(board)
    }

    /// Add one list filtering the action attribute on `value`
    pub async fn add_action_query(&self, board: Board, value: &HalResource) -> Result<Board> {
        let params = QueryParams {
            name: value.name.clone(),
        };
        let filter = QueryFilter::equals(
            self.attribute_name(),
            vec![FilterValue::Text(value.id_from_link())],
        );

        self.board_lists.add_query(board, params, vec![filter]).await
    }

    /// Available values not yet used by the board, in load order
    pub async fn get_available_values(
        &self,
        _board: &Board,
        active: &HashSet<Id>,
    ) -> Result<Vec<HalResource>, BoardActionError> {
        let available = self.with_loaded_available().await?;
        Ok(available
            .iter()
            .filter(|item| !active.contains(&item.id))
            .cloned()
            .collect())
    }

    /// Ids of the values the given queries filter on
    pub fn active_values<'a>(&self, queries: impl IntoIterator<Item = &'a Query>) -> HashSet<Id> {
        queries
            .into_iter()
            .filter_map(|query| self.get_filter_href(query))
            .map(|href| id_from_link(&href))
            .collect()
    }

    pub async fn get_additional_list_menu_items(
        &self,
        query: &Query,
        i18n: &I18n,
    ) -> Result<Vec<ListMenuItem>, BoardActionError> {
        let value = self.get_loaded_filter_value(query).await?;
        Ok(self
            .kind
            .additional_list_menu_items(query, value.as_ref(), i18n))
    }

    pub fn autocompleter_component(&self) -> AutocompleterComponent {
        self.kind.autocompleter_component()
    }

    pub fn header_component(&self) -> Option<HeaderComponent> {
        self.kind.header_component()
    }

    pub fn disabled_add_button_placeholder(
        &self,
        value: Option<&HalResource>,
        i18n: &I18n,
    ) -> Option<DisabledButtonPlaceholder> {
        self.kind.disabled_add_button_placeholder(value, i18n)
    }

    pub fn warning_text_when_no_options_available(&self, i18n: &I18n) -> Option<String> {
        self.kind.warning_text_when_no_options_available(i18n)
    }

    pub fn drag_into_allowed(&self, query: &Query, value: Option<&HalResource>) -> bool {
        self.kind.drag_into_allowed(query, value)
    }

    pub async fn can_add_to_query(&self, query: &Query) -> Result<bool, BoardActionError> {
        let value = self.get_loaded_filter_value(query).await?;
        Ok(self.kind.can_add_to_query(query, value.as_ref()))
    }

    /// Whether the work package's schema lets the action attribute change
    pub fn can_move(&self, work_package: &WorkPackage) -> bool {
        work_package.schema.is_writable(self.attribute_name())
    }

    /// Apply the values implied by the query's filters to the changeset.
    ///
    /// Fails before touching the changeset when the action attribute is not
    /// writable. Performs no I/O; the caller persists the changeset.
    pub fn assign_to_work_package(
        &self,
        changeset: &mut WorkPackageChangeset,
        query: &Query,
    ) -> Result<(), BoardActionError> {
        let attribute = self.attribute_name();
        if !changeset.is_writable(attribute) {
            log::warn!(
                "Refusing to move work package {}: {} is not writable",
                changeset.work_package_id,
                attribute
            );
            return Err(BoardActionError::not_writable(
                attribute,
                changeset.human_name(attribute),
            ));
        }

        WorkPackageFilterValues::new(changeset, &query.filters).apply_defaults_from_filters();
        Ok(())
    }

    /// Cached values, if loaded
    pub fn cached_values(&self) -> Option<AvailableValues> {
        self.cache.snapshot()
    }

    async fn with_loaded_available(&self) -> Result<AvailableValues, BoardActionError> {
        let kind = self.kind.clone();
        self.cache
            .get_or_load(move || async move {
                let attribute = kind.action_attribute().attribute_name().to_string();
                kind.load_available()
                    .await
                    .map(Arc::new)
                    .map_err(|err| BoardActionError::LoadFailed {
                        attribute,
                        reason: format!("{:#}", err),
                    })
            })
            .await
    }
}
