use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use crate::i18n::I18n;
use crate::model::{ActionAttribute, HalResource, Query, ResourceKind, VersionStatus};
use crate::store::traits::ResourceStore;

/// Autocompleter offered when adding a list to an action board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutocompleterComponent {
    Create,
    Version,
    User,
}

/// Header rendered above a board list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderComponent {
    Assignee,
    Version,
}

/// Replaces the add button of a list that cannot receive new work packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledButtonPlaceholder {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMenuAction {
    LockVersion,
    UnlockVersion,
    CloseVersion,
    OpenVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMenuItem {
    pub action: ListMenuAction,
    pub label: String,
}

impl ListMenuItem {
    fn new(action: ListMenuAction, label: String) -> Self {
        Self { action, label }
    }
}

/// Capabilities of one action attribute kind.
///
/// Kinds supply the attribute and the source of candidate values; everything
/// else has a conservative default that kinds override where they differ.
#[async_trait::async_trait]
pub trait ActionKind: Send + Sync {
    fn action_attribute(&self) -> ActionAttribute;

    fn localized_name(&self, i18n: &I18n) -> String {
        i18n.t(&format!(
            "js.work_packages.properties.{}",
            self.action_attribute().attribute_name()
        ))
    }

    /// Fetch every value the attribute can take
    async fn load_available(&self) -> Result<Vec<HalResource>>;

    /// Whether new boards start with lists. Kinds that return false leave a
    /// new board untouched and never load values for it.
    fn seeds_initial_lists(&self) -> bool {
        false
    }

    /// Values a new board starts with one list each for. Only consulted when
    /// `seeds_initial_lists` is true.
    fn initial_values(&self, _available: &[HalResource]) -> Vec<HalResource> {
        Vec::new()
    }

    fn additional_list_menu_items(
        &self,
        _query: &Query,
        _value: Option<&HalResource>,
        _i18n: &I18n,
    ) -> Vec<ListMenuItem> {
        Vec::new()
    }

    fn autocompleter_component(&self) -> AutocompleterComponent {
        AutocompleterComponent::Create
    }

    fn header_component(&self) -> Option<HeaderComponent> {
        None
    }

    fn disabled_add_button_placeholder(
        &self,
        _value: Option<&HalResource>,
        _i18n: &I18n,
    ) -> Option<DisabledButtonPlaceholder> {
        None
    }

    fn warning_text_when_no_options_available(&self, _i18n: &I18n) -> Option<String> {
        None
    }

    fn drag_into_allowed(&self, _query: &Query, _value: Option<&HalResource>) -> bool {
        true
    }

    fn can_add_to_query(&self, _query: &Query, _value: Option<&HalResource>) -> bool {
        true
    }
}

/// Build the action kind for an attribute, loading values from `resources`
pub fn action_kind_for(
    attribute: ActionAttribute,
    resources: Arc<dyn ResourceStore>,
) -> Arc<dyn ActionKind> {
    match attribute {
        ActionAttribute::Status => Arc::new(StatusAction::new(resources)),
        ActionAttribute::Version => Arc::new(VersionAction::new(resources)),
        ActionAttribute::Assignee => Arc::new(AssigneeAction::new(resources)),
    }
}

pub struct StatusAction {
    resources: Arc<dyn ResourceStore>,
}

impl StatusAction {
    pub fn new(resources: Arc<dyn ResourceStore>) -> Self {
        Self { resources }
    }
}

#[async_trait::async_trait]
impl ActionKind for StatusAction {
    fn action_attribute(&self) -> ActionAttribute {
        ActionAttribute::Status
    }

    async fn load_available(&self) -> Result<Vec<HalResource>> {
        self.resources.list_resources(ResourceKind::Status).await
    }

    fn seeds_initial_lists(&self) -> bool {
        true
    }

    /// New status boards start with a list for the default status
    fn initial_values(&self, available: &[HalResource]) -> Vec<HalResource> {
        available
            .iter()
            .find(|status| status.is_default)
            .cloned()
            .into_iter()
            .collect()
    }
}

pub struct VersionAction {
    resources: Arc<dyn ResourceStore>,
}

impl VersionAction {
    pub fn new(resources: Arc<dyn ResourceStore>) -> Self {
        Self { resources }
    }

    fn is_open(value: Option<&HalResource>) -> bool {
        match value {
            Some(version) => !version.is_closed() && !version.is_locked(),
            None => false,
        }
    }
}

#[async_trait::async_trait]
impl ActionKind for VersionAction {
    fn action_attribute(&self) -> ActionAttribute {
        ActionAttribute::Version
    }

    async fn load_available(&self) -> Result<Vec<HalResource>> {
        self.resources.list_resources(ResourceKind::Version).await
    }

    fn additional_list_menu_items(
        &self,
        _query: &Query,
        value: Option<&HalResource>,
        i18n: &I18n,
    ) -> Vec<ListMenuItem> {
        let Some(version) = value else {
            return Vec::new();
        };

        let item = |action, key: &str| ListMenuItem::new(action, i18n.t(key));
        match version.version_status.unwrap_or(VersionStatus::Open) {
            VersionStatus::Open => vec![
                item(ListMenuAction::LockVersion, "js.boards.version.lock_version"),
                item(ListMenuAction::CloseVersion, "js.boards.version.close_version"),
            ],
            VersionStatus::Locked => vec![
                item(ListMenuAction::UnlockVersion, "js.boards.version.unlock_version"),
                item(ListMenuAction::CloseVersion, "js.boards.version.close_version"),
            ],
            VersionStatus::Closed => vec![item(
                ListMenuAction::OpenVersion,
                "js.boards.version.open_version",
            )],
        }
    }

    fn autocompleter_component(&self) -> AutocompleterComponent {
        AutocompleterComponent::Version
    }

    fn header_component(&self) -> Option<HeaderComponent> {
        Some(HeaderComponent::Version)
    }

    fn disabled_add_button_placeholder(
        &self,
        value: Option<&HalResource>,
        i18n: &I18n,
    ) -> Option<DisabledButtonPlaceholder> {
        let version = value?;
        let key = match version.version_status? {
            VersionStatus::Open => return None,
            VersionStatus::Locked => "js.boards.version.locked",
            VersionStatus::Closed => "js.boards.version.closed",
        };

        Some(DisabledButtonPlaceholder {
            text: i18n.t(key),
            icon: "icon-locked".to_string(),
        })
    }

    /// Only open versions receive work packages
    fn drag_into_allowed(&self, _query: &Query, value: Option<&HalResource>) -> bool {
        Self::is_open(value)
    }

    fn can_add_to_query(&self, _query: &Query, value: Option<&HalResource>) -> bool {
        Self::is_open(value)
    }
}

pub struct AssigneeAction {
    resources: Arc<dyn ResourceStore>,
}

impl AssigneeAction {
    pub fn new(resources: Arc<dyn ResourceStore>) -> Self {
        Self { resources }
    }
}

#[async_trait::async_trait]
impl ActionKind for AssigneeAction {
    fn action_attribute(&self) -> ActionAttribute {
        ActionAttribute::Assignee
    }

    async fn load_available(&self) -> Result<Vec<HalResource>> {
        self.resources.list_resources(ResourceKind::User).await
    }

    fn autocompleter_component(&self) -> AutocompleterComponent {
        AutocompleterComponent::User
    }

    fn header_component(&self) -> Option<HeaderComponent> {
        Some(HeaderComponent::Assignee)
    }

    fn warning_text_when_no_options_available(&self, i18n: &I18n) -> Option<String> {
        Some(i18n.t("js.boards.add_list_modal.warning.assignee"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn version(id: &str, status: VersionStatus) -> HalResource {
        HalResource::new(
            ResourceKind::Version,
            id,
            format!("v{}", id),
            format!("/api/v3/versions/{}", id),
        )
        .with_version_status(status)
    }

    #[tokio::test]
    async fn test_status_action_seeds_default_status() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert_resource(
                HalResource::new(ResourceKind::Status, "1", "New", "/api/v3/statuses/1")
                    .with_position(1)
                    .as_default(),
            )
            .await
            .unwrap();
        store
            .upsert_resource(
                HalResource::new(ResourceKind::Status, "2", "Closed", "/api/v3/statuses/2")
                    .with_position(2),
            )
            .await
            .unwrap();

        let kind = action_kind_for(ActionAttribute::Status, store);
        let available = kind.load_available().await.unwrap();
        assert_eq!(available.len(), 2);

        assert!(kind.seeds_initial_lists());
        let initial = kind.initial_values(&available);
        assert_eq!(initial.len(), 1);
        assert_eq!(initial[0].name, "New");
        assert_eq!(kind.localized_name(&I18n::new("fr")), "Statut");
    }

    #[test]
    fn test_default_extension_points() {
        let kind = StatusAction::new(Arc::new(MemoryStore::new()));
        let query = Query::new("Open");
        let i18n = I18n::default();

        assert_eq!(kind.autocompleter_component(), AutocompleterComponent::Create);
        assert_eq!(kind.header_component(), None);
        assert_eq!(kind.disabled_add_button_placeholder(None, &i18n), None);
        assert_eq!(kind.warning_text_when_no_options_available(&i18n), None);
        assert!(kind.drag_into_allowed(&query, None));
        assert!(kind.can_add_to_query(&query, None));
        assert!(kind.additional_list_menu_items(&query, None, &i18n).is_empty());
    }

    #[test]
    fn test_version_action_guards_closed_versions() {
        let kind = VersionAction::new(Arc::new(MemoryStore::new()));
        let query = Query::new("v1");
        let i18n = I18n::default();
        let open = version("1", VersionStatus::Open);
        let locked = version("2", VersionStatus::Locked);
        let closed = version("3", VersionStatus::Closed);

        assert!(kind.drag_into_allowed(&query, Some(&open)));
        assert!(!kind.drag_into_allowed(&query, Some(&locked)));
        assert!(!kind.drag_into_allowed(&query, Some(&closed)));
        assert!(!kind.can_add_to_query(&query, None));

        assert_eq!(kind.disabled_add_button_placeholder(Some(&open), &i18n), None);
        assert_eq!(
            kind.disabled_add_button_placeholder(Some(&closed), &i18n)
                .map(|placeholder| placeholder.text),
            Some("Closed".to_string())
        );

        let actions: Vec<ListMenuAction> = kind
            .additional_list_menu_items(&query, Some(&locked), &i18n)
            .into_iter()
            .map(|item| item.action)
            .collect();
        assert_eq!(
            actions,
            vec![ListMenuAction::UnlockVersion, ListMenuAction::CloseVersion]
        );
        assert_eq!(kind.header_component(), Some(HeaderComponent::Version));
        assert!(!kind.seeds_initial_lists());
    }

    #[test]
    fn test_assignee_action_warns_without_members() {
        let kind = AssigneeAction::new(Arc::new(MemoryStore::new()));
        let i18n = I18n::new("de");

        assert_eq!(kind.autocompleter_component(), AutocompleterComponent::User);
        assert_eq!(kind.localized_name(&i18n), "Zugewiesen an");
        assert!(kind
            .warning_text_when_no_options_available(&i18n)
            .unwrap()
            .starts_with("Es gibt derzeit kein Mitglied"));
    }
}
