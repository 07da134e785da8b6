use crate::error::SeedError;
use crate::i18n::{self, I18n};
use crate::model::{HalResource, ResourceKind};
use crate::paths::ApiV3Paths;
use crate::store::traits::ResourceStore;
use anyhow::Result;

/// Translation key, default flag
type Entry = (&'static str, bool);

const ROLES: &[Entry] = &[
    ("default_role_manager", false),
    ("default_role_developer", false),
    ("default_role_reporter", false),
];

const TYPES: &[Entry] = &[
    ("default_type_task", true),
    ("default_type_milestone", false),
    ("default_type_phase", false),
    ("default_type_feature", false),
    ("default_type_bug", false),
];

const STATUSES: &[Entry] = &[
    ("default_status_new", true),
    ("default_status_in_progress", false),
    ("default_status_resolved", false),
    ("default_status_feedback", false),
    ("default_status_closed", false),
    ("default_status_rejected", false),
];

const PRIORITIES: &[Entry] = &[
    ("default_priority_low", false),
    ("default_priority_normal", true),
    ("default_priority_high", false),
    ("default_priority_urgent", false),
    ("default_priority_immediate", false),
];

const ACTIVITIES: &[Entry] = &[
    ("default_activity_management", false),
    ("default_activity_design", false),
    ("default_activity_development", true),
    ("default_activity_testing", false),
];

/// True when no configuration data has been loaded yet
pub async fn no_data<S: ResourceStore + ?Sized>(store: &S) -> Result<bool> {
    let statuses = store.list_resources(ResourceKind::Status).await?;
    let roles = store.list_resources(ResourceKind::Role).await?;
    let types = store.list_resources(ResourceKind::Type).await?;
    let priorities = store.list_resources(ResourceKind::Priority).await?;
    let activities = store.list_resources(ResourceKind::TimeEntryActivity).await?;

    Ok(statuses.is_empty()
        && roles.iter().all(|role| role.builtin)
        && types.iter().all(|ty| ty.builtin)
        && priorities.is_empty()
        && activities.is_empty())
}

/// Load roles, types, statuses and enumerations named in `lang`
pub async fn load_default_data<S: ResourceStore + ?Sized>(
    store: &S,
    paths: &ApiV3Paths,
    lang: &str,
) -> Result<(), SeedError> {
    if !i18n::is_valid_language(lang) {
        return Err(SeedError::UnsupportedLanguage(lang.to_string()));
    }
    if !no_data(store).await? {
        return Err(SeedError::AlreadyLoaded);
    }

    let i18n = I18n::new(lang);
    let sets = [
        (ResourceKind::Role, ROLES),
        (ResourceKind::Type, TYPES),
        (ResourceKind::Status, STATUSES),
        (ResourceKind::Priority, PRIORITIES),
        (ResourceKind::TimeEntryActivity, ACTIVITIES),
    ];

    for (kind, entries) in sets {
        // Ids continue after the highest id still present, e.g. builtin records
        let mut last_id = store
            .list_resources(kind)
            .await?
            .iter()
            .filter_map(|resource| resource.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        for (index, (key, is_default)) in entries.iter().enumerate() {
            last_id += 1;
            let id = last_id.to_string();
            let mut resource = HalResource::new(kind, id.clone(), i18n.t(key), paths.resource_href(kind, &id))
                .with_position(index as i32 + 1);
            if *is_default {
                resource = resource.as_default();
            }
            store.upsert_resource(resource).await?;
        }
    }

    log::info!("Loaded default data ({})", lang);
    Ok(())
}

/// Remove loaded configuration data, keeping builtin roles and standard types
pub async fn delete_loaded_data<S: ResourceStore + ?Sized>(store: &S) -> Result<()> {
    for kind in [
        ResourceKind::Role,
        ResourceKind::Type,
        ResourceKind::Status,
        ResourceKind::Priority,
        ResourceKind::TimeEntryActivity,
    ] {
        for resource in store.list_resources(kind).await? {
            let removable = kind == ResourceKind::Status || kind.is_enumeration() || !resource.builtin;
            if removable {
                store.delete_resource(kind, &resource.id).await?;
            }
        }
    }
    Ok(())
}
