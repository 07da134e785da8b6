use crate::model::{FieldSchema, FilterValue, HalResource, ResourceKind, VersionStatus, WorkPackage, WorkPackageSchema};
use crate::paths::ApiV3Paths;
use crate::store::traits::Store;
use anyhow::{bail, Result};

fn version(paths: &ApiV3Paths, id: &str, name: &str, position: i32, status: VersionStatus) -> HalResource {
    HalResource::new(ResourceKind::Version, id, name, paths.resource_href(ResourceKind::Version, id))
        .with_position(position)
        .with_version_status(status)
}

fn user(paths: &ApiV3Paths, id: &str, name: &str, position: i32) -> HalResource {
    HalResource::new(ResourceKind::User, id, name, paths.resource_href(ResourceKind::User, id)).with_position(position)
}

fn board_schema(status_writable: bool) -> WorkPackageSchema {
    let status = if status_writable {
        FieldSchema::writable("Status")
    } else {
        FieldSchema::read_only("Status")
    };
    WorkPackageSchema::new()
        .with_field("subject", FieldSchema::writable("Subject"))
        .with_field("status", status)
        .with_field("version", FieldSchema::writable("Version"))
        .with_field("assignee", FieldSchema::writable("Assignee"))
}

/// Sample versions, users and work packages for trying out boards
pub async fn load_demo_project<S: Store + ?Sized>(store: &S, paths: &ApiV3Paths) -> Result<()> {
    let statuses = store.list_resources(ResourceKind::Status).await?;
    let Some(new_status) = statuses.iter().find(|status| status.is_default).or(statuses.first()) else {
        bail!("Demo project needs default data to be loaded first");
    };

    let versions = [
        version(paths, "1", "Sprint 1", 1, VersionStatus::Closed),
        version(paths, "2", "Sprint 2", 2, VersionStatus::Locked),
        version(paths, "3", "Sprint 3", 3, VersionStatus::Open),
    ];
    let users = [user(paths, "1", "Alice Admin", 1), user(paths, "2", "Bob Builder", 2)];

    for resource in versions.iter().chain(users.iter()) {
        store.upsert_resource(resource.clone()).await?;
    }

    let work_packages = [
        WorkPackage::new("1", "Set up project board", board_schema(true))
            .with_attribute("status", FilterValue::Resource(new_status.link()))
            .with_attribute("version", FilterValue::Resource(versions[2].link())),
        WorkPackage::new("2", "Write release notes", board_schema(true))
            .with_attribute("status", FilterValue::Resource(new_status.link()))
            .with_attribute("assignee", FilterValue::Resource(users[0].link())),
        WorkPackage::new("3", "Audit closed sprint", board_schema(false))
            .with_attribute("status", FilterValue::Resource(new_status.link()))
            .with_attribute("version", FilterValue::Resource(versions[0].link())),
    ];

    for work_package in work_packages {
        store.upsert_work_package(work_package).await?;
    }

    log::info!("Loaded demo project");
    Ok(())
}
