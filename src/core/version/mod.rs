//! Game version catalog
//!
//! Built-in version listing for the add-instance form. The catalog is
//! fake data standing in for a remote manifest; only ids and release
//! types matter to the front-end.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: VersionType,
    #[serde(rename = "releaseTime")]
    pub release_time: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Release,
    Snapshot,
}

fn version(id: &str, version_type: VersionType, release_time: &str) -> VersionInfo {
    VersionInfo {
        id: id.to_string(),
        version_type,
        release_time: release_time.to_string(),
    }
}

/// The built-in catalog, newest first.
pub fn catalog() -> Vec<VersionInfo> {
    vec![
        version("24w07a", VersionType::Snapshot, "2024-02-14T15:12:30+00:00"),
        version("1.20.4", VersionType::Release, "2023-12-07T12:43:13+00:00"),
        version("1.20.3", VersionType::Release, "2023-12-05T13:05:32+00:00"),
        version("1.20.2", VersionType::Release, "2023-09-21T11:32:10+00:00"),
        version("1.20.1", VersionType::Release, "2023-06-12T12:25:51+00:00"),
    ]
}

/// Filter the catalog by type; snapshots only when asked for.
pub fn filter_versions(versions: &[VersionInfo], include_snapshots: bool) -> Vec<&VersionInfo> {
    versions
        .iter()
        .filter(|v| {
            v.version_type == VersionType::Release
                || (include_snapshots && v.version_type == VersionType::Snapshot)
        })
        .collect()
}
