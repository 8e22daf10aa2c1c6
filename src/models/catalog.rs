use serde::{Deserialize, Serialize};

/// Slug identifying ElvUI in the remote catalog
pub const ELVUI_SLUG: &str = "elvui";

/// One addon package as published by the remote catalog API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAddonRecord {
    #[serde(rename = "slug", default)]
    pub identifier: String,

    #[serde(rename = "url", default)]
    pub download_url: String,

    #[serde(default)]
    pub version: String,

    /// Top-level folders shipped in the archive, in archive order
    #[serde(rename = "directories", default)]
    pub bundled_folders: Vec<String>,
}
