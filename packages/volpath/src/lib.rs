//! volpath: resolve storage provider tree handles to absolute paths.
//!
//! A document provider hands out opaque tree handles such as
//! `content://com.android.externalstorage.documents/tree/1234-ABCD%3AMusic`.
//! volpath turns them into real paths (`/storage/1234-ABCD/Music`) by matching
//! the handle's volume id against the volumes mounted right now.
//!
//! This crate wires the core resolver to the platform volume sources and
//! loads both from one configuration document:
//!
//! ```json
//! {
//!     "resolver": {"primary_equivalent_aliases": ["home", "downloads"]},
//!     "mount_table": {"path": "/proc/self/mounts", "primary_mount_path": "/storage/emulated/0"},
//!     "tree_authority": "com.android.externalstorage.documents"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use volpath_core::*;
pub use volpath_sys::{parse_mounts, MountTable, MountTableConfig};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub mount_table: MountTableConfig,
    /// Only accept tree handles issued by this provider authority.
    pub tree_authority: Option<String>,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading config {}...", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn decoder(&self) -> TreeUriDecoder {
        match &self.tree_authority {
            Some(authority) => TreeUriDecoder::for_authority(authority.clone()),
            None => TreeUriDecoder::new(),
        }
    }
}

/// A resolver that reads the system mount table on every resolution.
pub type SystemResolver = TreeHandleResolver<MountTable, TreeUriDecoder>;

/// Build a resolver over the configured mount table.
pub fn system_resolver(config: &Config) -> SystemResolver {
    TreeHandleResolver::with_config(
        MountTable::new(config.mount_table.clone()),
        config.decoder(),
        config.resolver.clone(),
    )
}
