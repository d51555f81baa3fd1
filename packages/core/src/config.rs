//! Resolver configuration.

use serde::{Deserialize, Serialize};

use crate::Result;

/// The alias that always names the device's primary volume.
pub const PRIMARY_ALIAS: &str = "primary";

/// Configuration for [`VolumeResolver`](crate::VolumeResolver).
///
/// Loaded from JSON like:
/// ```json
/// {"primary_equivalent_aliases": ["home", "downloads"]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Provider volume ids that live on primary storage without being the
    /// `primary` alias itself. Some document providers expose the user's
    /// home and download directories under their own roots.
    pub primary_equivalent_aliases: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            primary_equivalent_aliases: vec!["home".to_string(), "downloads".to_string()],
        }
    }
}

impl ResolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if `volume_id` is the primary alias or a configured equivalent.
    pub fn is_primary_alias(&self, volume_id: &str) -> bool {
        volume_id == PRIMARY_ALIAS
            || self
                .primary_equivalent_aliases
                .iter()
                .any(|alias| alias == volume_id)
    }
}
