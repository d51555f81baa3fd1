//! Volume matching: map a provider volume id to a real mount point.
//!
//! Every call enumerates the mounted volumes afresh through the configured
//! [`VolumeSource`], so media inserted or removed between calls is reflected
//! immediately. Nothing is cached.
//!
//! Ids are matched exactly and case-sensitively. If the source reports two
//! volumes with the same id, the first one wins.

use serde::{Deserialize, Serialize};

use crate::config::{ResolverConfig, PRIMARY_ALIAS};
use crate::path;
use crate::{Result, VolumeSource};

/// One mounted storage volume, as reported by a [`VolumeSource`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MountedVolume {
    /// Device-assigned identifier (a filesystem UUID for removable media).
    pub id: String,
    /// Absolute mount point without a trailing separator.
    pub mount_path: String,
    /// Whether this is the device's primary (built-in) storage.
    pub is_primary: bool,
}

impl MountedVolume {
    pub fn new(id: impl Into<String>, mount_path: impl Into<String>, is_primary: bool) -> Self {
        Self {
            id: id.into(),
            mount_path: mount_path.into(),
            is_primary,
        }
    }

    /// The primary volume, identified by the primary alias.
    pub fn primary(mount_path: impl Into<String>) -> Self {
        Self::new(PRIMARY_ALIAS, mount_path, true)
    }
}

/// Resolves volume ids against the volumes a [`VolumeSource`] reports.
pub struct VolumeResolver<S> {
    source: S,
    config: ResolverConfig,
}

impl<S: VolumeSource> VolumeResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    pub fn with_config(source: S, config: ResolverConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Find the mount point of `volume_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(path))` - The volume is mounted at `path`.
    /// * `Ok(None)` - No such volume is mounted right now (e.g. the media
    ///   was removed). This is not an error.
    /// * `Err(Error::Enumeration)` - The volume source itself failed.
    pub fn find_mount_path(&self, volume_id: &str) -> Result<Option<String>> {
        let volumes = self.source.list_volumes()?;
        Ok(match_volume(&volumes, volume_id).map(|volume| volume.mount_path.clone()))
    }

    /// True if `volume_id` lives on primary storage.
    ///
    /// Aliases are checked first and need no enumeration. Otherwise the id
    /// must belong to the currently enumerated primary volume; if enumeration
    /// fails the answer is `false`.
    pub fn is_on_primary_storage(&self, volume_id: &str) -> bool {
        if self.config.is_primary_alias(volume_id) {
            return true;
        }

        match self.source.list_volumes() {
            Ok(volumes) => volumes
                .iter()
                .find(|volume| volume.is_primary)
                .is_some_and(|primary| primary.id == volume_id),
            Err(error) => {
                log::warn!(
                    "Cannot tell whether volume {} is primary: {}",
                    volume_id,
                    error
                );
                false
            }
        }
    }

    /// The volume whose mount point is the longest prefix of `absolute_path`.
    pub fn volume_containing(&self, absolute_path: &str) -> Result<Option<MountedVolume>> {
        let volumes = self.source.list_volumes()?;
        Ok(volumes
            .into_iter()
            .filter(|volume| contains_path(&volume.mount_path, absolute_path))
            .fold(None, |best: Option<MountedVolume>, volume| match best {
                Some(current) if current.mount_path.len() >= volume.mount_path.len() => {
                    Some(current)
                }
                _ => Some(volume),
            }))
    }

    /// True if `absolute_path` lies on a mounted volume other than the
    /// primary one (typically removable media).
    pub fn is_on_secondary_storage(&self, absolute_path: &str) -> Result<bool> {
        Ok(self
            .volume_containing(absolute_path)?
            .is_some_and(|volume| !volume.is_primary))
    }
}

/// Pick the volume `volume_id` names.
///
/// The primary alias, or the real id of the primary volume, selects the
/// primary volume. Anything else is the first exact id match.
fn match_volume<'a>(volumes: &'a [MountedVolume], volume_id: &str) -> Option<&'a MountedVolume> {
    let primary = volumes.iter().find(|volume| volume.is_primary);
    if let Some(primary) = primary {
        if volume_id == PRIMARY_ALIAS || primary.id == volume_id {
            return Some(primary);
        }
    }
    volumes.iter().find(|volume| volume.id == volume_id)
}

/// Segment-aware containment: `/storage/12` does not contain `/storage/123`.
fn contains_path(mount_path: &str, absolute_path: &str) -> bool {
    let mount_path = path::trim_trailing_separators(mount_path);
    path::is_child_of(absolute_path, mount_path)
        && (absolute_path.len() == mount_path.len()
            || absolute_path[mount_path.len()..].starts_with(path::SEPARATOR))
}
