//! Volumes read from a kernel mount table.
//!
//! The table uses the `/proc/mounts` line format:
//!
//! ```text
//! /dev/block/vold/public:179,1 /mnt/media_rw/1234-ABCD vfat rw,dirsync 0 0
//! ```
//!
//! Volume daemons mount removable media at a directory named after the
//! volume's filesystem UUID, so the last segment of the mount point doubles as
//! the volume id that document providers put into their handles.

use std::collections::HashSet;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use volpath_core::{path, Error, MountedVolume, Result, VolumeSource};

/// Where to read the table and which entries count as volumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MountTableConfig {
    /// The mount table file.
    pub path: PathBuf,
    /// Device prefixes of entries that are storage volumes.
    pub device_prefixes: Vec<String>,
    /// Mount point of primary storage, reported as the `primary` volume.
    pub primary_mount_path: Option<String>,
}

impl Default for MountTableConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/proc/self/mounts"),
            device_prefixes: vec!["/dev/block/vold/".to_string()],
            primary_mount_path: Some("/storage/emulated/0".to_string()),
        }
    }
}

/// A [`VolumeSource`] backed by a mount table file.
///
/// The file is re-read on every enumeration.
pub struct MountTable {
    config: MountTableConfig,
}

impl MountTable {
    pub fn new(config: MountTableConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MountTableConfig {
        &self.config
    }
}

impl Default for MountTable {
    fn default() -> Self {
        Self::new(MountTableConfig::default())
    }
}

impl VolumeSource for MountTable {
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        log::debug!("Reading {}...", self.config.path.display());
        let text = std::fs::read_to_string(&self.config.path).map_err(Error::enumeration)?;
        Ok(parse_mounts(&text, &self.config))
    }
}

/// Turn mount table text into volumes.
///
/// The configured primary volume comes first. Each remaining line whose
/// device matches a configured prefix yields one volume; a mount point seen
/// twice is reported once.
pub fn parse_mounts(text: &str, config: &MountTableConfig) -> Vec<MountedVolume> {
    let mut volumes = Vec::new();
    let mut seen = HashSet::new();

    if let Some(primary) = &config.primary_mount_path {
        let primary = path::normalize(primary);
        seen.insert(primary.clone());
        volumes.push(MountedVolume::primary(primary));
    }

    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            if !line.trim().is_empty() {
                log::debug!("Skipping mount line: {}", line);
            }
            continue;
        }

        let device = fields[0];
        if !config
            .device_prefixes
            .iter()
            .any(|prefix| device.starts_with(prefix.as_str()))
        {
            continue;
        }

        let mount_point = unescape(fields[1]);
        let mount_point = path::normalize(&mount_point);
        let id = path::file_name(&mount_point).to_string();
        if id.is_empty() || !seen.insert(mount_point.clone()) {
            continue;
        }

        volumes.push(MountedVolume::new(id, mount_point, false));
    }

    volumes
}

/// Decode the `\ooo` octal escapes the kernel uses for whitespace and
/// backslashes in mount points.
fn unescape(field: &str) -> String {
    lazy_static! {
        static ref OCTAL_ESCAPE: Regex = Regex::new(r"\\([0-7]{3})").unwrap();
    }

    OCTAL_ESCAPE
        .replace_all(field, |captures: &Captures| {
            u8::from_str_radix(&captures[1], 8)
                .ok()
                .map(char::from)
                .map(String::from)
                .unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}
