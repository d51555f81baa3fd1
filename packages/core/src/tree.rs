//! Tree handle resolution: handle in, absolute filesystem path out.

use crate::handle::{HandleScheme, TreeHandle};
use crate::path;
use crate::volume::VolumeResolver;
use crate::{Error, HandleDecoder, ResolverConfig, Result, VolumeSource};

/// Resolves tree handles to absolute paths on the mounted volumes.
///
/// The resolver holds no per-call state; share it freely (e.g. behind an
/// `Arc`) between threads.
///
/// # Example
///
/// ```rust
/// use volpath_core::{MountedVolume, TreeHandleResolver, TreeUriDecoder};
///
/// let volumes = vec![
///     MountedVolume::primary("/storage/emulated/0"),
///     MountedVolume::new("1234-ABCD", "/storage/1234-ABCD", false),
/// ];
/// let resolver = TreeHandleResolver::new(volumes, TreeUriDecoder::new());
///
/// let path = resolver
///     .resolve_str("content://com.android.externalstorage.documents/tree/1234-ABCD%3AMusic")
///     .unwrap();
/// assert_eq!(path, "/storage/1234-ABCD/Music");
/// ```
pub struct TreeHandleResolver<S, D> {
    volumes: VolumeResolver<S>,
    decoder: D,
}

impl<S: VolumeSource, D: HandleDecoder> TreeHandleResolver<S, D> {
    pub fn new(source: S, decoder: D) -> Self {
        Self::with_config(source, decoder, ResolverConfig::default())
    }

    pub fn with_config(source: S, decoder: D, config: ResolverConfig) -> Self {
        Self {
            volumes: VolumeResolver::with_config(source, config),
            decoder,
        }
    }

    pub fn volumes(&self) -> &VolumeResolver<S> {
        &self.volumes
    }

    /// Resolve `handle` to an absolute path.
    ///
    /// `file` handles return their own path without decoding. `content`
    /// handles are decoded, matched against the currently mounted volumes and
    /// joined with their document path.
    ///
    /// # Errors
    ///
    /// * `MalformedHandle` - The handle cannot be decoded.
    /// * `VolumeUnavailable` - No mounted volume matches the decoded id.
    /// * `Enumeration` - The volume source failed.
    /// * `UnsupportedScheme` - Neither a `file` nor a `content` handle.
    pub fn resolve(&self, handle: &TreeHandle) -> Result<String> {
        match handle.scheme() {
            HandleScheme::File => handle.decoded_path(),
            HandleScheme::Content => self.resolve_tree(handle),
            HandleScheme::Other(scheme) => Err(Error::UnsupportedScheme { scheme }),
        }
    }

    /// Parse and resolve a handle string.
    pub fn resolve_str(&self, handle: &str) -> Result<String> {
        self.resolve(&TreeHandle::parse(handle)?)
    }

    /// True if the handle's volume is primary storage. Handles that cannot be
    /// decoded are never on primary storage.
    pub fn is_on_primary_storage(&self, handle: &TreeHandle) -> bool {
        match self.decoder.decode_handle(handle) {
            Ok(id) => self.volumes.is_on_primary_storage(&id.volume_id),
            Err(error) => {
                log::debug!("Not a decodable tree handle: {}", error);
                false
            }
        }
    }

    fn resolve_tree(&self, handle: &TreeHandle) -> Result<String> {
        let id = self.decoder.decode_handle(handle)?;
        log::debug!("Volume Id: {}", id.volume_id);

        let mount_path = self
            .volumes
            .find_mount_path(&id.volume_id)?
            .ok_or_else(|| Error::VolumeUnavailable {
                volume_id: id.volume_id.clone(),
            })?;
        log::debug!("Volume Path: {}", mount_path);

        // A volume mounted at `/` keeps its root separator.
        let mount_path = path::normalize(&mount_path);
        let document_path = path::trim_trailing_separators(&id.document_path);
        log::debug!("Document Path: {}", document_path);

        if document_path.is_empty() {
            Ok(mount_path)
        } else {
            Ok(path::normalize(&path::join(&[mount_path.as_str(), document_path])))
        }
    }
}
