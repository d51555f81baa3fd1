//! Collaborator traits: VolumeSource, HandleDecoder, DisplayNameResolver.
//!
//! The resolvers never talk to the platform directly. Everything volatile
//! (which volumes are mounted, how a provider encodes its handles, where
//! display names live) sits behind one of these traits.

use std::sync::Arc;

use crate::handle::{DocumentId, TreeHandle};
use crate::volume::MountedVolume;
use crate::Result;

/// Enumerate the volumes mounted right now.
///
/// Implementations must not cache across calls: every call reflects the
/// current mount state. An empty list is a valid answer.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn VolumeSource>`.
pub trait VolumeSource: Send + Sync {
    fn list_volumes(&self) -> Result<Vec<MountedVolume>>;
}

/// Decode a provider tree handle into its volume id and document path.
pub trait HandleDecoder: Send + Sync {
    /// # Returns
    ///
    /// * `Ok(id)` - The decoded document id.
    /// * `Err(Error::MalformedHandle)` - The handle is not a tree handle this
    ///   decoder understands.
    fn decode_handle(&self, handle: &TreeHandle) -> Result<DocumentId>;
}

/// Look up a human-facing name for a `content` reference.
pub trait DisplayNameResolver: Send + Sync {
    fn resolve_display_name(&self, reference: &str) -> Option<String>;
}

/// A resolver with no metadata source. Every lookup misses.
pub struct NoMetadata;

impl DisplayNameResolver for NoMetadata {
    fn resolve_display_name(&self, _reference: &str) -> Option<String> {
        None
    }
}

/// A fixed snapshot of volumes.
impl VolumeSource for Vec<MountedVolume> {
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        Ok(self.clone())
    }
}

/// Adapter turning a closure into a collaborator.
///
/// ```rust
/// use volpath_core::{from_fn, MountedVolume, VolumeSource};
///
/// let source = from_fn(|| -> volpath_core::Result<Vec<MountedVolume>> {
///     Ok(vec![MountedVolume::primary("/storage/emulated/0")])
/// });
/// assert_eq!(source.list_volumes().unwrap().len(), 1);
/// ```
pub struct FromFn<F>(F);

pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F> VolumeSource for FromFn<F>
where
    F: Fn() -> Result<Vec<MountedVolume>> + Send + Sync,
{
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        (self.0)()
    }
}

impl<F> HandleDecoder for FromFn<F>
where
    F: Fn(&TreeHandle) -> Result<DocumentId> + Send + Sync,
{
    fn decode_handle(&self, handle: &TreeHandle) -> Result<DocumentId> {
        (self.0)(handle)
    }
}

impl<F> DisplayNameResolver for FromFn<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve_display_name(&self, reference: &str) -> Option<String> {
        (self.0)(reference)
    }
}

// Blanket implementations for references and smart pointers

impl<T: VolumeSource + ?Sized> VolumeSource for &T {
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        (**self).list_volumes()
    }
}

impl<T: VolumeSource + ?Sized> VolumeSource for Box<T> {
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        (**self).list_volumes()
    }
}

impl<T: VolumeSource + ?Sized> VolumeSource for Arc<T> {
    fn list_volumes(&self) -> Result<Vec<MountedVolume>> {
        (**self).list_volumes()
    }
}

impl<T: HandleDecoder + ?Sized> HandleDecoder for &T {
    fn decode_handle(&self, handle: &TreeHandle) -> Result<DocumentId> {
        (**self).decode_handle(handle)
    }
}

impl<T: HandleDecoder + ?Sized> HandleDecoder for Box<T> {
    fn decode_handle(&self, handle: &TreeHandle) -> Result<DocumentId> {
        (**self).decode_handle(handle)
    }
}

impl<T: HandleDecoder + ?Sized> HandleDecoder for Arc<T> {
    fn decode_handle(&self, handle: &TreeHandle) -> Result<DocumentId> {
        (**self).decode_handle(handle)
    }
}

impl<T: DisplayNameResolver + ?Sized> DisplayNameResolver for &T {
    fn resolve_display_name(&self, reference: &str) -> Option<String> {
        (**self).resolve_display_name(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn no_metadata_misses() {
        assert_eq!(NoMetadata.resolve_display_name("content://x/y"), None);
    }

    #[test]
    fn snapshot_source_returns_copy() {
        let volumes = vec![MountedVolume::new("1234-ABCD", "/storage/1234-ABCD", false)];
        assert_eq!(volumes.list_volumes().unwrap(), volumes);
    }

    #[test]
    fn closure_source() {
        let source =
            from_fn(|| -> Result<Vec<MountedVolume>> { Err(Error::enumeration("unplugged")) });
        assert!(matches!(source.list_volumes(), Err(Error::Enumeration(_))));
    }

    #[test]
    fn boxed_source_is_object_safe() {
        let source: Box<dyn VolumeSource> =
            Box::new(vec![MountedVolume::primary("/storage/emulated/0")]);
        assert_eq!(source.list_volumes().unwrap().len(), 1);
    }

    #[test]
    fn closure_decoder() {
        let decoder = from_fn(|_: &TreeHandle| -> Result<DocumentId> {
            Ok(DocumentId::new("primary", "DCIM"))
        });
        let handle = TreeHandle::parse("content://provider/tree/whatever").unwrap();
        assert_eq!(decoder.decode_handle(&handle).unwrap().volume_id, "primary");
    }

    #[test]
    fn closure_display_names() {
        let names = from_fn(|reference: &str| {
            reference.ends_with("/7").then(|| "holiday.jpg".to_string())
        });
        assert_eq!(
            names.resolve_display_name("content://media/7").as_deref(),
            Some("holiday.jpg")
        );
        assert_eq!(names.resolve_display_name("content://media/8"), None);
    }
}
