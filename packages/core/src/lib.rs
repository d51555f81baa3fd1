//! volpath core: tree handles to real filesystem paths.
//!
//! This layer resolves provider-issued tree handles against the storage
//! volumes a device currently has mounted:
//! - `path`: `/`-separated path algebra (join, parent, relative)
//! - `size`: human-readable byte counts
//! - `VolumeResolver`: match a volume id or the `primary` alias to a mount point
//! - `TreeHandleResolver`: decode a handle and build its absolute path
//!
//! Platform specifics (how volumes are enumerated, how handles are encoded)
//! come in through the [`VolumeSource`] and [`HandleDecoder`] traits.
//!
//! # Example
//!
//! ```rust
//! use volpath_core::{Error, MountedVolume, TreeHandleResolver, TreeUriDecoder};
//!
//! let resolver = TreeHandleResolver::new(
//!     vec![MountedVolume::primary("/storage/emulated/0")],
//!     TreeUriDecoder::new(),
//! );
//!
//! let handle = "content://com.android.externalstorage.documents/tree/primary%3ADCIM";
//! assert_eq!(resolver.resolve_str(handle).unwrap(), "/storage/emulated/0/DCIM");
//!
//! let removed = "content://com.android.externalstorage.documents/tree/1234-ABCD%3A";
//! assert!(matches!(resolver.resolve_str(removed), Err(Error::VolumeUnavailable { .. })));
//! ```

mod config;
mod error;
mod handle;
pub mod layered;
mod name;
pub mod path;
pub mod size;
mod traits;
mod tree;
mod volume;

pub use config::{ResolverConfig, PRIMARY_ALIAS};
pub use error::{Error, Result};
pub use handle::{DocumentId, HandleScheme, TreeHandle, TreeUriDecoder};
pub use layered::LayeredSource;
pub use name::display_name;
pub use size::{format_size, ByteSize};
pub use traits::{from_fn, DisplayNameResolver, FromFn, HandleDecoder, NoMetadata, VolumeSource};
pub use tree::TreeHandleResolver;
pub use volume::{MountedVolume, VolumeResolver};
