//! # volpath-sys
//!
//! Platform volume sources for volpath.
//!
//! The core resolver only knows the [`VolumeSource`](volpath_core::VolumeSource)
//! trait. This crate provides implementations that discover volumes on a
//! real system, keeping platform parsing out of the core.
//!
//! ## Example
//!
//! ```rust,no_run
//! use volpath_core::{TreeHandleResolver, TreeUriDecoder};
//! use volpath_sys::{MountTable, MountTableConfig};
//!
//! let resolver = TreeHandleResolver::new(
//!     MountTable::new(MountTableConfig::default()),
//!     TreeUriDecoder::new(),
//! );
//! let path = resolver.resolve_str(
//!     "content://com.android.externalstorage.documents/tree/1234-ABCD%3AMusic",
//! );
//! ```

pub mod mount_table;

pub use mount_table::{parse_mounts, MountTable, MountTableConfig};
