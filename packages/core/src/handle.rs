//! Tree handles and their decoded document ids.
//!
//! A tree handle is a URI. Its scheme tells the two kinds apart:
//!
//! ```text
//! file:///storage/emulated/0/Documents                  direct filesystem reference
//! content://<authority>/tree/<document id>[/document/…] provider tree token
//! ```
//!
//! A provider document id has the shape `<volume id>:<document path>`, e.g.
//! `primary:Documents/Notes` or `1234-ABCD:` for the root of a volume.

use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::{Error, HandleDecoder, Result};

const FILE_SCHEME: &str = "file";
const CONTENT_SCHEME: &str = "content";
const TREE_SEGMENT: &str = "tree";
const VOLUME_DELIMITER: char = ':';

/// What kind of reference a handle is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleScheme {
    /// A direct filesystem path.
    File,
    /// A provider-issued token that must be decoded.
    Content,
    /// Anything else.
    Other(String),
}

/// An opaque reference to a directory tree.
#[derive(Clone, Debug)]
pub struct TreeHandle {
    raw: String,
    uri: Url,
}

impl TreeHandle {
    /// Parse a handle string. Fails only if it is not a URI at all.
    pub fn parse(s: &str) -> Result<Self> {
        let uri = Url::parse(s).map_err(|e| Error::malformed(s, e.to_string()))?;
        Ok(Self {
            raw: s.to_string(),
            uri,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Schemes compare case-insensitively; the URI parser lowercases them.
    pub fn scheme(&self) -> HandleScheme {
        match self.uri.scheme() {
            FILE_SCHEME => HandleScheme::File,
            CONTENT_SCHEME => HandleScheme::Content,
            other => HandleScheme::Other(other.to_string()),
        }
    }

    /// The provider authority (`host` part), if any.
    pub fn authority(&self) -> Option<&str> {
        self.uri.host_str()
    }

    /// The percent-decoded path component.
    pub fn decoded_path(&self) -> Result<String> {
        percent_decode_str(self.uri.path())
            .decode_utf8()
            .map(|path| path.into_owned())
            .map_err(|e| Error::malformed(&self.raw, e.to_string()))
    }
}

impl fmt::Display for TreeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for TreeHandle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for TreeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for TreeHandle {}

/// A decoded provider document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    pub volume_id: String,
    /// Path below the volume root; empty for the root itself.
    pub document_path: String,
}

impl DocumentId {
    pub fn new(volume_id: impl Into<String>, document_path: impl Into<String>) -> Self {
        Self {
            volume_id: volume_id.into(),
            document_path: document_path.into(),
        }
    }

    /// Split `<volume id>:<document path>` at the first colon.
    ///
    /// Without a colon the whole string is the volume id and the document path
    /// is empty. Returns `None` when the volume id is empty.
    pub fn parse(document_id: &str) -> Option<Self> {
        let (volume_id, document_path) = document_id
            .split_once(VOLUME_DELIMITER)
            .unwrap_or((document_id, ""));
        if volume_id.is_empty() {
            return None;
        }
        Some(Self::new(volume_id, document_path))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.volume_id, VOLUME_DELIMITER, self.document_path)
    }
}

/// Decoder for document-provider tree URIs.
///
/// Expects `content://<authority>/tree/<document id>`; anything after the
/// tree document id (e.g. a `/document/<child>` suffix) is ignored.
#[derive(Debug, Clone, Default)]
pub struct TreeUriDecoder {
    authority: Option<String>,
}

impl TreeUriDecoder {
    /// Accept tree URIs from any authority.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept tree URIs from `authority` only.
    pub fn for_authority(authority: impl Into<String>) -> Self {
        Self {
            authority: Some(authority.into()),
        }
    }

    /// The raw tree document id, percent-decoded.
    fn tree_document_id(handle: &TreeHandle) -> Result<String> {
        let mut segments = handle
            .uri()
            .path_segments()
            .ok_or_else(|| Error::malformed(handle.as_str(), "handle has no path"))?;

        if segments.next() != Some(TREE_SEGMENT) {
            return Err(Error::malformed(handle.as_str(), "not a tree handle"));
        }

        let encoded = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| Error::malformed(handle.as_str(), "missing tree document id"))?;

        percent_decode_str(encoded)
            .decode_utf8()
            .map(|id| id.into_owned())
            .map_err(|e| Error::malformed(handle.as_str(), e.to_string()))
    }
}

impl HandleDecoder for TreeUriDecoder {
    fn decode_handle(&self, handle: &TreeHandle) -> Result<DocumentId> {
        if handle.scheme() != HandleScheme::Content {
            return Err(Error::malformed(handle.as_str(), "not a content handle"));
        }

        if let Some(expected) = &self.authority {
            if handle.authority() != Some(expected.as_str()) {
                return Err(Error::malformed(
                    handle.as_str(),
                    format!("unexpected authority, expected {}", expected),
                ));
            }
        }

        let document_id = Self::tree_document_id(handle)?;
        DocumentId::parse(&document_id)
            .ok_or_else(|| Error::malformed(handle.as_str(), "empty volume id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTERNAL: &str = "com.android.externalstorage.documents";

    fn handle(s: &str) -> TreeHandle {
        TreeHandle::parse(s).unwrap()
    }

    #[test]
    fn scheme_detection() {
        assert_eq!(handle("file:///sdcard/x").scheme(), HandleScheme::File);
        assert_eq!(handle("FILE:///sdcard/x").scheme(), HandleScheme::File);
        assert_eq!(
            handle("content://a/tree/primary%3A").scheme(),
            HandleScheme::Content
        );
        assert_eq!(
            handle("https://example.com/x").scheme(),
            HandleScheme::Other("https".to_string())
        );
    }

    #[test]
    fn not_a_uri_is_malformed() {
        let err = TreeHandle::parse("just some text").unwrap_err();
        assert!(matches!(err, Error::MalformedHandle { .. }));
    }

    #[test]
    fn decoded_path_unescapes() {
        assert_eq!(
            handle("file:///storage/emulated/0/My%20Files").decoded_path().unwrap(),
            "/storage/emulated/0/My Files"
        );
    }

    #[test]
    fn document_id_split() {
        assert_eq!(
            DocumentId::parse("primary:Documents/Notes"),
            Some(DocumentId::new("primary", "Documents/Notes"))
        );
        assert_eq!(
            DocumentId::parse("1234-ABCD:"),
            Some(DocumentId::new("1234-ABCD", ""))
        );
        assert_eq!(
            DocumentId::parse("1234-ABCD"),
            Some(DocumentId::new("1234-ABCD", ""))
        );
        assert_eq!(
            DocumentId::parse("primary:a:b"),
            Some(DocumentId::new("primary", "a:b"))
        );
        assert_eq!(DocumentId::parse(":Documents"), None);
        assert_eq!(DocumentId::parse(""), None);
    }

    #[test]
    fn document_id_display() {
        assert_eq!(
            DocumentId::new("primary", "DCIM").to_string(),
            "primary:DCIM"
        );
    }

    #[test]
    fn decode_tree_uri() {
        let decoder = TreeUriDecoder::new();
        let id = decoder
            .decode_handle(&handle(
                "content://com.android.externalstorage.documents/tree/primary%3ADocuments%2FNotes",
            ))
            .unwrap();
        assert_eq!(id, DocumentId::new("primary", "Documents/Notes"));
    }

    #[test]
    fn decode_ignores_document_suffix() {
        let decoder = TreeUriDecoder::new();
        let id = decoder
            .decode_handle(&handle(concat!(
                "content://com.android.externalstorage.documents/tree/1234-ABCD%3AMusic",
                "/document/1234-ABCD%3AMusic%2Fa.mp3",
            )))
            .unwrap();
        assert_eq!(id, DocumentId::new("1234-ABCD", "Music"));
    }

    #[test]
    fn decode_volume_root() {
        let decoder = TreeUriDecoder::new();
        let id = decoder
            .decode_handle(&handle("content://provider/tree/1234-ABCD%3A"))
            .unwrap();
        assert_eq!(id, DocumentId::new("1234-ABCD", ""));
    }

    #[test]
    fn decode_rejects_non_tree_paths() {
        let decoder = TreeUriDecoder::new();
        for uri in [
            "content://provider/document/primary%3AX",
            "content://provider/tree/",
            "content://provider/tree",
            "content://provider/tree/%3ADocuments",
            "file:///storage/emulated/0",
        ] {
            let err = decoder.decode_handle(&handle(uri)).unwrap_err();
            assert!(
                matches!(err, Error::MalformedHandle { .. }),
                "{} should be malformed, got {:?}",
                uri,
                err
            );
        }
    }

    #[test]
    fn decode_checks_authority() {
        let decoder = TreeUriDecoder::for_authority(EXTERNAL);
        assert!(decoder
            .decode_handle(&handle(
                "content://com.android.externalstorage.documents/tree/primary%3A"
            ))
            .is_ok());
        assert!(matches!(
            decoder.decode_handle(&handle("content://other.provider/tree/primary%3A")),
            Err(Error::MalformedHandle { .. })
        ));
    }

    #[test]
    fn handle_round_trips_through_from_str() {
        let parsed: TreeHandle = "content://provider/tree/primary%3A".parse().unwrap();
        assert_eq!(parsed.as_str(), "content://provider/tree/primary%3A");
        assert_eq!(parsed.authority(), Some("provider"));
    }
}
