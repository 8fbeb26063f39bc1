//! Compound file container abstraction layer.
//!
//! Provides a trait-based interface for the two operations the extractor
//! needs from an OLE2/CFB container (list entries, read a stream), isolating
//! the concrete container library (cfb) from the HWP parsing logic.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of a container entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A byte stream
    Stream,
    /// A directory holding other entries
    Storage,
}

/// One entry of a compound file, addressed by its `/`-separated path
/// relative to the root (e.g. `BodyText/Section0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEntry {
    /// Entry path without leading separator
    pub path: String,
    /// Entry kind
    pub kind: EntryKind,
}

impl ContainerEntry {
    /// Create a stream entry.
    pub fn stream(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Stream,
        }
    }

    /// Create a storage entry.
    pub fn storage(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Storage,
        }
    }

    /// Check if the entry is a stream.
    pub fn is_stream(&self) -> bool {
        self.kind == EntryKind::Stream
    }

    /// Split the path into its components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|c| !c.is_empty())
    }
}

/// Abstract interface for compound file access.
///
/// Both operations take `&mut self` because reading a stream moves the
/// underlying reader. Implementations report their own failures as
/// [`Error::ContainerUnreadable`].
pub trait Container {
    /// Return every entry of the container except the root.
    fn list_entries(&mut self) -> Result<Vec<ContainerEntry>>;

    /// Return the full contents of the stream at `path`.
    fn read_stream(&mut self, path: &str) -> Result<Vec<u8>>;
}

impl<C: Container + ?Sized> Container for &mut C {
    fn list_entries(&mut self) -> Result<Vec<ContainerEntry>> {
        (**self).list_entries()
    }

    fn read_stream(&mut self, path: &str) -> Result<Vec<u8>> {
        (**self).read_stream(path)
    }
}

// ---------------------------------------------------------------------------
// CfbContainer: implementation backed by the cfb crate
// ---------------------------------------------------------------------------

/// Concrete [`Container`] backed by `cfb::CompoundFile`.
pub struct CfbContainer<F> {
    inner: cfb::CompoundFile<F>,
}

impl CfbContainer<File> {
    /// Open a compound file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl CfbContainer<Cursor<Vec<u8>>> {
    /// Load from an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(data))
    }

    /// Load from a reader by buffering it fully.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }
}

impl<F: Read + Seek> CfbContainer<F> {
    /// Wrap any seekable reader holding a compound file.
    pub fn new(inner: F) -> Result<Self> {
        let inner = cfb::CompoundFile::open(inner)
            .map_err(|e| Error::ContainerUnreadable(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Direct access to the underlying `cfb::CompoundFile`.
    pub fn raw(&self) -> &cfb::CompoundFile<F> {
        &self.inner
    }
}

impl<F: Read + Seek> Container for CfbContainer<F> {
    fn list_entries(&mut self) -> Result<Vec<ContainerEntry>> {
        let entries = self
            .inner
            .walk()
            .filter(|entry| !entry.is_root())
            .map(|entry| {
                let kind = if entry.is_stream() {
                    EntryKind::Stream
                } else {
                    EntryKind::Storage
                };
                ContainerEntry {
                    path: entry_path(entry.path()),
                    kind,
                }
            })
            .collect();
        Ok(entries)
    }

    fn read_stream(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut stream = self
            .inner
            .open_stream(format!("/{}", path))
            .map_err(|e| Error::ContainerUnreadable(format!("{}: {}", path, e)))?;

        let mut data = Vec::new();
        stream
            .read_to_end(&mut data)
            .map_err(|e| Error::ContainerUnreadable(format!("{}: {}", path, e)))?;
        Ok(data)
    }
}

/// Render a cfb entry path with `/` separators and no root marker.
fn entry_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_container() -> Vec<u8> {
        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_storage("/BodyText").unwrap();
        comp.create_stream("/FileHeader")
            .unwrap()
            .write_all(b"header")
            .unwrap();
        comp.create_stream("/BodyText/Section0")
            .unwrap()
            .write_all(b"body")
            .unwrap();
        comp.flush().unwrap();
        comp.into_inner().into_inner()
    }

    #[test]
    fn test_entry_path_rendering() {
        assert_eq!(entry_path(Path::new("/BodyText/Section0")), "BodyText/Section0");
        assert_eq!(entry_path(Path::new("/FileHeader")), "FileHeader");
        assert_eq!(entry_path(Path::new("/")), "");
    }

    #[test]
    fn test_cfb_list_entries() {
        let mut container = CfbContainer::from_bytes(build_container()).unwrap();
        let entries = container.list_entries().unwrap();

        assert!(entries.contains(&ContainerEntry::stream("FileHeader")));
        assert!(entries.contains(&ContainerEntry::storage("BodyText")));
        assert!(entries.contains(&ContainerEntry::stream("BodyText/Section0")));
        assert!(entries.iter().all(|e| !e.path.is_empty()));
    }

    #[test]
    fn test_cfb_read_stream() {
        let mut container = CfbContainer::from_bytes(build_container()).unwrap();
        assert_eq!(container.read_stream("BodyText/Section0").unwrap(), b"body");
        assert_eq!(container.read_stream("FileHeader").unwrap(), b"header");
    }

    #[test]
    fn test_cfb_missing_stream_is_unreadable() {
        let mut container = CfbContainer::from_bytes(build_container()).unwrap();
        let result = container.read_stream("BodyText/Section9");
        assert!(matches!(result, Err(Error::ContainerUnreadable(_))));
    }

    #[test]
    fn test_not_a_compound_file() {
        let result = CfbContainer::from_bytes(b"plain text, not a container".to_vec());
        assert!(matches!(result, Err(Error::ContainerUnreadable(_))));
    }

    #[test]
    fn test_entry_components() {
        let entry = ContainerEntry::stream("BodyText/Section3");
        let parts: Vec<_> = entry.components().collect();
        assert_eq!(parts, vec!["BodyText", "Section3"]);
    }
}
