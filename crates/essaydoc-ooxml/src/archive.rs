//! In-memory OOXML packages
//!
//! A package is a map from part name to bytes. The writer fills one and
//! serializes it; tests and the CLI `inspect` command load generated files
//! back into the same shape.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Parts of an OOXML package, kept in name order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OoxmlArchive {
    parts: BTreeMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a package from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Load a package from any seekable reader. Directory entries are skipped.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;
        let mut parts = BTreeMap::new();

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            parts.insert(entry.name().to_string(), bytes);
        }

        Ok(Self { parts })
    }

    /// Raw bytes of a part
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    /// A part decoded as UTF-8 (lossy)
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// `word/document.xml`, which every WordprocessingML package must carry
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.require(DOCUMENT_PART)
    }

    /// `word/styles.xml`
    pub fn styles_xml(&self) -> Result<&[u8]> {
        self.require(STYLES_PART)
    }

    fn require(&self, name: &str) -> Result<&[u8]> {
        self.get(name)
            .ok_or_else(|| OoxmlError::MissingFile(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Add or replace a part
    pub fn insert(&mut self, name: impl Into<String>, xml: impl Into<String>) {
        self.parts.insert(name.into(), xml.into().into_bytes());
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(File::create(path)?)
    }

    /// Serialize as a deflated zip. Parts go out in name order, which puts
    /// `[Content_Types].xml` first.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &self.parts {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(bytes)?;
        }

        zip.finish()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_read_back() {
        let mut archive = OoxmlArchive::new();
        assert!(archive.is_empty());

        archive.insert("test.xml", "<root/>");
        assert!(archive.contains("test.xml"));
        assert_eq!(archive.text("test.xml").as_deref(), Some("<root/>"));
        assert!(archive.text("other.xml").is_none());
    }

    #[test]
    fn test_missing_parts() {
        let archive = OoxmlArchive::new();
        assert!(matches!(
            archive.document_xml(),
            Err(OoxmlError::MissingFile(ref p)) if p == "word/document.xml"
        ));
        assert!(archive.styles_xml().is_err());
    }

    #[test]
    fn test_zip_round_trip_keeps_content_types_first() {
        let mut archive = OoxmlArchive::new();
        archive.insert("word/document.xml", "<w:document/>");
        archive.insert("[Content_Types].xml", "<Types/>");

        let bytes = archive.to_bytes().unwrap();
        let restored = OoxmlArchive::from_reader(Cursor::new(bytes.clone())).unwrap();
        assert_eq!(restored, archive);
        assert_eq!(restored.document_xml().unwrap(), b"<w:document/>");

        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.by_index(0).unwrap().name(), "[Content_Types].xml");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");

        let mut archive = OoxmlArchive::new();
        archive.insert("word/document.xml", "<w:document/>");
        archive.write_to_file(&path).unwrap();

        let reopened = OoxmlArchive::open(&path).unwrap();
        assert!(reopened.contains("word/document.xml"));
    }
}
