use crate::info::{DocumentInfo, InfoValue, ObjectResolver};
use crate::reconcile::{self, ResolvedMeta};
use crate::{pdf_utils, MetaError, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;

// ── PdfSource ────────────────────────────────────────────────────────────────

/// A loaded PDF, viewed only as a source of title/author metadata.
///
/// # Creating a source
///
/// ```no_run
/// use pdftitlerename::PdfSource;
///
/// // From a file path
/// let s = PdfSource::from_path("paper.pdf").unwrap();
///
/// // From an in-memory buffer
/// let bytes = std::fs::read("paper.pdf").unwrap();
/// let s = PdfSource::from_bytes(&bytes).unwrap();
///
/// println!("{:?}", s.resolved_meta());
/// ```
pub struct PdfSource {
    document: Document,
}

impl PdfSource {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Load a PDF from the file system. The file is read completely and
    /// closed before this returns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            document: Document::load(path)?,
        })
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            document: Document::load_mem(data)?,
        })
    }

    // ── Metadata sources ──────────────────────────────────────────────────────

    /// The trailer's `/Info` dictionary. A document without one yields an
    /// empty [`DocumentInfo`].
    ///
    /// Returns [`MetaError::MalformedDocument`] when `/Info` exists but is not
    /// a dictionary, or points at an object that does not exist.
    pub fn info(&self) -> Result<DocumentInfo> {
        let value = match self.document.trailer.get(b"Info") {
            Ok(value) => value,
            Err(_) => return Ok(DocumentInfo::new()),
        };

        let dict = pdf_utils::resolve_once(&self.document, value)
            .and_then(|object| object.as_dict())
            .map_err(|e| MetaError::MalformedDocument(format!("unusable /Info entry: {e}")))?;

        Ok(DocumentInfo::from_dictionary(dict))
    }

    /// Returns `true` when the catalog has a `/Metadata` entry.
    pub fn catalog_has_metadata(&self) -> bool {
        self.document
            .catalog()
            .map(|catalog| catalog.has(b"Metadata"))
            .unwrap_or(false)
    }

    /// Walk catalog → /Metadata → stream → decoded bytes.
    ///
    /// Returns `None` when any step along the way is missing or of the wrong
    /// type.
    pub fn xmp_packet(&self) -> Option<Vec<u8>> {
        let catalog = self.document.catalog().ok()?;
        let metadata = catalog.get(b"Metadata").ok()?;
        let stream = pdf_utils::resolve_once(&self.document, metadata)
            .and_then(|object| object.as_stream())
            .ok()?;
        Some(pdf_utils::stream_bytes(stream))
    }

    /// Run the full reconciliation for this document.
    ///
    /// An unusable `/Info` entry is treated as an empty dictionary so the XMP
    /// packet can still supply a title and author.
    pub fn resolved_meta(&self) -> ResolvedMeta {
        let info = self.info().unwrap_or_else(|e| {
            tracing::debug!("{e}");
            DocumentInfo::new()
        });
        let packet = self.xmp_packet();
        reconcile::resolve(&info, self, packet.as_deref(), self.catalog_has_metadata())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Returns a reference to the underlying [`lopdf::Document`].
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl ObjectResolver for PdfSource {
    fn resolve(&self, id: ObjectId) -> Option<InfoValue> {
        self.document.get_object(id).ok().map(InfoValue::from)
    }
}
