//! # pdftitlerename
//!
//! A Rust library for renaming PDF files after the title and author recorded in
//! their own metadata.
//!
//! ## What this crate does
//!
//! 1. **Read metadata**: loads a PDF with `lopdf` and reads the classic
//!    `/Info` dictionary together with the XMP packet referenced by the
//!    catalog's `/Metadata` entry.
//! 2. **Reconcile**: merges both sources into one best-effort title and
//!    author (XMP wins when present, author lists collapse to surnames).
//! 3. **Synthesize a filename**: lowercase, dash-joined, sanitized and
//!    bounded to 254 characters including the `.pdf` extension.
//! 4. **Batch rename**: applies the above to every `*.pdf` in a directory and
//!    tallies what happened.
//!
//! ## Quick example
//!
//! ```no_run
//! use pdftitlerename::{filename, PdfSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = PdfSource::from_path("paper.pdf")?;
//! let meta = source.resolved_meta();
//!
//! if let Some(title) = meta.title.as_deref() {
//!     println!("{}", filename::synthesize(title, meta.author.as_deref()));
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod batch;
mod document;
pub mod filename;
pub mod info;
mod pdf_utils;
pub mod reconcile;
pub mod xmp;

pub use batch::{BatchRenamer, BatchReport};
pub use document::PdfSource;
pub use filename::SanitizeMode;
pub use info::{DocumentInfo, InfoText, InfoValue, NoReferences, ObjectResolver};
pub use reconcile::ResolvedMeta;
pub use xmp::{XmpMetadata, XmpValue};

// ── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration for [`BatchRenamer`].
#[derive(Debug, Clone, Default)]
pub struct RenameConfig {
    /// When `true`, the reconciled author's surname is prefixed to every new
    /// filename (`"smith.quantum-foo.pdf"`).
    pub use_author: bool,

    /// If set, each successfully renamed file is moved here afterwards. A
    /// directory receives the file under its new name; any other path is used
    /// as the target path itself.
    pub destination: Option<PathBuf>,

    /// Which filename segments pass through [`filename::sanitize`].
    pub sanitize: SanitizeMode,
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum MetaError {
    /// A filesystem I/O error occurred (e.g. when listing the input directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document loaded but has no usable structure to read metadata from.
    #[error("Malformed PDF document: {0}")]
    MalformedDocument(String),

    /// The underlying lopdf parser returned an error.
    #[error("PDF parse error: {0}")]
    ParseError(#[from] lopdf::Error),

    /// The XMP packet is not well-formed XML or has no `rdf:RDF` element.
    #[error("Malformed XMP packet: {0}")]
    MalformedXmp(String),

    /// A metadata string is not valid UTF-8.
    #[error("Could not decode {field} bytes: {bytes:?}")]
    UndecodableText { field: String, bytes: Vec<u8> },

    /// Renaming a file in place failed.
    #[error("Failed to rename '{}' to '{}': {source}", from.display(), to.display())]
    RenameFailure {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Moving a renamed file to the destination failed.
    #[error("Failed to move '{}' to '{}': {source}", from.display(), to.display())]
    MoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, MetaError>;
