//! Merge the `/Info` dictionary and the XMP packet into one title and author.

use crate::info::{DocumentInfo, InfoText, ObjectResolver};
use crate::xmp::{self, XmpMetadata, XmpValue};
use crate::MetaError;
use tracing::{debug, warn};

// ── ResolvedMeta ─────────────────────────────────────────────────────────────

/// The best title and author found for one document.
///
/// `author` is a display string: a single surname, or `"<first> <last>"`
/// surnames when the XMP lists several creators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMeta {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl ResolvedMeta {
    /// `true` when neither a title nor an author was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}

// ── Reconciliation ───────────────────────────────────────────────────────────

/// Work out the title and author of a document.
///
/// The `/Info` values form the baseline. When the catalog declares a
/// `/Metadata` stream and `xmp_packet` parses, a non-empty `dc:title` and a
/// non-empty collapsed `dc:creator` each replace their baseline independently.
/// A packet that does not parse is ignored.
///
/// ```
/// use pdftitlerename::info::NoReferences;
/// use pdftitlerename::{reconcile, DocumentInfo};
///
/// let info: DocumentInfo = [("Title", &b"Quantum Foo"[..]), ("Author", &b"A. Smith"[..])]
///     .into_iter()
///     .collect();
/// let meta = reconcile::resolve(&info, &NoReferences, None, false);
///
/// assert_eq!(meta.title.as_deref(), Some("Quantum Foo"));
/// assert_eq!(meta.author.as_deref(), Some("Smith"));
/// ```
pub fn resolve<R>(
    info: &DocumentInfo,
    resolver: &R,
    xmp_packet: Option<&[u8]>,
    catalog_has_metadata: bool,
) -> ResolvedMeta
where
    R: ObjectResolver + ?Sized,
{
    let mut title = info_text(info, resolver, "Title");
    let mut author = info_text(info, resolver, "Author").and_then(|a| surname(&a).map(str::to_owned));

    if catalog_has_metadata {
        if let Some(packet) = xmp_packet {
            match xmp::parse(packet) {
                Ok(meta) => {
                    if let Some(t) = xmp_title(&meta).filter(|t| !t.is_empty()) {
                        title = Some(t);
                    }
                    if let Some(a) = xmp_author(&meta) {
                        author = Some(a);
                    }
                }
                Err(e) => debug!("ignoring XMP metadata: {e}"),
            }
        }
    }

    ResolvedMeta {
        title: title.and_then(clean_title),
        author,
    }
}

/// Decode one `/Info` field as UTF-8, following one indirect reference.
///
/// Undecodable bytes are reported and leave the field unset.
fn info_text<R>(info: &DocumentInfo, resolver: &R, field: &str) -> Option<String>
where
    R: ObjectResolver + ?Sized,
{
    match info.resolved(field, resolver)? {
        InfoText::Text(text) => Some(text),
        InfoText::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                let err = MetaError::UndecodableText {
                    field: field.to_ascii_lowercase(),
                    bytes: e.into_bytes(),
                };
                warn!("{err}");
                None
            }
        },
        InfoText::Other => None,
    }
}

/// `dc:title`: the `x-default` alternative, or a plain string.
pub fn xmp_title(meta: &XmpMetadata) -> Option<String> {
    match meta.get("dc", "title")? {
        XmpValue::LangAlt(alternatives) => alternatives.get("x-default").cloned(),
        XmpValue::Text(text) => Some(text.clone()),
        XmpValue::List(_) => None,
    }
}

/// `dc:creator` collapsed to a display string.
pub fn xmp_author(meta: &XmpMetadata) -> Option<String> {
    match meta.get("dc", "creator")? {
        XmpValue::Text(name) => collapse_authors(std::slice::from_ref(name)),
        XmpValue::List(names) => collapse_authors(names),
        XmpValue::LangAlt(_) => None,
    }
}

/// No names → `None`; one → its surname; more → first and last surnames.
///
/// ```
/// # use pdftitlerename::reconcile::collapse_authors;
/// let names = ["Ada Lovelace".to_string(), "".into(), "Charles Babbage".into()];
/// assert_eq!(collapse_authors(&names).as_deref(), Some("Lovelace Babbage"));
/// ```
pub fn collapse_authors<S: AsRef<str>>(names: &[S]) -> Option<String> {
    let surnames: Vec<&str> = names.iter().filter_map(|n| surname(n.as_ref())).collect();
    match surnames.as_slice() {
        [] => None,
        [only] => Some((*only).to_owned()),
        [first, .., last] => Some(format!("{first} {last}")),
    }
}

/// Last whitespace-delimited token of a name.
pub fn surname(name: &str) -> Option<&str> {
    name.split_whitespace().next_back()
}

/// Trim, and drop placeholder titles.
fn clean_title(title: String) -> Option<String> {
    let title = title.trim();
    if title.is_empty() || title.eq_ignore_ascii_case("untitled") {
        None
    } else {
        Some(title.to_owned())
    }
}
