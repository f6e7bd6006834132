//! XMP packet parsing.
//!
//! An XMP packet is an RDF/XML document. Only the shape needed to read
//! Dublin Core and friends is understood: every child element of every
//! `rdf:Description` becomes one `(namespace, tag) -> value` entry, where the
//! value is plain text, a list (`rdf:Bag` / `rdf:Seq`) or a language
//! alternative (`rdf:Alt`).
//!
//! ```
//! use pdftitlerename::xmp::{self, XmpValue};
//!
//! let packet = br#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
//!   <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
//!     <rdf:Description xmlns:dc="http://purl.org/dc/elements/1.1/">
//!       <dc:format>application/pdf</dc:format>
//!     </rdf:Description>
//!   </rdf:RDF>
//! </x:xmpmeta>"#;
//!
//! let meta = xmp::parse(packet).unwrap();
//! assert_eq!(meta.get("dc", "format"), Some(&XmpValue::Text("application/pdf".into())));
//! ```

use crate::{MetaError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::collections::BTreeMap;
use std::fmt::Display;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Namespace URIs with a well-known short alias.
const NS_ALIASES: [(&str, &str); 9] = [
    ("http://purl.org/dc/elements/1.1/", "dc"),
    ("http://ns.adobe.com/xap/1.0/", "xap"),
    ("http://ns.adobe.com/pdf/1.3/", "pdf"),
    ("http://ns.adobe.com/xap/1.0/mm/", "xapmm"),
    ("http://ns.adobe.com/pdfx/1.3/", "pdfx"),
    ("http://prismstandard.org/namespaces/basic/2.0/", "prism"),
    ("http://crossref.org/crossmark/1.0/", "crossmark"),
    ("http://ns.adobe.com/xap/1.0/rights/", "rights"),
    ("http://www.w3.org/XML/1998/namespace", "xml"),
];

/// Short alias for a namespace URI, or the URI itself when it is not one of
/// the recognised XMP namespaces.
pub fn namespace_alias(uri: &str) -> &str {
    NS_ALIASES
        .iter()
        .find(|(known, _)| *known == uri)
        .map(|(_, alias)| *alias)
        .unwrap_or(uri)
}

// ── XmpValue ─────────────────────────────────────────────────────────────────

/// The value of one XMP property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmpValue {
    /// Simple property. Empty when the element had no text.
    Text(String),
    /// `rdf:Bag` or `rdf:Seq` items, in document order.
    List(Vec<String>),
    /// `rdf:Alt` items keyed by `xml:lang`.
    LangAlt(BTreeMap<String, String>),
}

// ── XmpMetadata ──────────────────────────────────────────────────────────────

/// Namespace alias → tag → value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmpMetadata {
    namespaces: BTreeMap<String, BTreeMap<String, XmpValue>>,
}

impl XmpMetadata {
    pub fn get(&self, namespace: &str, tag: &str) -> Option<&XmpValue> {
        self.namespaces.get(namespace)?.get(tag)
    }

    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, XmpValue>> {
        self.namespaces.get(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// The tag map for `namespace`, created empty on first use.
    pub fn namespace_mut(&mut self, namespace: &str) -> &mut BTreeMap<String, XmpValue> {
        self.namespaces.entry(namespace.to_owned()).or_default()
    }

    /// Store `value`, replacing whatever an earlier Description block set.
    pub fn insert(&mut self, namespace: &str, tag: impl Into<String>, value: XmpValue) {
        self.namespace_mut(namespace).insert(tag.into(), value);
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse an XMP packet.
///
/// Fails with [`MetaError::MalformedXmp`] when the packet is not well-formed
/// XML or contains no `rdf:RDF` element at the root or directly below it.
pub fn parse(packet: &[u8]) -> Result<XmpMetadata> {
    let root = read_tree(packet)?;

    let rdf = if root.is(RDF_NS, "RDF") {
        &root
    } else {
        root.child(RDF_NS, "RDF")
            .ok_or_else(|| MetaError::MalformedXmp("no rdf:RDF element".into()))?
    };

    let mut meta = XmpMetadata::default();
    for description in rdf.children_named(RDF_NS, "Description") {
        for property in &description.children {
            let namespace = property.namespace.as_deref().map(namespace_alias).unwrap_or("");
            meta.insert(namespace, property.local.clone(), property_value(property));
        }
    }
    Ok(meta)
}

/// Bag, then Seq, then Alt, then plain text.
fn property_value(property: &Element) -> XmpValue {
    for container in ["Bag", "Seq"] {
        if property.child(RDF_NS, container).is_some() {
            let items = property
                .children_named(RDF_NS, container)
                .flat_map(|list| list.children_named(RDF_NS, "li"))
                .map(|li| li.text.clone())
                .collect();
            return XmpValue::List(items);
        }
    }

    if property.child(RDF_NS, "Alt").is_some() {
        let alternatives = property
            .children_named(RDF_NS, "Alt")
            .flat_map(|alt| alt.children_named(RDF_NS, "li"))
            .filter_map(|li| Some((li.lang.clone()?, li.text.clone())))
            .collect();
        return XmpValue::LangAlt(alternatives);
    }

    XmpValue::Text(property.text.clone())
}

// ── Element tree ─────────────────────────────────────────────────────────────

/// Just enough of an XML element to answer the questions above.
#[derive(Debug)]
struct Element {
    namespace: Option<String>,
    local: String,
    lang: Option<String>,
    /// Character data before the first child element.
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn open(namespace: ResolveResult, start: &BytesStart) -> Result<Self> {
        let namespace = match namespace {
            ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(malformed(format!(
                    "unbound prefix '{}'",
                    String::from_utf8_lossy(&prefix)
                )))
            }
        };

        let mut lang = None;
        for attribute in start.attributes() {
            let attribute = attribute.map_err(malformed)?;
            if attribute.key.as_ref() == b"xml:lang" {
                lang = Some(attribute.unescape_value().map_err(malformed)?.into_owned());
            }
        }

        Ok(Self {
            namespace,
            local: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            lang,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }

    fn child<'a>(&'a self, namespace: &'a str, local: &'a str) -> Option<&'a Element> {
        self.children_named(namespace, local).next()
    }

    fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is(namespace, local))
    }

    fn push_text(&mut self, text: &str) {
        if self.children.is_empty() {
            self.text.push_str(text);
        }
    }
}

fn malformed(err: impl Display) -> MetaError {
    MetaError::MalformedXmp(err.to_string())
}

/// Read the whole packet into an element tree and return its root.
fn read_tree(packet: &[u8]) -> Result<Element> {
    let mut reader = NsReader::from_reader(packet);
    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (namespace, event) = reader.read_resolved_event_into(&mut buf).map_err(malformed)?;
        match event {
            Event::Start(start) => {
                if open.is_empty() && root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                open.push(Element::open(namespace, &start)?);
            }
            Event::Empty(start) => {
                if open.is_empty() && root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                let element = Element::open(namespace, &start)?;
                close(element, &mut open, &mut root);
            }
            Event::End(_) => {
                let element = open.pop().ok_or_else(|| malformed("unexpected end tag"))?;
                close(element, &mut open, &mut root);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(malformed)?;
                match open.last_mut() {
                    Some(parent) => parent.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(malformed("text outside the root element")),
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8(data.into_inner().into_owned()).map_err(malformed)?;
                match open.last_mut() {
                    Some(parent) => parent.push_text(&text),
                    None => return Err(malformed("CDATA outside the root element")),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !open.is_empty() {
        return Err(malformed("unexpected end of packet"));
    }
    root.ok_or_else(|| malformed("no root element"))
}

fn close(element: Element, open: &mut Vec<Element>, root: &mut Option<Element>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
