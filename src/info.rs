//! The classic PDF document-info dictionary, detached from the object model.

use lopdf::{Dictionary, Object, ObjectId};
use std::collections::BTreeMap;

// ── InfoValue ────────────────────────────────────────────────────────────────

/// A single `/Info` entry: either the value itself or a reference that needs
/// one [`ObjectResolver::resolve`] call before it can be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    Direct(InfoText),
    IndirectRef(ObjectId),
}

/// The payload of a direct `/Info` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoText {
    /// A PDF string object, still undecoded.
    Bytes(Vec<u8>),
    /// Text that has already been decoded.
    Text(String),
    /// Any non-string object (numbers, names, dictionaries, ...).
    Other,
}

impl From<&Object> for InfoValue {
    fn from(object: &Object) -> Self {
        match object {
            Object::Reference(id) => InfoValue::IndirectRef(*id),
            Object::String(bytes, _) => InfoValue::Direct(InfoText::Bytes(bytes.clone())),
            _ => InfoValue::Direct(InfoText::Other),
        }
    }
}

impl From<&str> for InfoValue {
    fn from(text: &str) -> Self {
        InfoValue::Direct(InfoText::Text(text.to_owned()))
    }
}

impl From<&[u8]> for InfoValue {
    fn from(bytes: &[u8]) -> Self {
        InfoValue::Direct(InfoText::Bytes(bytes.to_vec()))
    }
}

impl<const N: usize> From<&[u8; N]> for InfoValue {
    fn from(bytes: &[u8; N]) -> Self {
        InfoValue::Direct(InfoText::Bytes(bytes.to_vec()))
    }
}

// ── ObjectResolver ───────────────────────────────────────────────────────────

/// Dereferences an indirect object id.
///
/// Returns `None` when the id does not point at anything.
pub trait ObjectResolver {
    fn resolve(&self, id: ObjectId) -> Option<InfoValue>;
}

/// Resolver for dictionaries that hold no indirect references.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferences;

impl ObjectResolver for NoReferences {
    fn resolve(&self, _id: ObjectId) -> Option<InfoValue> {
        None
    }
}

impl ObjectResolver for BTreeMap<ObjectId, InfoValue> {
    fn resolve(&self, id: ObjectId) -> Option<InfoValue> {
        self.get(&id).cloned()
    }
}

// ── DocumentInfo ─────────────────────────────────────────────────────────────

/// Field name (`"Title"`, `"Author"`, ...) to [`InfoValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    fields: BTreeMap<String, InfoValue>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every entry out of a lopdf `/Info` dictionary. Keys that are not
    /// valid UTF-8 are decoded lossily.
    pub fn from_dictionary(dict: &Dictionary) -> Self {
        let fields = dict
            .iter()
            .map(|(key, value)| (String::from_utf8_lossy(key).into_owned(), InfoValue::from(value)))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<InfoValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&InfoValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up `field` and follow at most one level of indirection.
    ///
    /// A reference that resolves to another reference, or to nothing, yields
    /// [`InfoText::Other`].
    pub fn resolved<R>(&self, field: &str, resolver: &R) -> Option<InfoText>
    where
        R: ObjectResolver + ?Sized,
    {
        match self.get(field)? {
            InfoValue::Direct(text) => Some(text.clone()),
            InfoValue::IndirectRef(id) => match resolver.resolve(*id) {
                Some(InfoValue::Direct(text)) => Some(text),
                Some(InfoValue::IndirectRef(_)) | None => Some(InfoText::Other),
            },
        }
    }
}

impl<K: Into<String>, V: Into<InfoValue>> FromIterator<(K, V)> for DocumentInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut info = DocumentInfo::new();
        for (field, value) in iter {
            info.insert(field, value);
        }
        info
    }
}
