//! Shared lopdf helpers.

use lopdf::{Document, Object, Stream};

/// Follow `value` once if it is a reference, otherwise return it unchanged.
pub fn resolve_once<'a>(document: &'a Document, value: &'a Object) -> lopdf::Result<&'a Object> {
    match value {
        Object::Reference(id) => document.get_object(*id),
        other => Ok(other),
    }
}

/// Decoded stream bytes, falling back to the raw content when the stream has
/// no filter or the filter cannot be applied.
pub fn stream_bytes(stream: &Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}
