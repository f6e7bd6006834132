// Builders for small but real PDFs, so tests do not depend on fixture files.

#![allow(dead_code)]

use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use std::path::Path;

/// A `/Info` string entry.
pub fn text(s: &str) -> Object {
    Object::string_literal(s)
}

/// A `/Info` string entry holding arbitrary bytes.
pub fn raw(bytes: &[u8]) -> Object {
    Object::String(bytes.to_vec(), StringFormat::Hexadecimal)
}

pub struct PdfBuilder {
    info: Vec<(String, Object)>,
    indirect: Vec<(String, String)>,
    xmp: Option<(Vec<u8>, bool)>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self {
            info: Vec::new(),
            indirect: Vec::new(),
            xmp: None,
        }
    }

    pub fn info(mut self, key: &str, value: Object) -> Self {
        self.info.push((key.into(), value));
        self
    }

    /// Store `value` as a separate object and reference it from `/Info`.
    pub fn indirect(mut self, key: &str, value: &str) -> Self {
        self.indirect.push((key.into(), value.into()));
        self
    }

    pub fn xmp(mut self, packet: &str) -> Self {
        self.xmp = Some((packet.as_bytes().to_vec(), false));
        self
    }

    pub fn compressed_xmp(mut self, packet: &str) -> Self {
        self.xmp = Some((packet.as_bytes().to_vec(), true));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1i64,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if let Some((packet, compress)) = self.xmp {
            let mut stream = Stream::new(
                dictionary! { "Type" => "Metadata", "Subtype" => "XML" },
                packet,
            );
            if compress {
                stream.compress().expect("compress XMP stream");
            }
            let metadata_id = doc.add_object(stream);
            catalog.set("Metadata", metadata_id);
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        let mut info = Dictionary::new();
        for (key, value) in self.info {
            info.set(key, value);
        }
        for (key, value) in self.indirect {
            let value_id = doc.add_object(text(&value));
            info.set(key, value_id);
        }
        if !info.is_empty() {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }

    pub fn write_to(self, path: impl AsRef<Path>) {
        std::fs::write(path, self.build()).expect("failed to write test PDF");
    }
}

/// An XMP packet with the usual `x:xmpmeta` wrapper around `body`.
pub fn xmp_packet(body: &str) -> String {
    format!(
        r#"<?xpacket begin="﻿" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about="" xmlns:dc="http://purl.org/dc/elements/1.1/">
{body}
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#
    )
}

pub fn dc_title(title: &str) -> String {
    format!(
        r#"<dc:title><rdf:Alt><rdf:li xml:lang="x-default">{title}</rdf:li></rdf:Alt></dc:title>"#
    )
}

pub fn dc_creators(names: &[&str]) -> String {
    dc_creator_list("Seq", names)
}

pub fn dc_creators_bag(names: &[&str]) -> String {
    dc_creator_list("Bag", names)
}

fn dc_creator_list(container: &str, names: &[&str]) -> String {
    let items: String = names
        .iter()
        .map(|n| format!("<rdf:li>{n}</rdf:li>"))
        .collect();
    format!("<dc:creator><rdf:{container}>{items}</rdf:{container}></dc:creator>")
}
