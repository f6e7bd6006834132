// Integration tests for pdftitlerename.
//
// PDFs are built in memory with lopdf (see `common`), so no fixture files are
// needed.

mod common;

use common::{dc_creators, dc_creators_bag, dc_title, raw, text, xmp_packet, PdfBuilder};
use pdftitlerename::info::NoReferences;
use pdftitlerename::{filename, reconcile, DocumentInfo, MetaError, PdfSource, ResolvedMeta};

fn resolve_bytes(bytes: &[u8]) -> ResolvedMeta {
    PdfSource::from_bytes(bytes).unwrap().resolved_meta()
}

// ── Document-info baseline ────────────────────────────────────────────────────

#[test]
fn info_only_document_scenario() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Quantum Foo"))
        .info("Author", text("A. Smith"))
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Quantum Foo"));
    assert_eq!(meta.author.as_deref(), Some("Smith"));

    let name = filename::synthesize(meta.title.as_deref().unwrap(), meta.author.as_deref());
    assert_eq!(name, "smith.quantum-foo.pdf");
}

#[test]
fn indirect_info_title_is_followed() {
    let pdf = PdfBuilder::new().indirect("Title", "Behind A Reference").build();
    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Behind A Reference"));
}

#[test]
fn indirect_info_author_is_followed_and_collapsed() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Direct Title"))
        .indirect("Author", "Donald E. Knuth")
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Direct Title"));
    assert_eq!(meta.author.as_deref(), Some("Knuth"));
}

#[test]
fn undecodable_title_is_dropped_but_author_kept() {
    let pdf = PdfBuilder::new()
        .info("Title", raw(&[0xc3, 0x28, 0xa0]))
        .info("Author", text("Grace Hopper"))
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title, None);
    assert_eq!(meta.author.as_deref(), Some("Hopper"));
}

#[test]
fn untitled_placeholder_is_cleared_in_any_case() {
    for placeholder in ["Untitled", "UNTITLED", "  untitled  "] {
        let pdf = PdfBuilder::new().info("Title", text(placeholder)).build();
        assert_eq!(resolve_bytes(&pdf).title, None, "{placeholder:?}");
    }
}

#[test]
fn title_is_trimmed() {
    let pdf = PdfBuilder::new().info("Title", text("  Spaced Out \n")).build();
    assert_eq!(resolve_bytes(&pdf).title.as_deref(), Some("Spaced Out"));
}

#[test]
fn document_without_info_has_no_metadata() {
    let pdf = PdfBuilder::new().build();
    let source = PdfSource::from_bytes(&pdf).unwrap();
    assert!(source.info().unwrap().is_empty());
    assert!(!source.catalog_has_metadata());
    assert!(source.xmp_packet().is_none());
    assert!(source.resolved_meta().is_empty());
    assert_eq!(source.document().version, "1.5");
}

// ── XMP override ──────────────────────────────────────────────────────────────

#[test]
fn xmp_overrides_both_fields() {
    let body = format!("{}{}", dc_title("The XMP Title"), dc_creators(&["Ada Lovelace", "Charles Babbage"]));
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .info("Author", text("Info Author"))
        .xmp(&xmp_packet(&body))
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("The XMP Title"));
    assert_eq!(meta.author.as_deref(), Some("Lovelace Babbage"));
}

#[test]
fn xmp_title_without_creator_keeps_info_author() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .info("Author", text("Jane Doe"))
        .xmp(&xmp_packet(&dc_title("XMP Title")))
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("XMP Title"));
    assert_eq!(meta.author.as_deref(), Some("Doe"));
}

#[test]
fn xmp_creator_without_title_keeps_info_title() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .xmp(&xmp_packet(&dc_creators(&["Edsger W. Dijkstra"])))
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Info Title"));
    assert_eq!(meta.author.as_deref(), Some("Dijkstra"));
}

#[test]
fn xmp_creators_skip_empty_entries() {
    let pdf = PdfBuilder::new()
        .xmp(&xmp_packet(&dc_creators(&["", "Barbara Liskov", "", "Jeannette Wing", ""])))
        .build();
    assert_eq!(resolve_bytes(&pdf).author.as_deref(), Some("Liskov Wing"));
}

#[test]
fn xmp_creator_bag_is_read_like_a_seq() {
    let body = format!("{}{}", dc_title("Unix"), dc_creators_bag(&["Ken Thompson", "Dennis Ritchie"]));
    let pdf = PdfBuilder::new()
        .info("Author", text("Info Author"))
        .xmp(&xmp_packet(&body))
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Unix"));
    assert_eq!(meta.author.as_deref(), Some("Thompson Ritchie"));
}

#[test]
fn plain_string_xmp_fields_are_accepted() {
    let body = "<dc:title>Plain Title</dc:title><dc:creator>Alan Turing</dc:creator>";
    let pdf = PdfBuilder::new().xmp(&xmp_packet(body)).build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Plain Title"));
    assert_eq!(meta.author.as_deref(), Some("Turing"));
}

#[test]
fn alt_title_without_default_does_not_override() {
    let body = r#"<dc:title><rdf:Alt><rdf:li xml:lang="fr">Le Titre</rdf:li></rdf:Alt></dc:title>"#;
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .xmp(&xmp_packet(body))
        .build();
    assert_eq!(resolve_bytes(&pdf).title.as_deref(), Some("Info Title"));
}

#[test]
fn empty_xmp_title_does_not_override() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .xmp(&xmp_packet(&dc_title("")))
        .build();
    assert_eq!(resolve_bytes(&pdf).title.as_deref(), Some("Info Title"));
}

#[test]
fn xmp_untitled_is_cleared_after_override() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .xmp(&xmp_packet(&dc_title("Untitled")))
        .build();
    assert_eq!(resolve_bytes(&pdf).title, None);
}

#[test]
fn compressed_xmp_stream_is_decoded() {
    let pdf = PdfBuilder::new()
        .compressed_xmp(&xmp_packet(&dc_title("Deflated Title")))
        .build();
    assert_eq!(resolve_bytes(&pdf).title.as_deref(), Some("Deflated Title"));
}

#[test]
fn malformed_xmp_falls_back_to_info() {
    let pdf = PdfBuilder::new()
        .info("Title", text("Info Title"))
        .info("Author", text("A. Smith"))
        .xmp("<x:xmpmeta><rdf:RDF><unclosed>")
        .build();

    let meta = resolve_bytes(&pdf);
    assert_eq!(meta.title.as_deref(), Some("Info Title"));
    assert_eq!(meta.author.as_deref(), Some("Smith"));
}

#[test]
fn packet_is_ignored_unless_catalog_declares_metadata() {
    let info: DocumentInfo = [("Title", "Info Title")].into_iter().collect();
    let packet = xmp_packet(&dc_title("XMP Title"));

    let ignored = reconcile::resolve(&info, &NoReferences, Some(packet.as_bytes()), false);
    assert_eq!(ignored.title.as_deref(), Some("Info Title"));

    let used = reconcile::resolve(&info, &NoReferences, Some(packet.as_bytes()), true);
    assert_eq!(used.title.as_deref(), Some("XMP Title"));
}

// ── Filename synthesis ────────────────────────────────────────────────────────

#[test]
fn synthesize_examples() {
    assert_eq!(filename::synthesize("Hello World", None), "hello-world.pdf");
    assert_eq!(filename::synthesize("Hello World", Some("Jane Doe")), "doe.hello-world.pdf");
}

#[test]
fn synthesize_is_bounded_for_huge_titles() {
    for len in [0usize, 1, 249, 250, 251, 10_000] {
        let title = "x".repeat(len);
        let name = filename::synthesize(&title, Some("Author"));
        assert!(name.ends_with(".pdf"));
        assert!(name.chars().count() <= 254, "len {len} gave {}", name.len());
    }
}

// ── Error type ────────────────────────────────────────────────────────────────

#[test]
fn from_bytes_rejects_non_pdf() {
    assert!(PdfSource::from_bytes(b"").is_err());
    assert!(PdfSource::from_bytes(b"not a pdf").is_err());
}

#[test]
fn error_display_is_non_empty() {
    use std::path::PathBuf;

    let io = || std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let errors = [
        MetaError::MalformedDocument("test".into()),
        MetaError::MalformedXmp("test".into()),
        MetaError::UndecodableText { field: "title".into(), bytes: vec![0xff] },
        MetaError::RenameFailure { from: PathBuf::from("a"), to: PathBuf::from("b"), source: io() },
        MetaError::MoveFailure { from: PathBuf::from("a"), to: PathBuf::from("b"), source: io() },
        MetaError::Io(io()),
    ];
    for e in &errors {
        assert!(!e.to_string().is_empty(), "empty display for {e:?}");
    }
}
