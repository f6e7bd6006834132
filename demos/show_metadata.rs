//! Print what pdf-title-rename would do with one file, without renaming it.
//!
//! Usage:
//!   cargo run --example show_metadata -- paper.pdf
//!   cargo run --example show_metadata -- paper.pdf --author

use pdftitlerename::{filename, xmp, PdfSource};
use std::{env, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf_file> [--author]", args[0]);
        process::exit(1);
    }

    let pdf_path = &args[1];
    let with_author = args.iter().any(|a| a == "--author");

    let source = PdfSource::from_path(pdf_path).unwrap_or_else(|e| {
        eprintln!("Cannot load PDF: {e}");
        process::exit(1);
    });

    println!("PDF version   : {}", source.document().version);
    let info = source.info().unwrap_or_default();
    println!("Info entries  : {}", info.len());
    println!("XMP declared  : {}", source.catalog_has_metadata());
    if let Some(packet) = source.xmp_packet() {
        println!("XMP size      : {} bytes", packet.len());
        match xmp::parse(&packet) {
            Ok(meta) if meta.is_empty() => println!("XMP namespaces: (none)"),
            Ok(meta) => println!("XMP namespaces: {}", meta.namespaces().collect::<Vec<_>>().join(", ")),
            Err(e) => println!("XMP namespaces: unreadable ({e})"),
        }
    }

    let meta = source.resolved_meta();
    println!("Title         : {}", meta.title.as_deref().unwrap_or("-"));
    println!("Author        : {}", meta.author.as_deref().unwrap_or("-"));

    // Same fallback as the batch: an author without a title keeps the file stem.
    let stem = std::path::Path::new(pdf_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    let title = meta.title.clone().or(meta.author.as_ref().and(stem));

    match title {
        Some(title) => {
            let author = if with_author { meta.author.as_deref() } else { None };
            println!("New filename  : {}", filename::synthesize(&title, author));
        }
        None => println!("New filename  : (no metadata, file would be skipped)"),
    }
}
