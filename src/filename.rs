//! Turning a title and author into a filename.

use crate::reconcile::surname;

/// Longest synthesized name, before the extension is appended.
pub const MAX_STEM_CHARS: usize = 250;

pub const EXTENSION: &str = ".pdf";

/// Characters kept by [`sanitize`] besides alphanumerics.
const KEEP: [char; 5] = [' ', '.', '_', '-', '\u{2014}'];

/// Which filename segments go through [`sanitize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Only the author segment is sanitized. The title segment keeps any
    /// punctuation other than `:`, matching how existing renamed libraries
    /// were named.
    #[default]
    AuthorOnly,
    /// Both segments are sanitized.
    Both,
}

/// Keep alphanumerics, space, `.`, `_`, `-` and the em-dash, then trim.
///
/// ```
/// assert_eq!(pdftitlerename::filename::sanitize(" O'Brien/Smith? "), "OBrienSmith");
/// ```
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || KEEP.contains(c))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Filename for `title`, optionally prefixed with the author's surname, using
/// [`SanitizeMode::AuthorOnly`].
///
/// ```
/// use pdftitlerename::filename::synthesize;
///
/// assert_eq!(synthesize("Hello World", None), "hello-world.pdf");
/// assert_eq!(synthesize("Hello World", Some("Jane Doe")), "doe.hello-world.pdf");
/// ```
pub fn synthesize(title: &str, author: Option<&str>) -> String {
    synthesize_with(title, author, SanitizeMode::AuthorOnly)
}

/// Filename for `title` and `author` under an explicit [`SanitizeMode`].
///
/// The result is lowercase, ends in `.pdf` and is at most 254 characters.
pub fn synthesize_with(title: &str, author: Option<&str>, mode: SanitizeMode) -> String {
    let title = title.to_lowercase().replace(':', "");
    let title = match mode {
        SanitizeMode::AuthorOnly => title.trim().to_owned(),
        SanitizeMode::Both => sanitize(&title),
    };
    let mut name = title.split(' ').collect::<Vec<_>>().join("-");

    if let Some(author) = author.map(|a| sanitize(&a.to_lowercase())) {
        if let Some(surname) = surname(&author) {
            name = format!("{surname}.{name}");
        }
    }

    let mut name: String = name.chars().take(MAX_STEM_CHARS).collect();
    name.push_str(EXTENSION);
    name
}
