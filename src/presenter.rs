//! Console listings for catalog search results.

use std::fmt::Write;

use crate::catalog::{GutenbergBook, OpenLibraryDoc};

/// Only the first entries of a result list are shown.
pub const MAX_DISPLAYED: usize = 10;

const RULE_WIDTH: usize = 50;

pub fn render_gutenberg(books: &[GutenbergBook]) -> String {
    render("Project Gutenberg", books, |out, book| {
        entry_heading(out, book.title(), &book.author_names());
        let id = book.id.map_or_else(|| "Unknown".to_string(), |id| id.to_string());
        writeln!(out, "   ID: {}", id).ok();
        let available = if book.has_epub() { "Yes" } else { "No" };
        writeln!(out, "   EPUB available: {}", available).ok();
    })
}

pub fn render_open_library(docs: &[OpenLibraryDoc]) -> String {
    render("Open Library", docs, |out, doc| {
        let authors: Vec<&str> = doc.author_name.iter().map(String::as_str).collect();
        entry_heading(out, doc.title(), &authors);
        let year = doc
            .first_publish_year
            .map_or_else(|| "Unknown".to_string(), |year| year.to_string());
        writeln!(out, "   First published: {}", year).ok();
    })
}

pub fn display_gutenberg(books: &[GutenbergBook]) {
    print!("{}", render_gutenberg(books));
}

pub fn display_open_library(docs: &[OpenLibraryDoc]) {
    print!("{}", render_open_library(docs));
}

/// Follow-up instructions printed after a search-only run.
pub fn usage_hint() -> String {
    [
        "",
        "To download a book:",
        "- From search results: bookfinder --title 'title' --author 'author' --download <index>",
        "- By Project Gutenberg ID: bookfinder --download <ID>",
        "",
    ]
    .join("\n")
}

fn render<T>(catalog: &str, records: &[T], mut entry: impl FnMut(&mut String, &T)) -> String {
    let mut out = String::new();

    if records.is_empty() {
        writeln!(out, "No books found on {}", catalog).ok();
        return out;
    }

    writeln!(out, "\n{} Results ({} found):", catalog, records.len()).ok();
    writeln!(out, "{}", "-".repeat(RULE_WIDTH)).ok();

    for (rank, record) in records.iter().take(MAX_DISPLAYED).enumerate() {
        write!(out, "{}. ", rank + 1).ok();
        entry(&mut out, record);
        out.push('\n');
    }

    out
}

fn entry_heading(out: &mut String, title: &str, authors: &[&str]) {
    writeln!(out, "{}", title).ok();
    if !authors.is_empty() {
        writeln!(out, "   Author(s): {}", authors.join(", ")).ok();
    }
}
