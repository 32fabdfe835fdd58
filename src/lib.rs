//! # bookfinder
//!
//! A CLI utility to search public book catalogs and download EPUBs.
//!
//! ## Current Features
//!
//! - Title/author search against Project Gutenberg (via Gutendex) and Open Library
//! - EPUB download from Project Gutenberg by book ID or by search result index
//! - Readable `Author - Title.epub` filenames derived from catalog metadata
//!
//! ## Usage
//!
//! ```bash
//! bookfinder --title "pride and prejudice" --source gutenberg
//! bookfinder --title "pride and prejudice" --download 1
//! bookfinder --download 1342
//! ```

pub mod catalog;
pub mod downloader;
pub mod error;
pub mod finder;
pub mod presenter;
mod sanitize;

pub use catalog::{Catalog, GutenbergBook, GutenbergClient, OpenLibraryClient, OpenLibraryDoc, SearchQuery};
pub use downloader::Downloader;
pub use error::{CatalogError, FinderError};
pub use finder::{FindRequest, Finder, FinderConfig, Mode, Outcome, Source};
pub use sanitize::sanitize_filename;
