//! Project Gutenberg, searched through the Gutendex API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

use super::{get_json, parse_base, Catalog, SearchQuery};
use crate::error::Result;
use crate::sanitize::sanitize_filename;

pub const DEFAULT_API_URL: &str = "https://gutendex.com";
pub const DEFAULT_FILES_URL: &str = "https://www.gutenberg.org";
pub const EPUB_MIME: &str = "application/epub+zip";

/// Prefix used for download filenames when no metadata is available.
pub const FILENAME_PREFIX: &str = "gutenberg";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GutenbergBook {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub formats: HashMap<String, String>,
}

impl GutenbergBook {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Title")
    }

    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(|a| a.name.as_str()).collect()
    }

    /// Whether the record lists an EPUB format at all.
    pub fn has_epub(&self) -> bool {
        self.formats.contains_key(EPUB_MIME)
    }

    /// The EPUB asset URL, if one is listed and non-empty.
    pub fn epub_url(&self) -> Option<&str> {
        self.formats
            .get(EPUB_MIME)
            .map(String::as_str)
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<GutenbergBook>,
}

pub struct GutenbergClient {
    client: Client,
    api_base: Url,
    files_base: Url,
}

impl GutenbergClient {
    pub fn new(client: Client) -> Result<Self> {
        Self::with_base_urls(client, DEFAULT_API_URL, DEFAULT_FILES_URL)
    }

    pub fn with_base_urls(client: Client, api_url: &str, files_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            api_base: parse_base(api_url)?,
            files_base: parse_base(files_url)?,
        })
    }

    /// Direct file URL for the image-free EPUB of a book.
    pub fn epub_file_url(&self, id: u64) -> Result<Url> {
        Ok(self.files_base.join(&format!("ebooks/{}.epub.noimages", id))?)
    }
}

#[async_trait]
impl Catalog for GutenbergClient {
    type Record = GutenbergBook;
    type Id = u64;

    fn name(&self) -> &'static str {
        "Project Gutenberg"
    }

    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<GutenbergBook>> {
        let mut url = self.api_base.join("books/")?;
        url.set_query(Some(&query.encoded_params("search", "search").join("&")));

        let response: SearchResponse = get_json(&self.client, url).await?;
        Ok(response.results)
    }

    async fn try_lookup(&self, id: &u64) -> Result<GutenbergBook> {
        let url = self.api_base.join(&format!("books/{}", id))?;
        get_json(&self.client, url).await
    }
}

/// `"<Author> - <Title>.epub"` from looked-up metadata, or `gutenberg_<id>.epub`.
///
/// Author and title are sanitized separately; only the first author is used.
pub fn download_filename(book: Option<&GutenbergBook>, id: u64) -> String {
    match book {
        Some(book) => {
            let author = book
                .authors
                .first()
                .map(|a| a.name.as_str())
                .unwrap_or("Unknown Author");
            format!(
                "{} - {}.epub",
                sanitize_filename(author),
                sanitize_filename(book.title())
            )
        }
        None => format!("{}_{}.epub", FILENAME_PREFIX, id),
    }
}
