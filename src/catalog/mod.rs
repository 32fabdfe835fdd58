//! Remote book catalogs behind a shared search/lookup capability.

pub mod gutenberg;
pub mod openlibrary;

use async_trait::async_trait;
use colored::*;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, error};
use url::Url;

use crate::error::{CatalogError, Result};

pub use gutenberg::{GutenbergBook, GutenbergClient};
pub use openlibrary::{OpenLibraryClient, OpenLibraryDoc};

/// Title and/or author terms for a catalog search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl SearchQuery {
    /// Empty strings are treated the same as a missing term.
    pub fn new(title: Option<String>, author: Option<String>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
            author: author.filter(|a| !a.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }

    /// Lower-cased, percent-encoded `key=value` pairs for each present term.
    pub(crate) fn encoded_params(&self, title_key: &str, author_key: &str) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(title) = &self.title {
            params.push(format!("{}={}", title_key, urlencoding::encode(&title.to_lowercase())));
        }
        if let Some(author) = &self.author {
            params.push(format!("{}={}", author_key, urlencoding::encode(&author.to_lowercase())));
        }
        params
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    type Record: Send;
    type Id: fmt::Display + Send + Sync + ?Sized;

    fn name(&self) -> &'static str;

    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<Self::Record>>;

    async fn try_lookup(&self, id: &Self::Id) -> Result<Self::Record>;

    /// Search the catalog, reporting failures and degrading to an empty list.
    ///
    /// A query with neither a title nor an author returns immediately
    /// without touching the network.
    async fn search(&self, query: &SearchQuery) -> Vec<Self::Record> {
        if query.is_empty() {
            debug!("Skipping {} search: no title or author given", self.name());
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(records) => {
                debug!("{} returned {} records", self.name(), records.len());
                records
            }
            Err(e) => {
                error!("{}", format!("Error searching {}: {}", self.name(), e).red());
                Vec::new()
            }
        }
    }

    /// Fetch a single record, mapping any failure to `None`.
    async fn lookup(&self, id: &Self::Id) -> Option<Self::Record> {
        match self.try_lookup(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("{} lookup of {} failed: {}", self.name(), id, e);
                None
            }
        }
    }
}

/// Issue a single GET and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T> {
    debug!("GET {}", url);

    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Parse a catalog base URL, keeping it as an origin so `join` appends paths.
pub(crate) fn parse_base(base: &str) -> Result<Url> {
    let trimmed = base.trim_end_matches('/');
    Ok(Url::parse(&format!("{}/", trimmed))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_missing_terms() {
        let query = SearchQuery::new(Some(String::new()), Some(String::new()));
        assert!(query.is_empty());

        let query = SearchQuery::new(Some("Dracula".into()), None);
        assert!(!query.is_empty());
    }

    #[test]
    fn encodes_lowercased_terms() {
        let query = SearchQuery::new(Some("Pride & Prejudice".into()), Some("Jane Austen".into()));
        assert_eq!(
            query.encoded_params("search", "search"),
            vec!["search=pride%20%26%20prejudice", "search=jane%20austen"]
        );
        assert_eq!(
            query.encoded_params("title", "author"),
            vec!["title=pride%20%26%20prejudice", "author=jane%20austen"]
        );
    }

    #[test]
    fn base_urls_gain_a_trailing_slash() {
        let base = parse_base("https://gutendex.com").unwrap();
        assert_eq!(base.join("books/").unwrap().as_str(), "https://gutendex.com/books/");

        let base = parse_base("http://127.0.0.1:8080/").unwrap();
        assert_eq!(base.join("search.json").unwrap().as_str(), "http://127.0.0.1:8080/search.json");
    }
}
