//! Open Library search API. Bibliographic metadata only, nothing to download.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{get_json, parse_base, Catalog, SearchQuery};
use crate::error::{CatalogError, Result};

pub const DEFAULT_API_URL: &str = "https://openlibrary.org";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenLibraryDoc {
    /// Work key such as `/works/OL45804W`.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i64>,
}

impl OpenLibraryDoc {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Title")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<OpenLibraryDoc>,
}

pub struct OpenLibraryClient {
    client: Client,
    api_base: Url,
}

impl OpenLibraryClient {
    pub fn new(client: Client) -> Result<Self> {
        Self::with_base_url(client, DEFAULT_API_URL)
    }

    pub fn with_base_url(client: Client, api_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            api_base: parse_base(api_url)?,
        })
    }

    async fn search_docs(&self, query: &str) -> Result<Vec<OpenLibraryDoc>> {
        let mut url = self.api_base.join("search.json")?;
        url.set_query(Some(query));

        let response: SearchResponse = get_json(&self.client, url).await?;
        Ok(response.docs)
    }
}

#[async_trait]
impl Catalog for OpenLibraryClient {
    type Record = OpenLibraryDoc;
    type Id = str;

    fn name(&self) -> &'static str {
        "Open Library"
    }

    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<OpenLibraryDoc>> {
        self.search_docs(&query.encoded_params("title", "author").join("&"))
            .await
    }

    async fn try_lookup(&self, key: &str) -> Result<OpenLibraryDoc> {
        let query = format!("q=key:{}&limit=1", urlencoding::encode(key));
        self.search_docs(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }
}
