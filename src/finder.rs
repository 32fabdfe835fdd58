//! Mode selection and sequencing of searches and downloads.

use clap::ValueEnum;
use colored::*;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::catalog::{gutenberg, openlibrary, Catalog, GutenbergBook, GutenbergClient, OpenLibraryClient, SearchQuery};
use crate::downloader::{Downloader, DEFAULT_OUT_DIR};
use crate::error::FinderError;
use crate::presenter;

const USER_AGENT: &str = concat!("bookfinder/", env!("CARGO_PKG_VERSION"));

/// Which catalogs a search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Source {
    Gutenberg,
    Openlibrary,
    #[default]
    All,
}

impl Source {
    fn includes_gutenberg(self) -> bool {
        matches!(self, Source::Gutenberg | Source::All)
    }

    fn includes_open_library(self) -> bool {
        matches!(self, Source::Openlibrary | Source::All)
    }
}

#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub out_dir: PathBuf,
    /// Per-request timeout. `None` keeps the HTTP client's defaults.
    pub timeout: Option<Duration>,
    pub gutenberg_api_url: String,
    pub gutenberg_files_url: String,
    pub open_library_url: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            timeout: None,
            gutenberg_api_url: gutenberg::DEFAULT_API_URL.to_string(),
            gutenberg_files_url: gutenberg::DEFAULT_FILES_URL.to_string(),
            open_library_url: openlibrary::DEFAULT_API_URL.to_string(),
        }
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct FindRequest {
    pub query: SearchQuery,
    pub source: Source,
    /// Gutenberg ID, or a 1-based result rank when search terms are present.
    pub download: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DirectDownload(u64),
    DownloadByRank(u64),
    SearchOnly,
}

impl Mode {
    /// A download selector of `0` is treated as if none was given.
    pub fn resolve(request: &FindRequest) -> Result<Self, FinderError> {
        let selector = request.download.filter(|&n| n > 0);

        match (selector, request.query.is_empty()) {
            (Some(rank), false) => Ok(Mode::DownloadByRank(rank)),
            (Some(id), true) => Ok(Mode::DirectDownload(id)),
            (None, false) => Ok(Mode::SearchOnly),
            (None, true) => Err(FinderError::Usage(
                "Must specify either --title or --author (or both)".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Searched,
    Downloaded(PathBuf),
    DownloadFailed,
    NoBooksFound,
    InvalidRank { rank: u64, max: usize },
    EpubUnavailable { rank: u64 },
    DownloadUnsupported,
}

pub struct Finder {
    gutenberg: GutenbergClient,
    open_library: OpenLibraryClient,
    downloader: Downloader,
}

impl Finder {
    pub fn new(config: FinderConfig) -> Result<Self, FinderError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FinderError::Client)?;

        Ok(Self {
            gutenberg: GutenbergClient::with_base_urls(
                client.clone(),
                &config.gutenberg_api_url,
                &config.gutenberg_files_url,
            )?,
            open_library: OpenLibraryClient::with_base_url(client.clone(), &config.open_library_url)?,
            downloader: Downloader::new(client, config.out_dir),
        })
    }

    pub async fn run(&self, request: &FindRequest) -> Result<Outcome, FinderError> {
        let mode = Mode::resolve(request)?;
        debug!("Running in {:?} mode against {:?}", mode, request.source);

        let outcome = match mode {
            Mode::DirectDownload(id) => self.download_by_id(id).await,
            Mode::DownloadByRank(rank) => self.download_by_rank(request, rank).await,
            Mode::SearchOnly => {
                self.search_and_display(request).await;
                print!("{}", presenter::usage_hint());
                Outcome::Searched
            }
        };

        Ok(outcome)
    }

    /// Search every requested catalog in turn, printing each listing.
    ///
    /// Returns the Gutenberg results, the only ones that can be downloaded.
    async fn search_and_display(&self, request: &FindRequest) -> Vec<GutenbergBook> {
        let mut books = Vec::new();

        if request.source.includes_gutenberg() {
            books = self.gutenberg.search(&request.query).await;
            presenter::display_gutenberg(&books);
        }

        if request.source.includes_open_library() {
            let docs = self.open_library.search(&request.query).await;
            presenter::display_open_library(&docs);
        }

        books
    }

    async fn download_by_rank(&self, request: &FindRequest, rank: u64) -> Outcome {
        let books = self.search_and_display(request).await;

        if request.source == Source::Openlibrary {
            println!("{}", "Direct download from Open Library is not supported yet.".yellow());
            return Outcome::DownloadUnsupported;
        }

        if books.is_empty() {
            println!(
                "{}",
                "No Project Gutenberg books found to download. Try a different title or author.".yellow()
            );
            return Outcome::NoBooksFound;
        }

        let index = usize::try_from(rank).ok().and_then(|r| r.checked_sub(1));
        let book = match index.and_then(|i| books.get(i)) {
            Some(book) => book,
            None => {
                let mut message = format!("Invalid index. Choose between 1 and {}", books.len());
                if request.source == Source::All {
                    message.push_str(" (only Project Gutenberg books can be downloaded)");
                }
                println!("{}", message.yellow());
                return Outcome::InvalidRank { rank, max: books.len() };
            }
        };

        match (book.id, book.epub_url()) {
            (Some(id), Some(_)) => self.download_by_id(id).await,
            _ => {
                println!("{}", format!("EPUB not available for book {}", rank).yellow());
                Outcome::EpubUnavailable { rank }
            }
        }
    }

    async fn download_by_id(&self, id: u64) -> Outcome {
        let book = self.gutenberg.lookup(&id).await;
        if book.is_none() {
            info!("No metadata for Gutenberg book {}, using generic filename", id);
        }
        let filename = gutenberg::download_filename(book.as_ref(), id);

        let url = match self.gutenberg.epub_file_url(id) {
            Ok(url) => url,
            Err(e) => {
                error!("{}", format!("Error downloading file: {}", e).red());
                return Outcome::DownloadFailed;
            }
        };

        match self.downloader.download(url.as_str(), &filename).await {
            Ok(path) => {
                println!("Downloaded: {}", path.display().to_string().green());
                Outcome::Downloaded(path)
            }
            Err(e) => {
                error!("{}", format!("Error downloading file: {}", e).red());
                Outcome::DownloadFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, author: Option<&str>, download: Option<u64>) -> FindRequest {
        FindRequest {
            query: SearchQuery::new(title.map(String::from), author.map(String::from)),
            source: Source::All,
            download,
        }
    }

    #[test]
    fn selector_without_terms_is_direct_download() {
        let mode = Mode::resolve(&request(None, None, Some(1342))).unwrap();
        assert_eq!(mode, Mode::DirectDownload(1342));
    }

    #[test]
    fn selector_with_terms_is_rank() {
        let mode = Mode::resolve(&request(Some("Emma"), None, Some(2))).unwrap();
        assert_eq!(mode, Mode::DownloadByRank(2));

        let mode = Mode::resolve(&request(None, Some("Austen"), Some(1))).unwrap();
        assert_eq!(mode, Mode::DownloadByRank(1));
    }

    #[test]
    fn terms_without_selector_is_search_only() {
        let mode = Mode::resolve(&request(Some("Emma"), Some("Austen"), None)).unwrap();
        assert_eq!(mode, Mode::SearchOnly);
    }

    #[test]
    fn nothing_given_is_usage_error() {
        let err = Mode::resolve(&request(None, None, None)).unwrap_err();
        assert!(matches!(err, FinderError::Usage(_)));
    }

    #[test]
    fn zero_selector_counts_as_absent() {
        assert_eq!(
            Mode::resolve(&request(Some("Emma"), None, Some(0))).unwrap(),
            Mode::SearchOnly
        );
        assert!(Mode::resolve(&request(None, None, Some(0))).is_err());
    }

    #[test]
    fn empty_strings_do_not_count_as_terms() {
        assert_eq!(
            Mode::resolve(&request(Some(""), Some(""), Some(7))).unwrap(),
            Mode::DirectDownload(7)
        );
    }

    #[test]
    fn source_scopes() {
        assert!(Source::All.includes_gutenberg() && Source::All.includes_open_library());
        assert!(!Source::Gutenberg.includes_open_library());
        assert!(!Source::Openlibrary.includes_gutenberg());
    }
}
