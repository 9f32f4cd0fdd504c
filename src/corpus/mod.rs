pub mod fetch;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{info, warn};

use crate::corpus::fetch::{FetchError, Fetcher};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("{origin} has {found} words, expected exactly {expected}")]
    Format {
        origin: String,
        expected: usize,
        found: usize,
    },
    #[error(
        "didn't find words at {} and failed to download from {url}: {fetch}",
        .path.display()
    )]
    SourceUnavailable {
        path: PathBuf,
        url: String,
        #[source]
        fetch: FetchError,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The ordered word list for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Splits newline-delimited content, requiring exactly `expected` entries.
    pub fn parse(content: &str, expected: usize, origin: &str) -> Result<Self, CorpusError> {
        let words: Vec<String> = content.lines().map(str::to_string).collect();
        if words.len() != expected {
            return Err(CorpusError::Format {
                origin: origin.to_string(),
                expected,
                found: words.len(),
            });
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
    }
}

/// Resolves the corpus from a local file, falling back to one remote fetch.
pub struct WordSource<F> {
    url: String,
    expected_count: usize,
    fetcher: F,
}

impl<F: Fetcher> WordSource<F> {
    pub fn new(url: impl Into<String>, expected_count: usize, fetcher: F) -> Self {
        Self {
            url: url.into(),
            expected_count,
            fetcher,
        }
    }

    pub fn load(&self, path: &Path) -> Result<Corpus, CorpusError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            return Corpus::parse(&content, self.expected_count, &path.display().to_string());
        }

        info!(
            "{} does not exist! Downloading from {}",
            path.display(),
            self.url
        );
        let content = self
            .fetcher
            .fetch(&self.url)
            .map_err(|fetch| CorpusError::SourceUnavailable {
                path: path.to_path_buf(),
                url: self.url.clone(),
                fetch,
            })?;
        let corpus = Corpus::parse(&content, self.expected_count, &self.url)?;
        info!("Finished downloading {} words!", corpus.len());

        if let Err(err) = write_cache(path, &content) {
            warn!("could not cache words at {}: {err}", path.display());
        }
        Ok(corpus)
    }
}

fn write_cache(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}
