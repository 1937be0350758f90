//! Content acquisition: tries each source in priority order and keeps the
//! first document that loads and validates. Never fails; the built-in
//! fallback document is the last resort.

use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::content::{fallback, ContentDocument, ContentError};
use crate::settings::Settings;

pub mod embedded;
pub mod yaml;

pub use embedded::EmbeddedSource;
pub use yaml::YamlSource;

/// Which source produced the document in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Embedded,
    Yaml,
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Embedded => "embedded",
            Origin::Yaml => "yaml",
            Origin::Fallback => "fallback",
        })
    }
}

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("no embedded document installed")]
    NotPresent,
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("HTTP client unavailable: {0}")]
    Client(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// One strategy for obtaining a [`ContentDocument`].
#[rocket::async_trait]
pub trait ContentSource: Send + Sync {
    fn origin(&self) -> Origin;
    async fn load(&self) -> Result<ContentDocument, AcquireError>;
}

/// Always succeeds with the hardcoded minimal document.
pub struct FallbackSource;

#[rocket::async_trait]
impl ContentSource for FallbackSource {
    fn origin(&self) -> Origin {
        Origin::Fallback
    }

    async fn load(&self) -> Result<ContentDocument, AcquireError> {
        Ok(fallback::document())
    }
}

/// The document chosen for this process, with where it came from.
#[derive(Debug, Clone)]
pub struct Acquired {
    pub document: ContentDocument,
    pub origin: Origin,
}

pub struct Acquirer {
    sources: Vec<Box<dyn ContentSource>>,
}

impl Acquirer {
    pub fn new(sources: Vec<Box<dyn ContentSource>>) -> Self {
        Acquirer { sources }
    }

    /// Embedded document, then the configured YAML resource, then fallback.
    pub fn standard(settings: &Settings) -> Self {
        Acquirer::new(vec![
            Box::new(EmbeddedSource::global()),
            Box::new(YamlSource::from_settings(settings)),
            Box::new(FallbackSource),
        ])
    }

    /// Sources run one after another; the first valid document wins and
    /// later sources are never touched.
    pub async fn acquire(&self) -> Acquired {
        for source in &self.sources {
            let origin = source.origin();
            let loaded = source.load().await.and_then(|doc| {
                doc.validate()?;
                Ok(doc)
            });
            match loaded {
                Ok(document) => {
                    info!("Content loaded from {} source", origin);
                    return Acquired { document, origin };
                }
                Err(AcquireError::NotPresent) => {
                    debug!("{} source not present, skipping", origin);
                }
                Err(e) => {
                    warn!("{} source failed: {}", origin, e);
                }
            }
        }

        warn!("No content source succeeded, using built-in fallback");
        Acquired {
            document: fallback::document(),
            origin: Origin::Fallback,
        }
    }
}
