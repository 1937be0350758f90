use std::sync::OnceLock;

use super::{AcquireError, ContentSource, Origin};
use crate::content::ContentDocument;

/// Process-wide slot for the pre-embedded document.
static EMBEDDED: OnceLock<ContentDocument> = OnceLock::new();

/// Document compiled into the binary.
const BUNDLED: &str = include_str!("../../content/portfolio.json");

/// Parse the bundled document.
pub fn bundled() -> Result<ContentDocument, serde_json::Error> {
    serde_json::from_str(BUNDLED)
}

/// Install `doc` as the process-wide embedded document.
/// Returns false if one was already installed; the first one stays.
pub fn install(doc: ContentDocument) -> bool {
    EMBEDDED.set(doc).is_ok()
}

/// Reads the embedded slot. The document is used as-is, no parsing.
pub struct EmbeddedSource {
    slot: &'static OnceLock<ContentDocument>,
}

impl EmbeddedSource {
    pub fn global() -> Self {
        EmbeddedSource { slot: &EMBEDDED }
    }

    pub fn with_slot(slot: &'static OnceLock<ContentDocument>) -> Self {
        EmbeddedSource { slot }
    }
}

#[rocket::async_trait]
impl ContentSource for EmbeddedSource {
    fn origin(&self) -> Origin {
        Origin::Embedded
    }

    async fn load(&self) -> Result<ContentDocument, AcquireError> {
        self.slot.get().cloned().ok_or(AcquireError::NotPresent)
    }
}
