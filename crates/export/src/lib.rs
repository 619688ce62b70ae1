//! Character profile export.
//!
//! A stored [`Character`] becomes a [`ProfileDocument`], which is then
//! encoded as an A4 portrait PDF or as escaped HTML markup. The photo, when
//! the character has one, is fetched at render time; a photo that cannot be
//! fetched or decoded is left out and the document is produced anyway.

pub mod document;
pub mod pdf;
pub mod photo;

use chrono::Utc;
use roster_core::naming::export_filename;
use roster_db::models::character::Character;

pub use document::{ProfileDocument, ProfileField};
pub use photo::PhotoFetcher;

/// Failures while assembling a document.
///
/// An unusable photo is never one of these.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Output encoding for an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Html,
}

impl ExportFormat {
    /// Case-insensitive; `None` for anything but `pdf` or `html`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if raw.eq_ignore_ascii_case("html") {
            Some(Self::Html)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

/// A finished export, ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Sanitized to `[A-Za-z0-9_-]` plus the extension.
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders stored characters into downloadable documents.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    fetcher: PhotoFetcher,
}

impl DocumentRenderer {
    pub fn new(fetcher: PhotoFetcher) -> Self {
        Self { fetcher }
    }

    /// Render `character` in the requested format.
    ///
    /// The HTML format references the photo by URL only; the PDF format
    /// fetches and embeds it when possible.
    pub async fn render(
        &self,
        character: &Character,
        format: ExportFormat,
    ) -> Result<RenderedDocument, RenderError> {
        let document = ProfileDocument::from_character(character, Utc::now());
        let filename = export_filename(&character.name, format.extension());

        let bytes = match format {
            ExportFormat::Html => document.to_html().into_bytes(),
            ExportFormat::Pdf => {
                let photo = match document.photo_url.as_deref() {
                    Some(url) => self.fetcher.fetch_image(url).await,
                    None => None,
                };
                tokio::task::spawn_blocking(move || pdf::encode(&document, photo.as_ref()))
                    .await??
            }
        };

        tracing::debug!(
            character_id = character.id,
            %filename,
            size = bytes.len(),
            "Rendered character profile"
        );

        Ok(RenderedDocument {
            filename,
            content_type: format.content_type(),
            bytes,
        })
    }
}
