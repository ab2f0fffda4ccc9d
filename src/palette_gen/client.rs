//! Emoji image retrieval over HTTP or from a local directory.

use std::path::PathBuf;
use std::time::Duration;

use super::glyphs::emoji_filename;
use super::PaletteGenError;

/// Default base URL for Noto Emoji 128px PNG renders.
pub const NOTO_EMOJI_BASE_URL: &str =
    "https://raw.githubusercontent.com/googlefonts/noto-emoji/main/png/128";

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP status code for a missing image.
const HTTP_STATUS_NOT_FOUND: u16 = 404;

/// Client that downloads emoji images by file name from a base URL.
pub struct EmojiImageClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl EmojiImageClient {
    /// Create a client for the Noto Emoji repository.
    pub fn new() -> Result<Self, PaletteGenError> {
        Self::with_base_url(NOTO_EMOJI_BASE_URL.to_string())
    }

    /// Create a client for a custom base URL.
    ///
    /// Useful for mirrors and for testing against a mock server.
    pub fn with_base_url(base_url: String) -> Result<Self, PaletteGenError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the image for `glyph`.
    pub fn image_url(&self, glyph: &str) -> String {
        format!("{}/{}", self.base_url, emoji_filename(glyph))
    }

    /// Download the image for `glyph`.
    ///
    /// Returns `Ok(None)` when the server has no image for it (404).
    pub async fn fetch(&self, glyph: &str) -> Result<Option<Vec<u8>>, PaletteGenError> {
        let url = self.image_url(glyph);
        log::debug!("Fetching {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if status.as_u16() == HTTP_STATUS_NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PaletteGenError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(Some(bytes.to_vec()))
    }
}

/// Where emoji images come from.
pub enum ImageStore {
    /// Download by file name from a base URL
    Http(EmojiImageClient),
    /// Read by file name from a local directory
    Directory(PathBuf),
}

impl ImageStore {
    /// Image bytes for `glyph`, or `None` if the store has no image for it.
    pub async fn fetch(&self, glyph: &str) -> Result<Option<Vec<u8>>, PaletteGenError> {
        match self {
            ImageStore::Http(client) => client.fetch(glyph).await,
            ImageStore::Directory(dir) => {
                let path = dir.join(emoji_filename(glyph));
                match tokio::fs::read(&path).await {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// Human-readable location, for log messages.
    pub fn describe(&self) -> String {
        match self {
            ImageStore::Http(client) => client.base_url().to_string(),
            ImageStore::Directory(dir) => dir.display().to_string(),
        }
    }
}
