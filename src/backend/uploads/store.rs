/**
 * Image Storage
 *
 * Images arrive as base64 data URIs in JSON bodies. An `ImageStore` turns
 * such a source into a public URL. `LocalImageStore` writes the decoded
 * bytes under the upload directory, which the router serves statically.
 *
 * # Accepted Sources
 *
 * - `data:image/<png|jpeg|gif|webp>;base64,<payload>`
 * - `http://` or `https://` URLs, returned unchanged
 */

use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;
use uuid::Uuid;

/// Folder for profile pictures
pub const AVATARS_FOLDER: &str = "avatars";

/// Folder for chat attachments
pub const CHAT_IMAGES_FOLDER: &str = "chat_images";

/// Image types accepted in data URIs, with the file extension used on disk
const SUPPORTED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Public URL of the image
    pub url: String,
}

/// Upload errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported image source")]
    UnsupportedSource,
    #[error("malformed data URI")]
    InvalidDataUri,
    #[error("unsupported image type: {0}")]
    UnsupportedMimeType(String),
    #[error("image payload is empty")]
    EmptyPayload,
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("invalid upload folder: {0}")]
    InvalidFolder(String),
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Decoded contents of an image data URI
#[derive(Debug)]
pub struct DecodedImage {
    pub mime_type: String,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Storage backend for uploaded images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image and return its public URL
    ///
    /// # Arguments
    /// * `source` - Data URI or already hosted URL
    /// * `folder` - Single path segment grouping the upload
    async fn store(&self, source: &str, folder: &str) -> Result<StoredImage, UploadError>;

    /// Delete an image previously returned by `store`
    ///
    /// URLs this store did not produce, and files already gone, are not errors.
    async fn remove(&self, url: &str) -> Result<(), UploadError>;
}

/// Remove a stored image whose owning row was never written or was replaced
///
/// Failures are logged; the request that triggered the cleanup still
/// answers with its own result.
pub async fn discard(images: &dyn ImageStore, url: &str) {
    if let Err(e) = images.remove(url).await {
        tracing::warn!(url = url, "Failed to remove stored image: {}", e);
    }
}

/// Whether a value is a data URI rather than a plain URL
pub fn is_data_uri(source: &str) -> bool {
    source.starts_with("data:")
}

fn is_hosted_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn validate_folder(folder: &str) -> Result<(), UploadError> {
    let valid = !folder.is_empty()
        && folder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(UploadError::InvalidFolder(folder.to_string()))
    }
}

/// Parse and decode a base64 image data URI
pub fn parse_data_uri(source: &str) -> Result<DecodedImage, UploadError> {
    let rest = source.strip_prefix("data:").ok_or(UploadError::InvalidDataUri)?;
    let (meta, payload) = rest.split_once(',').ok_or(UploadError::InvalidDataUri)?;
    let mime_type = meta
        .strip_suffix(";base64")
        .ok_or(UploadError::InvalidDataUri)?
        .to_ascii_lowercase();

    let extension = SUPPORTED_TYPES
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| UploadError::UnsupportedMimeType(mime_type.clone()))?;

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(UploadError::EmptyPayload);
    }
    let bytes = BASE64.decode(payload)?;
    if bytes.is_empty() {
        return Err(UploadError::EmptyPayload);
    }

    Ok(DecodedImage {
        mime_type,
        extension,
        bytes,
    })
}

/// Image store writing to the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalImageStore {
    /// Create a store rooted at `root`, serving files under `url_prefix`
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Map a public URL back to `(folder, file)` when this store wrote it
    fn local_parts<'a>(&self, url: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = url.strip_prefix(self.url_prefix.as_str())?.strip_prefix('/')?;
        let (folder, file) = rest.split_once('/')?;
        let plain_file = !file.is_empty()
            && !file.starts_with('.')
            && file
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        (validate_folder(folder).is_ok() && plain_file).then_some((folder, file))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, source: &str, folder: &str) -> Result<StoredImage, UploadError> {
        validate_folder(folder)?;

        let source = source.trim();
        if is_hosted_url(source) {
            return Ok(StoredImage {
                url: source.to_string(),
            });
        }
        if !is_data_uri(source) {
            return Err(UploadError::UnsupportedSource);
        }

        let image = parse_data_uri(source)?;
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

        tracing::info!(
            folder = folder,
            file = %file_name,
            mime_type = %image.mime_type,
            bytes = image.bytes.len(),
            "Stored uploaded image"
        );

        Ok(StoredImage {
            url: format!("{}/{}/{}", self.url_prefix, folder, file_name),
        })
    }

    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        let Some((folder, file)) = self.local_parts(url) else {
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(folder).join(file)).await {
            Ok(()) => {
                tracing::info!(folder = folder, file = file, "Removed stored image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
