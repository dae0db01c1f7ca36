//! File attachments for multipart uploads.

use std::fmt;
use std::path::Path;

use reqwest::multipart::Part;

use crate::error::Result;

/// Form field name the Evolution API reads uploaded media from.
pub const DEFAULT_FIELD: &str = "file";

/// A named file sent as one part of a multipart/form-data body.
///
/// # Example
///
/// ```
/// use evoapi::Attachment;
///
/// let photo = Attachment::new("photo.jpg", vec![0xFF, 0xD8, 0xFF])
///     .with_content_type("image/jpeg");
/// assert_eq!(photo.field, "file");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name of the part.
    pub field: String,
    /// File name reported in the part's `Content-Disposition`.
    pub file_name: String,
    /// MIME type of the part, if known.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl Attachment {
    /// Create an attachment under the default `file` field.
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            field: DEFAULT_FIELD.to_string(),
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Use a different form field name.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Set the MIME type of the part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read an attachment from disk.
    ///
    /// The file name is taken from the path and the content type is guessed
    /// from the extension; unknown extensions leave it unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mut attachment = Self::new(file_name, data);
        attachment.content_type = guess_content_type(path).map(str::to_string);
        Ok(attachment)
    }

    /// Convert into a reqwest multipart part.
    pub(crate) fn into_part(self) -> Result<Part> {
        let part = Part::bytes(self.data).file_name(self.file_name);
        match self.content_type.as_deref().filter(|ct| !ct.trim().is_empty()) {
            Some(ct) => Ok(part.mime_str(ct)?),
            None => Ok(part),
        }
    }
}

/// Guess a MIME type from the file extension for the media kinds the API accepts.
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "3gp" => "video/3gpp",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "ogg" | "opus" => "audio/ogg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime)
}
