use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyAssistantError};
use crate::schema::ImagePayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
    Jpg,
    Jpeg,
    Png,
}

impl FileKind {
    pub const ALLOWED_EXTENSIONS: [&'static str; 5] = ["pdf", "docx", "jpg", "jpeg", "png"];

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Jpg => "jpg",
            FileKind::Jpeg => "jpeg",
            FileKind::Png => "png",
        }
    }

    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "docx" => Ok(FileKind::Docx),
            "jpg" => Ok(FileKind::Jpg),
            "jpeg" => Ok(FileKind::Jpeg),
            "png" => Ok(FileKind::Png),
            _ => Err(StudyAssistantError::ExtractionFailed(format!(
                "Invalid file type '{}'. Allowed: {}",
                ext,
                Self::ALLOWED_EXTENSIONS.join(", ")
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                StudyAssistantError::ExtractionFailed(format!(
                    "Invalid file type: '{}' has no extension",
                    path.display()
                ))
            })?;
        Self::from_extension(ext)
    }

    pub fn is_image(&self) -> bool {
        matches!(self, FileKind::Jpg | FileKind::Jpeg | FileKind::Png)
    }

    pub fn mime_type(&self) -> String {
        mime_guess::from_ext(self.extension())
            .first_or_octet_stream()
            .to_string()
    }
}

/// What an upload turned into: text for documents, raw bytes for images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadContent {
    Text(String),
    Image(ImagePayload),
}

/// Pulls plain text out of a PDF or DOCX file. Provided by the caller; failures
/// should be reported as `ExtractionFailed`.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path, kind: FileKind) -> Result<String>;
}

impl<F> DocumentTextExtractor for F
where
    F: Fn(&Path, FileKind) -> Result<String> + Send + Sync,
{
    fn extract_text(&self, path: &Path, kind: FileKind) -> Result<String> {
        self(path, kind)
    }
}

pub async fn load_upload(
    path: &Path,
    extractor: &dyn DocumentTextExtractor,
) -> Result<UploadContent> {
    let kind = FileKind::from_path(path)?;

    if kind.is_image() {
        let data = tokio::fs::read(path).await.map_err(|e| {
            StudyAssistantError::ExtractionFailed(format!(
                "Could not read image '{}': {}",
                path.display(),
                e
            ))
        })?;
        return Ok(UploadContent::Image(ImagePayload::new(kind.mime_type(), data)));
    }

    let text = extractor.extract_text(path, kind).map_err(|e| match e {
        StudyAssistantError::ExtractionFailed(_) => e,
        other => StudyAssistantError::ExtractionFailed(other.to_string()),
    })?;

    Ok(UploadContent::Text(text))
}
