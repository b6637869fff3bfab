use std::path::{Path, PathBuf};

use nutriscan_core::domain::food_analysis::{
    entities::ImageInputError,
    value_objects::{ImageInput, ImageMimeType},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Unsupported image format: {} (expected jpg, png or webp)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ImageInputError),
}

pub fn detect_mime_type(path: &Path) -> Option<ImageMimeType> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageMimeType::from_extension)
}

pub async fn load_image(path: &Path) -> Result<ImageInput, ImageLoadError> {
    let mime_type =
        detect_mime_type(path).ok_or_else(|| ImageLoadError::UnsupportedFormat(path.to_path_buf()))?;

    let data = tokio::fs::read(path).await.map_err(|source| ImageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = data.len(), %mime_type, "image loaded");

    Ok(ImageInput::new(data, mime_type)?)
}
