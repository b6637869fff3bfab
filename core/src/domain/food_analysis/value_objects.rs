use std::{fmt, str::FromStr};

use bytes::Bytes;

use crate::domain::food_analysis::entities::ImageInputError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Webp,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Webp => "image/webp",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMimeType::Jpeg),
            "png" => Some(ImageMimeType::Png),
            "webp" => Some(ImageMimeType::Webp),
            _ => None,
        }
    }
}

impl FromStr for ImageMimeType {
    type Err = ImageInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(ImageMimeType::Jpeg),
            "image/png" => Ok(ImageMimeType::Png),
            "image/webp" => Ok(ImageMimeType::Webp),
            _ => Err(ImageInputError::UnsupportedType(s.to_string())),
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw image bytes that passed the empty/size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    data: Bytes,
    mime_type: ImageMimeType,
}

impl ImageInput {
    pub fn new(data: impl Into<Bytes>, mime_type: ImageMimeType) -> Result<Self, ImageInputError> {
        let data = data.into();

        if data.is_empty() {
            return Err(ImageInputError::Empty);
        }

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ImageInputError::TooLarge {
                size: data.len(),
                max: MAX_IMAGE_SIZE,
            });
        }

        Ok(Self { data, mime_type })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> ImageMimeType {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeFoodInput {
    pub image: ImageInput,
}

impl AnalyzeFoodInput {
    pub fn new(image: ImageInput) -> Self {
        Self { image }
    }
}

/// One vision request as handed to an [`LLMClient`](super::ports::LLMClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub image_data_uri: String,
}
