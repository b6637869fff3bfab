use uuid::Uuid;

use crate::domain::{
    food_analysis::{entities::FoodAnalysis, value_objects::ImageInput},
    history::{entities::AnalysisHistoryEntry, store::SessionHistory},
};

#[derive(Debug, Clone)]
pub struct CurrentImage {
    pub image_ref: String,
    /// `None` when the image was restored from history; only its handle is kept there.
    pub input: Option<ImageInput>,
}

/// All mutable state of one user session: the current image, the last
/// analysis and the bounded history.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) current_image: Option<CurrentImage>,
    pub(crate) current_analysis: Option<FoodAnalysis>,
    pub(crate) history: SessionHistory,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `input` the current image and forgets the previous analysis.
    pub fn select_image(&mut self, image_ref: impl Into<String>, input: ImageInput) {
        self.current_image = Some(CurrentImage {
            image_ref: image_ref.into(),
            input: Some(input),
        });
        self.current_analysis = None;
    }

    pub fn clear(&mut self) {
        self.current_image = None;
        self.current_analysis = None;
    }

    /// Restores a past entry as the current image and analysis.
    pub fn select_history(&mut self, id: Uuid) -> Option<&AnalysisHistoryEntry> {
        let entry = self.history.select(id)?;

        self.current_image = Some(CurrentImage {
            image_ref: entry.image_ref.clone(),
            input: None,
        });
        self.current_analysis = Some(entry.analysis.clone());

        Some(entry)
    }

    pub fn current_image(&self) -> Option<&CurrentImage> {
        self.current_image.as_ref()
    }

    pub fn current_image_ref(&self) -> Option<&str> {
        self.current_image
            .as_ref()
            .map(|image| image.image_ref.as_str())
    }

    pub fn current_analysis(&self) -> Option<&FoodAnalysis> {
        self.current_analysis.as_ref()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }
}
