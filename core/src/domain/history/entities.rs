use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{generate_timestamp, generate_uuid_v7},
    food_analysis::entities::FoodAnalysis,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistoryEntry {
    pub id: Uuid,
    /// Display handle of the analyzed image, e.g. a file path.
    pub image_ref: String,
    pub analysis: FoodAnalysis,
    pub created_at: DateTime<Utc>,
}

impl AnalysisHistoryEntry {
    pub fn new(image_ref: impl Into<String>, analysis: FoodAnalysis) -> Self {
        Self {
            id: generate_uuid_v7(),
            image_ref: image_ref.into(),
            analysis,
            created_at: generate_timestamp(),
        }
    }
}
