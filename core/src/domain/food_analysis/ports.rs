use std::future::Future;

use crate::domain::food_analysis::{
    entities::{AnalysisError, FoodAnalysis},
    value_objects::{AnalyzeFoodInput, VisionRequest},
};

/// LLM Client trait for calling vision models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Returns the model's raw completion text.
    fn generate_with_image(
        &self,
        request: VisionRequest,
    ) -> impl Future<Output = Result<String, AnalysisError>> + Send;
}

/// Service trait for turning an image into a nutrition estimate
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_food(
        &self,
        input: AnalyzeFoodInput,
    ) -> impl Future<Output = Result<FoodAnalysis, AnalysisError>> + Send;
}
