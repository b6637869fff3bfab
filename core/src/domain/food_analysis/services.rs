use crate::domain::food_analysis::{
    entities::{AnalysisError, FoodAnalysis, NutritionInfo},
    helpers::{encode_data_uri, parse_analysis},
    ports::{FoodAnalysisService, LLMClient},
    schema::{FOOD_ANALYSIS_SYSTEM_INSTRUCTION, FOOD_ANALYSIS_USER_PROMPT},
    value_objects::{AnalyzeFoodInput, VisionRequest},
};

/// Analyzes images with a vision model behind an [`LLMClient`].
#[derive(Debug, Clone)]
pub struct LiveFoodAnalysisService<LLM> {
    llm_client: LLM,
}

impl<LLM: LLMClient> LiveFoodAnalysisService<LLM> {
    pub fn new(llm_client: LLM) -> Self {
        Self { llm_client }
    }
}

impl<LLM> FoodAnalysisService for LiveFoodAnalysisService<LLM>
where
    LLM: LLMClient,
{
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<FoodAnalysis, AnalysisError> {
        // 1. Encode image
        let image_data_uri = encode_data_uri(&input.image);
        tracing::debug!(
            mime_type = %input.image.mime_type(),
            image_bytes = input.image.len(),
            "analyzing food image"
        );

        // 2. Call LLM
        let completion = self
            .llm_client
            .generate_with_image(VisionRequest {
                system_instruction: FOOD_ANALYSIS_SYSTEM_INSTRUCTION.to_string(),
                prompt: FOOD_ANALYSIS_USER_PROMPT.to_string(),
                image_data_uri,
            })
            .await?;

        if completion.trim().is_empty() {
            tracing::error!("LLM returned an empty completion");
            return Err(AnalysisError::EmptyResponse);
        }

        // 3. Parse response
        let analysis = parse_analysis(&completion).inspect_err(|e| {
            tracing::error!("Failed to parse LLM response: {}", e);
        })?;

        for warning in analysis.quality_warnings() {
            tracing::warn!(%warning, "analysis failed a quality check");
        }

        tracing::info!(
            foods = analysis.foods.len(),
            total_calories = analysis.total_calories,
            confidence = analysis.confidence,
            "food analysis complete"
        );

        Ok(analysis)
    }
}

/// Returns a fixed demo analysis without touching the network. Used when no
/// model credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFoodAnalysisService;

impl OfflineFoodAnalysisService {
    pub fn new() -> Self {
        Self
    }
}

impl FoodAnalysisService for OfflineFoodAnalysisService {
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<FoodAnalysis, AnalysisError> {
        // Encoding still runs so both paths do the same work up to the network call.
        let image_data_uri = encode_data_uri(&input.image);
        tracing::debug!(
            encoded_len = image_data_uri.len(),
            "no model credential configured, returning demo analysis"
        );

        Ok(demo_analysis())
    }
}

pub fn demo_analysis() -> FoodAnalysis {
    FoodAnalysis::new(
        vec![
            NutritionInfo::new("米饭", 230.0, 4.3, 50.2, 0.4, 0.6, 0.1, "1碗 (约200g)"),
            NutritionInfo::new("红烧肉", 380.0, 15.2, 8.5, 32.1, 0.3, 5.2, "约150g"),
            NutritionInfo::new("炒青菜", 65.0, 2.8, 4.2, 4.5, 2.1, 1.8, "约100g"),
        ],
        675.0,
        0.87,
        Some(vec![
            "这顿饭蛋白质摄入适中，但脂肪含量较高".to_string(),
            "建议增加蔬菜摄入量以获得更多膳食纤维".to_string(),
            "如果是减脂期，可以适当减少红烧肉的份量".to_string(),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::{
        ports::MockLLMClient,
        value_objects::{ImageInput, ImageMimeType},
    };

    fn input() -> AnalyzeFoodInput {
        AnalyzeFoodInput::new(ImageInput::new(b"\xff\xd8\xff".to_vec(), ImageMimeType::Jpeg).unwrap())
    }

    fn client_returning(result: Result<String, AnalysisError>) -> MockLLMClient {
        let mut client = MockLLMClient::new();
        client
            .expect_generate_with_image()
            .times(1)
            .returning(move |_| {
                let result = result.clone();
                Box::pin(async move { result })
            });
        client
    }

    #[tokio::test]
    async fn offline_service_returns_demo_analysis() {
        let analysis = OfflineFoodAnalysisService::new()
            .analyze_food(input())
            .await
            .unwrap();

        assert_eq!(analysis.foods.len(), 3);
        assert_eq!(analysis.food_names(), vec!["米饭", "红烧肉", "炒青菜"]);
        assert_eq!(analysis.total_calories, 675.0);
        assert_eq!(analysis.confidence, 0.87);
        assert_eq!(analysis.suggestions().len(), 3);
        assert_eq!(analysis.item_calories(), 675.0);
        assert!(analysis.quality_warnings().is_empty());
    }

    #[tokio::test]
    async fn offline_service_is_deterministic() {
        let service = OfflineFoodAnalysisService::new();
        let first = service.analyze_food(input()).await.unwrap();
        let second = service.analyze_food(input()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn live_service_sends_instruction_prompt_and_data_uri() {
        let mut client = MockLLMClient::new();
        client
            .expect_generate_with_image()
            .withf(|request| {
                request.system_instruction == FOOD_ANALYSIS_SYSTEM_INSTRUCTION
                    && request.prompt == FOOD_ANALYSIS_USER_PROMPT
                    && request.image_data_uri == "data:image/jpeg;base64,/9j/"
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(r#"{"foods":[],"totalCalories":0,"confidence":0.5}"#.to_string())
                })
            });

        let analysis = LiveFoodAnalysisService::new(client)
            .analyze_food(input())
            .await
            .unwrap();
        assert!(analysis.foods.is_empty());
    }

    #[tokio::test]
    async fn live_service_parses_json_wrapped_in_prose() {
        let client = client_returning(Ok(
            r#"Here you go: {"foods":[],"totalCalories":0,"confidence":0.5}"#.to_string(),
        ));

        let analysis = LiveFoodAnalysisService::new(client)
            .analyze_food(input())
            .await
            .unwrap();
        assert!(analysis.foods.is_empty());
        assert!(analysis.suggestions().is_empty());
        assert_eq!(analysis.confidence, 0.5);
    }

    #[tokio::test]
    async fn live_service_keeps_out_of_range_values() {
        let client = client_returning(Ok(
            r#"{"foods":[{"name":"cake","calories":300}],"totalCalories":900,"confidence":3}"#
                .to_string(),
        ));

        let analysis = LiveFoodAnalysisService::new(client)
            .analyze_food(input())
            .await
            .unwrap();
        assert_eq!(analysis.confidence, 3.0);
        assert_eq!(analysis.total_calories, 900.0);
        assert_eq!(analysis.quality_warnings().len(), 2);
    }

    #[tokio::test]
    async fn blank_completion_is_empty_response() {
        let client = client_returning(Ok("  \n".to_string()));
        let result = LiveFoodAnalysisService::new(client).analyze_food(input()).await;
        assert_eq!(result, Err(AnalysisError::EmptyResponse));
    }

    #[tokio::test]
    async fn completion_without_json_is_no_json_found() {
        let client = client_returning(Ok("Sorry, I cannot help with that.".to_string()));
        let result = LiveFoodAnalysisService::new(client).analyze_food(input()).await;
        assert_eq!(result, Err(AnalysisError::NoJsonFound));
    }

    #[tokio::test]
    async fn malformed_object_is_malformed_json() {
        let client = client_returning(Ok("{foods: [ }".to_string()));
        let result = LiveFoodAnalysisService::new(client).analyze_food(input()).await;
        assert!(matches!(result, Err(AnalysisError::MalformedJson(_))));
    }

    #[tokio::test]
    async fn client_failure_is_surfaced_without_fallback() {
        let client = client_returning(Err(AnalysisError::RequestFailed(
            "status 500".to_string(),
        )));
        let result = LiveFoodAnalysisService::new(client).analyze_food(input()).await;
        assert_eq!(
            result,
            Err(AnalysisError::RequestFailed("status 500".to_string()))
        );
    }
}
