use crate::{
    domain::{
        common::NutriScanConfig,
        food_analysis::{
            entities::{AnalysisError, FoodAnalysis},
            ports::FoodAnalysisService,
            services::{LiveFoodAnalysisService, OfflineFoodAnalysisService},
            value_objects::AnalyzeFoodInput,
        },
    },
    infrastructure::llm::OpenAILLMClient,
};

/// The analyzer picked at startup: the live model when a credential is
/// configured, the offline demo otherwise.
#[derive(Debug, Clone)]
pub enum NutriScanService {
    Live(LiveFoodAnalysisService<OpenAILLMClient>),
    Offline(OfflineFoodAnalysisService),
}

impl NutriScanService {
    pub fn is_live(&self) -> bool {
        matches!(self, NutriScanService::Live(_))
    }
}

impl FoodAnalysisService for NutriScanService {
    async fn analyze_food(&self, input: AnalyzeFoodInput) -> Result<FoodAnalysis, AnalysisError> {
        match self {
            NutriScanService::Live(service) => service.analyze_food(input).await,
            NutriScanService::Offline(service) => service.analyze_food(input).await,
        }
    }
}

pub fn create_service(config: &NutriScanConfig) -> Result<NutriScanService, anyhow::Error> {
    let service = match &config.llm {
        Some(llm) => {
            let client = OpenAILLMClient::new(llm)?;
            tracing::info!(model = %llm.model, endpoint = %llm.endpoint, "using live vision model");
            NutriScanService::Live(LiveFoodAnalysisService::new(client))
        }
        None => {
            tracing::info!("no model credential configured, using offline demo analysis");
            NutriScanService::Offline(OfflineFoodAnalysisService::new())
        }
    };

    Ok(service)
}
