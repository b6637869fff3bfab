use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::LLMConfig,
    food_analysis::{entities::AnalysisError, ports::LLMClient, value_objects::VisionRequest},
};

#[derive(Debug, Clone)]
pub struct OpenAILLMClient {
    api_key: String,
    model_name: String,
    endpoint: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<Part>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Part {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAILLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            model_name: config.model.clone(),
            endpoint: config.endpoint.clone(),
            max_tokens: config.max_tokens,
            client: builder.build()?,
        })
    }

    fn build_request(&self, request: VisionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(request.system_instruction),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        Part::Text {
                            text: request.prompt,
                        },
                        Part::ImageUrl {
                            image_url: ImageUrl {
                                url: request.image_data_uri,
                            },
                        },
                    ]),
                },
            ],
            max_tokens: self.max_tokens,
        }
    }

    async fn call_openai_api(&self, request: ChatCompletionRequest) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                AnalysisError::RequestFailed(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(AnalysisError::RequestFailed(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            AnalysisError::EmptyResponse
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                tracing::error!("No completion text in OpenAI response");
                AnalysisError::EmptyResponse
            })
    }
}

impl LLMClient for OpenAILLMClient {
    async fn generate_with_image(&self, request: VisionRequest) -> Result<String, AnalysisError> {
        let request = self.build_request(request);
        tracing::debug!(model = %request.model, max_tokens = request.max_tokens, "calling OpenAI");

        self.call_openai_api(request).await
    }
}
