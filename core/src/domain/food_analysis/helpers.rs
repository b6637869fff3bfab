use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use crate::domain::food_analysis::{
    entities::{AnalysisError, FoodAnalysis},
    schema::FOOD_ANALYSIS_KEYS,
    value_objects::ImageInput,
};

/// Encodes the image as a `data:<mime>;base64,...` URI.
pub fn encode_data_uri(image: &ImageInput) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type().as_str(),
        general_purpose::STANDARD.encode(image.data())
    )
}

/// Returns the top-level `{...}` spans of `text` in order.
///
/// Braces inside JSON strings are skipped. When nothing balances but a `}`
/// follows the first `{`, the greedy first-`{`-to-last-`}` span is returned as
/// the only candidate.
pub fn json_object_candidates(text: &str) -> Vec<&str> {
    let Some(first_open) = text.find('{') else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[first_open..].char_indices() {
        let index = first_open + offset;

        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = index;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    candidates.push(&text[start..=index]);
                }
            }
            _ => {}
        }
    }

    if candidates.is_empty() {
        if let Some(last_close) = text.rfind('}') {
            if last_close > first_open {
                candidates.push(&text[first_open..=last_close]);
            }
        }
    }

    candidates
}

/// Extracts and parses the analysis object embedded in a model completion.
pub fn parse_analysis(completion: &str) -> Result<FoodAnalysis, AnalysisError> {
    let candidates = json_object_candidates(completion);
    if candidates.is_empty() {
        return Err(AnalysisError::NoJsonFound);
    }

    let mut first_error: Option<serde_json::Error> = None;
    let mut fallback: Option<Value> = None;

    for candidate in candidates {
        match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => {
                let is_analysis = FOOD_ANALYSIS_KEYS
                    .iter()
                    .any(|key| value.get(key).is_some());
                if is_analysis {
                    return into_analysis(value);
                }
                fallback.get_or_insert(value);
            }
            Ok(_) => {}
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match (fallback, first_error) {
        (Some(value), _) => into_analysis(value),
        (None, Some(e)) => Err(AnalysisError::MalformedJson(e.to_string())),
        (None, None) => Err(AnalysisError::NoJsonFound),
    }
}

fn into_analysis(value: Value) -> Result<FoodAnalysis, AnalysisError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Invalid analysis format: {}", e);
        AnalysisError::MalformedJson(e.to_string())
    })
}
