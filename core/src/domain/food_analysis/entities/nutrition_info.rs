use serde::{Deserialize, Serialize};

/// One recognized food item. Missing fields from the model default to zero or
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionInfo {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub serving: String,
}

impl NutritionInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
        fiber: f64,
        sugar: f64,
        serving: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            calories,
            protein,
            carbs,
            fat,
            fiber,
            sugar,
            serving: serving.into(),
        }
    }

    /// Gram quantities paired with their field names.
    pub fn nutrients(&self) -> [(&'static str, f64); 5] {
        [
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
            ("sugar", self.sugar),
        ]
    }
}
