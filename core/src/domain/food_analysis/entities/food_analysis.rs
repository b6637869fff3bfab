use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::food_analysis::entities::NutritionInfo;

/// Reported and summed totals may differ by this share before a warning is raised.
const CALORIE_MISMATCH_RATIO: f64 = 0.10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub foods: Vec<NutritionInfo>,
    pub total_calories: f64,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QualityWarning {
    ConfidenceOutOfRange(f64),
    NegativeQuantity {
        food: String,
        field: &'static str,
        value: f64,
    },
    CalorieMismatch {
        reported: f64,
        summed: f64,
    },
}

impl fmt::Display for QualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityWarning::ConfidenceOutOfRange(value) => {
                write!(f, "confidence {value} is outside [0, 1]")
            }
            QualityWarning::NegativeQuantity { food, field, value } => {
                write!(f, "{food}: {field} is negative ({value})")
            }
            QualityWarning::CalorieMismatch { reported, summed } => {
                write!(
                    f,
                    "totalCalories {reported} differs from item sum {summed}"
                )
            }
        }
    }
}

impl FoodAnalysis {
    pub fn new(
        foods: Vec<NutritionInfo>,
        total_calories: f64,
        confidence: f64,
        suggestions: Option<Vec<String>>,
    ) -> Self {
        Self {
            foods,
            total_calories,
            confidence,
            suggestions,
        }
    }

    /// Suggestions, treating an absent list as empty.
    pub fn suggestions(&self) -> &[String] {
        self.suggestions.as_deref().unwrap_or_default()
    }

    pub fn food_names(&self) -> Vec<&str> {
        self.foods.iter().map(|food| food.name.as_str()).collect()
    }

    pub fn item_calories(&self) -> f64 {
        self.foods.iter().map(|food| food.calories).sum()
    }

    pub fn macro_totals(&self) -> MacroTotals {
        self.foods
            .iter()
            .fold(MacroTotals::default(), |acc, food| MacroTotals {
                protein: acc.protein + food.protein,
                carbs: acc.carbs + food.carbs,
                fat: acc.fat + food.fat,
                fiber: acc.fiber + food.fiber,
                sugar: acc.sugar + food.sugar,
            })
    }

    /// Flags values that break the documented ranges. Model output is
    /// best-effort, so callers log these instead of rejecting the result.
    pub fn quality_warnings(&self) -> Vec<QualityWarning> {
        let mut warnings = Vec::new();

        if !(0.0..=1.0).contains(&self.confidence) {
            warnings.push(QualityWarning::ConfidenceOutOfRange(self.confidence));
        }

        for food in &self.foods {
            let quantities = std::iter::once(("calories", food.calories)).chain(food.nutrients());
            for (field, value) in quantities {
                if value < 0.0 {
                    warnings.push(QualityWarning::NegativeQuantity {
                        food: food.name.clone(),
                        field,
                        value,
                    });
                }
            }
        }

        if !self.foods.is_empty() {
            let summed = self.item_calories();
            let delta = (self.total_calories - summed).abs();
            if delta > 1.0 && delta > summed.abs() * CALORIE_MISMATCH_RATIO {
                warnings.push(QualityWarning::CalorieMismatch {
                    reported: self.total_calories,
                    summed,
                });
            }
        }

        warnings
    }
}
