use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use nutriscan_core::domain::{
    food_analysis::entities::{FoodAnalysis, NutritionInfo},
    history::store::SessionHistory,
};

pub fn success_message(analysis: &FoodAnalysis) -> String {
    format!(
        "Recognized {} foods, {} kcal total",
        analysis.foods.len(),
        analysis.total_calories
    )
}

pub fn render_analysis(analysis: &FoodAnalysis) -> String {
    let mut out = String::new();
    let totals = analysis.macro_totals();

    let _ = writeln!(
        out,
        "Total: {} kcal  (confidence {:.0}%)",
        analysis.total_calories,
        analysis.confidence * 100.0
    );
    let _ = writeln!(
        out,
        "Protein {:.1} g | Carbs {:.1} g | Fat {:.1} g | Fiber {:.1} g | Sugar {:.1} g",
        totals.protein, totals.carbs, totals.fat, totals.fiber, totals.sugar
    );

    if !analysis.foods.is_empty() {
        out.push('\n');
        for food in &analysis.foods {
            out.push_str(&render_food(food));
        }
    }

    let suggestions = analysis.suggestions();
    if !suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for suggestion in suggestions {
            let _ = writeln!(out, "  - {suggestion}");
        }
    }

    out
}

fn render_food(food: &NutritionInfo) -> String {
    let mut out = format!("* {} ({}): {} kcal\n", food.name, food.serving, food.calories);
    let _ = writeln!(
        out,
        "    protein {:.1} g, carbs {:.1} g, fat {:.1} g, fiber {:.1} g, sugar {:.1} g",
        food.protein, food.carbs, food.fat, food.fiber, food.sugar
    );
    out
}

pub fn render_history(history: &SessionHistory, now: DateTime<Utc>) -> String {
    if history.is_empty() {
        return "No analyses yet.\n".to_string();
    }

    let mut out = format!("{} records\n", history.len());
    for (index, entry) in history.list().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {}  {} kcal  {}  [{}]  {}",
            index + 1,
            entry.analysis.food_names().join(", "),
            entry.analysis.total_calories,
            format_time_ago(entry.created_at, now),
            entry.image_ref,
            entry.id,
        );
    }
    out
}

pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours} h ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
