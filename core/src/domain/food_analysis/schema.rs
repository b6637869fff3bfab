/// System instruction pinning the reply to the `FoodAnalysis` JSON shape
pub const FOOD_ANALYSIS_SYSTEM_INSTRUCTION: &str = r#"你是一个专业的营养分析师。分析用户上传的食物图片，识别其中的食物并估算营养成分。
请以JSON格式返回分析结果，格式如下：
{
  "foods": [
    {
      "name": "食物名称（中文）",
      "calories": 卡路里数值,
      "protein": 蛋白质克数,
      "carbs": 碳水化合物克数,
      "fat": 脂肪克数,
      "fiber": 膳食纤维克数,
      "sugar": 糖分克数,
      "serving": "份量描述（如：1碗、100克）"
    }
  ],
  "totalCalories": 总卡路里,
  "confidence": 置信度(0-1),
  "suggestions": ["营养建议1", "营养建议2"]
}
只返回JSON，不要其他内容。"#;

/// Text part of the user turn sent alongside the image
pub const FOOD_ANALYSIS_USER_PROMPT: &str = "请分析这张食物图片中的营养成分";

/// Keys a reply object must carry at least one of to count as an analysis.
pub const FOOD_ANALYSIS_KEYS: [&str; 4] = ["foods", "totalCalories", "confidence", "suggestions"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_instruction_names_every_field() {
        for field in [
            "foods",
            "name",
            "calories",
            "protein",
            "carbs",
            "fat",
            "fiber",
            "sugar",
            "serving",
            "totalCalories",
            "confidence",
            "suggestions",
        ] {
            assert!(
                FOOD_ANALYSIS_SYSTEM_INSTRUCTION.contains(&format!("\"{field}\"")),
                "missing {field}"
            );
        }
    }
}
