//! 评分提示词构建

use crate::models::criteria::entities::Criterion;

use super::result::{KEY_DETAILED_EXPLANATION, KEY_FIT, KEY_GENERAL_EXPLANATION, KEY_SCORE};

/// 评分标准名称 → 子分数键：小写，连续空白替换为单个下划线
///
/// 两个名称可能得到同一个键，这里不做区分。
pub fn criterion_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn expected_keys(criteria: &[Criterion]) -> Vec<String> {
    criteria.iter().map(|c| criterion_key(&c.name)).collect()
}

/// 发送给模型的评分提示词
#[derive(Debug, Clone)]
pub struct GradingPrompt<'a> {
    pub title: &'a str,
    pub essay_text: &'a str,
    pub rubric_text: &'a str,
    pub expected_keys: &'a [String],
}

impl GradingPrompt<'_> {
    pub fn render(&self) -> String {
        let mut lines = vec![
            "You are a teacher able to grade essays in many subjects. \
             Grade the following essay on a scale from 0 to 10."
                .to_string(),
            String::new(),
            format!("Essay title: {}", self.title),
            String::new(),
            self.rubric_text.to_string(),
            String::new(),
            "Essay:".to_string(),
            self.essay_text.to_string(),
            String::new(),
            "Grade strictly according to the criteria above, and only with respect to \
             the subject of the essay title. Decide whether the content of the essay \
             fits the essay title."
                .to_string(),
        ];

        if !self.expected_keys.is_empty() {
            lines.push("Evaluate each of the following dimensions separately:".to_string());
            lines.extend(self.expected_keys.iter().map(|key| {
                format!(
                    "- {key}: evaluate the essay on this criterion and give a number \
                     no greater than its maximum points."
                )
            }));
        }

        lines.push(String::new());
        lines.push(
            "Respond with exactly one JSON code block fenced with ```json and nothing else, \
             using this format:"
                .to_string(),
        );
        lines.push(format!("```json\n{{\n{}\n}}\n```", self.schema_entries().join(",\n")));

        lines.join("\n")
    }

    /// 输出格式中的各个字段，每个评分标准一个占位
    fn schema_entries(&self) -> Vec<String> {
        let mut entries = vec![
            format!("  \"{KEY_FIT}\": \"[yes/no]\""),
            format!("  \"{KEY_GENERAL_EXPLANATION}\": \"[general explanation]\""),
            format!("  \"{KEY_DETAILED_EXPLANATION}\": \"[detailed explanation]\""),
            format!("  \"{KEY_SCORE}\": \"[overall score from 0 to 10]\""),
        ];
        entries.extend(
            self.expected_keys
                .iter()
                .map(|key| format!("  \"{key}\": \"[score for {key}]\"")),
        );
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| criterion_key(n)).collect()
    }

    #[test]
    fn test_criterion_key() {
        assert_eq!(criterion_key("Grammar"), "grammar");
        assert_eq!(criterion_key("Content Depth"), "content_depth");
        assert_eq!(criterion_key("  Logic \t and   Flow "), "logic_and_flow");
        assert_eq!(criterion_key("Ngữ Pháp"), "ngữ_pháp");
    }

    #[test]
    fn test_colliding_keys_are_kept() {
        assert_eq!(
            keys(&["Content Depth", "content   depth"]),
            vec!["content_depth", "content_depth"]
        );
    }

    #[test]
    fn test_prompt_contents() {
        let expected = keys(&["Grammar", "Content Depth"]);
        let prompt = GradingPrompt {
            title: "Climate change",
            essay_text: "The planet is warming.",
            rubric_text: "Grade according to the following criteria:\n- Grammar: x (Max 4 points)",
            expected_keys: &expected,
        }
        .render();

        assert!(prompt.contains("Essay title: Climate change"));
        assert!(prompt.contains("The planet is warming."));
        assert!(prompt.contains("- Grammar: x (Max 4 points)"));
        assert!(prompt.contains("0 to 10"));
        assert!(prompt.contains("```json\n{"));

        for key in &expected {
            let placeholder = format!("\"{key}\": \"[score for {key}]\"");
            assert_eq!(prompt.matches(&placeholder).count(), 1);
            assert_eq!(prompt.matches(&format!("- {key}: evaluate")).count(), 1);
        }
    }

    #[test]
    fn test_schema_block_is_valid_json_shape() {
        let expected = keys(&["Grammar", "Content Depth"]);
        let prompt = GradingPrompt {
            title: "t",
            essay_text: "e",
            rubric_text: "r",
            expected_keys: &expected,
        }
        .render();

        let start = prompt.rfind("```json").unwrap() + "```json".len();
        let end = prompt.rfind("```").unwrap();
        let schema: serde_json::Value = serde_json::from_str(&prompt[start..end]).unwrap();
        let object = schema.as_object().unwrap();

        for key in ["fit", "general_explanation", "detailed_explanation", "score"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(object.contains_key("grammar"));
        assert!(object.contains_key("content_depth"));
    }

    #[test]
    fn test_schema_block_layout() {
        let expected = keys(&["Grammar"]);
        let prompt = GradingPrompt {
            title: "t",
            essay_text: "e",
            rubric_text: "r",
            expected_keys: &expected,
        }
        .render();

        assert!(prompt.ends_with(
            "```json\n{\n  \"fit\": \"[yes/no]\",\n  \"general_explanation\": \"[general explanation]\",\n  \"detailed_explanation\": \"[detailed explanation]\",\n  \"score\": \"[overall score from 0 to 10]\",\n  \"grammar\": \"[score for grammar]\"\n}\n```"
        ));
    }

    #[test]
    fn test_holistic_prompt_has_no_dimension_lines() {
        let prompt = GradingPrompt {
            title: "t",
            essay_text: "e",
            rubric_text: "r",
            expected_keys: &[],
        }
        .render();

        assert!(!prompt.contains("Evaluate each of the following dimensions"));
        assert!(prompt.contains("\"score\": \"[overall score from 0 to 10]\"\n}"));
    }
}
