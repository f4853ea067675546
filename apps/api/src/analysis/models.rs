use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::project::FileKind;

/// Classification of a project's source content. AI-derived or heuristic;
/// never validated beyond shape.
///
/// Model replies drift in field types (arrays where strings are expected,
/// `null`, numbers as strings). Every field is read leniently so one odd
/// value never discards an otherwise usable reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentAnalysis {
    #[serde(deserialize_with = "lenient_string")]
    pub primary_category: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub secondary_categories: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub content_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub complexity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub target_audience: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tone: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub key_topics: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub content_length: String,
    #[serde(deserialize_with = "lenient_string")]
    pub engagement_potential: String,
    #[serde(deserialize_with = "lenient_string")]
    pub viral_potential: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub demographic_appeal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostingGuidance {
    #[serde(deserialize_with = "lenient_string")]
    pub optimal_length: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub best_times: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub hashtags: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub formatting: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub engagement: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub best_practices: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub content_adaptation: String,
}

/// A scored platform recommendation. Order is meaningful and never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformSuggestion {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub relevance_score: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub audience: String,
    #[serde(deserialize_with = "lenient_string")]
    pub best_for: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content_format: String,
    #[serde(deserialize_with = "lenient_string")]
    pub engagement_style: String,
    #[serde(deserialize_with = "lenient_string")]
    pub competition_level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub organic_reach: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_guidance"
    )]
    pub posting_guidance: Option<PostingGuidance>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    #[default]
    Ai,
    Fallback,
}

/// Both sections must be present; their contents are read leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub content_analysis: ContentAnalysis,
    #[serde(deserialize_with = "lenient_suggestions")]
    pub suggested_platforms: Vec<PlatformSuggestion>,
    #[serde(skip_deserializing)]
    pub source: AnalysisSource,
}

/// What the analyzer needs to know about an attached file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub kind: FileKind,
    pub file_name: String,
    pub size: u64,
}

/// Scores arrive as numbers of any shape, numeric strings ("85", "85%") or
/// `null`; anything unreadable scores 0. Clamped to 0–100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u32)
}

/// Strings pass through, `null` is empty, arrays are joined with ", ",
/// other scalars use their JSON text.
fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = value_to_string(Value::deserialize(deserializer)?);
    Ok(Some(text).filter(|s| !s.is_empty()))
}

/// A lone string becomes a one-element list.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    Ok(items
        .into_iter()
        .map(value_to_string)
        .filter(|s| !s.is_empty())
        .collect())
}

fn lenient_guidance<'de, D>(deserializer: D) -> Result<Option<PostingGuidance>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// Must be an array; entries that are not objects are skipped.
fn lenient_suggestions<'de, D>(deserializer: D) -> Result<Vec<PlatformSuggestion>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Err(serde::de::Error::custom("suggestedPlatforms must be an array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ai_payload_deserializes_with_defaults() {
        let json = r#"{
            "contentAnalysis": {"primaryCategory": "technology", "keyTopics": ["rust"]},
            "suggestedPlatforms": [{"id": "hackernews", "name": "Hacker News", "relevanceScore": 87.6}]
        }"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content_analysis.primary_category, "technology");
        assert!(parsed.content_analysis.tone.is_empty());
        assert_eq!(parsed.suggested_platforms[0].relevance_score, 88);
        assert_eq!(parsed.source, AnalysisSource::Ai);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let s: PlatformSuggestion =
            serde_json::from_str(r#"{"id": "x", "relevanceScore": 140}"#).unwrap();
        assert_eq!(s.relevance_score, 100);
    }

    #[test]
    fn test_missing_sections_fail_to_parse() {
        let result: Result<AnalysisResult, _> =
            serde_json::from_str(r#"{"contentAnalysis": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_drifting_field_types_are_tolerated() {
        let json = r##"{
            "contentAnalysis": {
                "primaryCategory": "gardening",
                "tone": null,
                "keyTopics": "tomatoes",
                "secondaryCategories": ["lifestyle", null, 3],
                "demographicAppeal": ["25-45", "homeowners"]
            },
            "suggestedPlatforms": [
                {
                    "id": "pinterest",
                    "relevanceScore": "85%",
                    "postingGuidance": {"hashtags": ["#garden", "#diy"], "bestTimes": "8 PM"}
                },
                {"id": "reddit", "relevanceScore": null, "postingGuidance": "post weekly"},
                "not a suggestion"
            ]
        }"##;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();

        let analysis = &parsed.content_analysis;
        assert_eq!(analysis.primary_category, "gardening");
        assert!(analysis.tone.is_empty());
        assert_eq!(analysis.key_topics, vec!["tomatoes"]);
        assert_eq!(analysis.secondary_categories, vec!["lifestyle", "3"]);
        assert_eq!(analysis.demographic_appeal.as_deref(), Some("25-45, homeowners"));

        assert_eq!(parsed.suggested_platforms.len(), 2);
        let pinterest = &parsed.suggested_platforms[0];
        assert_eq!(pinterest.relevance_score, 85);
        let guidance = pinterest.posting_guidance.as_ref().unwrap();
        assert_eq!(guidance.hashtags, "#garden, #diy");
        assert_eq!(guidance.best_times, vec!["8 PM"]);

        let reddit = &parsed.suggested_platforms[1];
        assert_eq!(reddit.relevance_score, 0);
        assert!(reddit.posting_guidance.is_none());
    }

    #[test]
    fn test_suggestions_must_be_an_array() {
        let result: Result<AnalysisResult, _> =
            serde_json::from_str(r#"{"contentAnalysis": {}, "suggestedPlatforms": "linkedin"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(PlatformSuggestion {
            id: "reddit".to_string(),
            relevance_score: 82,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["relevanceScore"], 82);
        assert!(value.get("postingGuidance").is_none());
    }
}
