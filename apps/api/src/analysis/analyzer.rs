use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::fallback::fallback_analysis;
use crate::analysis::models::{AnalysisResult, AnalysisSource, FileMeta};
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::TextGenerator;
use crate::repurpose::normalizer::strip_code_fences;

/// Classifies `content` and ranks platforms for it.
///
/// One AI call. Any gateway error or unparsable reply falls back to the local
/// heuristic, so this never fails; `source` tells the two apart.
pub async fn analyze(llm: &dyn TextGenerator, content: &str, files: &[FileMeta]) -> AnalysisResult {
    let prompt = build_analysis_prompt(content, files);

    let raw = match llm.generate(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Content analysis call failed, using fallback analysis");
            return fallback_analysis(content, files);
        }
    };

    match parse_analysis(&raw) {
        Ok(result) => {
            info!(
                category = %result.content_analysis.primary_category,
                "Content analysis returned {} platform suggestion(s)",
                result.suggested_platforms.len()
            );
            result
        }
        Err(e) => {
            warn!(error = %e, "Content analysis reply was not usable, using fallback analysis");
            fallback_analysis(content, files)
        }
    }
}

/// Syntax is checked first; section contents are then read field by field,
/// so a stray type in one field keeps the rest of the reply.
fn parse_analysis(raw: &str) -> Result<AnalysisResult, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned.trim())?;
    let mut result: AnalysisResult = serde_json::from_value(value)?;
    result.source = AnalysisSource::Ai;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::project::FileKind;

    struct FixedReply(Result<String, LlmError>);

    #[async_trait]
    impl TextGenerator for FixedReply {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(LlmError::RateLimited) => Err(LlmError::RateLimited),
                Err(LlmError::GenerationFailed(msg)) => Err(LlmError::GenerationFailed(msg.clone())),
            }
        }
    }

    fn ai_reply() -> String {
        json!({
            "contentAnalysis": {
                "primaryCategory": "gardening",
                "secondaryCategories": ["lifestyle"],
                "contentType": "text",
                "complexity": "beginner",
                "targetAudience": "home gardeners",
                "tone": "casual",
                "keyTopics": ["tomatoes"],
                "contentLength": "short",
                "engagementPotential": "medium",
                "viralPotential": "low"
            },
            "suggestedPlatforms": [
                {"id": "pinterest", "name": "Pinterest", "relevanceScore": 92},
                {"id": "reddit", "name": "Reddit", "relevanceScore": 81}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fenced_ai_reply_is_used() {
        let llm = FixedReply(Ok(format!("```json\n{}\n```", ai_reply())));
        let result = analyze(&llm, "Growing tomatoes on a balcony", &[]).await;

        assert_eq!(result.source, AnalysisSource::Ai);
        assert_eq!(result.content_analysis.primary_category, "gardening");
        let ids: Vec<_> = result.suggested_platforms.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pinterest", "reddit"]);
    }

    #[tokio::test]
    async fn test_gateway_failure_falls_back() {
        let llm = FixedReply(Err(LlmError::RateLimited));
        let files = vec![FileMeta {
            kind: FileKind::Document,
            file_name: "deck.pdf".to_string(),
            size: 4096,
        }];
        let result = analyze(&llm, "Our startup pitch", &files).await;

        assert_eq!(result.source, AnalysisSource::Fallback);
        assert_eq!(result, fallback_analysis("Our startup pitch", &files));
    }

    #[tokio::test]
    async fn test_prose_reply_falls_back() {
        let llm = FixedReply(Ok("Sure! Here are some platforms you might like.".to_string()));
        let result = analyze(&llm, "Design systems at scale", &[]).await;

        assert_eq!(result.source, AnalysisSource::Fallback);
        assert_eq!(result.content_analysis.primary_category, "design");
        assert_eq!(result.suggested_platforms.len(), 7);
    }

    #[tokio::test]
    async fn test_reply_missing_sections_falls_back() {
        let llm = FixedReply(Ok(r#"{"contentAnalysis": {"tone": "casual"}}"#.to_string()));
        let result = analyze(&llm, "hello", &[]).await;
        assert_eq!(result.source, AnalysisSource::Fallback);
    }

    #[tokio::test]
    async fn test_reply_with_drifting_field_types_is_kept() {
        let reply = r##"{
            "contentAnalysis": {"primaryCategory": "gardening", "tone": null},
            "suggestedPlatforms": [
                {
                    "id": "pinterest",
                    "relevanceScore": "85",
                    "postingGuidance": {"hashtags": ["#garden", "#diy"]}
                }
            ]
        }"##;
        let llm = FixedReply(Ok(reply.to_string()));
        let result = analyze(&llm, "Growing tomatoes on a balcony", &[]).await;

        assert_eq!(result.source, AnalysisSource::Ai);
        assert_eq!(result.content_analysis.primary_category, "gardening");
        assert!(result.content_analysis.tone.is_empty());
        let pinterest = &result.suggested_platforms[0];
        assert_eq!(pinterest.relevance_score, 85);
        assert_eq!(
            pinterest.posting_guidance.as_ref().map(|g| g.hashtags.as_str()),
            Some("#garden, #diy")
        );
    }
}
