// Content analysis prompt. The source content and attached-file lines are
// inserted between HEAD and TAIL by `build_analysis_prompt`.

use crate::analysis::models::FileMeta;

pub const ANALYSIS_PROMPT_HEAD: &str = "As an expert content strategist with deep knowledge of digital platforms and audience behavior, analyze the following content and recommend the most effective platforms for maximum reach and engagement.

CONTENT TO ANALYZE:
";

pub const ANALYSIS_PROMPT_TAIL: &str = r#"

COMPREHENSIVE ANALYSIS REQUIRED:
1. Content categorization and audience identification
2. Optimal platform selection from diverse digital ecosystem
3. Platform-specific adaptation strategies
4. Engagement optimization recommendations

Consider these platform categories:
- Professional Networks: LinkedIn, AngelList, Wellfound, Glassdoor
- Social Media: Twitter/X, Instagram, Facebook, TikTok, Snapchat, BeReal
- Content Communities: Reddit, Discord, Slack communities, Telegram
- Creative Platforms: Pinterest, Behance, Dribbble, DeviantArt, Figma Community
- Video Platforms: YouTube, Vimeo, Twitch, YouTube Shorts, Instagram Reels
- Publishing: Medium, Substack, Hashnode, Dev.to, Ghost, WordPress
- Professional Forums: Stack Overflow, GitHub, ProductHunt, Indie Hackers
- Niche Communities: Quora, Clubhouse, Spaces, specialized forums
- E-commerce/Review: Amazon, Etsy, Trustpilot, Google Reviews
- News/Discussion: Hacker News, Mastodon, Threads, Bluesky

Return response as JSON with this structure:
{
  "contentAnalysis": {
    "primaryCategory": "content main category",
    "secondaryCategories": ["related", "categories"],
    "contentType": "text/image/video/document/mixed",
    "complexity": "beginner/intermediate/advanced",
    "targetAudience": "detailed audience description",
    "tone": "professional/casual/educational/entertainment/inspirational",
    "keyTopics": ["main", "topics", "covered"],
    "contentLength": "short/medium/long",
    "engagementPotential": "low/medium/high",
    "viralPotential": "low/medium/high",
    "demographicAppeal": "age groups and interests most likely to engage"
  },
  "suggestedPlatforms": [
    {
      "id": "platform_identifier",
      "name": "Platform Name",
      "category": "Platform category",
      "icon": "appropriate emoji",
      "description": "Platform overview and unique value",
      "relevanceScore": 85,
      "audience": "Platform's primary user base",
      "bestFor": "Content types that perform best",
      "contentFormat": "Optimal content structure",
      "engagementStyle": "How users interact",
      "competitionLevel": "low/medium/high",
      "organicReach": "Platform's organic visibility",
      "postingGuidance": {
        "optimalLength": "specific character/word limits",
        "bestTimes": ["optimal posting schedule"],
        "hashtags": "hashtag strategy and recommendations",
        "formatting": ["specific formatting tips"],
        "engagement": ["proven engagement tactics"],
        "bestPractices": ["platform-specific optimization tips"],
        "contentAdaptation": "how to modify content for this platform"
      }
    }
  ]
}

Suggest 20-30 platforms with relevance scores above 70. Focus on platforms where this specific content type and audience would thrive. Provide actionable, specific guidance for each platform."#;

pub fn build_analysis_prompt(content: &str, files: &[FileMeta]) -> String {
    let mut prompt = String::from(ANALYSIS_PROMPT_HEAD);
    prompt.push_str(content);
    if !files.is_empty() {
        prompt.push_str("\n\nAttached Files Analysis:\n");
        let lines = files
            .iter()
            .map(|f| {
                format!(
                    "- {} file: \"{}\" ({}KB)",
                    f.kind.as_str().to_uppercase(),
                    f.file_name,
                    (f.size as f64 / 1024.0).round() as u64
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        prompt.push_str(&lines);
    }
    prompt.push_str(ANALYSIS_PROMPT_TAIL);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::FileKind;

    #[test]
    fn test_prompt_without_files() {
        let prompt = build_analysis_prompt("Launching our SaaS", &[]);
        assert!(prompt.contains("CONTENT TO ANALYZE:\nLaunching our SaaS\n\nCOMPREHENSIVE ANALYSIS REQUIRED:"));
        assert!(!prompt.contains("Attached Files Analysis"));
        assert!(prompt.ends_with("Provide actionable, specific guidance for each platform."));
    }

    #[test]
    fn test_prompt_lists_files_with_rounded_size() {
        let files = vec![FileMeta {
            kind: FileKind::Image,
            file_name: "cover.png".to_string(),
            size: 1536,
        }];
        let prompt = build_analysis_prompt("body", &files);
        assert!(prompt.contains("body\n\nAttached Files Analysis:\n- IMAGE file: \"cover.png\" (2KB)\n\nCOMPREHENSIVE"));
    }
}
