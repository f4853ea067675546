//! Heuristic content analysis used when the AI call fails or returns
//! something unparsable.
//!
//! Pure and deterministic: category from keyword substrings, size buckets
//! from a space-split word count, and a fixed list of seven platforms whose
//! scores move only with category and attached images. The constants are kept
//! stable so clients see identical output for identical input.

use crate::analysis::models::{
    AnalysisResult, AnalysisSource, ContentAnalysis, FileMeta, PlatformSuggestion,
    PostingGuidance,
};
use crate::models::project::FileKind;

const GENERAL_SECONDARY: &[&str] = &["content"];

const CATEGORY_RULES: [(&str, &[&str], &[&str]); 3] = [
    (
        "business",
        &["business", "startup", "saas"],
        &["entrepreneurship", "business", "technology"],
    ),
    (
        "technology",
        &["tech", "software", "ai"],
        &["tech", "innovation", "software"],
    ),
    (
        "design",
        &["design", "creative"],
        &["design", "creative", "visual"],
    ),
];

/// Returns the heuristic analysis for `content` and its attached files.
pub fn fallback_analysis(content: &str, files: &[FileMeta]) -> AnalysisResult {
    let has_images = files.iter().any(|f| f.kind == FileKind::Image);
    let has_documents = files.iter().any(|f| f.kind == FileKind::Document);
    let words: Vec<&str> = content.split(' ').collect();
    let word_count = words.len();

    let (category, secondary) = categorize(content);

    let content_type = if has_images {
        "mixed"
    } else if has_documents {
        "document"
    } else {
        "text"
    };

    let (complexity, content_length) = if word_count > 500 {
        ("advanced", "long")
    } else if word_count > 200 {
        ("intermediate", "medium")
    } else {
        ("beginner", "short")
    };

    // Length in UTF-16 code units, so "🚀🚀" (4 units) counts as a long word.
    let key_topics = words
        .iter()
        .take(8)
        .filter(|w| w.encode_utf16().count() > 3)
        .map(|w| w.to_string())
        .collect();

    let content_analysis = ContentAnalysis {
        primary_category: category.to_string(),
        secondary_categories: strings(secondary),
        content_type: content_type.to_string(),
        complexity: complexity.to_string(),
        target_audience: format!("professionals and enthusiasts in {category}"),
        tone: "professional".to_string(),
        key_topics,
        content_length: content_length.to_string(),
        engagement_potential: if has_images { "high" } else { "medium" }.to_string(),
        viral_potential: if category == "technology" { "high" } else { "medium" }.to_string(),
        demographic_appeal: None,
    };

    AnalysisResult {
        content_analysis,
        suggested_platforms: static_suggestions(category, has_images),
        source: AnalysisSource::Fallback,
    }
}

/// First matching rule wins; matching is case-insensitive substring search.
fn categorize(content: &str) -> (&'static str, &'static [&'static str]) {
    let lower = content.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _, secondary)| (*category, *secondary))
        .unwrap_or(("general", GENERAL_SECONDARY))
}

fn static_suggestions(category: &str, has_images: bool) -> Vec<PlatformSuggestion> {
    let product_hunt_score = if category == "technology" || category == "business" {
        90
    } else {
        75
    };

    vec![
        PlatformSuggestion {
            id: "linkedin".to_string(),
            name: "LinkedIn".to_string(),
            category: "Professional Network".to_string(),
            icon: "💼".to_string(),
            description: "Professional networking and business content".to_string(),
            relevance_score: 95,
            audience: "Professionals, business leaders, entrepreneurs".to_string(),
            best_for: "Business insights, professional updates, industry content".to_string(),
            content_format: "1-3 paragraphs with professional tone".to_string(),
            engagement_style: "Professional comments, shares, endorsements".to_string(),
            competition_level: "medium".to_string(),
            organic_reach: "good for business content".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "1200-2000 characters".to_string(),
                best_times: strings(&["8 AM", "12 PM", "5 PM"]),
                hashtags: "3-5 professional hashtags".to_string(),
                formatting: strings(&["Professional tone", "Clear structure", "Industry insights"]),
                engagement: strings(&[
                    "Ask thought-provoking questions",
                    "Share experiences",
                    "Tag relevant people",
                ]),
                best_practices: strings(&[
                    "Post consistently",
                    "Engage with comments",
                    "Share valuable insights",
                ]),
                content_adaptation: "Focus on professional value and business insights".to_string(),
            }),
        },
        PlatformSuggestion {
            id: "twitter".to_string(),
            name: "Twitter/X".to_string(),
            category: "Social Media".to_string(),
            icon: "🐦".to_string(),
            description: "Real-time social networking and microblogging".to_string(),
            relevance_score: 88,
            audience: "General public, news consumers, thought leaders".to_string(),
            best_for: "Quick updates, breaking news, threads, conversations".to_string(),
            content_format: "280 characters per tweet, threads for longer content".to_string(),
            engagement_style: "Fast-paced interactions, retweets, replies".to_string(),
            competition_level: "high".to_string(),
            organic_reach: "moderate, depends on engagement".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "Under 280 characters per tweet".to_string(),
                best_times: strings(&["9 AM", "12 PM", "3 PM", "6 PM"]),
                hashtags: "2-3 relevant hashtags maximum".to_string(),
                formatting: strings(&["Concise language", "Clear message", "Engaging hooks"]),
                engagement: strings(&["Reply to comments", "Use trending hashtags", "Create polls"]),
                best_practices: strings(&[
                    "Tweet consistently",
                    "Engage authentically",
                    "Share timely content",
                ]),
                content_adaptation: "Break into tweet-sized chunks or create thread".to_string(),
            }),
        },
        PlatformSuggestion {
            id: "medium".to_string(),
            name: "Medium".to_string(),
            category: "Publishing Platform".to_string(),
            icon: "📝".to_string(),
            description: "Long-form content publishing and thought leadership".to_string(),
            relevance_score: 85,
            audience: "Readers, writers, professionals seeking in-depth content".to_string(),
            best_for: "Detailed articles, thought leadership, tutorials".to_string(),
            content_format: "Long-form articles (5+ minute read)".to_string(),
            engagement_style: "Thoughtful comments, claps, follows".to_string(),
            competition_level: "medium".to_string(),
            organic_reach: "good for quality content".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "1500-3000 words".to_string(),
                best_times: strings(&["7 AM", "1 PM", "8 PM"]),
                hashtags: "Use Medium tags instead".to_string(),
                formatting: strings(&["Clear headings", "Subheadings", "Images for breaks"]),
                engagement: strings(&[
                    "Respond to comments",
                    "Engage with other writers",
                    "Join publications",
                ]),
                best_practices: strings(&["Focus on quality", "Use compelling headlines", "Add value"]),
                content_adaptation: "Expand into comprehensive article with examples".to_string(),
            }),
        },
        PlatformSuggestion {
            id: "reddit".to_string(),
            name: "Reddit".to_string(),
            category: "Community Platform".to_string(),
            icon: "🤖".to_string(),
            description: "Community-driven discussions and content sharing".to_string(),
            relevance_score: 82,
            audience: "Diverse communities with specific interests".to_string(),
            best_for: "Community discussions, AMAs, sharing resources".to_string(),
            content_format: "Text posts, links, images with context".to_string(),
            engagement_style: "Upvotes, detailed comments, community interaction".to_string(),
            competition_level: "high".to_string(),
            organic_reach: "excellent if community embraces content".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "200-500 words with context".to_string(),
                best_times: strings(&["6 AM", "10 AM", "7 PM"]),
                hashtags: "Not applicable - use relevant subreddits".to_string(),
                formatting: strings(&["Clear titles", "Provide context", "Follow subreddit rules"]),
                engagement: strings(&[
                    "Respond to all comments",
                    "Follow community guidelines",
                    "Add genuine value",
                ]),
                best_practices: strings(&["Know the community", "Provide value first", "Be authentic"]),
                content_adaptation: "Tailor to specific subreddit interests and rules".to_string(),
            }),
        },
        PlatformSuggestion {
            id: "producthunt".to_string(),
            name: "Product Hunt".to_string(),
            category: "Product Discovery".to_string(),
            icon: "🚀".to_string(),
            description: "Platform for discovering and launching new products".to_string(),
            relevance_score: product_hunt_score,
            audience: "Entrepreneurs, makers, early adopters, investors".to_string(),
            best_for: "Product launches, tool discoveries, tech announcements".to_string(),
            content_format: "Product descriptions with visuals".to_string(),
            engagement_style: "Upvotes, comments, maker interactions".to_string(),
            competition_level: "high".to_string(),
            organic_reach: "excellent for featured products".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "Brief description with key benefits".to_string(),
                best_times: strings(&["12:01 AM PST launch day"]),
                hashtags: "Use relevant tags and categories".to_string(),
                formatting: strings(&[
                    "Clear product value",
                    "High-quality visuals",
                    "Compelling tagline",
                ]),
                engagement: strings(&["Respond to comments", "Thank supporters", "Share updates"]),
                best_practices: strings(&[
                    "Build community first",
                    "Prepare launch materials",
                    "Follow up",
                ]),
                content_adaptation: "Focus on product value and innovation".to_string(),
            }),
        },
        PlatformSuggestion {
            id: "youtube".to_string(),
            name: "YouTube".to_string(),
            category: "Video Platform".to_string(),
            icon: "📺".to_string(),
            description: "Video content sharing and monetization platform".to_string(),
            relevance_score: if has_images { 85 } else { 75 },
            audience: "Global audience across all demographics".to_string(),
            best_for: "Tutorials, explanations, entertainment, education".to_string(),
            content_format: "Video content with thumbnails and descriptions".to_string(),
            engagement_style: "Views, likes, comments, subscriptions".to_string(),
            competition_level: "very high".to_string(),
            organic_reach: "excellent for engaging content".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "8-15 minutes for optimal retention".to_string(),
                best_times: strings(&["2 PM", "8 PM", "9 PM"]),
                hashtags: "Use in description and tags".to_string(),
                formatting: strings(&["Compelling thumbnails", "Clear titles", "Structured content"]),
                engagement: strings(&["Reply to comments", "Create playlists", "Use community tab"]),
                best_practices: strings(&[
                    "Consistent upload schedule",
                    "SEO optimization",
                    "Audience retention",
                ]),
                content_adaptation: "Convert to video format with visual elements".to_string(),
            }),
        },
        PlatformSuggestion {
            id: "instagram".to_string(),
            name: "Instagram".to_string(),
            category: "Visual Social Media".to_string(),
            icon: "📸".to_string(),
            description: "Visual content sharing with photos and videos".to_string(),
            relevance_score: if has_images { 90 } else { 70 },
            audience: "Younger demographics, visual content consumers".to_string(),
            best_for: "Visual storytelling, behind-the-scenes, lifestyle content".to_string(),
            content_format: "Images, videos, stories, reels".to_string(),
            engagement_style: "Likes, comments, shares, saves".to_string(),
            competition_level: "very high".to_string(),
            organic_reach: "declining but good for engaging content".to_string(),
            posting_guidance: Some(PostingGuidance {
                optimal_length: "2200 characters max for captions".to_string(),
                best_times: strings(&["11 AM", "1 PM", "5 PM"]),
                hashtags: "20-30 relevant hashtags".to_string(),
                formatting: strings(&["High-quality visuals", "Engaging captions", "Story highlights"]),
                engagement: strings(&["Use stories", "Respond to DMs", "Create reels"]),
                best_practices: strings(&[
                    "Visual consistency",
                    "Use all features",
                    "Engage with community",
                ]),
                content_adaptation: "Create visual representations and carousel posts".to_string(),
            }),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(kind: FileKind) -> FileMeta {
        FileMeta {
            kind,
            file_name: "attachment".to_string(),
            size: 2048,
        }
    }

    fn score(result: &AnalysisResult, id: &str) -> u32 {
        result
            .suggested_platforms
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.relevance_score)
            .unwrap()
    }

    #[test]
    fn test_startup_content_is_business() {
        let result = fallback_analysis("Our startup just closed its seed round", &[]);
        assert_eq!(result.content_analysis.primary_category, "business");
        assert_eq!(
            result.content_analysis.secondary_categories,
            vec!["entrepreneurship", "business", "technology"]
        );
        assert_eq!(result.content_analysis.content_type, "text");
        assert_eq!(score(&result, "producthunt"), 90);
        assert_eq!(result.source, AnalysisSource::Fallback);
    }

    #[test]
    fn test_document_attachment_sets_content_type() {
        let result = fallback_analysis("A startup story", &[file(FileKind::Document)]);
        assert_eq!(result.content_analysis.content_type, "document");
        assert_eq!(score(&result, "producthunt"), 90);
    }

    #[test]
    fn test_images_boost_visual_platforms() {
        let result = fallback_analysis("Summer garden photos", &[file(FileKind::Image)]);
        assert_eq!(result.content_analysis.content_type, "mixed");
        assert_eq!(result.content_analysis.engagement_potential, "high");
        assert_eq!(score(&result, "instagram"), 90);
        assert_eq!(score(&result, "youtube"), 85);

        let without = fallback_analysis("Summer garden photos", &[]);
        assert_eq!(score(&without, "instagram"), 70);
        assert_eq!(score(&without, "youtube"), 75);
    }

    #[test]
    fn test_category_precedence_and_case() {
        // "business" is checked before "tech".
        let both = fallback_analysis("TECH BUSINESS news", &[]);
        assert_eq!(both.content_analysis.primary_category, "business");

        let tech = fallback_analysis("New Software release", &[]);
        assert_eq!(tech.content_analysis.primary_category, "technology");
        assert_eq!(tech.content_analysis.viral_potential, "high");
        assert_eq!(score(&tech, "producthunt"), 90);

        let design = fallback_analysis("Creative process notes", &[]);
        assert_eq!(design.content_analysis.primary_category, "design");
        assert_eq!(score(&design, "producthunt"), 75);

        let general = fallback_analysis("Hello world", &[]);
        assert_eq!(general.content_analysis.primary_category, "general");
        assert_eq!(general.content_analysis.secondary_categories, vec!["content"]);
        assert_eq!(
            general.content_analysis.target_audience,
            "professionals and enthusiasts in general"
        );
    }

    #[test]
    fn test_ai_substring_matches_inside_words() {
        // "ai" inside "said" still counts as technology.
        let result = fallback_analysis("She said hello", &[]);
        assert_eq!(result.content_analysis.primary_category, "technology");
    }

    #[test]
    fn test_word_count_thresholds() {
        let short = fallback_analysis(&vec!["word"; 200].join(" "), &[]);
        assert_eq!(short.content_analysis.complexity, "beginner");
        assert_eq!(short.content_analysis.content_length, "short");

        let medium = fallback_analysis(&vec!["word"; 201].join(" "), &[]);
        assert_eq!(medium.content_analysis.complexity, "intermediate");
        assert_eq!(medium.content_analysis.content_length, "medium");

        let long = fallback_analysis(&vec!["word"; 501].join(" "), &[]);
        assert_eq!(long.content_analysis.complexity, "advanced");
        assert_eq!(long.content_analysis.content_length, "long");
    }

    #[test]
    fn test_key_topics_are_long_words_from_first_eight() {
        let result = fallback_analysis(
            "the quick brown fox jumps over the lazy sleeping dog",
            &[],
        );
        assert_eq!(
            result.content_analysis.key_topics,
            vec!["quick", "brown", "jumps", "over", "lazy"]
        );
    }

    #[test]
    fn test_key_topic_length_counts_utf16_units() {
        let result = fallback_analysis("🚀🚀 café naïve ok 😀", &[]);
        assert_eq!(result.content_analysis.key_topics, vec!["🚀🚀", "café", "naïve"]);
    }

    #[test]
    fn test_static_list_order_is_fixed() {
        let ids: Vec<_> = fallback_analysis("anything", &[])
            .suggested_platforms
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(
            ids,
            vec!["linkedin", "twitter", "medium", "reddit", "producthunt", "youtube", "instagram"]
        );
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let files = vec![file(FileKind::Image), file(FileKind::Document)];
        let a = serde_json::to_string(&fallback_analysis("A SaaS for designers", &files)).unwrap();
        let b = serde_json::to_string(&fallback_analysis("A SaaS for designers", &files)).unwrap();
        assert_eq!(a, b);
    }
}
