// Per-platform repurposing prompt templates.
// Each template ends with "Original content:\n"; the source content and the
// optional file context are appended verbatim by `build_prompt`, so user text
// is never run through placeholder substitution.

use crate::repurpose::platform::Platform;

/// Metadata about an uploaded file, rendered into the prompt as extra context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_type: String,
    pub file_name: String,
}

pub const TWITTER_TEMPLATE: &str = r##"Transform the following content into an engaging Twitter thread. Create 5-7 tweets that:
- Start with a hook tweet that grabs attention
- Break down key points into digestible tweets
- Include relevant hashtags (2-3 per tweet maximum)
- End with a call-to-action or engagement question
- Use emojis appropriately to increase engagement
- Keep each tweet under 280 characters

Format your response as JSON:
{
  "title": "Twitter Thread Title",
  "content": "Full thread text with tweet numbers (1/n format)",
  "hashtags": ["#hashtag1", "#hashtag2"],
  "tweetCount": 5,
  "guidance": {
    "formatting": ["Keep tweets under 280 characters", "Use line breaks for readability"],
    "engagement": ["Ask questions to encourage replies", "Use trending hashtags when relevant"],
    "bestPractices": ["Post consistently throughout the day", "Engage with your community regularly"],
    "postingSteps": ["Schedule tweets for optimal times", "Reply to comments quickly"]
  }
}

Original content:
"##;

pub const LINKEDIN_TEMPLATE: &str = r##"Transform the following content into a professional LinkedIn post that:
- Uses a professional yet engaging tone
- Starts with a compelling hook
- Includes industry insights or personal experiences
- Has clear paragraph breaks for readability
- Ends with a thought-provoking question
- Uses 3-5 relevant hashtags

Format your response as JSON:
{
  "title": "LinkedIn Post Title",
  "content": "Full LinkedIn post with proper formatting",
  "hashtags": ["#hashtag1", "#hashtag2"],
  "guidance": {
    "formatting": ["Use professional language", "Structure with clear paragraphs", "Include compelling hook"],
    "engagement": ["Ask thought-provoking questions", "Share industry insights", "Comment on others' posts"],
    "bestPractices": ["Post 1-2 times per day maximum", "Focus on value-driven content", "Use LinkedIn Analytics"],
    "postingSteps": ["Post during business hours", "Engage within first hour", "Use LinkedIn native features"]
  }
}

Original content:
"##;

pub const FACEBOOK_TEMPLATE: &str = r##"Transform the following content into a Facebook post that:
- Creates engaging, conversational content
- Uses Facebook-specific features and formatting
- Includes community-building elements
- Has clear calls-to-action
- Uses 2-4 hashtags maximum
- Encourages comments and sharing

Format your response as JSON:
{
  "title": "Facebook Post Title",
  "content": "Full Facebook post content",
  "hashtags": ["#hashtag1", "#hashtag2"],
  "guidance": {
    "formatting": ["Write in conversational tone", "Use Facebook features like polls", "Tag relevant pages"],
    "engagement": ["Encourage comments with questions", "Share behind-the-scenes content", "Use Facebook Live"],
    "bestPractices": ["Post when audience is most active", "Share mix of content types", "Build community through Groups"],
    "postingSteps": ["Use Facebook Insights to optimize timing", "Create shareable content", "Respond to comments promptly"]
  }
}

Original content:
"##;

pub const INSTAGRAM_TEMPLATE: &str = r##"Transform the following content into an Instagram post that:
- Creates an engaging caption with line breaks
- Includes relevant hashtags (mix of popular and niche, 10-15 total)
- Suggests visual elements or carousel ideas
- Has a clear call-to-action
- Uses Instagram-friendly formatting

Format your response as JSON:
{
  "title": "Instagram Post Caption",
  "content": "Full Instagram caption with proper formatting",
  "hashtags": ["#hashtag1", "#hashtag2"],
  "visualSuggestions": ["High-quality lifestyle image", "Carousel with key points", "Behind-the-scenes content"],
  "guidance": {
    "formatting": ["Use line breaks for readability", "Lead with compelling visuals", "Include call-to-action"],
    "engagement": ["Use relevant and trending hashtags", "Post Stories regularly", "Use Instagram Reels"],
    "bestPractices": ["Maintain consistent visual aesthetic", "Post high-quality images", "Cross-promote on other platforms"],
    "postingSteps": ["Post at optimal times (11 AM, 2 PM, 5 PM)", "Engage within first hour", "Use Instagram Shopping if applicable"]
  }
}

Original content:
"##;

pub const YOUTUBE_TEMPLATE: &str = r##"Transform the following content into YouTube video content that:
- Creates a compelling video title and description
- Includes video structure with timestamps
- Suggests thumbnail ideas
- Has SEO-optimized description
- Includes relevant tags and hashtags

Format your response as JSON:
{
  "title": "YouTube Video Title",
  "content": "Video description with timestamps and structure",
  "hashtags": ["#hashtag1", "#hashtag2"],
  "keyPoints": ["Introduction (0:00)", "Main content breakdown", "Conclusion and CTA"],
  "guidance": {
    "formatting": ["Create compelling titles", "Write detailed descriptions", "Use custom thumbnails", "Include timestamps"],
    "engagement": ["Ask viewers to like and subscribe", "Respond to comments actively", "Use end screens and cards"],
    "bestPractices": ["Maintain consistent upload schedule", "Optimize for YouTube SEO", "Create engaging thumbnails"],
    "postingSteps": ["Upload at optimal times (2-4 PM, 6-8 PM)", "Use YouTube Analytics", "Create playlists"]
  }
}

Original content:
"##;

pub const TIKTOK_TEMPLATE: &str = r##"Transform the following content into a TikTok video script that:
- Creates a hook within first 3 seconds
- Uses trending sounds/music suggestions
- Includes visual cues and timing
- Has engaging captions
- Uses trending hashtags
- Includes a strong call-to-action

Format your response as JSON:
{
  "title": "TikTok Video Script",
  "content": "Full script with timing and visual cues",
  "hashtags": ["#hashtag1", "#hashtag2"],
  "duration": "30-60 seconds",
  "visualCues": ["Quick cuts for engagement", "Text overlays for key points", "Trending transition effects"],
  "guidance": {
    "formatting": ["Hook in first 3 seconds", "Use trending sounds", "Keep videos short and engaging"],
    "engagement": ["Participate in trending challenges", "Use popular hashtags", "Collaborate with other creators"],
    "bestPractices": ["Post consistently every day", "Study trending content", "Use TikTok's native editing tools"],
    "postingSteps": ["Post multiple times per day", "Engage with comments immediately", "Use trending sounds and effects"]
  }
}

Original content:
"##;

/// Returns the template for a platform. Platforms without a dedicated
/// template use the twitter one.
pub fn template_for(platform: &Platform) -> &'static str {
    match platform {
        Platform::Twitter => TWITTER_TEMPLATE,
        Platform::Linkedin => LINKEDIN_TEMPLATE,
        Platform::Facebook => FACEBOOK_TEMPLATE,
        Platform::Instagram => INSTAGRAM_TEMPLATE,
        Platform::Youtube => YOUTUBE_TEMPLATE,
        Platform::Tiktok => TIKTOK_TEMPLATE,
        Platform::Other(_) => TWITTER_TEMPLATE,
    }
}

/// Builds the full repurposing prompt for one platform.
pub fn build_prompt(original_content: &str, platform: &Platform, files: &[FileContext]) -> String {
    let mut prompt = String::with_capacity(
        template_for(platform).len() + original_content.len() + files.len() * 48,
    );
    prompt.push_str(template_for(platform));
    prompt.push_str(original_content);
    prompt.push_str(&render_file_context(files));
    prompt
}

fn render_file_context(files: &[FileContext]) -> String {
    if files.is_empty() {
        return String::new();
    }
    let lines = files
        .iter()
        .map(|f| {
            let name = if f.file_name.is_empty() {
                "Unnamed"
            } else {
                f.file_name.as_str()
            };
            format!("- {} file: {}", f.file_type.to_uppercase(), name)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\nAdditional context from uploaded files:\n{lines}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_platform_uses_twitter_template() {
        let medium = build_prompt("hello", &Platform::from("medium"), &[]);
        let twitter = build_prompt("hello", &Platform::Twitter, &[]);
        assert_eq!(medium, twitter);
        assert!(medium.contains("Create 5-7 tweets"));
    }

    #[test]
    fn test_each_known_platform_has_its_own_template() {
        let known = [
            Platform::Twitter,
            Platform::Linkedin,
            Platform::Facebook,
            Platform::Instagram,
            Platform::Youtube,
            Platform::Tiktok,
        ];
        let templates: std::collections::HashSet<&str> = known.iter().map(template_for).collect();
        assert_eq!(templates.len(), known.len());
        for p in &known {
            let t = template_for(p);
            assert!(t.contains("\"guidance\""));
            assert!(t.contains("\"hashtags\""));
            assert!(t.contains("\"#hashtag1\""));
            assert!(t.ends_with("Original content:\n"));
        }
    }

    #[test]
    fn test_prompt_embeds_content_after_template() {
        let prompt = build_prompt("Our startup shipped v2.", &Platform::Linkedin, &[]);
        assert!(prompt.starts_with("Transform the following content into a professional LinkedIn post"));
        assert!(prompt.ends_with("Original content:\nOur startup shipped v2."));
    }

    #[test]
    fn test_file_context_lines_are_appended() {
        let files = vec![
            FileContext {
                file_type: "image".to_string(),
                file_name: "hero.png".to_string(),
            },
            FileContext {
                file_type: "document".to_string(),
                file_name: String::new(),
            },
        ];
        let prompt = build_prompt("body", &Platform::Instagram, &files);
        assert!(prompt.ends_with(
            "body\n\nAdditional context from uploaded files:\n- IMAGE file: hero.png\n- DOCUMENT file: Unnamed"
        ));
    }

    #[test]
    fn test_placeholder_like_text_in_content_is_left_alone() {
        let prompt = build_prompt("{file_context} {original_content}", &Platform::Tiktok, &[]);
        assert!(prompt.ends_with("{file_context} {original_content}"));
    }
}
