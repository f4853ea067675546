//! Response Normalizer: turns raw model text into a canonical content record.
//!
//! The model is asked for JSON but routinely wraps it in markdown fences or
//! answers in free text. `normalize` never fails: unparsable output becomes a
//! `Fallback` record built from the raw text and per-platform defaults.

use serde_json::{Map, Value};

use crate::repurpose::platform::Platform;

/// Platform-specific fields passed through opaquely when the model sends them.
const PASSTHROUGH_FIELDS: [&str; 5] = [
    "tweetCount",
    "keyPoints",
    "visualSuggestions",
    "visualCues",
    "duration",
];

/// Which default hashtag set to use when the model output is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashtagDefaults {
    /// `#<platform>`, `#content`
    Standard,
    /// `#<platform>`, `#content`, `#AI`, used by the single-shot repurpose endpoint.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedContent {
    /// The model returned a JSON object; missing fields were defaulted.
    Parsed {
        title: String,
        content: String,
        hashtags: Vec<String>,
        guidance: Option<Value>,
        platform_fields: Map<String, Value>,
    },
    /// The model output was not JSON. Built entirely from defaults and raw text.
    Fallback {
        title: String,
        content: String,
        hashtags: Vec<String>,
    },
}

impl NormalizedContent {
    pub fn title(&self) -> &str {
        match self {
            NormalizedContent::Parsed { title, .. } | NormalizedContent::Fallback { title, .. } => {
                title
            }
        }
    }

    pub fn content(&self) -> &str {
        match self {
            NormalizedContent::Parsed { content, .. }
            | NormalizedContent::Fallback { content, .. } => content,
        }
    }

    pub fn hashtags(&self) -> &[String] {
        match self {
            NormalizedContent::Parsed { hashtags, .. }
            | NormalizedContent::Fallback { hashtags, .. } => hashtags,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, NormalizedContent::Fallback { .. })
    }

    /// JSON stored in `generated_content.guidance`: the model's guidance object
    /// plus a `platformFields` object when any passthrough fields were present.
    pub fn guidance_json(&self) -> Value {
        match self {
            NormalizedContent::Parsed {
                guidance,
                platform_fields,
                ..
            } => {
                let mut out = match guidance {
                    Some(Value::Object(map)) => map.clone(),
                    _ => Map::new(),
                };
                if !platform_fields.is_empty() {
                    out.insert(
                        "platformFields".to_string(),
                        Value::Object(platform_fields.clone()),
                    );
                }
                Value::Object(out)
            }
            NormalizedContent::Fallback { .. } => Value::Object(Map::new()),
        }
    }
}

/// Normalizes raw model output for `platform`.
pub fn normalize(raw_text: &str, platform: &Platform, defaults: HashtagDefaults) -> NormalizedContent {
    let stripped = strip_code_fences(raw_text);

    match serde_json::from_str::<Value>(&stripped) {
        Ok(Value::Object(obj)) => from_object(obj, &stripped, platform),
        Ok(_) => NormalizedContent::Parsed {
            title: platform.default_title(),
            content: stripped,
            hashtags: default_hashtags(platform, HashtagDefaults::Standard),
            guidance: None,
            platform_fields: Map::new(),
        },
        Err(_) => NormalizedContent::Fallback {
            title: platform.default_title(),
            content: raw_text.to_string(),
            hashtags: default_hashtags(platform, defaults),
        },
    }
}

fn from_object(mut obj: Map<String, Value>, stripped: &str, platform: &Platform) -> NormalizedContent {
    let title = match obj.remove("title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => platform.default_title(),
    };

    let content = match obj.remove("content") {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => stripped.to_string(),
    };

    let hashtags = match obj.remove("hashtags") {
        Some(Value::Array(items)) => {
            let tags: Vec<String> = items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) if !s.trim().is_empty() => Some(s),
                    _ => None,
                })
                .collect();
            if tags.is_empty() {
                default_hashtags(platform, HashtagDefaults::Standard)
            } else {
                tags
            }
        }
        _ => default_hashtags(platform, HashtagDefaults::Standard),
    };

    let guidance = obj.remove("guidance").filter(Value::is_object);

    let platform_fields = PASSTHROUGH_FIELDS
        .iter()
        .filter_map(|key| obj.remove(*key).map(|v| (key.to_string(), v)))
        .collect();

    NormalizedContent::Parsed {
        title,
        content,
        hashtags,
        guidance,
        platform_fields,
    }
}

pub fn default_hashtags(platform: &Platform, defaults: HashtagDefaults) -> Vec<String> {
    let mut tags = vec![format!("#{}", platform.as_str()), "#content".to_string()];
    if defaults == HashtagDefaults::Legacy {
        tags.push("#AI".to_string());
    }
    tags
}

/// Removes markdown code fences and trims the result.
///
/// When a ```` ```json ```` fence is present, every opener is removed together
/// with the whitespace after it, then every remaining ```` ``` ```` is removed
/// together with the whitespace before it. Otherwise bare ```` ``` ```` fences
/// are removed the same way.
pub fn strip_code_fences(text: &str) -> String {
    let stripped = if text.contains("```json") {
        remove_with_leading_ws(&remove_with_trailing_ws(text, "```json"), "```")
    } else if text.contains("```") {
        remove_with_leading_ws(&remove_with_trailing_ws(text, "```"), "```")
    } else {
        text.to_string()
    };
    stripped.trim().to_string()
}

fn remove_with_trailing_ws(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        out.push_str(&rest[..idx]);
        rest = rest[idx + marker.len()..].trim_start();
    }
    out.push_str(rest);
    out
}

fn remove_with_leading_ws(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        out.push_str(rest[..idx].trim_end());
        rest = &rest[idx + marker.len()..];
    }
    out.push_str(rest);
    out
}
