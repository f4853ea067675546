//! Target publishing platforms.
//!
//! Six platforms have dedicated prompt templates. Any other identifier
//! (medium, reddit, producthunt, ...) is carried through as `Other` so titles
//! and default hashtags still name it, while its prompt falls back to the
//! twitter template.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Twitter,
    Linkedin,
    Facebook,
    Instagram,
    Youtube,
    Tiktok,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Other(id) => id,
        }
    }

    /// Identifier with its first character upper-cased: "linkedin" -> "Linkedin".
    pub fn display_name(&self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        }
    }

    /// Title used when the model did not provide one.
    pub fn default_title(&self) -> String {
        format!("{} Post", self.display_name())
    }
}

impl From<String> for Platform {
    fn from(id: String) -> Self {
        match id.as_str() {
            "twitter" => Platform::Twitter,
            "linkedin" => Platform::Linkedin,
            "facebook" => Platform::Facebook,
            "instagram" => Platform::Instagram,
            "youtube" => Platform::Youtube,
            "tiktok" => Platform::Tiktok,
            _ => Platform::Other(id),
        }
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        Platform::from(id.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Other(id) => id,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identifiers_map_to_variants() {
        assert_eq!(Platform::from("linkedin"), Platform::Linkedin);
        assert_eq!(Platform::from("tiktok"), Platform::Tiktok);
        assert_eq!(
            Platform::from("producthunt"),
            Platform::Other("producthunt".to_string())
        );
    }

    #[test]
    fn test_default_title_capitalizes_first_letter_only() {
        assert_eq!(Platform::Linkedin.default_title(), "Linkedin Post");
        assert_eq!(Platform::Youtube.default_title(), "Youtube Post");
        assert_eq!(Platform::from("producthunt").default_title(), "Producthunt Post");
    }

    #[test]
    fn test_serde_uses_plain_identifier() {
        let platforms: Vec<Platform> = serde_json::from_str(r#"["twitter", "medium"]"#).unwrap();
        assert_eq!(platforms[0], Platform::Twitter);
        assert_eq!(platforms[1], Platform::Other("medium".to_string()));
        assert_eq!(
            serde_json::to_string(&platforms).unwrap(),
            r#"["twitter","medium"]"#
        );
    }
}
