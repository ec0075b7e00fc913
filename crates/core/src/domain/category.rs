use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

/// Activity categories a plan can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Cafe,
    Restaurant,
    Content,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Cafe, Category::Restaurant, Category::Content];

    /// Name shown to users and used as the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "카페",
            Self::Restaurant => "음식점",
            Self::Content => "콘텐츠",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Content => "content",
        }
    }

    /// True when `text` mentions this category by name or alias.
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        text.contains(self.as_str()) || text.to_lowercase().contains(self.alias())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                category.as_str() == trimmed || category.alias().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| DomainError::UnknownCategory(trimmed.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use crate::errors::DomainError;

    #[test]
    fn parses_korean_names_and_aliases() {
        assert_eq!("카페".parse::<Category>(), Ok(Category::Cafe));
        assert_eq!(" 음식점 ".parse::<Category>(), Ok(Category::Restaurant));
        assert_eq!("Content".parse::<Category>(), Ok(Category::Content));
    }

    #[test]
    fn rejects_unknown_category() {
        assert_eq!(
            "바다".parse::<Category>(),
            Err(DomainError::UnknownCategory("바다".to_string()))
        );
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&vec![Category::Cafe, Category::Content]).expect("json");
        assert_eq!(json, r#"["카페","콘텐츠"]"#);

        let parsed: Vec<Category> = serde_json::from_str(r#"["음식점","cafe"]"#).expect("parse");
        assert_eq!(parsed, vec![Category::Restaurant, Category::Cafe]);
    }

    #[test]
    fn detects_mentions_by_name_or_alias() {
        assert!(Category::Cafe.is_mentioned_in("카페 쪽을 다시 볼래"));
        assert!(Category::Restaurant.is_mentioned_in("change the RESTAURANT part"));
        assert!(!Category::Content.is_mentioned_in("음식점"));
    }
}
