pub mod catalog;

use std::collections::{BTreeMap, HashSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::domain::category::Category;

pub const PLACES_PER_CATEGORY: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryPicks {
    pub category: Category,
    pub places: Vec<String>,
}

/// Picks per category, in the order the categories were requested.
/// Serializes as a JSON object keyed by category name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recommendations(pub Vec<CategoryPicks>);

impl Recommendations {
    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.0.iter().find(|picks| picks.category == category).map(|picks| picks.places.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `카페: 1. X, 2. Y, 3. Z` per line, for logs.
    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|picks| {
                let numbered = picks
                    .places
                    .iter()
                    .enumerate()
                    .map(|(index, place)| format!("{}. {place}", index + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {numbered}", picks.category)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for Recommendations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for picks in &self.0 {
            map.serialize_entry(picks.category.as_str(), &picks.places)?;
        }
        map.end()
    }
}

pub fn assemble(
    categories: &[Category],
    tags_by_category: &BTreeMap<Category, Vec<String>>,
) -> Recommendations {
    let mut seen = HashSet::new();
    let picks = categories
        .iter()
        .filter(|category| seen.insert(**category))
        .map(|category| {
            let places = match tags_by_category.get(category) {
                Some(tags) if !tags.is_empty() => pick_places(*category, tags),
                _ => {
                    let defaults =
                        catalog::DEFAULT_TAGS.iter().map(|tag| (*tag).to_string()).collect::<Vec<_>>();
                    pick_places(*category, &defaults)
                }
            };
            CategoryPicks { category: *category, places }
        })
        .collect();

    Recommendations(picks)
}

fn pick_places(category: Category, tags: &[String]) -> Vec<String> {
    let mut places: Vec<String> = Vec::with_capacity(PLACES_PER_CATEGORY);

    'tags: for tag in tags {
        let Some(candidates) = catalog::candidates(category, tag) else {
            continue;
        };
        for candidate in candidates {
            if places.len() >= PLACES_PER_CATEGORY {
                break 'tags;
            }
            if !places.iter().any(|place| place == candidate) {
                places.push((*candidate).to_string());
            }
        }
    }

    for filler in catalog::padding(category) {
        if places.len() >= PLACES_PER_CATEGORY {
            break;
        }
        if !places.contains(&filler) {
            places.push(filler);
        }
    }

    places
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::{assemble, PLACES_PER_CATEGORY};
    use crate::domain::category::Category;

    fn tags(category: Category, values: &[&str]) -> BTreeMap<Category, Vec<String>> {
        BTreeMap::from([(category, values.iter().map(|v| (*v).to_string()).collect())])
    }

    #[test]
    fn first_matching_tag_wins() {
        let result = assemble(&[Category::Cafe], &tags(Category::Cafe, &["조용한", "공부"]));

        assert_eq!(
            result.get(Category::Cafe),
            Some(&["조용한 카페".to_string(), "사일런트 카페".into(), "조용한 공간".into()][..])
        );
    }

    #[test]
    fn duplicates_across_tags_are_skipped() {
        let result = assemble(
            &[Category::Cafe],
            &tags(Category::Cafe, &["치즈케이크", "케이크", "바닐라 라떼"]),
        );

        assert_eq!(
            result.get(Category::Cafe).map(<[String]>::to_vec),
            Some(vec!["디저트 카페".into(), "케이크 전문점".into(), "스위트 카페".into()])
        );
    }

    #[test]
    fn unmatched_tags_are_padded_to_three() {
        let result = assemble(&[Category::Restaurant], &tags(Category::Restaurant, &["바다"]));

        assert_eq!(
            result.get(Category::Restaurant).map(<[String]>::to_vec),
            Some(vec!["추천 음식점".into(), "인기 음식점".into(), "베스트 음식점".into()])
        );
    }

    #[test]
    fn categories_without_tags_use_defaults_and_keep_request_order() {
        let result = assemble(
            &[Category::Content, Category::Cafe, Category::Restaurant],
            &tags(Category::Cafe, &["뷰"]),
        );

        let order = result.0.iter().map(|picks| picks.category).collect::<Vec<_>>();
        assert_eq!(order, vec![Category::Content, Category::Cafe, Category::Restaurant]);
        for picks in &result.0 {
            assert_eq!(picks.places.len(), PLACES_PER_CATEGORY);
        }
        assert_eq!(result.get(Category::Cafe).map(|p| p[0].as_str()), Some("뷰 카페"));
        assert_eq!(result.get(Category::Content).map(|p| p[0].as_str()), Some("추천 콘텐츠"));
    }

    #[test]
    fn always_three_distinct_names_per_category() {
        let inputs: [&[&str]; 4] =
            [&[], &["라떼"], &["조용한", "조용한 카페"], &["한식", "중식", "일식", "양식"]];
        for input in inputs {
            for category in Category::ALL {
                let result = assemble(&[category], &tags(category, input));
                let places = result.get(category).expect("category present");
                assert_eq!(places.len(), PLACES_PER_CATEGORY, "{category} {input:?}");
                let unique = places.iter().collect::<HashSet<_>>();
                assert_eq!(unique.len(), PLACES_PER_CATEGORY, "{category} {input:?}");
            }
        }
    }

    #[test]
    fn serializes_as_ordered_object_and_renders_text() {
        let result = assemble(&[Category::Restaurant, Category::Cafe], &BTreeMap::new());

        let json = serde_json::to_string(&result).expect("json");
        assert!(json.starts_with(r#"{"음식점":["#));
        assert_eq!(
            result.to_text(),
            "음식점: 1. 추천 음식점, 2. 인기 음식점, 3. 베스트 음식점\n카페: 1. 추천 카페, 2. 인기 카페, 3. 베스트 카페"
        );
    }
}
