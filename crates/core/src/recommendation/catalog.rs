//! Static keyword → place table used until a real place index exists.

use crate::domain::category::Category;

/// Tags used for a category the user never described.
pub const DEFAULT_TAGS: [&str; 3] = ["일반적인", "추천", "인기"];

pub fn candidates(category: Category, tag: &str) -> Option<&'static [&'static str]> {
    let table: &[(&str, [&str; 3])] = match category {
        Category::Cafe => CAFE,
        Category::Restaurant => RESTAURANT,
        Category::Content => CONTENT,
    };

    table.iter().find(|(key, _)| *key == tag).map(|(_, places)| places.as_slice())
}

/// Filler names used when tags did not yield three places.
pub fn padding(category: Category) -> [String; 3] {
    [format!("추천 {category}"), format!("인기 {category}"), format!("베스트 {category}")]
}

const CAFE: &[(&str, [&str; 3])] = &[
    ("조용한", ["조용한 카페", "사일런트 카페", "조용한 공간"]),
    ("공부", ["스터디 카페", "학습 카페", "집중 카페"]),
    ("와이파이", ["와이파이 카페", "인터넷 카페", "디지털 카페"]),
    ("라떼", ["라떼 전문점", "바리스타 카페", "프리미엄 카페"]),
    ("케이크", ["디저트 카페", "케이크 전문점", "스위트 카페"]),
    ("뷰", ["뷰 카페", "전망 카페", "루프탑 카페"]),
    ("아늑한", ["아늑한 카페", "코지 카페", "홈 카페"]),
    ("모던한", ["모던 카페", "트렌디 카페", "컨템포러리 카페"]),
    ("치즈케이크", ["디저트 카페", "케이크 전문점", "스위트 카페"]),
    ("고구마 라떼", ["라떼 전문점", "바리스타 카페", "프리미엄 카페"]),
    ("바닐라 라떼", ["라떼 전문점", "바리스타 카페", "프리미엄 카페"]),
    ("초코케이크", ["디저트 카페", "케이크 전문점", "스위트 카페"]),
];

const RESTAURANT: &[(&str, [&str; 3])] = &[
    ("한식", ["전통 한식당", "정통 한식", "한국 요리"]),
    ("중식", ["중화요리", "중국집", "차이나"]),
    ("일식", ["일본 요리", "스시", "라멘"]),
    ("양식", ["서양 요리", "스테이크 하우스", "이탈리안"]),
    ("데이트", ["데이트 레스토랑", "로맨틱 레스토랑", "커플 레스토랑"]),
    ("가족", ["가족 레스토랑", "패밀리 레스토랑", "아이 친화적"]),
    ("저렴한", ["저렴한 식당", "가성비 식당", "맛집"]),
    ("고급", ["고급 레스토랑", "파인 다이닝", "럭셔리 레스토랑"]),
];

const CONTENT: &[(&str, [&str; 3])] = &[
    ("영화", ["영화관", "시네마", "멀티플렉스"]),
    ("전시회", ["미술관", "박물관", "갤러리"]),
    ("공연", ["콘서트홀", "극장", "공연장"]),
    ("게임", ["게임카페", "PC방", "보드게임카페"]),
    ("쇼핑", ["쇼핑몰", "상가", "마켓"]),
    ("액션", ["액션 영화", "스릴러", "모험"]),
    ("로맨스", ["로맨스 영화", "멜로", "러브스토리"]),
    ("코미디", ["코미디 영화", "개그", "유머"]),
];

#[cfg(test)]
mod tests {
    use super::{candidates, padding};
    use crate::domain::category::Category;

    #[test]
    fn looks_up_by_category_and_exact_tag() {
        assert_eq!(
            candidates(Category::Cafe, "공부"),
            Some(&["스터디 카페", "학습 카페", "집중 카페"][..])
        );
        assert_eq!(candidates(Category::Restaurant, "공부"), None);
        assert_eq!(candidates(Category::Content, "영화 "), None);
    }

    #[test]
    fn padding_names_the_category() {
        assert_eq!(padding(Category::Restaurant), ["추천 음식점", "인기 음식점", "베스트 음식점"]);
    }
}
