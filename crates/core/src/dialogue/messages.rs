//! Canned assistant lines.

use crate::domain::category::Category;

pub const ALL_COMPLETED: &str = "모든 활동에 대한 질문이 끝났어! 이제 후보지를 출력하시겠습니까?";
pub const FINAL_RESULT: &str =
    "짜잔! 오늘의 추천 리스트야! 이 중에서 마음에 드는 게 있으면 좋겠다! 즐거운 하루 보내!";
pub const MODIFICATION_MODE: &str =
    "어떤 내용을 수정하시겠습니까? 선택한 활동 중 더 추가하고 싶은 것이 있나요?";
pub const MODIFICATION_UNMATCHED: &str =
    "어떤 활동을 수정하고 싶으신가요? 카테고리명을 말씀해주세요.";
pub const UNCLEAR_RESPONSE: &str = "죄송해요! '네' 또는 '추가하기'로 답변해주세요.";
pub const UNCLEAR_RESULT_RESPONSE: &str = "죄송해요! '후보지 출력' 버튼을 눌러주세요.";
pub const CONVERSATION_FINISHED: &str =
    "대화가 완료되었습니다. 새로운 대화를 시작하려면 처음부터 다시 시작해주세요.";

pub const YES_NO_QUESTION: &str = "이 정보로 다음 질문으로 넘어가시겠습니까?";
pub const RESULT_QUESTION: &str = "후보지를 출력하시겠습니까?";

pub fn first_message(people_count: u32, categories: &[Category]) -> String {
    let categories_text =
        categories.iter().map(Category::as_str).collect::<Vec<_>>().join(", ");
    let first_category = categories.first().map(Category::as_str).unwrap_or_default();
    format!(
        "안녕! 나는 하루야!\n\n{people_count}명이 함께할 거구나! 그리고 {categories_text} 활동을 하고 싶다고 했지?\n\n그럼 먼저 '{first_category}' 활동에 대해 좀 더 자세히 말해줄 수 있을까? 어떤 걸 원해?"
    )
}

pub fn next_category(category: Category) -> String {
    format!("좋아! 그럼 '{category}' 활동은 어떤 걸 원해?")
}

pub fn add_more(category: Category) -> String {
    format!("좋아! '{category}' 활동에 대해 더 추가하고 싶은 내용이 있나요?")
}

pub fn collected_tags(tags: &[String]) -> String {
    format!("현재까지 수집된 키워드: {}", tags.join(", "))
}
