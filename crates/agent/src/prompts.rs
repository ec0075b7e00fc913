use haru_core::domain::category::Category;

use crate::llm::ChatPrompt;

pub const SYSTEM_PROMPT: &str = r#"[역할]
당신은 사용자의 문장에서 의미 있는 구체적 키워드를 추출하는 '태그 생성 전문가'입니다.

[태그화 규칙]
1. 사용자의 문장에서 **핵심 명사 또는 형용사**만 추출합니다.
2. **감정적·추상적 단어**(예: '좋은', '멋진', '재미있는', '예쁜', '최고')는 제외합니다.
3. **구체적인 사물, 음식, 행동, 분위기, 공간적 특징** 중심으로 태그화합니다.
4. **비유적 표현, 관용구, 강조 구절**(예: '둘이 먹다 하나 죽어도 모를 정도', '끝내준다')는 태그로 포함하지 않습니다.
5. 유사한 단어는 한 번만 포함합니다. (예: '한적한', '조용한' → 하나만)
6. 반드시 **5~6개의 키워드**만 출력합니다.
7. 출력은 반드시 **한 줄**, **쉼표(,)로만 구분**하여 작성합니다.
8. 설명, 문장, 불릿, 숫자, 따옴표 등은 포함하지 않습니다. **키워드만 출력하세요.**

[출력 형식 예시]
올바른 출력 예시: 치즈케이크, 고구마 라떼, 한적한, 뷰, 조용한 공간
잘못된 출력 예시: 키워드는 다음과 같습니다 → 치즈케이크, 뷰, 조용한 공간
잘못된 출력 예시: ["치즈케이크","뷰","조용한 공간"]

[예시]
입력: "치즈케익이 맛있고, 고구마 라떼가 있었으면 좋겠어. 그리고 한적하고, 뷰가 좋았으면 좋겠어."
출력: 치즈케이크, 고구마 라떼, 한적한, 뷰, 조용한 공간

입력: "바닐라 라떼가 맛있고, 초코케익이 있었으면 좋겠어."
출력: 바닐라 라떼, 초코케이크, 디저트, 음료, 달콤한

입력: "탁 트인 뷰가 좋고, 음악이 잔잔했으면 좋겠어."
출력: 뷰, 음악, 잔잔한, 분위기, 카페, 조용한

입력: "커피 맛이 진하고 좌석이 편한 곳이 좋아."
출력: 커피, 진한 맛, 좌석, 편한, 공간, 분위기

입력: "둘이 먹다 하나 죽어도 모를 것 같은 맛있는 김치찌개랑 돼지고기 삼겹살을 먹고 싶어."
출력: 김치찌개, 삼겹살, 돼지고기, 맛집, 한식, 식사"#;

struct CategoryGuide {
    priorities: [&'static str; 5],
    excluded: [&'static str; 2],
}

fn guide(category: Category) -> CategoryGuide {
    match category {
        Category::Cafe => CategoryGuide {
            priorities: [
                "분위기 (조용한, 활기찬, 아늑한, 모던한 등)",
                "용도 (공부, 업무, 독서, 대화, 휴식 등)",
                "시설 (와이파이, 콘센트, 넓은 공간, 야외석 등)",
                "음료/메뉴 (커피, 차, 디저트, 브런치 등)",
                "시간대 (아침, 점심, 저녁, 늦은 밤 등)",
            ],
            excluded: [
                "감정적 표현 ('좋은', '멋진', '재미있는' 등)",
                "일반적 표현 ('편한', '괜찮은' 등)",
            ],
        },
        Category::Restaurant => CategoryGuide {
            priorities: [
                "음식 종류 (한식, 중식, 일식, 양식, 이탈리안 등)",
                "메뉴 (김치찌개, 파스타, 초밥, 스테이크 등)",
                "분위기 (데이트, 가족, 친구, 단체 등)",
                "가격대 (저렴한, 보통, 비싼, 고급 등)",
                "특징 (얼큰한, 매운, 담백한, 신선한 등)",
            ],
            excluded: ["감정적 표현 ('맛있는', '좋은' 등)", "일반적 표현 ('괜찮은', '편한' 등)"],
        },
        Category::Content => CategoryGuide {
            priorities: [
                "활동 종류 (영화, 전시회, 공연, 게임, 쇼핑 등)",
                "장르 (액션, 로맨스, 코미디, 드라마, 다큐멘터리 등)",
                "분위기 (재미있는, 감동적인, 교육적인, 스릴있는 등)",
                "참여 형태 (커플, 가족, 친구, 그룹 등)",
                "시간대 (낮, 저녁, 밤, 주말, 평일 등)",
            ],
            excluded: ["감정적 표현 ('좋은', '멋진' 등)", "일반적 표현 ('편한', '괜찮은' 등)"],
        },
    }
}

/// Builds the per-category instruction sent as the user turn.
pub fn category_prompt(category: Category, text: &str, people_count: u32) -> String {
    let guide = guide(category);

    let mut prompt = format!(
        "[상황 정보]\n- 인원 수: {people_count}명\n- 활동 카테고리: {category}\n\n\
         사용자가 \"{text}\"라고 말했어.\n\n\
         이 문장에서 {category} 활동과 관련된 핵심 키워드를 정확히 5~6개만 추출해서 쉼표로 구분해서 알려줘.\n\n\
         **{category} 관련 키워드 우선순위:**\n"
    );
    for (rank, priority) in guide.priorities.iter().enumerate() {
        prompt.push_str(&format!("{}. {priority}\n", rank + 1));
    }

    prompt.push_str("\n**제외할 키워드:**\n");
    for excluded in guide.excluded {
        prompt.push_str(&format!("- {excluded}\n"));
    }
    if people_count >= 2 {
        prompt.push_str(&format!(
            "- 인원 수가 {people_count}명이므로 '혼자', '1인', '솔로', '혼밥' 등 1인 관련 키워드는 제외\n"
        ));
    }

    prompt.push_str("\n다른 설명 없이 키워드만 나열해줘.");
    prompt
}

pub fn tagging_prompt(category: Category, text: &str, people_count: u32) -> ChatPrompt {
    ChatPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: category_prompt(category, text, people_count),
    }
}
