//! The fixed set of learning cards.
//!
//! Cards are compiled into the binary and never change at runtime. Their keys
//! are what an observation record's `topic` refers to.

/// A short lesson about one aspect of how trees work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningCard {
    /// Unique topic name.
    pub key: &'static str,
    /// Emoji shown next to the topic.
    pub emoji: &'static str,
    /// One-sentence summary.
    pub one_line: &'static str,
    /// Simple explanation, one point per entry.
    pub easy: &'static [&'static str],
    /// Hypothesis and how to check it.
    pub check: &'static [&'static str],
    /// The role this plays in the wider ecosystem.
    pub ecosystem: &'static str,
}

const CARDS: &[LearningCard] = &[
    LearningCard {
        key: "광합성",
        emoji: "🌿",
        one_line: "나무는 빛을 이용해 양분을 만들고 산소를 내보내요.",
        easy: &[
            "재료: 빛(햇빛), 물(뿌리에서 올라옴), 이산화탄소(공기)",
            "결과: 양분(나무의 먹이), 산소(사람과 동물이 숨 쉬는 데 도움)",
        ],
        check: &[
            "가정: 햇빛이 잘 드는 곳의 잎이 더 넓거나 푸르지 않을까?",
            "확인: 같은 나무에서 햇빛/그늘 쪽 잎을 사진 찍어 비교해보기",
        ],
        ecosystem: "산소를 만들고, 나무가 자라면서 탄소를 저장해요(지구에 도움).",
    },
    LearningCard {
        key: "증산(물의 이동)",
        emoji: "💧",
        one_line: "잎에서 물이 수증기로 빠져나가면, 아래에서 물이 계속 올라와요.",
        easy: &[
            "뿌리 → 줄기(물관) → 잎으로 물이 이동해요.",
            "잎의 기공으로 물이 수증기로 나가요(증산).",
        ],
        check: &[
            "가정: 바람이 불고 더운 날은 잎에서 물이 더 많이 나갈까?",
            "확인: 잎을 비닐봉지로 감싸두고(짧은 시간), 물방울 맺힘 관찰(교사 지도)",
        ],
        ecosystem: "주변 공기를 시원하게 하고(그늘+수분), 물순환에 도움을 줘요.",
    },
    LearningCard {
        key: "모세관 현상",
        emoji: "🧪",
        one_line: "아주 가는 길에서는 물이 위로 잘 올라가요.",
        easy: &[
            "나무의 물길(물관)은 아주 가늘어요.",
            "가느다란 길(틈)에서 물이 올라가는 힘이 생겨요.",
        ],
        check: &[
            "가정: 종이타월도 물이 위로 올라갈까?",
            "확인: 컵에 물을 담고 종이타월 끝을 담가 물이 올라오는 모습 관찰",
        ],
        ecosystem: "뿌리에서 얻은 물을 잎까지 보내 나무가 살아갈 수 있게 해줘요.",
    },
    LearningCard {
        key: "삼투(삼투압)",
        emoji: "🧫",
        one_line: "물은 ‘진한 쪽’으로 이동하려는 성질이 있어요(막이 있을 때).",
        easy: &[
            "뿌리세포는 ‘막’이 있어요.",
            "뿌리 주변과 세포 안의 농도 차이 때문에 물이 이동해요(설명은 아주 간단히!).",
        ],
        check: &[
            "가정: 소금물과 맹물에서 식물 줄기의 상태가 다를까?",
            "확인: (안전/지도) 같은 채소 줄기를 맹물/연한 소금물에 두고 변화를 관찰",
        ],
        ecosystem: "뿌리가 물과 양분을 흡수하는 데 도움이 돼요.",
    },
    LearningCard {
        key: "나이테(성장)",
        emoji: "🪵",
        one_line: "나무는 한 해 한 해 자라며 흔적(나이테)을 남겨요.",
        easy: &[
            "해마다 자란 부분이 고리처럼 보여요.",
            "비가 많고 조건이 좋으면 더 잘 자라기도 해요.",
        ],
        check: &[
            "가정: 비가 많이 온 해에는 나이테가 더 두꺼울까?",
            "확인: (자료/사진) 나이테 사진을 찾아 두께 차이를 관찰해보기",
        ],
        ecosystem: "오랫동안 탄소를 저장하고, 많은 생물의 집이 돼요.",
    },
    LearningCard {
        key: "뿌리의 역할",
        emoji: "🧩",
        one_line: "뿌리는 물을 흡수하고, 나무를 단단히 붙잡아요.",
        easy: &[
            "뿌리털이 물을 흡수해요.",
            "흙을 잡아주어 비가 와도 흙이 쉽게 쓸리지 않게 해요.",
        ],
        check: &[
            "가정: 나무가 많은 곳은 비가 와도 흙이 덜 쓸릴까?",
            "확인: 흙길/잔디/나무 주변의 흙 상태를 사진으로 비교 관찰",
        ],
        ecosystem: "토양 유실을 막고, 흙 속 생물들이 살기 좋은 환경을 만들어요.",
    },
];

/// Every learning card, in a fixed order.
#[must_use]
pub const fn all() -> &'static [LearningCard] {
    CARDS
}

/// Looks up a card by its exact key.
#[must_use]
pub fn by_key(key: &str) -> Option<&'static LearningCard> {
    CARDS.iter().find(|card| card.key == key)
}

/// The keys of every card, in catalog order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    CARDS.iter().map(|card| card.key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = keys().collect();
        assert_eq!(keys.len(), all().len());
    }

    #[test]
    fn every_card_has_content() {
        for card in all() {
            assert!(!card.key.is_empty());
            assert!(!card.one_line.is_empty());
            assert!(!card.easy.is_empty(), "{} has no explanation", card.key);
            assert!(!card.check.is_empty(), "{} has no checks", card.key);
            assert!(!card.ecosystem.is_empty());
        }
    }

    #[test]
    fn lookup_by_exact_key() {
        let card = by_key("광합성").expect("photosynthesis card exists");
        assert_eq!(card.emoji, "🌿");

        assert!(by_key("광합").is_none());
        assert!(by_key("").is_none());
    }

    #[test]
    fn lookup_follows_catalog_order() {
        let first = all().first().unwrap();
        assert_eq!(by_key(first.key), Some(first));
    }
}
