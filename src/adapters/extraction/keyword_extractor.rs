//! Deterministic slot extractor.
//!
//! Scans the utterance for a 3-5 digit budget, fixed keyword groups per
//! enum value and a feature dictionary. Generic consent ("都可以") fills the
//! hinted slot with its documented default. Never fails except with `Empty`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::extraction::{ExtractionError, ExtractionRequest, StrategyKind};
use crate::domain::profile::{
    normalize_digits, Budget, LocationPref, ManagementPref, ProfileUpdate, RoomType, SlotName,
};
use crate::ports::SlotExtractionStrategy;

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

const NO_LIMIT_WORDS: &[&str] = &["不限", "沒上限", "沒有上限", "no limit"];

const LOCATION_WORDS: &[(LocationPref, &[&str])] = &[
    (LocationPref::Downtown, &["市區", "市中心", "方便", "熱鬧", "downtown"]),
    (LocationPref::School, &["學校", "暨大", "校園", "school", "campus"]),
    (LocationPref::Quiet, &["安靜", "偏僻", "郊區", "quiet"]),
];

const ROOM_WORDS: &[(RoomType, &[&str])] = &[
    (RoomType::Studio, &["套房", "獨立", "studio"]),
    (RoomType::Shared, &["雅房", "分租", "shared"]),
    (RoomType::Apartment, &["整層", "公寓", "apartment"]),
];

// Negated forms first: "不要房東" also contains "房東".
const MANAGEMENT_WORDS: &[(ManagementPref, &[&str])] = &[
    (
        ManagementPref::NoOwner,
        &["不要房東", "不想跟房東", "不要跟房東", "沒有房東", "no landlord"],
    ),
    (ManagementPref::Owner, &["房東同住", "跟房東住", "和房東住", "房東住"]),
    (ManagementPref::Pro, &["管理員", "物業", "代管", "管理公司"]),
];

const FEATURE_WORDS: &[(&str, &[&str])] = &[
    ("garbage", &["子母車", "垃圾"]),
    ("elevator", &["電梯", "elevator"]),
    ("security", &["門禁", "監視器", "保全", "security"]),
    ("parking", &["停車", "車位", "parking"]),
    ("laundry", &["洗衣", "laundry"]),
    ("balcony", &["陽台", "balcony"]),
    ("kitchen", &["廚房", "開伙", "kitchen"]),
    ("living_room", &["客廳"]),
    ("wifi", &["網路", "wifi"]),
    ("new_renovation", &["裝潢", "新屋"]),
];

const CONSENT_WORDS: &[&str] = &[
    "都可以",
    "都行",
    "沒差",
    "隨便",
    "無所謂",
    "不在意",
    "沒有偏好",
    "沒意見",
    "no preference",
    "don't care",
    "whatever",
];

/// Extra consent words accepted while the features question is open.
const NO_FEATURE_WORDS: &[&str] = &["沒有", "不需要", "不用", "none"];

/// Keyword and regex based extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSlotExtractor;

impl KeywordSlotExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts whatever the utterance states outright.
    pub fn scan(&self, utterance: &str, hint: Option<SlotName>) -> ProfileUpdate {
        let text = utterance.trim().to_lowercase();
        let mut update = ProfileUpdate::new();

        let says_no_limit = contains_any(&text, NO_LIMIT_WORDS);
        let budget_context = matches!(hint, None | Some(SlotName::Budget));
        if says_no_limit && budget_context {
            update = update.with_budget(Budget::NO_LIMIT);
        } else if let Some(budget) = budget_in(&text) {
            update = update.with_budget(budget);
        }

        if let Some(location) = first_group(&text, LOCATION_WORDS) {
            update = update.with_location(location);
        }
        if let Some(room) = first_group(&text, ROOM_WORDS) {
            update = update.with_room_type(room);
        }
        if let Some(management) = first_group(&text, MANAGEMENT_WORDS) {
            update = update.with_management(management);
        }

        let features: Vec<&str> = FEATURE_WORDS
            .iter()
            .filter(|(_, words)| contains_any(&text, words))
            .map(|(token, _)| *token)
            .collect();
        update = update.with_features(features);

        if let Some(slot) = hint {
            let consents = contains_any(&text, CONSENT_WORDS)
                || (says_no_limit && !budget_context)
                || (is_features_slot(slot) && contains_any(&text, NO_FEATURE_WORDS));
            if consents && !update.has(slot) {
                update = merge(update, ProfileUpdate::generic_for(slot));
            }
        }

        update
    }
}

#[async_trait]
impl SlotExtractionStrategy for KeywordSlotExtractor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Keyword
    }

    async fn attempt(&self, request: &ExtractionRequest) -> Result<ProfileUpdate, ExtractionError> {
        let update = self.scan(&request.utterance, request.hint);
        if update.is_empty() {
            Err(ExtractionError::Empty)
        } else {
            Ok(update)
        }
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn first_group<T: Copy>(text: &str, groups: &[(T, &[&str])]) -> Option<T> {
    groups
        .iter()
        .find(|(_, words)| contains_any(text, words))
        .map(|(value, _)| *value)
}

/// First standalone run of 3 to 5 digits. Full-width digits count;
/// thousands separators are ignored.
fn budget_in(text: &str) -> Option<Budget> {
    let compact = normalize_digits(text).replace(',', "");
    DIGIT_RUN
        .find_iter(&compact)
        .map(|m| m.as_str())
        .find(|run| (3..=5).contains(&run.len()))
        .and_then(|run| run.parse::<u32>().ok())
        .map(Budget::new)
}

fn is_features_slot(slot: SlotName) -> bool {
    matches!(slot, SlotName::FeaturesPreference | SlotName::RequiredFeatures)
}

fn merge(base: ProfileUpdate, defaults: ProfileUpdate) -> ProfileUpdate {
    ProfileUpdate {
        budget: base.budget.or(defaults.budget),
        location_pref: base.location_pref.or(defaults.location_pref),
        type_pref: base.type_pref.or(defaults.type_pref),
        management_pref: base.management_pref.or(defaults.management_pref),
        required_features: base.required_features.or(defaults.required_features),
        features_preference: base.features_preference.or(defaults.features_preference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::profile::FeaturesAnswer;

    fn scan(text: &str, hint: Option<SlotName>) -> ProfileUpdate {
        KeywordSlotExtractor::new().scan(text, hint)
    }

    mod budget {
        use super::*;

        #[test]
        fn three_to_five_digit_runs() {
            assert_eq!(scan("預算5000左右", None).budget, Some(Budget::new(5000)));
            assert_eq!(scan("大概 800 塊", None).budget, Some(Budget::new(800)));
            assert_eq!(scan("12000", None).budget, Some(Budget::new(12000)));
        }

        #[test]
        fn other_lengths_are_ignored() {
            assert_eq!(scan("住 2 個人", None).budget, None);
            assert_eq!(scan("電話 0912345678", None).budget, None);
        }

        #[test]
        fn full_width_digits_are_read() {
            assert_eq!(scan("預算５０００", None).budget, Some(Budget::new(5000)));
            assert_eq!(scan("６，５００以內", None).budget, Some(Budget::new(6500)));
            assert_eq!(scan("住２個人", None).budget, None);
        }

        #[test]
        fn thousands_separator_is_ignored() {
            assert_eq!(scan("6,500 以內", None).budget, Some(Budget::new(6500)));
        }

        #[test]
        fn no_limit_phrase_maps_to_sentinel() {
            assert_eq!(scan("預算不限", Some(SlotName::Budget)).budget, Some(Budget::NO_LIMIT));
            assert_eq!(scan("沒上限", None).budget, Some(Budget::NO_LIMIT));
        }

        #[test]
        fn no_limit_under_other_hint_is_consent() {
            let update = scan("地點不限", Some(SlotName::LocationPref));
            assert_eq!(update.budget, None);
            assert_eq!(update.location_pref, Some(LocationPref::Downtown));
        }
    }

    mod keyword_groups {
        use super::*;

        #[test]
        fn location_words() {
            assert_eq!(scan("想住暨大附近", None).location_pref, Some(LocationPref::School));
            assert_eq!(scan("越安靜越好", None).location_pref, Some(LocationPref::Quiet));
            assert_eq!(scan("市區比較方便", None).location_pref, Some(LocationPref::Downtown));
        }

        #[test]
        fn room_words() {
            assert_eq!(scan("想找雅房", None).type_pref, Some(RoomType::Shared));
            assert_eq!(scan("整層公寓", None).type_pref, Some(RoomType::Apartment));
        }

        #[test]
        fn negated_landlord_wins() {
            assert_eq!(
                scan("我不要房東同住", None).management_pref,
                Some(ManagementPref::NoOwner)
            );
            assert_eq!(scan("可以跟房東住", None).management_pref, Some(ManagementPref::Owner));
            assert_eq!(scan("有管理員比較好", None).management_pref, Some(ManagementPref::Pro));
        }

        #[test]
        fn feature_dictionary() {
            let update = scan("要有電梯跟子母車，最好有陽台", None);
            let features = update.required_features.unwrap();
            assert!(features.contains("elevator"));
            assert!(features.contains("garbage"));
            assert!(features.contains("balcony"));
            assert_eq!(features.len(), 3);
        }

        #[test]
        fn several_slots_in_one_utterance() {
            let update = scan("預算6000，學校附近的套房", None);
            assert_eq!(update.budget, Some(Budget::new(6000)));
            assert_eq!(update.location_pref, Some(LocationPref::School));
            assert_eq!(update.type_pref, Some(RoomType::Studio));
        }
    }

    mod generic_consent {
        use super::*;

        #[test]
        fn consent_while_asking_management_means_none() {
            let update = scan("都可以", Some(SlotName::ManagementPref));
            assert_eq!(update.management_pref, Some(ManagementPref::Indifferent));
            assert_eq!(update.slots(), vec![SlotName::ManagementPref]);
        }

        #[test]
        fn consent_defaults_per_slot() {
            assert_eq!(scan("隨便", Some(SlotName::Budget)).budget, Some(Budget::NO_LIMIT));
            assert_eq!(
                scan("沒差", Some(SlotName::LocationPref)).location_pref,
                Some(LocationPref::Downtown)
            );
            assert_eq!(scan("無所謂", Some(SlotName::TypePref)).type_pref, Some(RoomType::Studio));
            assert_eq!(
                scan("don't care", Some(SlotName::FeaturesPreference)).features_preference,
                Some(FeaturesAnswer::Done)
            );
        }

        #[test]
        fn nothing_needed_closes_features_question() {
            let update = scan("沒有", Some(SlotName::FeaturesPreference));
            assert_eq!(update.features_preference, Some(FeaturesAnswer::Done));
            assert!(update.required_features.is_none());
        }

        #[test]
        fn consent_without_hint_is_empty() {
            assert!(scan("都可以", None).is_empty());
        }

        #[test]
        fn explicit_value_beats_consent() {
            let update = scan("都可以，但不要房東", Some(SlotName::ManagementPref));
            assert_eq!(update.management_pref, Some(ManagementPref::NoOwner));
        }
    }

    #[tokio::test]
    async fn empty_scan_is_an_error() {
        let request = ExtractionRequest::new(UserId::new("U1").unwrap(), "嗯嗯", Some(SlotName::Budget));
        let result = KeywordSlotExtractor::new().attempt(&request).await;
        assert!(matches!(result, Err(ExtractionError::Empty)));
    }

    #[tokio::test]
    async fn strategy_reports_keyword_kind() {
        let extractor = KeywordSlotExtractor::new();
        assert_eq!(extractor.kind(), StrategyKind::Keyword);

        let request = ExtractionRequest::new(UserId::new("U1").unwrap(), "5000", None);
        let update = extractor.attempt(&request).await.unwrap();
        assert_eq!(update.budget, Some(Budget::new(5000)));
    }
}
