//! Completion instructions for extraction, guidance and feature matching.

use crate::domain::profile::SlotName;

/// Instruction for the semantic slot extractor.
pub const EXTRACTION_INSTRUCTION: &str = r#"你是一個資料提取員。請分析使用者的租屋需求，輸出一個 JSON 物件。
只輸出 JSON，不要包含任何解釋文字或 markdown 標記。使用者沒有提到的欄位不要輸出。

欄位：
- budget (整數)：每月租金上限，新台幣。「不限」「沒上限」輸出 99999。
- location_pref (字串)："downtown"(市區、方便、熱鬧)、"school"(學校附近、暨大)、"quiet"(安靜、偏僻、郊區)
- type_pref (字串)："studio"(套房)、"shared"(雅房)、"apartment"(整層)
- management_pref (字串)："owner"(房東同住)、"pro"(專業管理)、"no_owner"(不要房東)、"none"(沒有偏好)
- required_features (字串陣列)：一定要有的設施，例如 "elevator"、"garbage"、"security"、"parking"、"laundry"、"balcony"
- features_preference (字串)：使用者已回答完設施需求（包含「沒有」）時輸出 "done"

輸出範例：
{"budget": 5000, "location_pref": "school"}"#;

/// Extra disambiguation rule for the slot currently being asked.
pub fn hint_rule(slot: SlotName) -> &'static str {
    match slot {
        SlotName::Budget => {
            "目前詢問的是預算。若使用者表示沒有偏好、都可以或不限，輸出 {\"budget\": 99999}。單獨的數字視為預算。"
        }
        SlotName::LocationPref => {
            "目前詢問的是地點。若使用者表示沒有偏好或都可以，輸出 {\"location_pref\": \"downtown\"}。"
        }
        SlotName::TypePref => {
            "目前詢問的是房型。若使用者表示沒有偏好或都可以，輸出 {\"type_pref\": \"studio\"}。"
        }
        SlotName::ManagementPref => {
            "目前詢問的是房東與管理方式。若使用者表示沒有偏好或都可以，輸出 {\"management_pref\": \"none\"}。"
        }
        SlotName::RequiredFeatures | SlotName::FeaturesPreference => {
            "目前詢問的是必要設施。列出的設施放入 required_features；只要使用者有回答（包含「沒有」「不需要」），就同時輸出 \"features_preference\": \"done\"。"
        }
    }
}

/// Full system prompt for one extraction call.
pub fn extraction_prompt(hint: Option<SlotName>) -> String {
    match hint {
        Some(slot) => format!("{}\n\n規則：{}", EXTRACTION_INSTRUCTION, hint_rule(slot)),
        None => EXTRACTION_INSTRUCTION.to_string(),
    }
}

/// Human topic for a slot, used in redirects.
pub fn slot_topic(slot: Option<SlotName>) -> &'static str {
    match slot {
        Some(SlotName::Budget) => "每月租金預算",
        Some(SlotName::LocationPref) => "想住的地段",
        Some(SlotName::TypePref) => "房型偏好",
        Some(SlotName::ManagementPref) => "房東與管理方式",
        Some(SlotName::RequiredFeatures) | Some(SlotName::FeaturesPreference) => "必要的設施",
        None => "租屋需求",
    }
}

/// System prompt for the guidance redirect.
pub fn guidance_prompt(slot: Option<SlotName>) -> String {
    format!(
        "你是一個親切的租屋顧問。我們剛剛問的是「{}」，但使用者的回答沒有回應到這個問題。\
請用一句簡短、口語化的繁體中文告訴他，並引導他回答「{}」。只輸出那一句話。",
        slot_topic(slot),
        slot_topic(slot)
    )
}

/// Instruction for batched feature matching.
pub const FEATURE_MATCH_INSTRUCTION: &str = r#"你是一個租屋設施比對員。
你會收到使用者需要的設施清單，以及多個房型人格各自提供的設施。
請判斷每個人格能滿足使用者需求的比例（0 到 1 之間的小數），同義詞視為相符（例如「垃圾代收」與 "garbage"）。
只輸出一個 JSON 物件，鍵為人格 id，值為比例。例如：{"type_A": 0.5, "type_B": 1.0}"#;
