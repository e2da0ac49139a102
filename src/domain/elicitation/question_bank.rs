//! Static prompts: the six forced-choice scenarios and the per-slot questions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dimension::Dimension;
use crate::domain::foundation::ValidationError;
use crate::domain::profile::SlotName;

/// Option id of a two-option scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionChoice {
    A,
    B,
}

impl FromStr for OptionChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(OptionChoice::A),
            "B" | "b" => Ok(OptionChoice::B),
            other => Err(ValidationError::invalid_format(
                "choice",
                format!("expected A or B, got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for OptionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionChoice::A => f.write_str("A"),
            OptionChoice::B => f.write_str("B"),
        }
    }
}

/// One side of a scenario with its weight deltas.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOption {
    pub choice: OptionChoice,
    pub label: &'static str,
    pub deltas: &'static [(Dimension, i32)],
}

/// A forced-choice question.
#[derive(Debug, Clone, Serialize)]
pub struct WeightScenario {
    /// 1-based position in the quiz.
    pub index: u8,
    pub title: &'static str,
    pub prompt: &'static str,
    pub options: [ScenarioOption; 2],
}

impl WeightScenario {
    pub fn option(&self, choice: OptionChoice) -> &ScenarioOption {
        match choice {
            OptionChoice::A => &self.options[0],
            OptionChoice::B => &self.options[1],
        }
    }
}

/// Immutable catalog of scenarios and slot prompts.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    scenarios: Vec<WeightScenario>,
}

static STANDARD_BANK: Lazy<QuestionBank> = Lazy::new(|| QuestionBank {
    scenarios: standard_scenarios(),
});

impl QuestionBank {
    /// The bank used by every session.
    pub fn standard() -> &'static QuestionBank {
        &STANDARD_BANK
    }

    pub fn scenarios(&self) -> &[WeightScenario] {
        &self.scenarios
    }

    pub fn scenario_count(&self) -> u8 {
        self.scenarios.len() as u8
    }

    /// Scenario by 1-based index.
    pub fn scenario(&self, index: u8) -> Option<&WeightScenario> {
        self.scenarios.iter().find(|s| s.index == index)
    }

    /// The question asked while `slot` is the first missing one.
    pub fn slot_prompt(&self, slot: SlotName) -> &'static str {
        match slot {
            SlotName::Budget => "請問你每個月的租金預算大概是多少呢？（例如：5000，或回覆「不限」）",
            SlotName::LocationPref => "你比較想住在哪一區？市區、學校附近，還是安靜一點的地方？",
            SlotName::TypePref => "房型方面，你偏好套房、雅房，還是整層住家？",
            SlotName::ManagementPref => {
                "你希望房東同住、有專業管理，還是不要跟房東住？沒有偏好也可以說「都可以」。"
            }
            SlotName::RequiredFeatures | SlotName::FeaturesPreference => {
                "最後，有沒有一定要有的設施？例如電梯、子母車、門禁、陽台、洗衣機。沒有的話回覆「沒有」即可。"
            }
        }
    }
}

fn standard_scenarios() -> Vec<WeightScenario> {
    use Dimension::*;

    vec![
        WeightScenario {
            index: 1,
            title: "📍 距離 vs 💰 租金",
            prompt: "如果要二選一，你會選？",
            options: [
                ScenarioOption {
                    choice: OptionChoice::A,
                    label: "A. 走路就能到學校，但每月多付 $2000",
                    deltas: &[(Location, 20), (Budget, -10)],
                },
                ScenarioOption {
                    choice: OptionChoice::B,
                    label: "B. 通勤要花 20 分鐘，但租金省超多",
                    deltas: &[(Budget, 20), (Location, -10)],
                },
            ],
        },
        WeightScenario {
            index: 2,
            title: "🔒 隱私 vs 🛁 硬體設施",
            prompt: "同樣的租金，你比較想要？",
            options: [
                ScenarioOption {
                    choice: OptionChoice::A,
                    label: "A. 自己一個人的獨立空間，但什麼設備都沒有",
                    deltas: &[(Type, 20), (Features, -10)],
                },
                ScenarioOption {
                    choice: OptionChoice::B,
                    label: "B. 要跟別人共用空間，但設備超級豪華",
                    deltas: &[(Features, 20), (Type, -10)],
                },
            ],
        },
        WeightScenario {
            index: 3,
            title: "👴 自由度 vs 💰 省錢",
            prompt: "為了每月省 $1000，你願意...？",
            options: [
                ScenarioOption {
                    choice: OptionChoice::A,
                    label: "A. 願意！跟房東住一起也沒關係，省錢最重要",
                    deltas: &[(Budget, 20), (Landlord, -10)],
                },
                ScenarioOption {
                    choice: OptionChoice::B,
                    label: "B. 不願意！我寧願多花錢也要有自己的自由",
                    deltas: &[(Landlord, 20), (Budget, -10)],
                },
            ],
        },
        WeightScenario {
            index: 4,
            title: "📍 生活機能 vs 🔒 居住品質",
            prompt: "這兩種生活，你更嚮往哪一種？",
            options: [
                ScenarioOption {
                    choice: OptionChoice::A,
                    label: "A. 住得遠一點，但房間大又舒適",
                    deltas: &[(Type, 20), (Location, -10)],
                },
                ScenarioOption {
                    choice: OptionChoice::B,
                    label: "B. 住得近、生活方便，房間小一點沒關係",
                    deltas: &[(Location, 20), (Type, -10)],
                },
            ],
        },
        WeightScenario {
            index: 5,
            title: "🛁 硬體設施 vs 👴 房東好壞",
            prompt: "這兩個房東，你會選誰的房子？",
            options: [
                ScenarioOption {
                    choice: OptionChoice::A,
                    label: "A. 房東超難相處，但房間設備全新又齊全",
                    deltas: &[(Features, 20), (Landlord, -10)],
                },
                ScenarioOption {
                    choice: OptionChoice::B,
                    label: "B. 房東人超好超照顧，但設備比較舊",
                    deltas: &[(Landlord, 20), (Features, -10)],
                },
            ],
        },
        WeightScenario {
            index: 6,
            title: "🔑 特殊需求 vs ⚖️ 整體條件",
            prompt: "最後一題！這是你的靈魂拷問...",
            options: [
                ScenarioOption {
                    choice: OptionChoice::A,
                    label: "A. 這間能滿足我的特殊需求（如：養寵物、開伙），但其他條件普普",
                    deltas: &[(Keyword, 25), (Budget, -5), (Features, -5)],
                },
                ScenarioOption {
                    choice: OptionChoice::B,
                    label: "B. 沒有特殊功能，但整體條件平均都很好",
                    deltas: &[(Budget, 10), (Location, 5), (Features, 5), (Keyword, -15)],
                },
            ],
        },
    ]
}
