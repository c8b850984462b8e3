// Waste domain catalog: bin categories, classifier disposal classes, and
// the fixed item/question data backing the mini-games.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Bin categories used by the sorting mini-game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WasteCategory {
    Plastic,
    Paper,
    Glass,
    Metal,
    Organic,
    Electronic,
}

/// Disposal classes the remote classifier can return. The string forms
/// match the model's output labels exactly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum DisposalClass {
    EWaste,
    NonRecyclable,
    Organic,
    Recyclable,
    StoreDropOff,
}

impl DisposalClass {
    /// Route of the disposal guide screen for this class.
    pub fn guide_route(self) -> &'static str {
        match self {
            DisposalClass::Recyclable => "recyclable_disposal",
            DisposalClass::Organic => "organic_disposal",
            DisposalClass::EWaste => "ewaste_disposal",
            DisposalClass::NonRecyclable => "nonrec_disposal",
            DisposalClass::StoreDropOff => "store_disposal",
        }
    }
}

/// Categorical result of one classification. Unrecognized labels are
/// valid results, they just carry no parsed class and therefore no
/// disposal guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub class: Option<DisposalClass>,
}

impl ClassificationResult {
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let class = DisposalClass::from_str(&label).ok();
        Self { label, class }
    }
}

/// One sortable item in the sorting mini-game. `sorted` flips to true
/// exactly once, when the player commits a bin choice for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub category: WasteCategory,
    pub sorted: bool,
}

impl GameItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        category: WasteCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            category,
            sorted: false,
        }
    }
}

/// One multiple-choice quiz question with exactly four options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub icon: String,
}

/// The built-in sortable item catalog. Sessions sample a shuffled
/// subset of these.
pub fn builtin_sorting_items() -> Vec<GameItem> {
    vec![
        GameItem::new("1", "Plastic Bottle", "bottle-soda", WasteCategory::Plastic),
        GameItem::new("2", "Newspaper", "newspaper", WasteCategory::Paper),
        GameItem::new("3", "Glass Jar", "glass-mug", WasteCategory::Glass),
        GameItem::new("4", "Aluminum Can", "can", WasteCategory::Metal),
        GameItem::new("5", "Apple Core", "apple", WasteCategory::Organic),
        GameItem::new("6", "Old Phone", "cellphone", WasteCategory::Electronic),
        GameItem::new("7", "Cardboard Box", "package-variant", WasteCategory::Paper),
        GameItem::new("8", "Wine Bottle", "bottle-wine", WasteCategory::Glass),
    ]
}

/// The built-in quiz catalog, presented in this fixed order.
pub fn builtin_quiz_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "1".to_string(),
            question: "Which bin should plastic bottles go into?".to_string(),
            options: vec![
                "General Waste".to_string(),
                "Recycling Bin".to_string(),
                "Organic Waste".to_string(),
                "Hazardous Waste".to_string(),
            ],
            correct_answer: 1,
            explanation: "Plastic bottles are recyclable and should go into the recycling bin \
                          to be processed into new products."
                .to_string(),
            icon: "bottle-soda".to_string(),
        },
        QuizQuestion {
            id: "2".to_string(),
            question: "What percentage of plastic waste is actually recycled globally?"
                .to_string(),
            options: vec![
                "50%".to_string(),
                "25%".to_string(),
                "9%".to_string(),
                "75%".to_string(),
            ],
            correct_answer: 2,
            explanation: "Only about 9% of plastic waste is recycled globally, highlighting \
                          the importance of reducing plastic use."
                .to_string(),
            icon: "recycle".to_string(),
        },
        QuizQuestion {
            id: "3".to_string(),
            question: "How long does it take for a plastic bottle to decompose?".to_string(),
            options: vec![
                "1 year".to_string(),
                "10 years".to_string(),
                "100 years".to_string(),
                "450 years".to_string(),
            ],
            correct_answer: 3,
            explanation: "Plastic bottles can take up to 450 years to decompose, making \
                          recycling crucial for environmental protection."
                .to_string(),
            icon: "clock-outline".to_string(),
        },
        QuizQuestion {
            id: "4".to_string(),
            question: "Which material can be recycled indefinitely without losing quality?"
                .to_string(),
            options: vec![
                "Plastic".to_string(),
                "Paper".to_string(),
                "Glass".to_string(),
                "Cardboard".to_string(),
            ],
            correct_answer: 2,
            explanation: "Glass can be recycled indefinitely without losing quality, making \
                          it one of the most sustainable materials."
                .to_string(),
            icon: "glass-mug".to_string(),
        },
        QuizQuestion {
            id: "5".to_string(),
            question: "What should you do before recycling containers?".to_string(),
            options: vec![
                "Break them".to_string(),
                "Clean them".to_string(),
                "Paint them".to_string(),
                "Nothing".to_string(),
            ],
            correct_answer: 1,
            explanation: "Containers should be cleaned before recycling to prevent \
                          contamination and ensure proper processing."
                .to_string(),
            icon: "water".to_string(),
        },
    ]
}
