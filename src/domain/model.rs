use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const CREATURE_TYPE: &str = "Creature";

/// One printed card as the catalog describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_line: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(rename = "text", default)]
    pub oracle_text: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub score: u32,
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        type_line: impl Into<String>,
        types: Vec<String>,
        rarity: impl Into<String>,
        oracle_text: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            type_line: type_line.into(),
            types,
            subtypes: Vec::new(),
            rarity: rarity.into(),
            oracle_text: oracle_text.into(),
            mana_cost: None,
            cmc: None,
            set: None,
            set_name: None,
            number: None,
            power: None,
            toughness: None,
            artist: None,
            score: 0,
        }
    }

    pub fn is_creature(&self) -> bool {
        self.types.iter().any(|t| t == CREATURE_TYPE)
    }

    /// Case-insensitive substring match, so "haste" also hits "chaste".
    pub fn has_keyword(&self, phrase: &str) -> bool {
        self.oracle_text
            .to_lowercase()
            .contains(&phrase.to_lowercase())
    }

    /// True when the oracle text is contained in "when <name> enters the battlefield".
    ///
    /// The containment runs from the synthesized phrase towards the card text,
    /// so an empty oracle text always matches and real rules text rarely does.
    pub fn has_enter_battlefield_effect(&self) -> bool {
        let phrase = format!("when {} enters the battlefield", self.name).to_lowercase();
        phrase.contains(&self.oracle_text.to_lowercase())
    }

    /// Same containment direction as [`Card::has_enter_battlefield_effect`].
    pub fn has_when_cast_effect(&self) -> bool {
        let phrase = format!("when you cast {}", self.name).to_lowercase();
        phrase.contains(&self.oracle_text.to_lowercase())
    }

    /// Adds `amount` and returns the new score, or `None` (score untouched) on overflow.
    pub fn increment_score(&mut self, amount: u32) -> Option<u32> {
        self.score = self.score.checked_add(amount)?;
        Some(self.score)
    }
}

/// Cards of a single set, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetCards {
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl SetCards {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub code: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub set_type: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub online_only: Option<bool>,
}

// Dates the catalog gets wrong ("2016-07", "unknown") become `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetList {
    #[serde(default)]
    pub sets: Vec<Set>,
}
