use crate::domain::model::{Card, SetCards};
use crate::domain::ports::ScoringRule;
use crate::utils::error::{MtgaError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound accepted for a configured keyword value.
pub const MAX_KEYWORD_VALUE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub phrase: String,
    pub value: u32,
}

/// Creature keywords and what each one is worth. Phrases are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    keywords: Vec<Keyword>,
}

impl KeywordTable {
    pub fn new<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, u32)>) -> Self {
        let keywords = entries
            .into_iter()
            .map(|(phrase, value)| Keyword {
                phrase: phrase.as_ref().to_lowercase(),
                value,
            })
            .collect();
        Self { keywords }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn value_of(&self, phrase: &str) -> Option<u32> {
        let phrase = phrase.to_lowercase();
        self.keywords
            .iter()
            .find(|k| k.phrase == phrase)
            .map(|k| k.value)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new([
            ("flying", 2),
            ("first strike", 2),
            ("vigilance", 2),
            ("lifelink", 2),
            ("menace", 1),
            ("skulk", 1),
            ("hexproof", 2),
            ("haste", 2),
            ("trample", 1),
        ])
    }
}

/// Adds the value of every keyword phrase found in a creature's oracle text.
#[derive(Debug, Clone, Default)]
pub struct KeywordValuation {
    table: KeywordTable,
}

impl KeywordValuation {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }
}

impl ScoringRule for KeywordValuation {
    fn name(&self) -> &'static str {
        "keyword_valuation"
    }

    fn score(&self, card: &Card) -> Result<u32> {
        if !card.is_creature() {
            return Ok(0);
        }
        self.table
            .iter()
            .filter(|k| card.has_keyword(&k.phrase))
            .try_fold(0u32, |total, k| total.checked_add(k.value))
            .ok_or_else(|| overflow(self.name(), card))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnterBattlefieldTrigger;

impl ScoringRule for EnterBattlefieldTrigger {
    fn name(&self) -> &'static str {
        "enter_battlefield_trigger"
    }

    fn score(&self, card: &Card) -> Result<u32> {
        Ok(u32::from(card.has_enter_battlefield_effect()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CastTrigger;

impl ScoringRule for CastTrigger {
    fn name(&self) -> &'static str {
        "cast_trigger"
    }

    fn score(&self, card: &Card) -> Result<u32> {
        Ok(u32::from(card.has_when_cast_effect()))
    }
}

/// Placeholder for cost-efficiency heuristics; contributes nothing yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostPower;

impl ScoringRule for CostPower {
    fn name(&self) -> &'static str {
        "cost_power"
    }

    fn score(&self, _card: &Card) -> Result<u32> {
        Ok(0)
    }
}

fn overflow(pass: &str, card: &Card) -> MtgaError {
    MtgaError::AnalysisError {
        pass: pass.to_string(),
        card: card.name.clone(),
        message: "score overflowed".to_string(),
    }
}

/// Runs a single pass over every card, returning how many cards it scored.
///
/// Stops at the first card the rule fails on; cards before it keep their increments.
pub fn apply_rule(rule: &dyn ScoringRule, set: &mut SetCards) -> Result<usize> {
    let mut touched = 0;
    for card in set.cards.iter_mut() {
        let delta = rule.score(card)?;
        if delta > 0 {
            card.increment_score(delta).ok_or_else(|| overflow(rule.name(), card))?;
            touched += 1;
        }
    }
    tracing::debug!("Pass {} scored {} of {} cards", rule.name(), touched, set.len());
    Ok(touched)
}

/// Ordered list of scoring passes.
///
/// Running it twice over the same cards adds every contribution twice.
pub struct ScoringPipeline {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl ScoringPipeline {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Keyword valuation, enter-the-battlefield, cast trigger, cost/power.
    pub fn standard(table: KeywordTable) -> Self {
        Self::empty()
            .with_rule(KeywordValuation::new(table))
            .with_rule(EnterBattlefieldTrigger)
            .with_rule(CastTrigger)
            .with_rule(CostPower)
    }

    pub fn with_rule<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn run(&self, set: &mut SetCards) -> Result<()> {
        tracing::info!("Scoring {} cards with {} passes", set.len(), self.rules.len());
        for rule in &self.rules {
            apply_rule(rule.as_ref(), set)?;
        }
        Ok(())
    }
}

impl Default for ScoringPipeline {
    fn default() -> Self {
        Self::standard(KeywordTable::default())
    }
}
