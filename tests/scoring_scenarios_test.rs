use mtga::core::report::render_analysis;
use mtga::core::scoring::{apply_rule, CastTrigger, EnterBattlefieldTrigger, KeywordValuation};
use mtga::core::{Card, SetCards};
use mtga::{KeywordTable, ScoringPipeline};

fn creature(name: &str, text: &str) -> Card {
    Card::new(
        name,
        "Creature — Human Wizard",
        vec!["Creature".to_string()],
        "Rare",
        text,
    )
}

fn non_creature(name: &str, types: &[&str], text: &str) -> Card {
    Card::new(
        name,
        types.join(" "),
        types.iter().map(|t| t.to_string()).collect(),
        "Common",
        text,
    )
}

#[test]
fn test_non_creatures_gain_nothing_from_keywords() {
    let text = "Flying, first strike, vigilance, lifelink, menace, skulk, hexproof, haste, trample";
    let mut set = SetCards::new(vec![
        non_creature("Sky Spell", &["Instant"], text),
        non_creature("Sky Ritual", &["Sorcery"], text),
        non_creature("Sky Charm", &["Enchantment"], text),
        non_creature("Sky Gear", &["Artifact"], text),
    ]);

    let touched = apply_rule(&KeywordValuation::default(), &mut set).unwrap();

    assert_eq!(touched, 0);
    assert!(set.cards.iter().all(|c| c.score == 0));
}

#[test]
fn test_creature_keyword_score_is_sum_of_matching_phrases() {
    let table = KeywordTable::default();
    let text = "Flying, first strike, vigilance, lifelink, menace, skulk, hexproof, haste, trample";
    let expected: u32 = table.iter().map(|k| k.value).sum();

    let mut set = SetCards::new(vec![creature("Everything Angel", text)]);
    apply_rule(&KeywordValuation::new(table), &mut set).unwrap();

    assert_eq!(expected, 15);
    assert_eq!(set.cards[0].score, 15);
}

#[test]
fn test_repeated_phrase_counts_once() {
    let mut set = SetCards::new(vec![creature(
        "Trampling Beast",
        "Trample\nWhenever another creature with trample attacks, it gains trample.",
    )]);
    apply_rule(&KeywordValuation::default(), &mut set).unwrap();
    assert_eq!(set.cards[0].score, 1);
}

#[test]
fn test_trigger_passes_need_text_inside_synthesized_phrase() {
    let mut set = SetCards::new(vec![
        // Prefix of "when stitched mangler enters the battlefield".
        creature("Stitched Mangler", "When Stitched Mangler"),
        // Suffix of the same phrase.
        creature("Stitched Mangler", "the battlefield"),
        // Real rules text contains the phrase, which is the wrong direction.
        creature(
            "Stitched Mangler",
            "Stitched Mangler enters the battlefield tapped.\nWhen Stitched Mangler enters the battlefield, tap target creature an opponent controls.",
        ),
    ]);

    apply_rule(&EnterBattlefieldTrigger, &mut set).unwrap();

    let scores: Vec<u32> = set.cards.iter().map(|c| c.score).collect();
    assert_eq!(scores, vec![1, 1, 0]);
}

#[test]
fn test_cast_trigger_needs_text_inside_synthesized_phrase() {
    let mut set = SetCards::new(vec![
        creature("Emrakul, the Promised End", "you cast Emrakul"),
        creature(
            "Emrakul, the Promised End",
            "When you cast Emrakul, the Promised End, you gain control of target opponent during that player's next turn.",
        ),
    ]);

    apply_rule(&CastTrigger, &mut set).unwrap();

    assert_eq!(set.cards[0].score, 1);
    assert_eq!(set.cards[1].score, 0);
}

#[test]
fn test_flying_first_strike_creature_is_reported_with_four() {
    let mut set = SetCards::new(vec![
        creature("Ascended Lawmage", "Flying, first strike"),
        non_creature("Take Flight", &["Instant"], "Target creature gains flying."),
    ]);
    ScoringPipeline::default().run(&mut set).unwrap();

    assert_eq!(set.cards[0].score, 4);
    assert_eq!(set.cards[1].score, 0);

    let mut out: Vec<u8> = Vec::new();
    let reported = render_analysis(&set.cards, 2, &mut out).unwrap();
    assert_eq!(reported, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "| Name: Ascended Lawmage | Type: Creature — Human Wizard | Rarity Rare  | Score 4\n"
    );
}

#[test]
fn test_pipeline_is_not_idempotent() {
    // Scores are accumulators: a second run on scored cards doubles them.
    let mut set = SetCards::new(vec![creature("Ascended Lawmage", "Flying, first strike")]);
    let pipeline = ScoringPipeline::default();

    pipeline.run(&mut set).unwrap();
    pipeline.run(&mut set).unwrap();

    assert_eq!(set.cards[0].score, 8);
}

#[test]
fn test_report_threshold_is_strict_and_ordered() {
    let mut cards = Vec::new();
    for (name, score) in [("A", 3), ("B", 2), ("C", 0), ("D", 5), ("E", 1), ("F", 3)] {
        let mut card = creature(name, "");
        card.score = score;
        cards.push(card);
    }

    let mut out: Vec<u8> = Vec::new();
    render_analysis(&cards, 2, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let names: Vec<&str> = text
        .lines()
        .filter_map(|l| l.strip_prefix("| Name: "))
        .filter_map(|l| l.split(' ').next())
        .collect();

    assert_eq!(names, vec!["A", "D", "F"]);
}

#[test]
fn test_empty_card_list_renders_nothing() {
    let mut set = SetCards::default();
    ScoringPipeline::default().run(&mut set).unwrap();

    let mut out: Vec<u8> = Vec::new();
    assert_eq!(render_analysis(&set.cards, 2, &mut out).unwrap(), 0);
    assert!(out.is_empty());
}
