use crate::domain::model::{Card, Set};
use crate::utils::error::Result;
use std::io::Write;

pub const DEFAULT_REPORT_THRESHOLD: u32 = 2;

fn write_card_line<W: Write>(out: &mut W, card: &Card) -> Result<()> {
    writeln!(
        out,
        "| Name: {} | Type: {} | Rarity {}  | Score {}",
        card.name, card.type_line, card.rarity, card.score
    )?;
    Ok(())
}

/// Writes every card scoring strictly above `threshold`, in collection order.
pub fn render_analysis<W: Write>(cards: &[Card], threshold: u32, out: &mut W) -> Result<usize> {
    let mut written = 0;
    for card in cards.iter().filter(|c| c.score > threshold) {
        write_card_line(out, card)?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

pub fn render_set<W: Write>(cards: &[Card], out: &mut W) -> Result<usize> {
    for card in cards {
        write_card_line(out, card)?;
    }
    out.flush()?;
    Ok(cards.len())
}

pub fn render_sets<W: Write>(sets: &[Set], out: &mut W) -> Result<usize> {
    for set in sets {
        writeln!(out, "| Name: {} | Code: {}  |", set.name, set.code)?;
    }
    out.flush()?;
    Ok(sets.len())
}
