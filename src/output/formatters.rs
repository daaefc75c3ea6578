//! Formatting utilities for terminal output

use crate::core::{LetterTile, TileId};

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Stars earned out of three, with an extra marker for the bonus star
#[must_use]
pub fn star_string(stars: u8, bonus_star: bool) -> String {
    let earned = usize::from(stars.min(3));
    let mut out = format!("{}{}", "★".repeat(earned), "☆".repeat(3 - earned));
    if bonus_star {
        out.push_str(" +✦");
    }
    out
}

/// Hand tiles in hand order; placed tiles show as a dot
#[must_use]
pub fn hand_row(tiles: &[LetterTile]) -> String {
    tiles
        .iter()
        .map(|t| {
            if t.placed {
                "[·]".to_string()
            } else {
                format!("[{}]", t.letter)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word slots in order; empty slots show as an underscore
#[must_use]
pub fn slot_row(slots: &[Option<TileId>], tiles: &[LetterTile]) -> String {
    slots
        .iter()
        .map(|slot| {
            slot.and_then(|id| tiles.iter().find(|t| t.id == id))
                .map_or_else(|| "_".to_string(), |t| t.letter.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `m:ss` clock text
#[must_use]
pub fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
