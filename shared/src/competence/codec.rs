//! Encode/decode for the stored competency column.
//!
//! Canonical grammar (the only one the encoder produces):
//!
//! ```text
//! <matieres ", "-joined | "Unspecified"> - [<cycle keys "; "-joined> : <classes ", "-joined | "None">]
//! ```
//!
//! The decoder is total and maximally permissive: it also reads the
//! two legacy grammars found in historical rows (a single
//! `niveau : classes` bracket, and `;`-joined `Cycle: classes` groups
//! with display labels), recognizes the French sentinels
//! `Non spécifié` / `Aucune`, and never fails on malformed text.

use super::{Cycle, Selection};

/// Sentinel stored when no subject was selected
pub const MATIERES_SENTINEL: &str = "Unspecified";
/// Sentinel stored when no class was selected
pub const CLASSES_SENTINEL: &str = "None";

const LEGACY_MATIERES_SENTINEL: &str = "Non spécifié";
const LEGACY_CLASSES_SENTINEL: &str = "Aucune";

/// Pure, deterministic encoding of a selection.
///
/// Both sentinels always appear when their list is empty, so every
/// encoded value carries the full `subjects - [cycles : classes]`
/// shape. Content is not validated against the vocabularies.
pub fn encode(selection: &Selection) -> String {
    let matieres = if selection.matieres.is_empty() {
        MATIERES_SENTINEL.to_string()
    } else {
        selection.matieres.join(", ")
    };
    let niveaux = selection
        .niveaux
        .iter()
        .map(Cycle::key)
        .collect::<Vec<_>>()
        .join("; ");
    let classes = if selection.classes.is_empty() {
        CLASSES_SENTINEL.to_string()
    } else {
        selection.classes.join(", ")
    };
    format!("{matieres} - [{niveaux} : {classes}]")
}

/// Total decoding of stored competency text.
///
/// Strict on write, permissive on read: a missing bracket yields
/// empty cycles and classes, unknown cycle text falls back through
/// [`Cycle::normalize`], and duplicates collapse to their first
/// occurrence. Never returns an error; historical rows must always
/// stay viewable.
pub fn decode(stored: &str) -> Selection {
    let (matieres_part, bracket_part) = match stored.find('[') {
        Some(open) => {
            let rest = &stored[open + 1..];
            let inner = match rest.rfind(']') {
                Some(close) => &rest[..close],
                None => rest,
            };
            (&stored[..open], Some(inner))
        }
        None => (stored, None),
    };

    let matieres = split_list(
        matieres_part.trim().trim_end_matches('-').trim(),
        &[MATIERES_SENTINEL, LEGACY_MATIERES_SENTINEL],
    );

    let mut niveaux = Vec::new();
    let mut classes = Vec::new();
    if let Some(inner) = bracket_part {
        // One segment per cycle; a bare segment names a cycle with no
        // class list attached.
        for segment in inner.split(';') {
            let (cycle_text, class_text) = match segment.split_once(':') {
                Some((cycle, rest)) => (cycle, Some(rest)),
                None => (segment, None),
            };
            if let Some(cycle) = Cycle::normalize(cycle_text) {
                niveaux.push(cycle);
            }
            if let Some(text) = class_text {
                classes.extend(split_list(
                    text,
                    &[CLASSES_SENTINEL, LEGACY_CLASSES_SENTINEL],
                ));
            }
        }
    }

    Selection {
        matieres,
        niveaux,
        classes,
    }
    .normalize()
}

fn split_list(text: &str, sentinels: &[&str]) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty() && !sentinels.iter().any(|s| item.eq_ignore_ascii_case(s)))
        .map(str::to_string)
        .collect()
}
