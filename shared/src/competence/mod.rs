//! Competency model: education cycles, controlled vocabularies, and
//! the codec packing a tutor's selections into one stored string.
//!
//! The stored column is opaque to the persistence layer; only this
//! module knows its grammar. See [`codec`] for the format.

mod codec;

pub use codec::{decode, encode, MATIERES_SENTINEL, CLASSES_SENTINEL};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Education cycle, stored as a semantic key rather than the display
/// label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cycle {
    #[serde(rename = "primaire")]
    Primaire,
    #[serde(rename = "secondaire_inf")]
    SecondaireInf,
    #[serde(rename = "secondaire_sup")]
    SecondaireSup,
}

impl Cycle {
    pub const ALL: [Cycle; 3] = [Cycle::Primaire, Cycle::SecondaireInf, Cycle::SecondaireSup];

    /// Semantic key used in storage and filters
    pub fn key(&self) -> &'static str {
        match self {
            Cycle::Primaire => "primaire",
            Cycle::SecondaireInf => "secondaire_inf",
            Cycle::SecondaireSup => "secondaire_sup",
        }
    }

    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Cycle::Primaire => "Primaire",
            Cycle::SecondaireInf => "Collège",
            Cycle::SecondaireSup => "Lycée",
        }
    }

    /// Grade labels taught within this cycle
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            Cycle::Primaire => &["CI", "CP", "CE1", "CE2", "CM1", "CM2"],
            Cycle::SecondaireInf => &["6ème", "5ème", "4ème", "3ème"],
            Cycle::SecondaireSup => &["2nde", "1ère", "Terminale"],
        }
    }

    /// Lenient normalization of stored cycle text.
    ///
    /// Exact keys match first; otherwise legacy display labels are
    /// recognized case-insensitively anywhere in the text. Unknown
    /// non-empty text falls back to `Primaire` so historical records
    /// always remain readable. Empty text (or a bare class sentinel
    /// sitting in the cycle slot) maps to nothing.
    pub fn normalize(text: &str) -> Option<Cycle> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(CLASSES_SENTINEL) || trimmed == "Aucune" {
            return None;
        }
        if let Ok(cycle) = trimmed.parse::<Cycle>() {
            return Some(cycle);
        }
        let lower = trimmed.to_lowercase();
        if lower.contains("primaire") {
            Some(Cycle::Primaire)
        } else if lower.contains("collège") || lower.contains("college") {
            Some(Cycle::SecondaireInf)
        } else if lower.contains("lycée") || lower.contains("lycee") {
            Some(Cycle::SecondaireSup)
        } else {
            Some(Cycle::Primaire)
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Cycle text that is not one of the semantic keys
#[derive(Debug, Error)]
#[error("unknown cycle key: {0}")]
pub struct InvalidCycle(pub String);

impl FromStr for Cycle {
    type Err = InvalidCycle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "primaire" => Ok(Cycle::Primaire),
            "secondaire_inf" => Ok(Cycle::SecondaireInf),
            "secondaire_sup" => Ok(Cycle::SecondaireSup),
            other => Err(InvalidCycle(other.to_string())),
        }
    }
}

/// Subjects offered by the registry. Vocabulary membership is a form
/// concern; the codec itself accepts any subject text.
pub const MATIERES: &[&str] = &[
    "Français",
    "Mathématiques",
    "Physique-Chimie (PC)",
    "SVT",
    "Anglais",
    "Histoire-Géo",
    "Philosophie",
    "Espagnol",
    "Allemand",
    "Arabe",
    "Comptabilité",
    "Économie",
    "Informatique",
    "Toutes matières (Primaire)",
];

/// A tutor's structured competency selection, as edited in the form.
///
/// `classes` is the flattened union across the selected cycles; the
/// per-cycle grouping is a display concern reconstructed from
/// [`Cycle::classes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub matieres: Vec<String>,
    #[serde(default)]
    pub niveaux: Vec<Cycle>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Selection {
    pub fn new(
        matieres: impl IntoIterator<Item = impl Into<String>>,
        niveaux: impl IntoIterator<Item = Cycle>,
        classes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            matieres: matieres.into_iter().map(Into::into).collect(),
            niveaux: niveaux.into_iter().collect(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matieres.is_empty() && self.niveaux.is_empty() && self.classes.is_empty()
    }

    /// Dedup all three lists, keeping first-occurrence order.
    pub fn normalize(mut self) -> Self {
        dedup_keep_order(&mut self.matieres);
        let mut seen = Vec::new();
        self.niveaux.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
        dedup_keep_order(&mut self.classes);
        self
    }

    /// Encode into the stored text form.
    pub fn encode(&self) -> String {
        encode(self)
    }
}

fn dedup_keep_order(items: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.iter().any(|s| s == item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
