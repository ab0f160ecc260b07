//! Movement type canonicalization and stock effects.
//!
//! Scenario labels are free text ("Réception", "Sortie technicien", ...) but the
//! movement log stores a small closed set of canonical codes. Each code has a
//! signed effect on the central warehouse quantity, held in [`StockEffects`].

use crate::{core::location::fold_label, entities::scenario};
use std::collections::HashMap;
use tracing::warn;

/// Fixed label to canonical code table.
const CANONICAL_CODES: &[(&str, &str)] = &[
    ("réception", "reception"),
    ("reception", "reception"),
    ("sortie technicien", "sortie_technicien"),
    ("retour technicien", "retour_technicien"),
    ("transfert technicien", "transfert_technicien"),
    ("installation", "installation"),
    ("installation client", "installation"),
    ("sortie client", "sortie_client"),
    ("retour client", "retour_client"),
    ("transfert dépôt", "transfert_depot"),
    ("transfert depot", "transfert_depot"),
    ("ajustement", "ajustement"),
    ("mise au rebut", "rebut"),
];

/// Normalizes a user-facing movement type label into its canonical code.
///
/// Tries an exact match on the table, then a case-insensitive one, and finally
/// returns the trimmed label itself. Canonical codes map to themselves, so the
/// function is idempotent.
#[must_use]
pub fn canonicalize(label: &str) -> String {
    let trimmed = label.trim();

    if let Some((_, code)) = CANONICAL_CODES.iter().find(|(key, _)| *key == trimmed) {
        return (*code).to_string();
    }

    let lowered = trimmed.to_lowercase();
    if let Some((_, code)) = CANONICAL_CODES.iter().find(|(key, _)| *key == lowered) {
        return (*code).to_string();
    }

    trimmed.to_string()
}

/// Effect of a movement on the central warehouse quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockEffect {
    /// Quantity is added
    Increase,
    /// Quantity is removed
    Decrease,
    /// Quantity is unchanged
    Neutral,
}

impl StockEffect {
    /// Parses a configured effect (`"increase"`, `"decrease"`, `"none"`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "increase" | "+" | "+1" => Some(Self::Increase),
            "decrease" | "-" | "-1" => Some(Self::Decrease),
            "none" | "neutral" | "0" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Signed delta for `quantity` units.
    #[must_use]
    pub const fn delta(self, quantity: i32) -> i32 {
        match self {
            Self::Increase => quantity,
            Self::Decrease => -quantity,
            Self::Neutral => 0,
        }
    }

    /// Keyword rule for types with no explicit entry.
    ///
    /// Labels containing "reception" or "retour" increase stock; labels containing
    /// "sortie" or "installation" decrease it; anything else is neutral. Both the
    /// canonical code and the raw label are inspected.
    #[must_use]
    pub fn infer(code: &str, raw_label: &str) -> Self {
        let code = fold_label(code);
        let raw = fold_label(raw_label);
        let mentions = |keyword: &str| code.contains(keyword) || raw.contains(keyword);

        if mentions("reception") || mentions("retour") {
            Self::Increase
        } else if mentions("sortie") || mentions("installation") {
            Self::Decrease
        } else {
            Self::Neutral
        }
    }
}

/// Table of canonical code to stock effect.
#[derive(Debug, Clone)]
pub struct StockEffects {
    table: HashMap<String, StockEffect>,
}

impl Default for StockEffects {
    fn default() -> Self {
        let table = [
            ("reception", StockEffect::Increase),
            ("retour_technicien", StockEffect::Increase),
            ("retour_client", StockEffect::Increase),
            ("sortie_technicien", StockEffect::Decrease),
            ("sortie_client", StockEffect::Decrease),
            ("installation", StockEffect::Decrease),
            ("transfert_technicien", StockEffect::Neutral),
            ("transfert_depot", StockEffect::Neutral),
            ("ajustement", StockEffect::Neutral),
            ("rebut", StockEffect::Neutral),
        ]
        .into_iter()
        .map(|(code, effect)| (code.to_string(), effect))
        .collect();

        Self { table }
    }
}

impl StockEffects {
    /// Built-in defaults overridden by the explicit effects of the given scenarios.
    #[must_use]
    pub fn from_scenarios<'a, I>(scenarios: I) -> Self
    where
        I: IntoIterator<Item = &'a scenario::Model>,
    {
        let mut effects = Self::default();
        for scenario in scenarios {
            let Some(raw_effect) = scenario.stock_effect.as_deref() else {
                continue;
            };
            match StockEffect::parse(raw_effect) {
                Some(effect) => {
                    effects.set(&canonicalize(&scenario.movement_type), effect);
                }
                None => warn!(
                    "Ignoring unknown stock effect '{raw_effect}' on scenario {}",
                    scenario.id
                ),
            }
        }
        effects
    }

    /// Sets the effect of a canonical code.
    pub fn set(&mut self, code: &str, effect: StockEffect) {
        self.table.insert(code.to_string(), effect);
    }

    /// Effect of `code`, falling back to the keyword rule on `raw_label`.
    #[must_use]
    pub fn effect_for(&self, code: &str, raw_label: &str) -> StockEffect {
        self.table
            .get(code)
            .copied()
            .unwrap_or_else(|| StockEffect::infer(code, raw_label))
    }
}
