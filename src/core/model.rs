//! The in-memory price tables and their lookups

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Package whose per-minute rate does not depend on the edit point.
pub const ECONOMY_PACKAGE: &str = "economy";

/// How the duration bracket table is keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketLayout {
    /// Brackets are picked by their exact label.
    #[default]
    ByLabel,
    /// Brackets are picked by the range containing the source length.
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationBracket {
    pub label: String,
    pub min_sec: i64,
    pub max_sec: i64,
    pub base_price: f64,
}

impl DurationBracket {
    fn is_inquiry_only(&self, inquiry_marker: &str) -> bool {
        !self.base_price.is_finite()
            || self.base_price <= 0.0
            || (!inquiry_marker.is_empty() && self.label.contains(inquiry_marker))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    pub package: String,
    pub edit_point: String,
    pub price_per_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    Additive,
    Multiplicative,
    PerMinute,
}

impl FromStr for ExtraKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(ExtraKind::Additive),
            "mult" => Ok(ExtraKind::Multiplicative),
            "per_min" => Ok(ExtraKind::PerMinute),
            _ => Err(anyhow::anyhow!("Invalid extra type: {}", s)),
        }
    }
}

impl Display for ExtraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ExtraKind::Additive => "add",
                ExtraKind::Multiplicative => "mult",
                ExtraKind::PerMinute => "per_min",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraDefinition {
    pub label: String,
    pub kind: ExtraKind,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortformRow {
    pub label: String,
    pub edit_point: String,
    pub base_price: f64,
}

/// All price tables of one sheet.
///
/// A model is built in full by ingestion and never mutated afterwards; a
/// reload swaps in a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceModel {
    pub brackets: Vec<DurationBracket>,
    pub rates: Vec<RateRow>,
    pub extras: Vec<ExtraDefinition>,
    pub shortform: Vec<ShortformRow>,
}

impl PriceModel {
    /// True when the tables a quote depends on are all populated.
    pub fn has_required_tables(&self) -> bool {
        !self.brackets.is_empty() && !self.rates.is_empty() && !self.extras.is_empty()
    }

    /// Finds the base price for a source length.
    ///
    /// With [`BracketLayout::ByLabel`] the key is a bracket label. With
    /// [`BracketLayout::Range`] it is a number of minutes, matched against
    /// `[min_sec, max_sec]`. Brackets priced at zero or below, or labelled
    /// with the inquiry marker, need a manual quote and yield `None`.
    pub fn lookup_base_price(
        &self,
        key: &str,
        layout: BracketLayout,
        inquiry_marker: &str,
    ) -> Option<f64> {
        let key = key.trim();
        let bracket = match layout {
            BracketLayout::ByLabel => self.brackets.iter().find(|b| b.label == key),
            BracketLayout::Range => {
                let raw_sec = crate::ingest::table::to_int(key, 0).saturating_mul(60);
                self.brackets
                    .iter()
                    .find(|b| raw_sec >= b.min_sec && raw_sec <= b.max_sec)
            }
        }?;

        if bracket.is_inquiry_only(inquiry_marker) {
            return None;
        }
        Some(bracket.base_price)
    }

    pub fn lookup_rate_per_minute(&self, package: &str, edit_point: &str) -> Option<f64> {
        let row = if package == ECONOMY_PACKAGE {
            self.rates.iter().find(|r| r.package == ECONOMY_PACKAGE)
        } else {
            self.rates
                .iter()
                .find(|r| r.package == package && r.edit_point == edit_point)
        };
        row.map(|r| r.price_per_min)
    }

    pub fn lookup_extra(&self, label: &str) -> Option<&ExtraDefinition> {
        self.extras.iter().find(|e| e.label == label)
    }

    pub fn lookup_shortform_price(&self, label: &str, edit_point: &str) -> Option<f64> {
        self.shortform
            .iter()
            .find(|r| r.label == label && r.edit_point == edit_point)
            .map(|r| r.base_price)
    }
}
