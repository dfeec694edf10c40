//! Turns raw user input into a canonical [`Selection`].

use crate::core::config::PricingRules;
use crate::ingest::table::to_int;
use serde::Serialize;

/// Values as read from the input surface. Any of them may be missing.
#[derive(Debug, Clone, Default)]
pub struct RawSelection {
    pub raw_length: Option<String>,
    pub final_length: Option<String>,
    pub package: Option<String>,
    pub edit_point: Option<String>,
    /// Extra toggles in the order they were switched on.
    pub extras: Vec<String>,
    pub moments: Option<String>,
    pub collab: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub raw_length_key: String,
    pub final_length_minutes: u32,
    pub package_id: String,
    pub edit_point_id: String,
    pub active_extra_labels: Vec<String>,
    pub moment_count: u32,
    pub collab_count: u32,
}

fn text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn clamp_int(value: &Option<String>, min: i64, max: i64) -> u32 {
    to_int(value.as_deref().unwrap_or(""), 0).clamp(min, max) as u32
}

/// Keeps at most one rush tier: when both are active the one switched on
/// last survives and moves to the end of the list.
pub fn exclude_rush_pair(labels: &[String], rush_labels: &[String; 2]) -> Vec<String> {
    let rush: Vec<&String> = labels
        .iter()
        .filter(|l| is_rush(l, rush_labels))
        .collect();
    let Some(last_rush) = rush.last() else {
        return labels.to_vec();
    };
    if rush.len() < 2 {
        return labels.to_vec();
    }

    let mut resolved: Vec<String> = labels
        .iter()
        .filter(|l| !is_rush(l, rush_labels))
        .cloned()
        .collect();
    resolved.push((*last_rush).clone());
    resolved
}

fn is_rush(label: &str, rush_labels: &[String; 2]) -> bool {
    rush_labels.iter().any(|r| r == label)
}

/// Resolves raw input into a clamped selection. Never fails; missing input
/// falls back to an empty string or zero before clamping.
pub fn resolve(raw: &RawSelection, rules: &PricingRules) -> Selection {
    let mut extras: Vec<String> = Vec::new();
    for label in raw.extras.iter().map(|l| l.trim()) {
        if !label.is_empty() && !extras.iter().any(|e| e == label) {
            extras.push(label.to_string());
        }
    }

    Selection {
        raw_length_key: text(&raw.raw_length),
        final_length_minutes: clamp_int(&raw.final_length, 0, u32::MAX as i64),
        package_id: text(&raw.package),
        edit_point_id: text(&raw.edit_point),
        active_extra_labels: exclude_rush_pair(&extras, &rules.rush_labels),
        moment_count: clamp_int(&raw.moments, 0, rules.moment_max as i64),
        collab_count: clamp_int(&raw.collab, 1, u32::MAX as i64),
    }
}
