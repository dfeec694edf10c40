//! Quote computation.
//!
//! [`compute_quote`] is a pure function of the price model, the selection and
//! the pricing rules. Every expected failure is reported through
//! [`QuoteResult::reason`] rather than an error, so callers in an input loop
//! can render it directly.
//!
//! Multiplicative extras use a summed uplift: each active factor above 1
//! adds `(factor - 1) * subtotal`, all measured against the same subtotal.

use crate::core::config::PricingRules;
use crate::core::model::{ExtraKind, PriceModel};
use crate::core::selection::{Selection, exclude_rush_pair};
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteReason {
    /// A required price table is empty.
    NoData,
    /// The duration needs a manual quote.
    Inquiry,
    BaseMissing,
    RateMissing,
}

impl QuoteReason {
    /// The notice shown to the user for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            QuoteReason::NoData => "※ 계산 시트 URL이 아직 연결되지 않았습니다.",
            QuoteReason::Inquiry => "※ 원본 영상 길이가 150분 이상인 경우, 별도 문의가 필요합니다.",
            QuoteReason::BaseMissing => "※ 원본 영상 길이에 맞는 기본 요금을 찾지 못했습니다.",
            QuoteReason::RateMissing => "※ 단가 정보를 불러오지 못했습니다.",
        }
    }
}

impl Display for QuoteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                QuoteReason::NoData => "no_data",
                QuoteReason::Inquiry => "inquiry",
                QuoteReason::BaseMissing => "base_missing",
                QuoteReason::RateMissing => "rate_missing",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResult {
    pub ok: bool,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<QuoteReason>,
}

impl QuoteResult {
    pub fn success(total: f64) -> Self {
        QuoteResult {
            ok: true,
            total,
            reason: None,
        }
    }

    pub fn failure(reason: QuoteReason) -> Self {
        QuoteResult {
            ok: false,
            total: 0.0,
            reason: Some(reason),
        }
    }
}

/// Extras of a selection folded into the three kinds of charge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraCharges {
    pub additive_fixed: f64,
    pub per_minute_add: f64,
    pub factors: Vec<f64>,
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Resolves the active extras of `selection` against the model.
///
/// Labels missing from the extras table are ignored. The moment charge is
/// always applied from the moment counter; the collaborator extra is billed
/// only for participants beyond the included count.
pub fn resolve_extras(
    model: &PriceModel,
    selection: &Selection,
    rules: &PricingRules,
) -> ExtraCharges {
    let minutes = selection.final_length_minutes as f64;
    let mut charges = ExtraCharges::default();

    for label in exclude_rush_pair(&selection.active_extra_labels, &rules.rush_labels) {
        if label == rules.moment_label {
            continue;
        }
        let Some(def) = model.lookup_extra(&label) else {
            debug!("No extra definition for {label:?}, skipping");
            continue;
        };

        match def.kind {
            ExtraKind::Additive => charges.additive_fixed += finite_or(def.value, 0.0),
            ExtraKind::Multiplicative => {
                let factor = finite_or(def.value, 1.0);
                if factor > 1.0 {
                    charges.factors.push(factor);
                }
            }
            ExtraKind::PerMinute => {
                let scale = if label == rules.collab_label {
                    selection.collab_count.saturating_sub(rules.collab_included) as f64
                } else {
                    1.0
                };
                charges.per_minute_add += minutes * finite_or(def.value, 0.0) * scale;
            }
        }
    }

    let moment_unit = model
        .lookup_extra(&rules.moment_label)
        .map_or(rules.moment_unit_default, |def| finite_or(def.value, 0.0));
    charges.additive_fixed += selection.moment_count as f64 * moment_unit;

    charges
}

pub fn compute_quote(
    model: &PriceModel,
    selection: &Selection,
    rules: &PricingRules,
) -> QuoteResult {
    if !model.has_required_tables() {
        return QuoteResult::failure(QuoteReason::NoData);
    }

    let raw_key = selection.raw_length_key.trim();
    if raw_key.is_empty() || raw_key == rules.inquiry_sentinel {
        return QuoteResult::failure(QuoteReason::Inquiry);
    }

    let Some(base) = model.lookup_base_price(raw_key, rules.bracket_layout, &rules.inquiry_marker)
    else {
        return QuoteResult::failure(QuoteReason::BaseMissing);
    };

    let Some(per_minute) =
        model.lookup_rate_per_minute(&selection.package_id, &selection.edit_point_id)
    else {
        return QuoteResult::failure(QuoteReason::RateMissing);
    };

    let work = selection.final_length_minutes as f64 * per_minute;
    let charges = resolve_extras(model, selection, rules);
    let subtotal = base + work + charges.additive_fixed + charges.per_minute_add;
    let uplift: f64 = charges.factors.iter().map(|f| (f - 1.0) * subtotal).sum();

    debug!(
        base,
        work,
        additive_fixed = charges.additive_fixed,
        per_minute_add = charges.per_minute_add,
        uplift,
        "Computed quote"
    );
    QuoteResult::success(subtotal + uplift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::fixtures::*;
    use crate::core::model::{BracketLayout, DurationBracket};

    fn selection(extras: &[&str], moments: u32, collab: u32) -> Selection {
        Selection {
            raw_length_key: "0-10분".to_string(),
            final_length_minutes: 10,
            package_id: "standard".to_string(),
            edit_point_id: "A".to_string(),
            active_extra_labels: extras.iter().map(|s| s.to_string()).collect(),
            moment_count: moments,
            collab_count: collab,
        }
    }

    fn assert_total(result: &QuoteResult, expected: f64) {
        assert!(result.ok, "{result:?}");
        assert!(
            (result.total - expected).abs() < 1e-6,
            "expected {expected}, got {}",
            result.total
        );
    }

    #[test]
    fn test_base_plus_work() {
        let result = compute_quote(&sample_model(), &selection(&[], 0, 1), &PricingRules::default());
        assert_total(&result, 80000.0);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn test_moments_are_billed_per_unit() {
        let result = compute_quote(&sample_model(), &selection(&[], 2, 1), &PricingRules::default());
        assert_total(&result, 140000.0);
    }

    #[test]
    fn test_moment_unit_defaults_when_undefined() {
        let mut model = sample_model();
        model.extras.retain(|e| e.label != "시점 추가");
        let rules = PricingRules {
            moment_unit_default: 25000.0,
            ..PricingRules::default()
        };

        let result = compute_quote(&model, &selection(&[], 2, 1), &rules);
        assert_total(&result, 80000.0 + 50000.0);
    }

    #[test]
    fn test_active_moment_label_is_not_a_flat_fee() {
        let result = compute_quote(
            &sample_model(),
            &selection(&["시점 추가"], 1, 1),
            &PricingRules::default(),
        );
        assert_total(&result, 80000.0 + 30000.0);
    }

    #[test]
    fn test_collaborators_beyond_included_are_billed_per_minute() {
        let result = compute_quote(
            &sample_model(),
            &selection(&["합방 인원 추가"], 0, 5),
            &PricingRules::default(),
        );
        // 10 minutes * 2000 * (5 - 3)
        assert_total(&result, 80000.0 + 40000.0);

        let result = compute_quote(
            &sample_model(),
            &selection(&["합방 인원 추가"], 0, 2),
            &PricingRules::default(),
        );
        assert_total(&result, 80000.0);
    }

    #[test]
    fn test_collaborators_are_added_before_uplift() {
        let result = compute_quote(
            &sample_model(),
            &selection(&["합방 인원 추가", "우선 마감"], 0, 5),
            &PricingRules::default(),
        );
        assert_total(&result, 120000.0 * 1.5);
    }

    #[test]
    fn test_single_multiplicative_extra() {
        let result = compute_quote(
            &sample_model(),
            &selection(&["자막 추가", "우선 마감"], 0, 1),
            &PricingRules::default(),
        );
        let subtotal = 80000.0 + 20000.0;
        assert_total(&result, subtotal * 1.5);
    }

    #[test]
    fn test_multiplicative_factors_are_summed() {
        let mut model = sample_model();
        model.extras.push(extra("주말 작업", ExtraKind::Multiplicative, 1.2));
        model.extras.push(extra("할인", ExtraKind::Multiplicative, 0.8));

        let result = compute_quote(
            &model,
            &selection(&["빠른 마감", "주말 작업", "할인"], 0, 1),
            &PricingRules::default(),
        );
        // 80000 + 0.3 * 80000 + 0.2 * 80000; factors <= 1 are ignored
        assert_total(&result, 120000.0);
    }

    #[test]
    fn test_additive_and_per_minute_extras() {
        let result = compute_quote(
            &sample_model(),
            &selection(&["자막 추가", "썸네일", "효과음"], 0, 1),
            &PricingRules::default(),
        );
        assert_total(&result, 80000.0 + 20000.0 + 15000.0 + 10.0 * 500.0);
    }

    #[test]
    fn test_unknown_and_broken_extras_are_ignored() {
        let mut model = sample_model();
        model.extras.push(extra("broken", ExtraKind::Additive, f64::NAN));

        let result = compute_quote(
            &model,
            &selection(&["없는 항목", "broken"], 0, 1),
            &PricingRules::default(),
        );
        assert_total(&result, 80000.0);
    }

    #[test]
    fn test_both_rush_tiers_bill_only_the_later_one() {
        let result = compute_quote(
            &sample_model(),
            &selection(&["우선 마감", "빠른 마감"], 0, 1),
            &PricingRules::default(),
        );
        assert_total(&result, 80000.0 * 1.3);
    }

    #[test]
    fn test_economy_rate() {
        let mut sel = selection(&[], 0, 1);
        sel.package_id = "economy".to_string();
        sel.edit_point_id = "Z".to_string();

        let result = compute_quote(&sample_model(), &sel, &PricingRules::default());
        assert_total(&result, 50000.0 + 10.0 * 2000.0);
    }

    #[test]
    fn test_range_layout() {
        let rules = PricingRules {
            bracket_layout: BracketLayout::Range,
            ..PricingRules::default()
        };
        let mut sel = selection(&[], 0, 1);
        sel.raw_length_key = "25".to_string();

        let result = compute_quote(&sample_model(), &sel, &rules);
        assert_total(&result, 90000.0 + 30000.0);
    }

    #[test]
    fn test_empty_model_is_no_data() {
        let result = compute_quote(
            &PriceModel::default(),
            &selection(&[], 0, 1),
            &PricingRules::default(),
        );
        assert_eq!(result, QuoteResult::failure(QuoteReason::NoData));
    }

    #[test]
    fn test_missing_extras_table_is_no_data() {
        let mut model = sample_model();
        model.extras.clear();

        let result = compute_quote(&model, &selection(&[], 0, 1), &PricingRules::default());
        assert_eq!(result.reason, Some(QuoteReason::NoData));
    }

    #[test]
    fn test_empty_or_sentinel_duration_is_inquiry() {
        let rules = PricingRules::default();
        for key in ["", "   ", "__inquiry__"] {
            let mut sel = selection(&["자막 추가"], 3, 5);
            sel.raw_length_key = key.to_string();

            let result = compute_quote(&sample_model(), &sel, &rules);
            assert!(!result.ok);
            assert_eq!(result.reason, Some(QuoteReason::Inquiry));
            assert_eq!(result.total, 0.0);
        }
    }

    #[test]
    fn test_unknown_or_inquiry_bracket_is_base_missing() {
        let rules = PricingRules::default();
        for key in ["30-60분", "150분 이상 (문의)"] {
            let mut sel = selection(&[], 0, 1);
            sel.raw_length_key = key.to_string();

            let result = compute_quote(&sample_model(), &sel, &rules);
            assert_eq!(result, QuoteResult::failure(QuoteReason::BaseMissing));
        }
    }

    #[test]
    fn test_unknown_rate_is_rate_missing() {
        let mut sel = selection(&[], 0, 1);
        sel.edit_point_id = "Z".to_string();

        let result = compute_quote(&sample_model(), &sel, &PricingRules::default());
        assert_eq!(result, QuoteResult::failure(QuoteReason::RateMissing));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut model = sample_model();
        model.brackets.push(DurationBracket {
            label: "30-60분".to_string(),
            min_sec: 1801,
            max_sec: 3600,
            base_price: 150000.0,
        });
        let rules = PricingRules::default();
        let sel = selection(&["자막 추가", "빠른 마감", "합방 인원 추가", "효과음"], 4, 6);

        let first = compute_quote(&model, &sel, &rules);
        let second = compute_quote(&model, &sel, &rules);
        assert!(first.ok);
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serializes_reason_tokens() {
        let json = serde_json::to_string(&QuoteResult::failure(QuoteReason::BaseMissing)).unwrap();
        assert_eq!(json, r#"{"ok":false,"total":0.0,"reason":"base_missing"}"#);

        let json = serde_json::to_string(&QuoteResult::success(80000.0)).unwrap();
        assert_eq!(json, r#"{"ok":true,"total":80000.0}"#);
        assert_eq!(QuoteReason::NoData.to_string(), "no_data");
    }
}
