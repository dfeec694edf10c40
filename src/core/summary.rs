//! Copy-paste text built from a selection and its quote

use crate::core::config::DisplayConfig;
use crate::core::quote::QuoteResult;
use crate::core::selection::Selection;

pub const CURRENCY_SUFFIX: &str = "원";
pub const CALCULATOR_HEADER: &str = "[견적 계산기 입력 내용]";
pub const INPUT_SUMMARY_MARKER: &str = "[견적 계산기 입력 요약]";
pub const FORM_HEADER: &str = "[문의 양식]";
const COPY_SEPARATOR: &str = "--------------------------------------";

/// Free-text fields of the inquiry form.
#[derive(Debug, Clone, Default)]
pub struct InquiryForm {
    pub channel: String,
    pub share: String,
    pub concept: String,
    pub notes: String,
}

fn or_dash(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() { "-" } else { text }
}

/// Rounds to whole won and groups thousands, e.g. `1,234,000원`.
pub fn format_krw(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("0{CURRENCY_SUFFIX}");
    }
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped}{CURRENCY_SUFFIX}")
}

/// The amount shown for a quote. Failed quotes show zero.
pub fn total_text(result: &QuoteResult) -> String {
    format_krw(if result.ok { result.total } else { 0.0 })
}

/// The notice shown under the total, empty for a successful quote.
pub fn notice_text(result: &QuoteResult) -> &'static str {
    result.reason.map_or("", |r| r.message())
}

fn minutes_text(minutes: u32) -> String {
    if minutes > 0 {
        format!("{minutes}분")
    } else {
        "-".to_string()
    }
}

/// Duration choices are either bracket labels or a plain number of minutes.
fn raw_length_text(key: &str) -> String {
    let key = key.trim();
    match key.parse::<u32>() {
        Ok(minutes) => minutes_text(minutes),
        Err(_) => or_dash(key).to_string(),
    }
}

pub fn calculator_summary(
    selection: &Selection,
    result: &QuoteResult,
    display: &DisplayConfig,
) -> String {
    let mut lines = vec![CALCULATOR_HEADER.to_string(), String::new()];
    lines.push(format!(
        "원본 영상 길이: {}",
        raw_length_text(&selection.raw_length_key)
    ));
    lines.push(format!(
        "희망 영상 길이: {}",
        minutes_text(selection.final_length_minutes)
    ));
    lines.push(format!(
        "희망 타입: {}",
        or_dash(display.package_name(&selection.package_id))
    ));
    lines.push(format!(
        "편집점: {}",
        or_dash(display.edit_point_name(&selection.edit_point_id))
    ));
    lines.push(format!("시점(+): {}", selection.moment_count));
    lines.push(format!("합방 인원: {}명", selection.collab_count));

    if selection.active_extra_labels.is_empty() {
        lines.push("추가금 항목: -".to_string());
    } else {
        lines.push("추가금 항목:".to_string());
        for label in &selection.active_extra_labels {
            lines.push(format!("- {label}"));
        }
    }

    lines.push(String::new());
    lines.push(format!("총 금액: {}", total_text(result)));
    let notice = notice_text(result);
    if !notice.is_empty() {
        lines.push(format!("안내: {notice}"));
    }

    lines.join("\n")
}

/// The short block appended to the form's notes.
pub fn input_summary(
    selection: &Selection,
    result: &QuoteResult,
    display: &DisplayConfig,
) -> String {
    let mut lines = vec![
        INPUT_SUMMARY_MARKER.to_string(),
        format!(
            "- 원본 영상 길이: {}",
            raw_length_text(&selection.raw_length_key)
        ),
        format!(
            "- 희망 영상 길이: {}",
            minutes_text(selection.final_length_minutes)
        ),
        format!(
            "- 희망 타입: {}",
            or_dash(display.package_name(&selection.package_id))
        ),
        format!(
            "- 편집점: {}",
            or_dash(display.edit_point_name(&selection.edit_point_id))
        ),
    ];

    let mut extra_lines = Vec::new();
    if !selection.active_extra_labels.is_empty() {
        extra_lines.push(format!(
            "- 추가금: {}",
            selection.active_extra_labels.join(", ")
        ));
    }
    if selection.collab_count > 1 {
        extra_lines.push(format!("- 합방 인원: {}명", selection.collab_count));
    }
    if selection.moment_count > 0 {
        extra_lines.push(format!("- 시점 추가: {}회", selection.moment_count));
    }
    if extra_lines.is_empty() {
        lines.push("- 추가 항목: 없음".to_string());
    } else {
        lines.extend(extra_lines);
    }

    lines.push(format!("- 예상 총액: {}", total_text(result)));
    lines.join("\n")
}

/// Puts `summary` at the end of `notes`, replacing an earlier summary block
/// and everything after it.
pub fn merge_input_summary(notes: &str, summary: &str) -> String {
    let kept = match notes.find(INPUT_SUMMARY_MARKER) {
        Some(idx) => notes[..idx].trim(),
        None => notes.trim(),
    };
    if kept.is_empty() {
        summary.to_string()
    } else {
        format!("{kept}\n\n{summary}")
    }
}

pub fn inquiry_form_text(form: &InquiryForm) -> String {
    let lines = vec![
        FORM_HEADER.to_string(),
        String::new(),
        format!("유튜브 채널 링크: {}", or_dash(&form.channel)),
        format!("원본 영상 공유: {}", or_dash(&form.share)),
        String::new(),
        "[영상 콘셉트 및 레퍼런스 자료]".to_string(),
        or_dash(&form.concept).to_string(),
        String::new(),
        "[그 외 요구사항]".to_string(),
        or_dash(&form.notes).to_string(),
    ];
    lines.join("\n")
}

/// Calculator block and inquiry form joined for a single copy.
pub fn full_copy_text(calculator: &str, form: &InquiryForm) -> String {
    format!(
        "{calculator}\n\n{COPY_SEPARATOR}\n\n{}",
        inquiry_form_text(form)
    )
    .trim()
    .to_string()
}
