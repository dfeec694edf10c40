use super::ui;
use crate::core::config::AppConfig;
use crate::core::quote::{QuoteResult, compute_quote};
use crate::core::selection::{RawSelection, Selection, resolve};
use crate::core::summary::{
    InquiryForm, calculator_summary, full_copy_text, input_summary, merge_input_summary,
    notice_text, total_text,
};
use crate::core::{PriceModel, TableSource};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteOutput {
    #[default]
    Table,
    Json,
    /// Calculator summary and inquiry form, ready to paste.
    Copy,
}

#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub selection: RawSelection,
    pub form: InquiryForm,
    pub output: QuoteOutput,
}

#[derive(Debug, Serialize)]
struct QuoteReport<'a> {
    selection: &'a Selection,
    result: &'a QuoteResult,
}

/// Resolves the request and prices it against `model`.
pub fn quote(
    model: &PriceModel,
    request: &QuoteRequest,
    config: &AppConfig,
) -> (Selection, QuoteResult) {
    let selection = resolve(&request.selection, &config.pricing);
    let result = compute_quote(model, &selection, &config.pricing);
    (selection, result)
}

/// Text printed for a quote in the given output mode.
pub fn render(
    selection: &Selection,
    result: &QuoteResult,
    request: &QuoteRequest,
    config: &AppConfig,
) -> Result<String> {
    Ok(match request.output {
        QuoteOutput::Json => serde_json::to_string_pretty(&QuoteReport { selection, result })?,
        QuoteOutput::Copy => {
            let mut form = request.form.clone();
            form.notes = merge_input_summary(
                &form.notes,
                &input_summary(selection, result, &config.display),
            );
            full_copy_text(
                &calculator_summary(selection, result, &config.display),
                &form,
            )
        }
        QuoteOutput::Table => display_as_table(selection, result, config),
    })
}

fn display_as_table(selection: &Selection, result: &QuoteResult, config: &AppConfig) -> String {
    let display = &config.display;
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Choice")]);

    let extras = if selection.active_extra_labels.is_empty() {
        ui::empty_cell()
    } else {
        Cell::new(selection.active_extra_labels.join("\n"))
    };
    table.add_row(vec![Cell::new("원본 영상 길이"), Cell::new(&selection.raw_length_key)]);
    table.add_row(vec![
        Cell::new("희망 영상 길이"),
        ui::number_cell(format!("{}분", selection.final_length_minutes)),
    ]);
    table.add_row(vec![
        Cell::new("희망 타입"),
        Cell::new(display.package_name(&selection.package_id)),
    ]);
    table.add_row(vec![
        Cell::new("편집점"),
        Cell::new(display.edit_point_name(&selection.edit_point_id)),
    ]);
    table.add_row(vec![Cell::new("추가금 항목"), extras]);
    table.add_row(vec![Cell::new("시점 추가"), ui::number_cell(selection.moment_count)]);
    table.add_row(vec![Cell::new("합방 인원"), ui::number_cell(selection.collab_count)]);

    let total_style = if result.ok {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };
    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("예상 총액:", ui::StyleType::TotalLabel),
        ui::style_text(&total_text(result), total_style)
    ));
    let notice = notice_text(result);
    if !notice.is_empty() {
        output.push_str(&format!("\n{}", ui::style_text(notice, ui::StyleType::Error)));
    }
    output
}

pub async fn run(
    source: &dyn TableSource,
    config: &AppConfig,
    request: &QuoteRequest,
) -> Result<()> {
    // An unreachable sheet prices like an empty one: the quote reports no data.
    let model = match super::load_model(source, config).await {
        Ok(model) => model,
        Err(e) => {
            error!(error = %e, "Failed to load price tables");
            PriceModel::default()
        }
    };

    let (selection, result) = quote(&model, request, config);
    println!("{}", render(&selection, &result, request, config)?);
    Ok(())
}
