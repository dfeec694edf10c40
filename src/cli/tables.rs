use super::ui;
use crate::core::config::AppConfig;
use crate::core::model::{BracketLayout, PriceModel};
use crate::core::TableSource;
use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

fn brackets_table(model: &PriceModel, config: &AppConfig) -> Table {
    let mut table = ui::new_styled_table();
    let range = config.pricing.bracket_layout == BracketLayout::Range;
    let mut header = vec![ui::header_cell("Duration")];
    if range {
        header.push(ui::header_cell("From (s)"));
        header.push(ui::header_cell("To (s)"));
    }
    header.push(ui::header_cell("Base Price"));
    table.set_header(header);

    for bracket in &model.brackets {
        let mut row = vec![Cell::new(&bracket.label)];
        if range {
            row.push(ui::number_cell(bracket.min_sec));
            row.push(ui::number_cell(bracket.max_sec));
        }
        match model.lookup_base_price(
            &bracket.label,
            BracketLayout::ByLabel,
            &config.pricing.inquiry_marker,
        ) {
            Some(price) => row.push(ui::amount_cell(price)),
            None => row.push(Cell::new(ui::style_text("문의", ui::StyleType::Subtle))),
        }
        table.add_row(row);
    }
    table
}

fn rates_table(model: &PriceModel, config: &AppConfig) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Package"),
        ui::header_cell("Edit Point"),
        ui::header_cell("Per Minute"),
    ]);
    for rate in &model.rates {
        let edit_point = if rate.edit_point.is_empty() {
            ui::empty_cell()
        } else {
            Cell::new(config.display.edit_point_name(&rate.edit_point))
        };
        table.add_row(vec![
            Cell::new(config.display.package_name(&rate.package)),
            edit_point,
            ui::amount_cell(rate.price_per_min),
        ]);
    }
    table
}

fn extras_table(model: &PriceModel) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Extra"),
        ui::header_cell("Type"),
        ui::header_cell("Value"),
    ]);
    for extra in &model.extras {
        table.add_row(vec![
            Cell::new(&extra.label),
            Cell::new(extra.kind.to_string()),
            ui::number_cell(extra.value),
        ]);
    }
    table
}

fn shortform_table(model: &PriceModel, config: &AppConfig) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Shortform"),
        ui::header_cell("Edit Point"),
        ui::header_cell("Price"),
    ]);
    for row in &model.shortform {
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(config.display.edit_point_name(&row.edit_point)),
            ui::amount_cell(row.base_price),
        ]);
    }
    table
}

pub async fn run(source: &dyn TableSource, config: &AppConfig) -> Result<()> {
    let model = super::load_model(source, config)
        .await
        .context("Failed to load price tables")?;

    let mut sections = vec![
        ("Base prices", brackets_table(&model, config)),
        ("Rates", rates_table(&model, config)),
        ("Extras", extras_table(&model)),
    ];
    if !model.shortform.is_empty() {
        sections.push(("Shortform", shortform_table(&model, config)));
    }

    let num_sections = sections.len();
    for (i, (title, table)) in sections.into_iter().enumerate() {
        println!("{}\n", ui::style_text(title, ui::StyleType::Title));
        println!("{table}");
        if i < num_sections - 1 {
            ui::print_separator();
        }
    }
    Ok(())
}
