//! Loading of the published price tables into a [`PriceModel`].

pub mod table;

use crate::core::config::SourcesConfig;
use crate::core::error::{IngestError, IngestResult, Table};
use crate::core::model::{
    DurationBracket, ExtraDefinition, ExtraKind, PriceModel, RateRow, ShortformRow,
};
use crate::core::source::TableSource;
use table::{Row, field, parse_table, to_int, to_number};
use tracing::{debug, info, warn};

fn bracket_from_row(row: &Row) -> DurationBracket {
    DurationBracket {
        label: field(row, "label").to_string(),
        min_sec: to_int(field(row, "min_sec"), 0),
        max_sec: to_int(field(row, "max_sec"), 0),
        base_price: to_int(field(row, "base_price"), 0) as f64,
    }
}

fn rate_from_row(row: &Row) -> RateRow {
    RateRow {
        package: field(row, "package").to_string(),
        edit_point: field(row, "edit_point").to_string(),
        price_per_min: to_int(field(row, "price_per_min"), 0) as f64,
    }
}

fn extra_from_row(row: &Row) -> Option<ExtraDefinition> {
    let label = field(row, "label");
    match field(row, "type").parse::<ExtraKind>() {
        Ok(kind) => Some(ExtraDefinition {
            label: label.to_string(),
            kind,
            value: to_number(field(row, "value"), 0.0),
        }),
        Err(e) => {
            warn!("Dropping extra {label:?}: {e}");
            None
        }
    }
}

fn shortform_from_row(row: &Row) -> ShortformRow {
    ShortformRow {
        label: field(row, "label").to_string(),
        edit_point: field(row, "edit_point").to_string(),
        base_price: to_int(field(row, "base_price"), 0) as f64,
    }
}

pub fn parse_brackets(text: &str) -> Vec<DurationBracket> {
    parse_table(text).iter().map(bracket_from_row).collect()
}

pub fn parse_rates(text: &str) -> Vec<RateRow> {
    parse_table(text).iter().map(rate_from_row).collect()
}

pub fn parse_extras(text: &str) -> Vec<ExtraDefinition> {
    parse_table(text).iter().filter_map(extra_from_row).collect()
}

pub fn parse_shortform(text: &str) -> Vec<ShortformRow> {
    parse_table(text).iter().map(shortform_from_row).collect()
}

async fn fetch(source: &dyn TableSource, table: Table, source_id: &str) -> IngestResult<String> {
    debug!("Fetching {table} table from {source_id}");
    source
        .fetch_text(source_id)
        .await
        .map_err(|e| IngestError::retrieval(table, source_id, e))
}

/// Retrieves and parses every configured table, one after the other.
///
/// The first table that cannot be retrieved aborts the load and the
/// remaining tables are not requested. `on_table` is invoked after each
/// table is in.
pub async fn load_price_model(
    source: &dyn TableSource,
    sources: &SourcesConfig,
    on_table: &(dyn Fn() + Sync),
) -> IngestResult<PriceModel> {
    let brackets = parse_brackets(
        &fetch(source, Table::DurationBrackets, &sources.duration_brackets).await?,
    );
    on_table();
    let rates = parse_rates(&fetch(source, Table::Rates, &sources.rates).await?);
    on_table();
    let extras = parse_extras(&fetch(source, Table::Extras, &sources.extras).await?);
    on_table();
    let shortform = match &sources.shortform {
        Some(id) => parse_shortform(&fetch(source, Table::Shortform, id).await?),
        None => Vec::new(),
    };
    on_table();

    info!(
        brackets = brackets.len(),
        rates = rates.len(),
        extras = extras.len(),
        shortform = shortform.len(),
        "Loaded price tables"
    );
    Ok(PriceModel {
        brackets,
        rates,
        extras,
        shortform,
    })
}

/// Loads a fresh model and swaps it in. On failure `model` is left as it was.
pub async fn reload_price_model(
    model: &mut PriceModel,
    source: &dyn TableSource,
    sources: &SourcesConfig,
) -> IngestResult<()> {
    *model = load_price_model(source, sources, &|| {}).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub const BRACKETS: &str = "label,min_sec,max_sec,base_price\n0-10분,0,600,50000\n10-30분,601,1800,90000\n150분 이상 (문의),9000,999999,0\n";
    pub const RATES: &str = "package,edit_point,price_per_min\neconomy,,2000\nstandard,A,3000\nstandard,B,4000\n";
    pub const EXTRAS: &str = "label,type,value\n빠른 마감,mult,1.3\n우선 마감,mult,1.5\n자막 추가,add,20000\n시점 추가,add,30000\n합방 인원 추가,per_min,2000\n";
    pub const SHORTFORM: &str = "label,edit_point,base_price\n쇼츠 1편,A,40000\n";

    /// Serves fixed bodies by source id and records every request.
    #[derive(Default)]
    pub struct StaticSource {
        bodies: HashMap<String, String>,
        pub requested: Mutex<Vec<String>>,
    }

    impl StaticSource {
        pub fn with(mut self, id: &str, body: &str) -> Self {
            self.bodies.insert(id.to_string(), body.to_string());
            self
        }

        pub fn sheet() -> Self {
            Self::default()
                .with("brackets", BRACKETS)
                .with("rates", RATES)
                .with("extras", EXTRAS)
                .with("shortform", SHORTFORM)
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TableSource for StaticSource {
        async fn fetch_text(&self, source_id: &str) -> Result<String> {
            self.requested.lock().unwrap().push(source_id.to_string());
            self.bodies
                .get(source_id)
                .cloned()
                .ok_or_else(|| anyhow!("HTTP 404"))
        }
    }

    pub fn sources() -> SourcesConfig {
        SourcesConfig {
            status: Some("status".to_string()),
            duration_brackets: "brackets".to_string(),
            rates: "rates".to_string(),
            extras: "extras".to_string(),
            shortform: Some("shortform".to_string()),
        }
    }
}
