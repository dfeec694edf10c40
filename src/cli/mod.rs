pub mod quote;
pub mod setup;
pub mod status;
pub mod tables;
pub mod ui;

use crate::core::config::AppConfig;
use crate::core::error::IngestResult;
use crate::core::{PriceModel, TableSource};
use crate::ingest::load_price_model;

/// Loads the price tables while showing progress on the terminal.
async fn load_model(source: &dyn TableSource, config: &AppConfig) -> IngestResult<PriceModel> {
    let pb = ui::new_progress_bar(4, true);
    pb.set_message("Loading price tables...");
    let result = load_price_model(source, &config.sources, &|| pb.inc(1)).await;
    pb.finish_and_clear();
    result
}
