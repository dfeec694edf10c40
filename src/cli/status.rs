use super::ui;
use crate::core::TableSource;
use crate::core::config::AppConfig;
use crate::core::status::{ContactStatus, load_status};
use anyhow::Result;
use tracing::warn;

pub async fn run(source: &dyn TableSource, config: &AppConfig) -> Result<()> {
    let status = match &config.sources.status {
        Some(id) => load_status(source, id).await,
        None => {
            warn!("No status source configured");
            ContactStatus::Unknown
        }
    };

    let style_type = match status {
        ContactStatus::Open => ui::StyleType::TotalValue,
        ContactStatus::Closed => ui::StyleType::Subtle,
        ContactStatus::Unknown => ui::StyleType::Error,
    };
    println!(
        "{} {}",
        ui::style_text("Contact:", ui::StyleType::TotalLabel),
        ui::style_text(&status.to_string(), style_type)
    );
    println!("{}", status.message());
    Ok(())
}
