//! Whether the editor is currently taking requests

use crate::core::error::{IngestError, IngestResult, Table};
use crate::core::source::TableSource;
use crate::ingest::table::parse_key_value;
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, error};

pub const CONTACT_OPEN_KEY: &str = "contact_open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Open,
    Closed,
    Unknown,
}

impl ContactStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ContactStatus::Open => "지금은 연락을 받을 수 있어요.",
            ContactStatus::Closed => {
                "지금은 휴식 중이에요. 문의 남겨주시면 확인 후 답변드려요."
            }
            ContactStatus::Unknown => {
                "상태를 불러오는 중 문제가 있었어요. 잠시 후 다시 확인해주세요."
            }
        }
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ContactStatus::Open => "open",
                ContactStatus::Closed => "closed",
                ContactStatus::Unknown => "unknown",
            }
        )
    }
}

/// Sheet booleans: `TRUE`, `T`, `YES`, `Y`, `1` and `ON`, in any case.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "TRUE" | "T" | "YES" | "Y" | "1" | "ON"
    )
}

/// Reads the status from an already retrieved export.
pub fn parse_status(text: &str) -> IngestResult<ContactStatus> {
    let kv = parse_key_value(text)?;
    Ok(match kv.get(CONTACT_OPEN_KEY) {
        Some(value) if is_truthy(value) => ContactStatus::Open,
        Some(_) => ContactStatus::Closed,
        None => ContactStatus::Unknown,
    })
}

/// Loads the contact status. Any failure is logged and reported as
/// [`ContactStatus::Unknown`].
pub async fn load_status(source: &dyn TableSource, source_id: &str) -> ContactStatus {
    let result = match source.fetch_text(source_id).await {
        Ok(text) => parse_status(&text),
        Err(e) => Err(IngestError::retrieval(Table::Status, source_id, e)),
    };

    match result {
        Ok(status) => {
            debug!("Contact status is {status}");
            status
        }
        Err(e) => {
            error!(error = %e, "Failed to load contact status");
            ContactStatus::Unknown
        }
    }
}
