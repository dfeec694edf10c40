//! Typed errors raised while ingesting price tables

use std::fmt::Display;
use thiserror::Error;

/// The tables a price sheet is published as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Status,
    DurationBrackets,
    Rates,
    Extras,
    Shortform,
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Table::Status => "status",
                Table::DurationBrackets => "duration brackets",
                Table::Rates => "rates",
                Table::Extras => "extras",
                Table::Shortform => "shortform",
            }
        )
    }
}

pub type IngestResult<T> = Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The status table did not carry a `key`/`value` header.
    #[error("Not a CSV response (missing key/value header)")]
    Format,

    /// Every retrieval attempt for a table failed.
    #[error("Failed to retrieve {table} table from {source_id}")]
    Retrieval {
        table: Table,
        source_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl IngestError {
    pub fn retrieval(table: Table, source_id: &str, err: anyhow::Error) -> Self {
        IngestError::Retrieval {
            table,
            source_id: source_id.to_string(),
            source: err.into(),
        }
    }

    /// The table whose ingestion failed, if the error is tied to one.
    pub fn table(&self) -> Option<Table> {
        match self {
            IngestError::Format => Some(Table::Status),
            IngestError::Retrieval { table, .. } => Some(*table),
        }
    }
}
