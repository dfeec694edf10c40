//! Core quoting logic and abstractions

pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod quote;
pub mod selection;
pub mod source;
pub mod status;
pub mod summary;

// Re-export main types for cleaner imports
pub use model::PriceModel;
pub use quote::{QuoteReason, QuoteResult, compute_quote};
pub use selection::{RawSelection, Selection};
pub use source::TableSource;
