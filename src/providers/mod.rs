pub mod sheet_provider;
pub mod util;

pub use sheet_provider::SheetProvider;
