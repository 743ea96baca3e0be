#![forbid(unsafe_code)]
//! Relief directory model SSOT.
//!
//! Raw sheet cells, the typed field values cards are built from, the flat
//! directory records and the spreadsheet → tab → component configuration.

mod cell;
mod directory;
mod sheet_config;

pub use cell::{Cell, LinkedText, RawRow, SheetDate};
pub use directory::{Category, Resource, TabInfo};
pub use sheet_config::{
    extract_spreadsheet_id, normalize_spreadsheet_id, SheetConfig, SheetLookupError, TabConfig,
    ValidationError, DISASTER_RELIEF_SHEET_ID,
};

pub const CRATE_NAME: &str = "relief-model";
