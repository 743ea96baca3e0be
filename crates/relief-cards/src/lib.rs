#![forbid(unsafe_code)]
//! Typed row mapping and HTML card rendering.
//!
//! A [`RowShape`] declares which header label feeds each field of a row
//! type. [`map_row`] fills a row from raw cells through a [`ColumnMap`], and a
//! [`CardRegistry`] resolves component names to card kinds at request time.

pub mod cards;
pub mod components;
mod convert;
mod mapper;
mod registry;
mod shape;
mod sheet;

pub use convert::{
    convert, convert_date, convert_linked_text, convert_text, parse_sheet_date, ConvertError,
    FieldKind, FieldValue, FromCell,
};
pub use mapper::{map_row, map_row_from_pairs, ColumnMap, MapError};
pub use registry::{Card, CardRegistry, CardType, RenderedRows, SkippedRow};
pub use shape::{FieldDescriptor, FieldSpec, RowShape};
pub use sheet::{render_sheet, EmptySheet, SheetRender};

pub const CRATE_NAME: &str = "relief-cards";
