//! Spreadsheet header mapping for lead uploads.
//!
//! [`AliasTable`] knows which header spellings belong to which lead field;
//! [`ColumnMapper`] applies it to one file's header row.

pub mod aliases;
pub mod engine;

pub use aliases::{AliasTable, MatchKind};
pub use engine::{ColumnAssignment, ColumnMapper, ColumnMapping, DroppedColumn};
