//! Module `excel`: reading the section table from a CSV file or a workbook.
//!
//! Submodules:
//! - `io`: raw rows from CSV (csv) or the first worksheet (calamine)
//! - `lectures`: header resolution and row-to-`Section` conversion

mod io;

/// Section table loading: `load_sections`
mod lectures;

pub use io::{cell_text, header_key, read_csv, read_first_sheet, read_rows};
pub use lectures::{load_sections, sections_from_rows, select_sections};
