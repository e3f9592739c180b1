// Raw table reading: CSV through the csv crate, workbooks through calamine.
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::LoadError;

const BOM: char = '\u{feff}';

/// Text of one workbook cell as the section table expects it.
///
/// Ids and credits typed as numbers come back as plain integers (`3.0` ->
/// `"3"`). Booleans, dates and error cells are not section-table values and
/// read as blank, so the row parser treats them like an empty cell.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(_) | Data::DateTime(_) | Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Key a header cell is matched by: BOM and whitespace dropped, lowercased.
pub fn header_key(s: &str) -> String {
    s.chars()
        .filter(|c| *c != BOM && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rows of the table at `path`, header first.
///
/// `.csv` files are read as UTF-8 with an optional BOM; anything else goes
/// to calamine, which picks the workbook format from the file itself.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, LoadError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path)
    } else {
        read_first_sheet(path)
    }
}

/// Read a CSV file without treating any row as special; the header row is
/// returned like the others.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, LoadError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|f| f.trim().to_string()).collect::<Vec<String>>());
    }
    // utf-8-sig: the BOM sticks to the first header cell
    if let Some(first) = rows.first_mut().and_then(|r| r.first_mut()) {
        if let Some(stripped) = first.strip_prefix(BOM) {
            *first = stripped.to_string();
        }
    }
    Ok(rows)
}

/// Read the first worksheet of a workbook (xlsx, xls, xlsb, ods).
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, LoadError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(r)) => r,
        _ => return Err(LoadError::MissingSheet(path.to_path_buf())),
    };

    Ok(range
        .rows()
        .map(|r| r.iter().map(cell_text).collect())
        .collect())
}
