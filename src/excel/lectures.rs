use std::path::Path;

use tracing::{debug, warn};

use crate::algorithm::slots;
use crate::error::LoadError;
use crate::excel::io::{header_key, read_rows};
use crate::models::Section;

// Accepted header names per column, compared by `header_key`.
const COL_ID: &[&str] = &["no.", "no", "id"];
const COL_COURSE: &[&str] = &["교과번호", "course_id", "course"];
const COL_CREDITS: &[&str] = &["학점", "credits"];
const COL_SCHEDULE: &[&str] = &["수업시간(강의실)", "schedule"];
const COL_SECTION: &[&str] = &["분반", "section"];
const COL_NAME: &[&str] = &["교과목명", "name"];
const COL_GRADE: &[&str] = &["학년", "grade"];
const COL_DEPARTMENT: &[&str] = &["학부(과)", "department"];
const COL_TYPE: &[&str] = &["교과구분", "course_type"];
const COL_AREA: &[&str] = &["세부영역", "area"];

/// Column positions resolved from the header row.
struct Columns {
    id: usize,
    course: usize,
    credits: usize,
    schedule: Option<usize>,
    section: Option<usize>,
    name: Option<usize>,
    grade: Option<usize>,
    department: Option<usize>,
    course_type: Option<usize>,
    area: Option<usize>,
}

fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    header.iter().position(|h| {
        let h = header_key(h);
        aliases.iter().any(|a| h == header_key(a))
    })
}

impl Columns {
    fn resolve(header: &[String]) -> Result<Self, LoadError> {
        Ok(Self {
            id: find_column(header, COL_ID).ok_or(LoadError::MissingColumn("NO."))?,
            course: find_column(header, COL_COURSE).ok_or(LoadError::MissingColumn("교과번호"))?,
            credits: find_column(header, COL_CREDITS).ok_or(LoadError::MissingColumn("학점"))?,
            schedule: find_column(header, COL_SCHEDULE),
            section: find_column(header, COL_SECTION),
            name: find_column(header, COL_NAME),
            grade: find_column(header, COL_GRADE),
            department: find_column(header, COL_DEPARTMENT),
            course_type: find_column(header, COL_TYPE),
            area: find_column(header, COL_AREA),
        })
    }
}

fn cell(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Build a `Section` from one data row. `Err` carries the reason the row
/// was rejected.
fn parse_row(row: &[String], cols: &Columns) -> Result<Section, String> {
    let id_str = cell(row, Some(cols.id));
    let id = id_str
        .parse::<u32>()
        .map_err(|_| format!("invalid NO. '{}'", id_str))?;

    let course_id = cell(row, Some(cols.course));
    if course_id.is_empty() {
        return Err("empty course id".to_string());
    }

    // an empty credit cell counts as 0
    let credits_str = cell(row, Some(cols.credits));
    let credits = if credits_str.is_empty() {
        0
    } else {
        credits_str
            .parse::<u32>()
            .map_err(|_| format!("invalid credits '{}'", credits_str))?
    };

    let raw = cell(row, cols.schedule);
    let raw_schedule = if raw.is_empty() { None } else { Some(raw) };

    let mut section = Section::new(id, course_id, credits, slots(raw_schedule.as_deref()));
    section.raw_schedule = raw_schedule;
    section.class_section = cell(row, cols.section);
    section.name = cell(row, cols.name);
    section.grade = cell(row, cols.grade);
    section.department = cell(row, cols.department);
    section.course_type = cell(row, cols.course_type);
    section.detailed_area = cell(row, cols.area);
    Ok(section)
}

/// Convert raw rows (header first) into sections.
///
/// A missing required header is an error; a malformed data row is logged
/// and skipped so the rest of the table still loads.
pub fn sections_from_rows(rows: &[Vec<String>]) -> Result<Vec<Section>, LoadError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(LoadError::MissingColumn("NO."));
    };
    let cols = Columns::resolve(header)?;

    let mut sections = Vec::with_capacity(data.len());
    for (idx, row) in data.iter().enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        match parse_row(row, &cols) {
            Ok(s) => sections.push(s),
            // row numbers are 1-based and count the header
            Err(reason) => warn!("skipping row {}: {}", idx + 2, reason),
        }
    }
    Ok(sections)
}

/// Load every section from the CSV file or workbook at `path`.
pub fn load_sections<P: AsRef<Path>>(path: P) -> Result<Vec<Section>, LoadError> {
    let rows = read_rows(&path)?;
    let sections = sections_from_rows(&rows)?;
    debug!("loaded {} sections from {}", sections.len(), path.as_ref().display());
    Ok(sections)
}

/// Keep the sections of `pool` whose id is in `ids`, in pool order.
pub fn select_sections(pool: &[Section], ids: &[u32]) -> Vec<Section> {
    pool.iter().filter(|s| ids.contains(&s.id)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn korean_header() -> Vec<String> {
        row(&["NO.", "교과번호", "분반", "교과목명", "학년", "학점", "학부(과)", "교과구분", "세부영역", "수업시간(강의실)"])
    }

    #[test]
    fn test_rows_with_korean_header() {
        let rows = vec![
            korean_header(),
            row(&["1", "CSE101", "01", "자료구조", "2", "3", "컴퓨터공학", "전공", "", "월[1,2]/37-나602"]),
            row(&["2", "CSE102", "01", "운영체제", "3", "", "컴퓨터공학", "전공", "", ""]),
        ];
        let sections = sections_from_rows(&rows).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "자료구조");
        assert_eq!(sections[0].credits, 3);
        assert!(sections[0].slots.contains(&Slot::new(0, 2)));
        assert_eq!(sections[1].credits, 0);
        assert!(sections[1].slots.is_empty());
        assert_eq!(sections[1].raw_schedule, None);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let rows = vec![
            row(&["no", "course_id", "credits", "schedule"]),
            row(&["x", "A", "3", "월[1]"]),
            row(&["2", "A", "three", "월[1]"]),
            row(&["", "", "", ""]),
            row(&["3", "", "3", "월[1]"]),
            row(&["4", "B", "2", "화[3]"]),
        ];
        let sections = sections_from_rows(&rows).unwrap();
        assert_eq!(sections.iter().map(|s| s.id).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_missing_required_column() {
        let rows = vec![row(&["NO.", "교과번호"]), row(&["1", "A"])];
        assert!(matches!(sections_from_rows(&rows), Err(LoadError::MissingColumn("학점"))));
        assert!(matches!(sections_from_rows(&[]), Err(LoadError::MissingColumn(_))));
    }

    #[test]
    fn test_load_sections_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("시간표.csv");
        let text = "\u{feff}NO.,교과번호,분반,교과목명,학년,학점,학부(과),교과구분,세부영역,수업시간(강의실)\n\
            1,CSE101,01,자료구조,2,3,컴퓨터공학,전공,,\"월[1,2]/37-나602,수[8,9]/39-B126\"\n\
            2,CSE102,01,운영체제,3,,컴퓨터공학,전공,,화[5]/37-나602\n\
            x,CSE103,01,컴파일러,3,3,컴퓨터공학,전공,,목[1]/37-나602\n\
            4,GEN200,02,글쓰기,1,2,교양학부,교양,의사소통,\n";
        std::fs::write(&path, text).unwrap();

        let sections = load_sections(&path).unwrap();
        assert_eq!(sections.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2, 4]);

        let first = &sections[0];
        assert_eq!(first.course_id, "CSE101");
        assert_eq!(first.slots.len(), 4);
        assert!(first.slots.contains(&Slot::new(2, 9)));

        // empty credit cell
        assert_eq!(sections[1].credits, 0);
        assert!(sections[1].slots.contains(&Slot::new(1, 5)));

        // empty schedule
        assert!(sections[2].slots.is_empty());
        assert_eq!(sections[2].raw_schedule, None);
        assert_eq!(sections[2].detailed_area, "의사소통");
    }

    #[test]
    fn test_select_keeps_pool_order() {
        let pool = vec![
            Section::new(1, "A", 3, Vec::<Slot>::new()),
            Section::new(2, "B", 3, Vec::<Slot>::new()),
            Section::new(3, "C", 3, Vec::<Slot>::new()),
        ];
        let picked = select_sections(&pool, &[3, 1, 99]);
        assert_eq!(picked.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
